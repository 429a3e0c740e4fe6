/*
 * Copyright (c) Radzivon Bartoshyk. All rights reserved.
 *
 * Redistribution and use in source and binary forms, with or without modification,
 * are permitted provided that the following conditions are met:
 *
 * 1.  Redistributions of source code must retain the above copyright notice, this
 * list of conditions and the following disclaimer.
 *
 * 2.  Redistributions in binary form must reproduce the above copyright notice,
 * this list of conditions and the following disclaimer in the documentation
 * and/or other materials provided with the distribution.
 *
 * 3.  Neither the name of the copyright holder nor the names of its
 * contributors may be used to endorse or promote products derived from
 * this software without specific prior written permission.
 *
 * THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
use crate::allocator::PlaneAllocator;
use crate::image_size::ImageSize;
use crate::ownership::DetachedPlane;
use crate::planar_image::{PlanarImage, PlaneSet, YuvChannel};
use crate::plane_store::{ImagePlane, PlaneStorage};
use crate::sampler::FilterMode;
use crate::scale_error::PlanarScaleError;
use crate::scaler::PlaneResampler;
use crate::subsampling::ChromaGeometry;
use tracing::trace;

/// Filter used for every plane, box has the highest quality but is the slowest
pub const SCALE_FILTER_MODE: FilterMode = FilterMode::Box;

/// Resamples `source` into `destination` using the sample width both planes share
pub(crate) fn scale_plane<R: PlaneResampler + ?Sized>(
    resampler: &R,
    source: &ImagePlane<'_>,
    source_size: ImageSize,
    destination: &mut ImagePlane<'_>,
    destination_size: ImageSize,
    bit_depth: u32,
) -> Result<(), PlanarScaleError> {
    let src_stride = source.stride_in_samples();
    let dst_stride = destination.stride_in_samples();
    match (&source.storage, &mut destination.storage) {
        (PlaneStorage::SixteenBit(src), PlaneStorage::SixteenBit(dst)) => resampler
            .resample_u16(
                src.borrow(),
                src_stride,
                source_size.width,
                source_size.height,
                dst.borrow_mut(),
                dst_stride,
                destination_size.width,
                destination_size.height,
                SCALE_FILTER_MODE,
                bit_depth,
            ),
        (PlaneStorage::EightBit(src), PlaneStorage::EightBit(dst)) => resampler.resample_u8(
            src.borrow(),
            src_stride,
            source_size.width,
            source_size.height,
            dst.borrow_mut(),
            dst_stride,
            destination_size.width,
            destination_size.height,
            SCALE_FILTER_MODE,
        ),
        (_, dst) => Err(PlanarScaleError::BitDepthMismatch {
            bit_depth,
            storage_bits: dst.storage_bits(),
        }),
    }
}

/// Allocates new YUV planes on `image` and fills them from detached `sources`.
///
/// `image` must already carry destination geometry. Each owned source is
/// released as soon as its plane is done.
pub(crate) fn scale_yuv_planes<R, A>(
    resampler: &R,
    allocator: &A,
    image: &mut PlanarImage<'_>,
    sources: [Option<DetachedPlane<'_, '_, A>>; 3],
    source_size: ImageSize,
) -> Result<(), PlanarScaleError>
where
    R: PlaneResampler + ?Sized,
    A: PlaneAllocator + ?Sized,
{
    allocator.allocate_planes(image, PlaneSet::Yuv)?;

    let destination_size = image.size();
    let bit_depth = image.bit_depth;
    let source_chroma = ChromaGeometry::from_luma(
        source_size.width as u32,
        source_size.height as u32,
        image.subsampling,
    );
    let destination_chroma =
        ChromaGeometry::from_luma(image.width, image.height, image.subsampling);

    for (channel, source) in YuvChannel::ALL.into_iter().zip(sources) {
        let Some(source) = source else {
            continue;
        };
        let (src_size, dst_size) = if channel.is_chroma() {
            match (source_chroma, destination_chroma) {
                (Some(src), Some(dst)) => (src.size(), dst.size()),
                _ => {
                    return Err(PlanarScaleError::InvalidPlaneLayout(
                        "chroma plane is attached to a monochrome image",
                    ));
                }
            }
        } else {
            (source_size, destination_size)
        };
        let destination = image
            .yuv
            .get_mut(channel as usize)
            .ok_or(PlanarScaleError::AllocationMismatch(channel.name()))?;
        trace!(
            plane = channel.name(),
            src_width = src_size.width,
            src_height = src_size.height,
            dst_width = dst_size.width,
            dst_height = dst_size.height,
            "Scaling plane"
        );
        scale_plane(
            resampler,
            source.plane(),
            src_size,
            destination,
            dst_size,
            bit_depth,
        )?;
        drop(source);
    }
    Ok(())
}

/// Alpha counterpart of [scale_yuv_planes], alpha is never subsampled
pub(crate) fn scale_alpha_plane<R, A>(
    resampler: &R,
    allocator: &A,
    image: &mut PlanarImage<'_>,
    source: DetachedPlane<'_, '_, A>,
    source_size: ImageSize,
) -> Result<(), PlanarScaleError>
where
    R: PlaneResampler + ?Sized,
    A: PlaneAllocator + ?Sized,
{
    allocator.allocate_planes(image, PlaneSet::Alpha)?;
    let destination_size = image.size();
    let bit_depth = image.bit_depth;
    let destination = image
        .alpha
        .get_mut(0)
        .ok_or(PlanarScaleError::AllocationMismatch("alpha"))?;
    trace!(
        src_width = source_size.width,
        src_height = source_size.height,
        dst_width = destination_size.width,
        dst_height = destination_size.height,
        "Scaling alpha plane"
    );
    scale_plane(
        resampler,
        source.plane(),
        source_size,
        destination,
        destination_size,
        bit_depth,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scaler::Scaler;

    #[test]
    fn sixteen_bit_plane_uses_sample_strides() {
        let source = ImagePlane::owned_u16(vec![100u16, 300, 0, 500, 700, 0], 6);
        let mut destination = ImagePlane::owned_u16(vec![0u16; 1], 2);
        scale_plane(
            &Scaler::new(),
            &source,
            ImageSize::new(2, 2),
            &mut destination,
            ImageSize::new(1, 1),
            10,
        )
        .unwrap();
        assert_eq!(destination.as_u16(), Some(&[400u16][..]));
    }

    #[test]
    fn storage_mismatch_is_reported() {
        let source = ImagePlane::owned_u16(vec![0u16; 4], 4);
        let mut destination = ImagePlane::owned_u8(vec![0u8; 1], 1);
        let result = scale_plane(
            &Scaler::new(),
            &source,
            ImageSize::new(2, 2),
            &mut destination,
            ImageSize::new(1, 1),
            16,
        );
        assert_eq!(
            result,
            Err(PlanarScaleError::BitDepthMismatch {
                bit_depth: 16,
                storage_bits: 8
            })
        );
    }
}
