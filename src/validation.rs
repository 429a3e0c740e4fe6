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
use crate::planar_image::{PlanarImage, PlaneOwnership, YuvChannel};
use crate::scale_error::{PlanarScaleError, ScaleAxis};

/// Largest source extent the resampler handles without overflowing its arithmetic
pub const MAX_SOURCE_EXTENT: u32 = 16384;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum ScaleVerdict {
    /// Target equals current size, nothing to do
    Identity,
    Rescale,
}

pub(crate) fn check_target_dimensions(
    src_width: u32,
    src_height: u32,
    dst_width: u32,
    dst_height: u32,
    size_limit: u32,
) -> Result<ScaleVerdict, PlanarScaleError> {
    if src_width == dst_width && src_height == dst_height {
        return Ok(ScaleVerdict::Identity);
    }
    if dst_width == 0 || dst_height == 0 {
        return Err(PlanarScaleError::InvalidDimensions(dst_width, dst_height));
    }
    if dst_width > size_limit / dst_height {
        return Err(PlanarScaleError::SizeLimitExceeded {
            width: dst_width,
            height: dst_height,
            limit: size_limit,
        });
    }
    Ok(ScaleVerdict::Rescale)
}

pub(crate) fn check_source_extent(
    src_width: u32,
    src_height: u32,
    dst_width: u32,
    dst_height: u32,
) -> Result<(), PlanarScaleError> {
    if src_width > MAX_SOURCE_EXTENT {
        return Err(PlanarScaleError::UnsupportedSourceExtent {
            axis: ScaleAxis::Width,
            source: src_width,
            target: dst_width,
        });
    }
    if src_height > MAX_SOURCE_EXTENT {
        return Err(PlanarScaleError::UnsupportedSourceExtent {
            axis: ScaleAxis::Height,
            source: src_height,
            target: dst_height,
        });
    }
    Ok(())
}

/// Verifies that attached planes agree with the declared geometry
pub(crate) fn check_plane_layout(image: &PlanarImage<'_>) -> Result<(), PlanarScaleError> {
    if image.bit_depth == 0 || image.bit_depth > 16 {
        return Err(PlanarScaleError::UnsupportedBitDepth(image.bit_depth));
    }
    if image.width == 0 || image.height == 0 {
        return Err(PlanarScaleError::ZeroImageDimensions);
    }

    let has_luma = image.plane(YuvChannel::Y).is_some();
    for channel in [YuvChannel::U, YuvChannel::V] {
        let has_chroma = image.plane(channel).is_some();
        if has_chroma && !image.subsampling.has_chroma() {
            return Err(PlanarScaleError::InvalidPlaneLayout(
                "chroma plane is attached to a monochrome image",
            ));
        }
        if has_chroma && !has_luma {
            return Err(PlanarScaleError::InvalidPlaneLayout(
                "chroma plane is attached without a luma plane",
            ));
        }
        if has_luma && !has_chroma && image.subsampling.has_chroma() {
            return Err(PlanarScaleError::InvalidPlaneLayout(
                "chroma plane is missing for a subsampled image",
            ));
        }
    }

    if image.yuv.ownership() == PlaneOwnership::Mixed {
        return Err(PlanarScaleError::MixedPlaneOwnership);
    }

    let storage_bits = if image.uses_16bit_storage() { 16 } else { 8 };

    let planes = YuvChannel::ALL
        .iter()
        .filter_map(|&channel| Some((image.plane(channel)?, image.plane_size(channel)?)))
        .chain(image.alpha_plane().map(|x| (x, image.size())));

    for (plane, size) in planes {
        if plane.storage.storage_bits() != storage_bits {
            return Err(PlanarScaleError::BitDepthMismatch {
                bit_depth: image.bit_depth,
                storage_bits: plane.storage.storage_bits(),
            });
        }
        plane.check_layout(size.width, size.height)?;
    }
    Ok(())
}
