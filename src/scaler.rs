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
use crate::convolution::{convolve_horizontal, convolve_vertical};
use crate::filter_weights::FilterWeights;
use crate::image_size::ImageSize;
use crate::mixed_storage::MixedStorage;
use crate::nearest_sampler::resize_nearest;
use crate::sampler::FilterMode;
use crate::scale_error::{try_vec, PlanarScaleError, PlaneBufferMismatch};
use crate::threading_policy::ThreadingPolicy;
use num_traits::AsPrimitive;

/// Resamples one plane into another, all strides here are in samples
pub trait PlaneResampler {
    fn resample_u8(
        &self,
        src: &[u8],
        src_stride: usize,
        src_width: usize,
        src_height: usize,
        dst: &mut [u8],
        dst_stride: usize,
        dst_width: usize,
        dst_height: usize,
        filter: FilterMode,
    ) -> Result<(), PlanarScaleError>;

    /// Samples are expected to fit into `bit_depth` bits, results are clamped to it
    fn resample_u16(
        &self,
        src: &[u16],
        src_stride: usize,
        src_width: usize,
        src_height: usize,
        dst: &mut [u16],
        dst_stride: usize,
        dst_width: usize,
        dst_height: usize,
        filter: FilterMode,
        bit_depth: u32,
    ) -> Result<(), PlanarScaleError>;
}

#[derive(Debug, Copy, Clone, Default)]
/// Separable plane resampler
pub struct Scaler {
    pub(crate) threading_policy: ThreadingPolicy,
}

impl Scaler {
    pub fn new() -> Self {
        Scaler {
            threading_policy: ThreadingPolicy::Single,
        }
    }

    pub fn set_threading_policy(&mut self, threading_policy: ThreadingPolicy) {
        self.threading_policy = threading_policy;
    }

    pub fn threading_policy(&self) -> ThreadingPolicy {
        self.threading_policy
    }

    fn resample_plane<T>(
        &self,
        src: &[T],
        src_size: ImageSize,
        src_stride: usize,
        dst: &mut [T],
        dst_size: ImageSize,
        dst_stride: usize,
        filter: FilterMode,
        bit_depth: u32,
    ) -> Result<(), PlanarScaleError>
    where
        T: Copy + Send + Sync + AsPrimitive<f32>,
        f32: MixedStorage<T>,
    {
        check_plane(src, src_size, src_stride)?;
        check_plane(dst, dst_size, dst_stride)?;

        if filter == FilterMode::Nearest {
            resize_nearest(
                src,
                src_stride,
                src_size.width,
                src_size.height,
                dst,
                dst_stride,
                dst_size.width,
                dst_size.height,
            );
            return Ok(());
        }

        let vertical_filters = FilterWeights::generate(src_size.height, dst_size.height, filter);
        let horizontal_filters = FilterWeights::generate(src_size.width, dst_size.width, filter);

        let pool = self.threading_policy.get_pool(dst_size);

        let mut intermediate = try_vec![0f32; src_size.width * dst_size.height];
        convolve_vertical(
            src,
            src_stride,
            src_size.width,
            &vertical_filters,
            &mut intermediate,
            &pool,
        );
        convolve_horizontal(
            &intermediate,
            src_size.width,
            &horizontal_filters,
            dst,
            dst_stride,
            dst_size.height,
            bit_depth,
            &pool,
        );
        Ok(())
    }
}

fn check_plane<T>(data: &[T], size: ImageSize, stride: usize) -> Result<(), PlanarScaleError> {
    if size.is_empty() {
        return Err(PlanarScaleError::ZeroImageDimensions);
    }
    if stride < size.width {
        return Err(PlanarScaleError::InvalidStride(size.width, stride));
    }
    let expected = stride
        .checked_mul(size.height - 1)
        .and_then(|x| x.checked_add(size.width))
        .unwrap_or(usize::MAX);
    if data.len() < expected {
        return Err(PlanarScaleError::BufferMismatch(PlaneBufferMismatch {
            expected,
            width: size.width,
            height: size.height,
            stride,
            slice_len: data.len(),
        }));
    }
    Ok(())
}

impl PlaneResampler for Scaler {
    fn resample_u8(
        &self,
        src: &[u8],
        src_stride: usize,
        src_width: usize,
        src_height: usize,
        dst: &mut [u8],
        dst_stride: usize,
        dst_width: usize,
        dst_height: usize,
        filter: FilterMode,
    ) -> Result<(), PlanarScaleError> {
        self.resample_plane(
            src,
            ImageSize::new(src_width, src_height),
            src_stride,
            dst,
            ImageSize::new(dst_width, dst_height),
            dst_stride,
            filter,
            8,
        )
    }

    fn resample_u16(
        &self,
        src: &[u16],
        src_stride: usize,
        src_width: usize,
        src_height: usize,
        dst: &mut [u16],
        dst_stride: usize,
        dst_width: usize,
        dst_height: usize,
        filter: FilterMode,
        bit_depth: u32,
    ) -> Result<(), PlanarScaleError> {
        if bit_depth == 0 || bit_depth > 16 {
            return Err(PlanarScaleError::UnsupportedBitDepth(bit_depth));
        }
        self.resample_plane(
            src,
            ImageSize::new(src_width, src_height),
            src_stride,
            dst,
            ImageSize::new(dst_width, dst_height),
            dst_stride,
            filter,
            bit_depth,
        )
    }
}
