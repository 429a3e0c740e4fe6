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
use std::error::Error;
use std::fmt::Display;

/// Buffer mismatch error description
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PlaneBufferMismatch {
    pub expected: usize,
    pub width: usize,
    pub height: usize,
    pub stride: usize,
    pub slice_len: usize,
}

/// Axis on which source extent was rejected
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScaleAxis {
    Width,
    Height,
}

impl Display for ScaleAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScaleAxis::Width => f.write_str("width"),
            ScaleAxis::Height => f.write_str("height"),
        }
    }
}

/// Error enumeration type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanarScaleError {
    InvalidDimensions(u32, u32),
    SizeLimitExceeded {
        width: u32,
        height: u32,
        limit: u32,
    },
    UnsupportedSourceExtent {
        axis: ScaleAxis,
        source: u32,
        target: u32,
    },
    ZeroImageDimensions,
    UnsupportedBitDepth(u32),
    BitDepthMismatch {
        bit_depth: u32,
        storage_bits: u32,
    },
    InvalidStride(usize, usize),
    BufferMismatch(PlaneBufferMismatch),
    InvalidPlaneLayout(&'static str),
    MixedPlaneOwnership,
    AllocationMismatch(&'static str),
    OutOfMemory(usize),
}

impl PlanarScaleError {
    /// Returns error as int code
    #[inline]
    pub fn code(&self) -> usize {
        match self {
            PlanarScaleError::InvalidDimensions(_, _) => 1,
            PlanarScaleError::SizeLimitExceeded { .. } => 2,
            PlanarScaleError::UnsupportedSourceExtent { .. } => 3,
            PlanarScaleError::ZeroImageDimensions => 4,
            PlanarScaleError::UnsupportedBitDepth(_) => 5,
            PlanarScaleError::BitDepthMismatch { .. } => 6,
            PlanarScaleError::InvalidStride(_, _) => 7,
            PlanarScaleError::BufferMismatch(_) => 8,
            PlanarScaleError::InvalidPlaneLayout(_) => 9,
            PlanarScaleError::MixedPlaneOwnership => 10,
            PlanarScaleError::AllocationMismatch(_) => 11,
            PlanarScaleError::OutOfMemory(_) => 12,
        }
    }
}

impl Display for PlanarScaleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanarScaleError::InvalidDimensions(width, height) => f.write_fmt(format_args!(
                "Scaling requested invalid destination dimensions [{width}x{height}]"
            )),
            PlanarScaleError::SizeLimitExceeded {
                width,
                height,
                limit,
            } => f.write_fmt(format_args!(
                "Scaling requested destination dimensions that are too large [{width}x{height}], limit is {limit} pixels"
            )),
            PlanarScaleError::UnsupportedSourceExtent {
                axis,
                source,
                target,
            } => f.write_fmt(format_args!(
                "Scaling requested invalid {axis} scale for the resampler [{source} -> {target}]"
            )),
            PlanarScaleError::ZeroImageDimensions => {
                f.write_str("One of plane dimensions is 0, this should not happen")
            }
            PlanarScaleError::UnsupportedBitDepth(depth) => {
                f.write_fmt(format_args!("Bit-depth must be in [1, 16] but got {depth}"))
            }
            PlanarScaleError::BitDepthMismatch {
                bit_depth,
                storage_bits,
            } => f.write_fmt(format_args!(
                "Image declares bit-depth {bit_depth} but plane storage holds {storage_bits}-bit samples"
            )),
            PlanarScaleError::InvalidStride(min_stride, real_stride) => f.write_fmt(format_args!(
                "Stride must be at least {min_stride} and aligned to sample size, but received {real_stride}"
            )),
            PlanarScaleError::BufferMismatch(buffer_mismatch) => f.write_fmt(format_args!(
                "Plane buffer len expected to be at least {} [w({})*h({}), stride({})] but received {}",
                buffer_mismatch.expected,
                buffer_mismatch.width,
                buffer_mismatch.height,
                buffer_mismatch.stride,
                buffer_mismatch.slice_len,
            )),
            PlanarScaleError::InvalidPlaneLayout(reason) => {
                f.write_fmt(format_args!("Invalid plane layout: {reason}"))
            }
            PlanarScaleError::MixedPlaneOwnership => {
                f.write_str("YUV planes must be either all owned or all borrowed")
            }
            PlanarScaleError::AllocationMismatch(plane) => f.write_fmt(format_args!(
                "Plane allocator did not provide the {plane} plane"
            )),
            PlanarScaleError::OutOfMemory(capacity) => f.write_fmt(format_args!(
                "There is no enough memory to allocate {capacity} samples"
            )),
        }
    }
}

impl Error for PlanarScaleError {}

macro_rules! try_vec {
    () => {
        Vec::new()
    };
    ($elem:expr; $n:expr) => {{
        let mut v = Vec::new();
        v.try_reserve_exact($n)
            .map_err(|_| crate::scale_error::PlanarScaleError::OutOfMemory($n))?;
        v.resize($n, $elem);
        v
    }};
}

pub(crate) use try_vec;
