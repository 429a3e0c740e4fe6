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

/// Part of the source sample centred at `dx` covered by the footprint `[-radius, radius)`
#[inline(always)]
pub(crate) fn box_coverage(dx: f32, radius: f32) -> f32 {
    ((dx + 0.5f32).min(radius) - (dx - 0.5f32).max(-radius)).max(0f32)
}

#[inline(always)]
pub(crate) fn bilinear(x: f32) -> f32 {
    let x = x.abs();
    if x < 1f32 {
        1.0f32 - x
    } else {
        0f32
    }
}

#[inline(always)]
fn bilinear_kernel(dx: f32, radius: f32) -> f32 {
    bilinear(dx / radius)
}

/// Filter kernel selector understood by [crate::PlaneResampler]
#[derive(Debug, Copy, Clone, Default, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum FilterMode {
    /// Point sampling
    Nearest,
    Bilinear,
    /// Area averaging, highest quality and slowest
    #[default]
    Box,
}

#[derive(Copy, Clone)]
pub(crate) struct ResamplingFilter {
    /// Weight of a source sample `dx` samples away from the centre, given the footprint radius
    pub kernel: fn(f32, f32) -> f32,
    /// Kernel radius at 1:1 scale
    pub support: f32,
    /// Kernel grows with downscaling factor
    pub is_resizable_kernel: bool,
}

impl ResamplingFilter {
    fn new(
        kernel: fn(f32, f32) -> f32,
        support: f32,
        is_resizable_kernel: bool,
    ) -> ResamplingFilter {
        ResamplingFilter {
            kernel,
            support,
            is_resizable_kernel,
        }
    }
}

impl FilterMode {
    pub(crate) fn get_resampling_filter(&self) -> ResamplingFilter {
        match self {
            // Just a stab for nearest, it never reaches convolution
            FilterMode::Nearest => ResamplingFilter::new(box_coverage, 0.5f32, false),
            FilterMode::Bilinear => ResamplingFilter::new(bilinear_kernel, 1f32, true),
            FilterMode::Box => ResamplingFilter::new(box_coverage, 0.5f32, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_coverage_is_overlap() {
        assert_eq!(box_coverage(0f32, 0.5f32), 1f32);
        assert_eq!(box_coverage(0.75f32, 0.75f32), 0.5f32);
        assert_eq!(box_coverage(-0.25f32, 0.75f32), 1f32);
        assert_eq!(box_coverage(1.5f32, 1f32), 0f32);
        assert_eq!(box_coverage(0f32, 0.25f32), 0.5f32);
    }

    #[test]
    fn bilinear_is_triangle() {
        assert_eq!(bilinear(0f32), 1f32);
        assert_eq!(bilinear(-0.25f32), 0.75f32);
        assert_eq!(bilinear(1f32), 0f32);
        assert_eq!(bilinear_kernel(1f32, 2f32), 0.5f32);
    }
}
