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
use crate::sampler::FilterMode;

#[derive(Debug, Clone)]
pub(crate) struct FilterWeights<T> {
    pub weights: Vec<T>,
    pub bounds: Vec<FilterBounds>,
    pub kernel_size: usize,
    pub distinct_elements: usize,
}

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq)]
pub(crate) struct FilterBounds {
    pub start: usize,
    pub size: usize,
}

impl FilterBounds {
    pub(crate) fn new(start: usize, size: usize) -> FilterBounds {
        FilterBounds { start, size }
    }
}

impl<T> FilterWeights<T> {
    pub(crate) fn new(
        weights: Vec<T>,
        kernel_size: usize,
        distinct_elements: usize,
        bounds: Vec<FilterBounds>,
    ) -> FilterWeights<T> {
        FilterWeights::<T> {
            weights,
            bounds,
            kernel_size,
            distinct_elements,
        }
    }

    /// Weights and bounds of output sample `index`
    #[inline]
    pub(crate) fn row(&self, index: usize) -> (&FilterBounds, &[T]) {
        let bounds = &self.bounds[index];
        let offset = index * self.kernel_size;
        (bounds, &self.weights[offset..offset + bounds.size])
    }
}

impl FilterWeights<f32> {
    /// Builds normalized weights mapping `in_size` samples onto `out_size` samples
    pub(crate) fn generate(in_size: usize, out_size: usize, mode: FilterMode) -> FilterWeights<f32> {
        let filter = mode.get_resampling_filter();
        let scale = in_size as f32 / out_size as f32;
        let filter_scale_cutoff = match filter.is_resizable_kernel {
            true => scale.max(1f32),
            false => 1f32,
        };
        let filter_radius = filter.support * filter_scale_cutoff;
        let kernel_size = (filter_radius * 2f32).ceil() as usize + 2;

        let mut weights: Vec<f32> = vec![0f32; kernel_size * out_size];
        let mut bounds: Vec<FilterBounds> = vec![FilterBounds::new(0, 0); out_size];

        for (i, (bound, local_filters)) in bounds
            .iter_mut()
            .zip(weights.chunks_exact_mut(kernel_size))
            .enumerate()
        {
            let center_x = ((i as f32 + 0.5f32) * scale).min(in_size as f32);

            let start = (center_x - filter_radius).floor().max(0f32) as usize;
            let end = ((center_x + filter_radius).ceil().min(in_size as f32) as usize)
                .min(start + kernel_size)
                .max(start + 1)
                .min(in_size);
            let start = start.min(end.saturating_sub(1));

            let mut weights_sum: f32 = 0f32;
            let size = end - start;

            for (k, weight) in (start..end).zip(local_filters.iter_mut()) {
                let dx = (k as f32 + 0.5f32) - center_x;
                *weight = (filter.kernel)(dx, filter_radius);
                weights_sum += *weight;
            }

            if weights_sum != 0f32 {
                let recpeq = 1f32 / weights_sum;
                for weight in local_filters.iter_mut().take(size) {
                    *weight *= recpeq;
                }
            } else {
                // Kernel missed every sample, fall back to the closest one.
                let nearest = (center_x as usize).clamp(start, end - 1);
                local_filters.iter_mut().for_each(|x| *x = 0f32);
                local_filters[nearest - start] = 1f32;
            }

            *bound = FilterBounds::new(start, size);
        }

        FilterWeights::new(weights, kernel_size, out_size, bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_halving_averages_pairs() {
        let weights = FilterWeights::generate(4, 2, FilterMode::Box);
        let (bounds, row) = weights.row(0);
        assert_eq!(*bounds, FilterBounds::new(0, 2));
        assert_eq!(row, &[0.5f32, 0.5f32]);
        let (bounds, row) = weights.row(1);
        assert_eq!(*bounds, FilterBounds::new(2, 2));
        assert_eq!(row, &[0.5f32, 0.5f32]);
    }

    #[test]
    fn box_weights_follow_sample_coverage() {
        // 3 -> 2: every output covers one and a half source samples.
        let weights = FilterWeights::generate(3, 2, FilterMode::Box);
        let (bounds, row) = weights.row(0);
        assert_eq!(*bounds, FilterBounds::new(0, 2));
        assert!((row[0] - 2f32 / 3f32).abs() < 1e-6);
        assert!((row[1] - 1f32 / 3f32).abs() < 1e-6);
        let (bounds, row) = weights.row(1);
        assert_eq!(*bounds, FilterBounds::new(1, 2));
        assert!((row[0] - 1f32 / 3f32).abs() < 1e-6);
        assert!((row[1] - 2f32 / 3f32).abs() < 1e-6);
    }

    #[test]
    fn weights_are_normalized() {
        for (in_size, out_size) in [(7usize, 3usize), (3, 11), (16, 5), (1, 4), (5, 1)] {
            for mode in [FilterMode::Box, FilterMode::Bilinear] {
                let weights = FilterWeights::generate(in_size, out_size, mode);
                for i in 0..out_size {
                    let (bounds, row) = weights.row(i);
                    assert!(bounds.start + bounds.size <= in_size);
                    let sum: f32 = row.iter().sum();
                    assert!((sum - 1f32).abs() < 1e-5, "sum {sum} for {in_size}->{out_size}");
                }
            }
        }
    }
}
