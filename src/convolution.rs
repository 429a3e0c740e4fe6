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
use crate::filter_weights::FilterWeights;
use crate::mixed_storage::MixedStorage;
use num_traits::AsPrimitive;
use rayon::iter::{IndexedParallelIterator, ParallelIterator};
use rayon::prelude::{ParallelSlice, ParallelSliceMut};
use rayon::ThreadPool;

#[inline]
fn convolve_column_row<T>(
    src: &[T],
    src_stride: usize,
    filter_weights: &FilterWeights<f32>,
    y: usize,
    row: &mut [f32],
) where
    T: Copy + AsPrimitive<f32>,
{
    let (bounds, weights) = filter_weights.row(y);
    row.iter_mut().for_each(|x| *x = 0f32);
    for (k, &weight) in weights.iter().enumerate() {
        let src_row = &src[(bounds.start + k) * src_stride..];
        for (dst, &v) in row.iter_mut().zip(src_row.iter()) {
            *dst += v.as_() * weight;
        }
    }
}

#[inline]
fn convolve_row<T>(
    src_row: &[f32],
    filter_weights: &FilterWeights<f32>,
    dst_row: &mut [T],
    bit_depth: u32,
) where
    f32: MixedStorage<T>,
{
    for (x, dst) in dst_row.iter_mut().enumerate() {
        let (bounds, weights) = filter_weights.row(x);
        let sum: f32 = weights
            .iter()
            .zip(src_row[bounds.start..].iter())
            .map(|(&w, &v)| w * v)
            .sum();
        *dst = sum.to_mixed(bit_depth);
    }
}

/// Vertical pass, writes `filter_weights.distinct_elements` rows of `src_width` into `intermediate`
pub(crate) fn convolve_vertical<T>(
    src: &[T],
    src_stride: usize,
    src_width: usize,
    filter_weights: &FilterWeights<f32>,
    intermediate: &mut [f32],
    pool: &Option<ThreadPool>,
) where
    T: Copy + Send + Sync + AsPrimitive<f32>,
{
    if let Some(pool) = pool {
        pool.install(|| {
            intermediate
                .par_chunks_exact_mut(src_width)
                .enumerate()
                .for_each(|(y, row)| {
                    convolve_column_row(src, src_stride, filter_weights, y, row);
                });
        });
    } else {
        intermediate
            .chunks_exact_mut(src_width)
            .enumerate()
            .for_each(|(y, row)| {
                convolve_column_row(src, src_stride, filter_weights, y, row);
            });
    }
}

/// Horizontal pass from packed `intermediate` rows into strided destination
pub(crate) fn convolve_horizontal<T>(
    intermediate: &[f32],
    src_width: usize,
    filter_weights: &FilterWeights<f32>,
    dst: &mut [T],
    dst_stride: usize,
    dst_height: usize,
    bit_depth: u32,
    pool: &Option<ThreadPool>,
) where
    T: Copy + Send + Sync,
    f32: MixedStorage<T>,
{
    let dst_width = filter_weights.distinct_elements;
    if let Some(pool) = pool {
        pool.install(|| {
            dst.par_chunks_mut(dst_stride)
                .take(dst_height)
                .zip(intermediate.par_chunks_exact(src_width))
                .for_each(|(dst_row, src_row)| {
                    convolve_row(src_row, filter_weights, &mut dst_row[..dst_width], bit_depth);
                });
        });
    } else {
        dst.chunks_mut(dst_stride)
            .take(dst_height)
            .zip(intermediate.chunks_exact(src_width))
            .for_each(|(dst_row, src_row)| {
                convolve_row(src_row, filter_weights, &mut dst_row[..dst_width], bit_depth);
            });
    }
}
