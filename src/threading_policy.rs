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
use crate::image_size::ImageSize;
use rayon::ThreadPool;
use std::thread::available_parallelism;

/// Controls row parallelism inside a single plane resampling
#[derive(Debug, Copy, Clone, Default, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum ThreadingPolicy {
    #[default]
    Single,
    /// Thread count grows with the destination area
    Adaptive,
    Fixed(usize),
}

impl ThreadingPolicy {
    /// Returns the number of threads to use for the given image size
    pub fn thread_count(&self, for_size: ImageSize) -> usize {
        match self {
            ThreadingPolicy::Single => 1,
            ThreadingPolicy::Fixed(thread_count) => (*thread_count).max(1),
            ThreadingPolicy::Adaptive => {
                let box_size = 256 * 256;
                let new_box_size = for_size.area();
                (new_box_size / box_size).clamp(1, 16).min(
                    available_parallelism()
                        .map(|x| x.get())
                        .unwrap_or(1),
                )
            }
        }
    }

    /// Builds a pool for the given size, `None` means run on the calling thread
    pub fn get_pool(&self, for_size: ImageSize) -> Option<ThreadPool> {
        let threads_count = self.thread_count(for_size);
        if threads_count <= 1 {
            return None;
        }
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads_count)
            .use_current_thread()
            .build()
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_never_spawns() {
        assert_eq!(
            ThreadingPolicy::Single.thread_count(ImageSize::new(8192, 8192)),
            1
        );
        assert!(ThreadingPolicy::Single
            .get_pool(ImageSize::new(8192, 8192))
            .is_none());
    }

    #[test]
    fn adaptive_small_images_stay_single() {
        assert_eq!(
            ThreadingPolicy::Adaptive.thread_count(ImageSize::new(64, 64)),
            1
        );
        assert_eq!(ThreadingPolicy::Fixed(0).thread_count(ImageSize::new(1, 1)), 1);
    }
}
