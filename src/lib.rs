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
#![deny(deprecated)]
// #![deny(unreachable_code, unused)]
#![allow(clippy::too_many_arguments)]

mod allocator;
mod convolution;
mod diagnostics;
mod dispatch;
mod filter_weights;
mod image_size;
mod mixed_storage;
mod nearest_sampler;
mod ownership;
mod planar_image;
mod planar_scaler;
mod plane_store;
mod sampler;
mod scale_error;
mod scaler;
mod subsampling;
mod threading_policy;
mod validation;

pub use allocator::{DefaultPlaneAllocator, PlaneAllocator};
pub use diagnostics::{DiagnosticsSink, TracingDiagnostics};
pub use dispatch::SCALE_FILTER_MODE;
pub use image_size::ImageSize;
pub use planar_image::{PlanarImage, PlaneGroup, PlaneOwnership, PlaneSet, YuvChannel};
pub use planar_scaler::{scale_image, PlanarScaler};
pub use plane_store::{BufferStore, ImagePlane, PlaneStorage};
pub use sampler::FilterMode;
pub use scale_error::{PlanarScaleError, PlaneBufferMismatch, ScaleAxis};
pub use scaler::{PlaneResampler, Scaler};
pub use subsampling::{ChromaGeometry, YuvSubsampling};
pub use threading_policy::ThreadingPolicy;
pub use validation::MAX_SOURCE_EXTENT;
