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
use crate::allocator::{DefaultPlaneAllocator, PlaneAllocator};
use crate::diagnostics::DiagnosticsSink;
use crate::dispatch::{scale_alpha_plane, scale_yuv_planes};
use crate::ownership::detach_group;
use crate::planar_image::PlanarImage;
use crate::scale_error::PlanarScaleError;
use crate::scaler::{PlaneResampler, Scaler};
use crate::validation::{
    check_plane_layout, check_source_extent, check_target_dimensions, ScaleVerdict,
};
use tracing::debug;

/// Resizes planar images in place using a resampler and a plane allocator
#[derive(Debug, Clone, Default)]
pub struct PlanarScaler<R = Scaler, A = DefaultPlaneAllocator> {
    resampler: R,
    allocator: A,
}

impl<R: PlaneResampler, A: PlaneAllocator> PlanarScaler<R, A> {
    pub fn new(resampler: R, allocator: A) -> Self {
        PlanarScaler {
            resampler,
            allocator,
        }
    }

    pub fn resampler(&self) -> &R {
        &self.resampler
    }

    pub fn allocator(&self) -> &A {
        &self.allocator
    }

    /// Rescales every plane of `image` to `dst_width` x `dst_height`.
    ///
    /// Chroma planes follow the image subsampling. On failure the reason is written
    /// into `diagnostics`; every check runs before planes are detached, so a rejected
    /// request leaves `image` untouched.
    ///
    /// # Errors
    ///
    /// * [PlanarScaleError::InvalidDimensions] when one of target dimensions is zero
    /// * [PlanarScaleError::SizeLimitExceeded] when target has more than `size_limit` pixels
    /// * [PlanarScaleError::UnsupportedSourceExtent] when source is wider or taller than
    ///   [crate::MAX_SOURCE_EXTENT]
    /// * layout errors when attached planes disagree with declared geometry
    pub fn scale(
        &self,
        image: &mut PlanarImage<'_>,
        dst_width: u32,
        dst_height: u32,
        size_limit: u32,
        diagnostics: &mut dyn DiagnosticsSink,
    ) -> Result<(), PlanarScaleError> {
        self.scale_impl(image, dst_width, dst_height, size_limit)
            .inspect_err(|error| diagnostics.report(&error.to_string()))
    }

    fn scale_impl(
        &self,
        image: &mut PlanarImage<'_>,
        dst_width: u32,
        dst_height: u32,
        size_limit: u32,
    ) -> Result<(), PlanarScaleError> {
        let verdict = check_target_dimensions(
            image.width,
            image.height,
            dst_width,
            dst_height,
            size_limit,
        )?;
        if verdict == ScaleVerdict::Identity {
            debug!(
                width = dst_width,
                height = dst_height,
                "Image already has requested size"
            );
            return Ok(());
        }

        if image.has_samples() {
            check_source_extent(image.width, image.height, dst_width, dst_height)?;
        }
        if !image.yuv.is_empty() || !image.alpha.is_empty() {
            check_plane_layout(image)?;
        }

        debug!(
            src_width = image.width,
            src_height = image.height,
            dst_width,
            dst_height,
            bit_depth = image.bit_depth,
            "Scaling planar image"
        );

        let source_size = image.size();
        let yuv_sources = detach_group(&mut image.yuv, &self.allocator);
        let [alpha_source] = detach_group(&mut image.alpha, &self.allocator);

        image.width = dst_width;
        image.height = dst_height;

        if yuv_sources[0].is_some() {
            scale_yuv_planes(
                &self.resampler,
                &self.allocator,
                image,
                yuv_sources,
                source_size,
            )?;
        }

        if let Some(alpha_source) = alpha_source {
            scale_alpha_plane(
                &self.resampler,
                &self.allocator,
                image,
                alpha_source,
                source_size,
            )?;
        }

        Ok(())
    }
}

/// Rescales `image` in place with [Scaler] and [DefaultPlaneAllocator]
pub fn scale_image(
    image: &mut PlanarImage<'_>,
    dst_width: u32,
    dst_height: u32,
    size_limit: u32,
    diagnostics: &mut dyn DiagnosticsSink,
) -> Result<(), PlanarScaleError> {
    PlanarScaler::<Scaler, DefaultPlaneAllocator>::default().scale(
        image,
        dst_width,
        dst_height,
        size_limit,
        diagnostics,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::TracingDiagnostics;
    use crate::dispatch::SCALE_FILTER_MODE;
    use crate::planar_image::{PlaneSet, YuvChannel};
    use crate::plane_store::{ImagePlane, PlaneStorage};
    use crate::sampler::FilterMode;
    use crate::scale_error::ScaleAxis;
    use crate::subsampling::YuvSubsampling;
    use crate::validation::MAX_SOURCE_EXTENT;
    use std::cell::RefCell;

    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    struct ResampleCall {
        sixteen_bit: bool,
        bit_depth: u32,
        src_stride: usize,
        src_width: usize,
        src_height: usize,
        dst_stride: usize,
        dst_width: usize,
        dst_height: usize,
        filter: FilterMode,
    }

    #[derive(Default)]
    struct RecordingResampler {
        inner: Scaler,
        calls: RefCell<Vec<ResampleCall>>,
    }

    impl PlaneResampler for RecordingResampler {
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
            self.calls.borrow_mut().push(ResampleCall {
                sixteen_bit: false,
                bit_depth: 8,
                src_stride,
                src_width,
                src_height,
                dst_stride,
                dst_width,
                dst_height,
                filter,
            });
            self.inner.resample_u8(
                src, src_stride, src_width, src_height, dst, dst_stride, dst_width, dst_height,
                filter,
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
            self.calls.borrow_mut().push(ResampleCall {
                sixteen_bit: true,
                bit_depth,
                src_stride,
                src_width,
                src_height,
                dst_stride,
                dst_width,
                dst_height,
                filter,
            });
            self.inner.resample_u16(
                src, src_stride, src_width, src_height, dst, dst_stride, dst_width, dst_height,
                filter, bit_depth,
            )
        }
    }

    #[derive(Default)]
    struct CountingAllocator {
        released: RefCell<Vec<*const u8>>,
        fail_allocation: bool,
    }

    impl PlaneAllocator for CountingAllocator {
        fn allocate_planes(
            &self,
            image: &mut PlanarImage<'_>,
            planes: PlaneSet,
        ) -> Result<(), PlanarScaleError> {
            if self.fail_allocation {
                return Err(PlanarScaleError::OutOfMemory(0));
            }
            DefaultPlaneAllocator.allocate_planes(image, planes)
        }

        fn release(&self, storage: PlaneStorage<'_>) {
            assert!(storage.is_owned());
            self.released.borrow_mut().push(storage.as_ptr());
        }
    }

    type TestScaler = PlanarScaler<RecordingResampler, CountingAllocator>;

    fn fill_plane(plane: &mut ImagePlane<'_>, seed: u32) {
        match &mut plane.storage {
            PlaneStorage::EightBit(store) => {
                for (i, v) in store.borrow_mut().iter_mut().enumerate() {
                    *v = ((i as u32 * 7 + seed) % 251) as u8;
                }
            }
            PlaneStorage::SixteenBit(store) => {
                for (i, v) in store.borrow_mut().iter_mut().enumerate() {
                    *v = ((i as u32 * 131 + seed) % 1021) as u16;
                }
            }
        }
    }

    fn owned_image(
        width: u32,
        height: u32,
        bit_depth: u32,
        subsampling: YuvSubsampling,
        with_alpha: bool,
    ) -> PlanarImage<'static> {
        let mut image =
            PlanarImage::alloc(width, height, bit_depth, subsampling, with_alpha).unwrap();
        for i in 0..3 {
            if let Some(plane) = image.yuv.get_mut(i) {
                fill_plane(plane, i as u32 * 17);
            }
        }
        if let Some(plane) = image.alpha.get_mut(0) {
            fill_plane(plane, 99);
        }
        image
    }

    fn plane_ptrs(image: &PlanarImage<'_>) -> Vec<*const u8> {
        image
            .yuv
            .iter()
            .chain(image.alpha.iter())
            .flatten()
            .map(|x| x.storage.as_ptr())
            .collect()
    }

    #[test]
    fn identity_keeps_planes() {
        let scaler = TestScaler::default();
        let mut image = owned_image(6, 4, 8, YuvSubsampling::Yuv420, true);
        let reference = owned_image(6, 4, 8, YuvSubsampling::Yuv420, true);
        let ptrs = plane_ptrs(&image);
        let mut diagnostics = String::new();
        assert!(scaler.scale(&mut image, 6, 4, 0, &mut diagnostics).is_ok());
        assert_eq!(plane_ptrs(&image), ptrs);
        assert_eq!(image, reference);
        assert!(scaler.resampler().calls.borrow().is_empty());
        assert!(scaler.allocator().released.borrow().is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn zero_target_leaves_image_unchanged() {
        let scaler = TestScaler::default();
        for (dst_width, dst_height) in [(0u32, 3u32), (3, 0), (0, 0)] {
            let mut image = owned_image(4, 4, 8, YuvSubsampling::Yuv420, false);
            let reference = owned_image(4, 4, 8, YuvSubsampling::Yuv420, false);
            let mut diagnostics = String::new();
            let result = scaler.scale(&mut image, dst_width, dst_height, 1000, &mut diagnostics);
            assert_eq!(
                result,
                Err(PlanarScaleError::InvalidDimensions(dst_width, dst_height))
            );
            assert_eq!(image, reference);
            assert!(diagnostics.contains(&format!("[{dst_width}x{dst_height}]")));
        }
        assert!(scaler.allocator().released.borrow().is_empty());
    }

    #[test]
    fn size_limit_leaves_image_unchanged() {
        let scaler = TestScaler::default();
        let mut image = owned_image(4, 4, 8, YuvSubsampling::Yuv420, true);
        let reference = owned_image(4, 4, 8, YuvSubsampling::Yuv420, true);
        let mut diagnostics: Vec<String> = Vec::new();
        let result = scaler.scale(&mut image, 20, 20, 100, &mut diagnostics);
        assert_eq!(
            result,
            Err(PlanarScaleError::SizeLimitExceeded {
                width: 20,
                height: 20,
                limit: 100
            })
        );
        assert_eq!(image, reference);
        assert_eq!(diagnostics.len(), 1);
        assert!(scaler.resampler().calls.borrow().is_empty());
        assert!(scaler.allocator().released.borrow().is_empty());
    }

    #[test]
    fn source_extent_is_checked_before_detaching() {
        let scaler = TestScaler::default();
        let width = MAX_SOURCE_EXTENT + 1;
        let make = || {
            PlanarImage::new(width, 1, 8, YuvSubsampling::Yuv400).with_plane(
                YuvChannel::Y,
                ImagePlane::owned_u8(vec![5u8; width as usize], width as usize),
            )
        };
        let mut image = make();
        let mut diagnostics = String::new();
        let result = scaler.scale(&mut image, 64, 1, u32::MAX, &mut diagnostics);
        assert_eq!(
            result,
            Err(PlanarScaleError::UnsupportedSourceExtent {
                axis: ScaleAxis::Width,
                source: width,
                target: 64,
            })
        );
        assert_eq!(image, make());
        assert!(scaler.allocator().released.borrow().is_empty());
        assert!(!diagnostics.is_empty());
    }

    #[test]
    fn image_without_samples_only_changes_geometry() {
        let scaler = TestScaler::default();
        let mut image = PlanarImage::new(MAX_SOURCE_EXTENT * 2, 3, 8, YuvSubsampling::Yuv420);
        let mut diagnostics = String::new();
        assert!(scaler.scale(&mut image, 5, 5, 100, &mut diagnostics).is_ok());
        assert_eq!((image.width, image.height), (5, 5));
        assert!(image.yuv.is_empty());
        assert!(image.alpha.is_empty());
        assert!(scaler.resampler().calls.borrow().is_empty());
    }

    #[test]
    fn yuv420_chroma_follows_target() {
        for (dst_width, dst_height) in [(5u32, 3u32), (7, 7), (1, 1), (12, 2), (3, 10)] {
            let scaler = TestScaler::default();
            let mut image = owned_image(8, 6, 8, YuvSubsampling::Yuv420, false);
            let mut diagnostics = String::new();
            scaler
                .scale(&mut image, dst_width, dst_height, 1 << 20, &mut diagnostics)
                .unwrap();
            let chroma_width = dst_width.div_ceil(2) as usize;
            let chroma_height = dst_height.div_ceil(2) as usize;
            for channel in [YuvChannel::U, YuvChannel::V] {
                let plane = image.plane(channel).unwrap();
                assert_eq!(plane.stride, chroma_width);
                assert_eq!(plane.storage.len(), chroma_width * chroma_height);
            }
            let calls = scaler.resampler().calls.borrow();
            assert_eq!(calls.len(), 3);
            assert_eq!((calls[0].dst_width, calls[0].dst_height), (dst_width as usize, dst_height as usize));
            for call in calls.iter().skip(1) {
                assert_eq!((call.src_width, call.src_height), (4, 3));
                assert_eq!((call.dst_width, call.dst_height), (chroma_width, chroma_height));
            }
            assert!(calls.iter().all(|x| x.filter == SCALE_FILTER_MODE));
        }
    }

    #[test]
    fn yuv422_keeps_full_chroma_height() {
        let scaler = TestScaler::default();
        let mut image = owned_image(9, 5, 8, YuvSubsampling::Yuv422, false);
        let mut diagnostics = String::new();
        scaler.scale(&mut image, 3, 7, 1 << 20, &mut diagnostics).unwrap();
        let calls = scaler.resampler().calls.borrow();
        assert_eq!((calls[1].src_width, calls[1].src_height), (5, 5));
        assert_eq!((calls[1].dst_width, calls[1].dst_height), (2, 7));
    }

    #[test]
    fn sixteen_bit_passes_sample_strides() {
        let scaler = TestScaler::default();
        // Padded rows: 3 spare samples on luma, 1 on chroma and alpha.
        let mut image = PlanarImage::new(6, 4, 10, YuvSubsampling::Yuv420)
            .with_plane(YuvChannel::Y, ImagePlane::owned_u16(vec![200u16; 9 * 4], 18))
            .with_plane(YuvChannel::U, ImagePlane::owned_u16(vec![300u16; 4 * 2], 8))
            .with_plane(YuvChannel::V, ImagePlane::owned_u16(vec![400u16; 4 * 2], 8))
            .with_alpha(ImagePlane::owned_u16(vec![1023u16; 7 * 4], 14));
        let mut diagnostics = String::new();
        scaler.scale(&mut image, 3, 2, 1000, &mut diagnostics).unwrap();
        let calls = scaler.resampler().calls.borrow();
        assert_eq!(calls.len(), 4);
        assert!(calls.iter().all(|x| x.sixteen_bit && x.bit_depth == 10));
        assert_eq!(calls[0].src_stride, 9);
        assert_eq!(calls[1].src_stride, 4);
        assert_eq!(calls[2].src_stride, 4);
        assert_eq!(calls[3].src_stride, 7);
        assert_eq!(calls[0].dst_stride, image.plane(YuvChannel::Y).unwrap().stride / 2);
        assert_eq!(calls[1].dst_stride, image.plane(YuvChannel::U).unwrap().stride / 2);
        assert_eq!(calls[3].dst_stride, image.alpha_plane().unwrap().stride / 2);
        assert_eq!(
            image.plane(YuvChannel::V).unwrap().as_u16(),
            Some(&[400u16, 400][..])
        );
        assert!(image
            .alpha_plane()
            .unwrap()
            .as_u16()
            .unwrap()
            .iter()
            .all(|&x| x == 1023));
    }

    #[test]
    fn borrowed_planes_are_not_released() {
        let mut y = vec![10u8; 16];
        let mut u = vec![20u8; 4];
        let mut v = vec![30u8; 4];
        let mut a = vec![255u8; 16];
        let scaler = TestScaler::default();
        let mut image = PlanarImage::new(4, 4, 8, YuvSubsampling::Yuv420)
            .with_plane(YuvChannel::Y, ImagePlane::borrowed_u8(&mut y, 4))
            .with_plane(YuvChannel::U, ImagePlane::borrowed_u8(&mut u, 2))
            .with_plane(YuvChannel::V, ImagePlane::borrowed_u8(&mut v, 2))
            .with_alpha(ImagePlane::borrowed_u8(&mut a, 4));
        let mut diagnostics = String::new();
        scaler.scale(&mut image, 2, 2, 100, &mut diagnostics).unwrap();
        assert!(scaler.allocator().released.borrow().is_empty());
        assert!(image.yuv.iter().flatten().all(|x| x.is_owned()));
        assert!(image.alpha_plane().unwrap().is_owned());
        assert_eq!(image.plane(YuvChannel::Y).unwrap().as_u8(), Some(&[10u8; 4][..]));
        drop(image);
        assert_eq!(y, vec![10u8; 16]);
        assert_eq!(u, vec![20u8; 4]);
        assert_eq!(v, vec![30u8; 4]);
        assert_eq!(a, vec![255u8; 16]);
    }

    #[test]
    fn owned_planes_are_released_once() {
        let scaler = TestScaler::default();
        let mut image = owned_image(8, 8, 8, YuvSubsampling::Yuv420, true);
        let mut ptrs = plane_ptrs(&image);
        let mut diagnostics = String::new();
        scaler.scale(&mut image, 3, 5, 100, &mut diagnostics).unwrap();
        let mut released = scaler.allocator().released.borrow().clone();
        assert_eq!(released.len(), 4);
        released.sort();
        ptrs.sort();
        assert_eq!(released, ptrs);
    }

    #[test]
    fn end_to_end_matches_resampler() {
        let scaler = TestScaler::default();
        let mut image = owned_image(4, 4, 8, YuvSubsampling::Yuv420, false);
        let sources: Vec<Vec<u8>> = YuvChannel::ALL
            .iter()
            .map(|&x| image.plane(x).unwrap().as_u8().unwrap().to_vec())
            .collect();
        let mut diagnostics = String::new();
        scaler.scale(&mut image, 2, 2, 100, &mut diagnostics).unwrap();

        assert_eq!((image.width, image.height), (2, 2));
        let direct = Scaler::new();
        let mut expected_y = [0u8; 4];
        direct
            .resample_u8(&sources[0], 4, 4, 4, &mut expected_y, 2, 2, 2, SCALE_FILTER_MODE)
            .unwrap();
        assert_eq!(image.plane(YuvChannel::Y).unwrap().as_u8(), Some(&expected_y[..]));
        for (channel, source) in [YuvChannel::U, YuvChannel::V].into_iter().zip(&sources[1..]) {
            let plane = image.plane(channel).unwrap();
            assert_eq!(plane.storage.len(), 1);
            let mut expected = [0u8; 1];
            direct
                .resample_u8(source, 2, 2, 2, &mut expected, 1, 1, 1, SCALE_FILTER_MODE)
                .unwrap();
            assert_eq!(plane.as_u8(), Some(&expected[..]));
        }
    }

    #[test]
    fn alpha_only_image() {
        let scaler = TestScaler::default();
        let mut image = PlanarImage::new(4, 2, 8, YuvSubsampling::Yuv444)
            .with_alpha(ImagePlane::owned_u8(vec![0, 0, 255, 255, 0, 0, 255, 255], 4));
        let mut diagnostics = String::new();
        scaler.scale(&mut image, 2, 1, 100, &mut diagnostics).unwrap();
        assert!(image.yuv.is_empty());
        assert_eq!(image.alpha_plane().unwrap().as_u8(), Some(&[0u8, 255][..]));
        assert_eq!(scaler.allocator().released.borrow().len(), 1);
    }

    #[test]
    fn mixed_ownership_is_rejected_before_detaching() {
        let mut u = vec![0u8; 4];
        let scaler = TestScaler::default();
        let mut image = PlanarImage::new(4, 4, 8, YuvSubsampling::Yuv420)
            .with_plane(YuvChannel::Y, ImagePlane::owned_u8(vec![0u8; 16], 4))
            .with_plane(YuvChannel::U, ImagePlane::borrowed_u8(&mut u, 2))
            .with_plane(YuvChannel::V, ImagePlane::owned_u8(vec![0u8; 4], 2));
        let mut diagnostics = String::new();
        let result = scaler.scale(&mut image, 2, 2, 100, &mut diagnostics);
        assert_eq!(result, Err(PlanarScaleError::MixedPlaneOwnership));
        assert_eq!(image.width, 4);
        assert!(image.plane(YuvChannel::U).is_some());
        assert!(scaler.allocator().released.borrow().is_empty());
    }

    #[test]
    fn failed_allocation_still_releases_sources() {
        let scaler = PlanarScaler::new(
            RecordingResampler::default(),
            CountingAllocator {
                fail_allocation: true,
                ..Default::default()
            },
        );
        let mut image = owned_image(4, 4, 12, YuvSubsampling::Yuv444, true);
        let mut diagnostics = String::new();
        let result = scaler.scale(&mut image, 2, 2, 100, &mut diagnostics);
        assert_eq!(result, Err(PlanarScaleError::OutOfMemory(0)));
        assert_eq!(scaler.allocator().released.borrow().len(), 4);
        assert!(image.yuv.is_empty());
        assert!(image.alpha.is_empty());
        assert!(!diagnostics.is_empty());
    }

    #[test]
    fn scale_image_uses_defaults() {
        let mut image = owned_image(16, 16, 8, YuvSubsampling::Yuv420, true);
        let mut diagnostics = TracingDiagnostics;
        scale_image(&mut image, 7, 9, 1000, &mut diagnostics).unwrap();
        assert_eq!(image.plane(YuvChannel::U).unwrap().storage.len(), 4 * 5);
        assert_eq!(image.alpha_plane().unwrap().storage.len(), 7 * 9);
        assert_eq!(
            scale_image(&mut image, 7, 0, 1000, &mut diagnostics),
            Err(PlanarScaleError::InvalidDimensions(7, 0))
        );
    }
}
