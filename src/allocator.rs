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
use crate::planar_image::{PlanarImage, PlaneSet, YuvChannel};
use crate::plane_store::{ImagePlane, PlaneStorage};
use crate::scale_error::{try_vec, PlanarScaleError};

/// Provides storage for image planes and releases it afterwards
pub trait PlaneAllocator {
    /// Allocates planes of `planes` set for current geometry of `image` and attaches them
    fn allocate_planes(
        &self,
        image: &mut PlanarImage<'_>,
        planes: PlaneSet,
    ) -> Result<(), PlanarScaleError>;

    /// Releases single owned plane buffer
    fn release(&self, storage: PlaneStorage<'_>) {
        drop(storage);
    }
}

impl<A: PlaneAllocator + ?Sized> PlaneAllocator for &A {
    fn allocate_planes(
        &self,
        image: &mut PlanarImage<'_>,
        planes: PlaneSet,
    ) -> Result<(), PlanarScaleError> {
        (**self).allocate_planes(image, planes)
    }

    fn release(&self, storage: PlaneStorage<'_>) {
        (**self).release(storage)
    }
}

/// Heap allocator with tightly packed rows
#[derive(Debug, Copy, Clone, Default)]
pub struct DefaultPlaneAllocator;

impl DefaultPlaneAllocator {
    pub(crate) fn alloc_plane(
        size: ImageSize,
        bit_depth: u32,
    ) -> Result<ImagePlane<'static>, PlanarScaleError> {
        let samples = size
            .width
            .checked_mul(size.height)
            .ok_or(PlanarScaleError::OutOfMemory(usize::MAX))?;
        if bit_depth > 8 {
            let stride = size
                .width
                .checked_mul(2)
                .ok_or(PlanarScaleError::OutOfMemory(usize::MAX))?;
            let data = try_vec![0u16; samples];
            Ok(ImagePlane::owned_u16(data, stride))
        } else {
            let data = try_vec![0u8; samples];
            Ok(ImagePlane::owned_u8(data, size.width))
        }
    }
}

impl PlaneAllocator for DefaultPlaneAllocator {
    fn allocate_planes(
        &self,
        image: &mut PlanarImage<'_>,
        planes: PlaneSet,
    ) -> Result<(), PlanarScaleError> {
        match planes {
            PlaneSet::Yuv => {
                for channel in YuvChannel::ALL {
                    let Some(size) = image.plane_size(channel) else {
                        continue;
                    };
                    let plane = DefaultPlaneAllocator::alloc_plane(size, image.bit_depth)?;
                    image.yuv.set(channel as usize, Some(plane));
                }
            }
            PlaneSet::Alpha => {
                let plane = DefaultPlaneAllocator::alloc_plane(image.size(), image.bit_depth)?;
                image.alpha.set(0, Some(plane));
            }
        }
        Ok(())
    }
}

impl PlanarImage<'static> {
    /// Allocates image with owned planes, alpha plane is added when `with_alpha` is set
    pub fn alloc(
        width: u32,
        height: u32,
        bit_depth: u32,
        subsampling: crate::YuvSubsampling,
        with_alpha: bool,
    ) -> Result<Self, PlanarScaleError> {
        let mut image = PlanarImage::new(width, height, bit_depth, subsampling);
        DefaultPlaneAllocator.allocate_planes(&mut image, PlaneSet::Yuv)?;
        if with_alpha {
            DefaultPlaneAllocator.allocate_planes(&mut image, PlaneSet::Alpha)?;
        }
        Ok(image)
    }
}
