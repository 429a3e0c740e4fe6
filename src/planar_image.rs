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
use crate::plane_store::ImagePlane;
use crate::subsampling::{ChromaGeometry, YuvSubsampling};

/// Plane group requested from an allocator
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PlaneSet {
    Yuv,
    Alpha,
}

#[repr(usize)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum YuvChannel {
    Y = 0,
    U = 1,
    V = 2,
}

impl YuvChannel {
    pub const ALL: [YuvChannel; 3] = [YuvChannel::Y, YuvChannel::U, YuvChannel::V];

    #[inline]
    pub const fn is_chroma(self) -> bool {
        !matches!(self, YuvChannel::Y)
    }

    pub const fn name(self) -> &'static str {
        match self {
            YuvChannel::Y => "Y",
            YuvChannel::U => "U",
            YuvChannel::V => "V",
        }
    }
}

/// Who is responsible for releasing the buffers of a plane group
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlaneOwnership {
    /// Group holds no planes
    Empty,
    Owned,
    Borrowed,
    /// Some planes are owned and some are borrowed
    Mixed,
}

/// Planes sharing one ownership lifecycle
#[derive(Debug, PartialEq)]
pub struct PlaneGroup<'a, const N: usize> {
    planes: [Option<ImagePlane<'a>>; N],
}

impl<const N: usize> Default for PlaneGroup<'_, N> {
    fn default() -> Self {
        PlaneGroup {
            planes: std::array::from_fn(|_| None),
        }
    }
}

impl<'a, const N: usize> PlaneGroup<'a, N> {
    pub fn get(&self, index: usize) -> Option<&ImagePlane<'a>> {
        self.planes.get(index).and_then(|x| x.as_ref())
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut ImagePlane<'a>> {
        self.planes.get_mut(index).and_then(|x| x.as_mut())
    }

    /// Replaces plane at `index`, returning the previous one
    pub fn set(&mut self, index: usize, plane: Option<ImagePlane<'a>>) -> Option<ImagePlane<'a>> {
        match self.planes.get_mut(index) {
            Some(slot) => std::mem::replace(slot, plane),
            None => plane,
        }
    }

    /// Detaches every plane, leaving the group empty
    pub fn take(&mut self) -> [Option<ImagePlane<'a>>; N] {
        std::mem::replace(&mut self.planes, std::array::from_fn(|_| None))
    }

    pub fn is_empty(&self) -> bool {
        self.planes.iter().all(|x| x.is_none())
    }

    pub fn ownership(&self) -> PlaneOwnership {
        let mut owned = 0usize;
        let mut borrowed = 0usize;
        for plane in self.planes.iter().flatten() {
            if plane.is_owned() {
                owned += 1;
            } else {
                borrowed += 1;
            }
        }
        match (owned, borrowed) {
            (0, 0) => PlaneOwnership::Empty,
            (_, 0) => PlaneOwnership::Owned,
            (0, _) => PlaneOwnership::Borrowed,
            _ => PlaneOwnership::Mixed,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<&ImagePlane<'a>>> {
        self.planes.iter().map(|x| x.as_ref())
    }
}

/// Planar image descriptor, resized in place by [crate::PlanarScaler]
#[derive(Debug, PartialEq)]
pub struct PlanarImage<'a> {
    /// Luma and alpha width in samples
    pub width: u32,
    /// Luma and alpha height in samples
    pub height: u32,
    /// 8 uses 8-bit storage, anything above uses 16-bit storage
    pub bit_depth: u32,
    pub subsampling: YuvSubsampling,
    pub yuv: PlaneGroup<'a, 3>,
    pub alpha: PlaneGroup<'a, 1>,
}

impl<'a> PlanarImage<'a> {
    /// Creates descriptor without any planes attached
    pub fn new(width: u32, height: u32, bit_depth: u32, subsampling: YuvSubsampling) -> Self {
        PlanarImage {
            width,
            height,
            bit_depth,
            subsampling,
            yuv: PlaneGroup::default(),
            alpha: PlaneGroup::default(),
        }
    }

    pub fn with_plane(mut self, channel: YuvChannel, plane: ImagePlane<'a>) -> Self {
        self.yuv.set(channel as usize, Some(plane));
        self
    }

    pub fn with_alpha(mut self, plane: ImagePlane<'a>) -> Self {
        self.alpha.set(0, Some(plane));
        self
    }

    #[inline]
    pub fn plane(&self, channel: YuvChannel) -> Option<&ImagePlane<'a>> {
        self.yuv.get(channel as usize)
    }

    #[inline]
    pub fn alpha_plane(&self) -> Option<&ImagePlane<'a>> {
        self.alpha.get(0)
    }

    #[inline]
    pub fn uses_16bit_storage(&self) -> bool {
        self.bit_depth > 8
    }

    /// Whether any plane that carries samples is attached
    pub fn has_samples(&self) -> bool {
        self.plane(YuvChannel::Y).is_some() || self.alpha_plane().is_some()
    }

    #[inline]
    pub fn size(&self) -> ImageSize {
        ImageSize::new(self.width as usize, self.height as usize)
    }

    /// Plane dimensions for current geometry, chroma is `None` on monochrome images
    pub fn plane_size(&self, channel: YuvChannel) -> Option<ImageSize> {
        if channel.is_chroma() {
            ChromaGeometry::from_luma(self.width, self.height, self.subsampling).map(|x| x.size())
        } else {
            Some(self.size())
        }
    }
}
