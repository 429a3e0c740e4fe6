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

/// Declares how chroma planes are laid out relative to luma
#[repr(u8)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum YuvSubsampling {
    /// Monochrome, there are no chroma planes at all
    Yuv400 = 0,
    #[default]
    Yuv420 = 1,
    Yuv422 = 2,
    Yuv444 = 3,
}

impl YuvSubsampling {
    /// Returns horizontal and vertical chroma shift, `None` for monochrome images
    #[inline]
    pub const fn chroma_shift(self) -> Option<(u32, u32)> {
        match self {
            YuvSubsampling::Yuv400 => None,
            YuvSubsampling::Yuv420 => Some((1, 1)),
            YuvSubsampling::Yuv422 => Some((1, 0)),
            YuvSubsampling::Yuv444 => Some((0, 0)),
        }
    }

    #[inline]
    pub const fn has_chroma(self) -> bool {
        self.chroma_shift().is_some()
    }
}

impl TryFrom<u8> for YuvSubsampling {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(YuvSubsampling::Yuv400),
            1 => Ok(YuvSubsampling::Yuv420),
            2 => Ok(YuvSubsampling::Yuv422),
            3 => Ok(YuvSubsampling::Yuv444),
            _ => Err(value),
        }
    }
}

/// Rounds up `value / 2^shift`
#[inline]
pub(crate) const fn chroma_extent(value: u32, shift: u32) -> u32 {
    ((value as u64 + (1u64 << shift) - 1) >> shift) as u32
}

/// Chroma plane dimensions derived from luma dimensions
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ChromaGeometry {
    pub width: u32,
    pub height: u32,
}

impl ChromaGeometry {
    pub fn from_luma(width: u32, height: u32, subsampling: YuvSubsampling) -> Option<Self> {
        let (shift_x, shift_y) = subsampling.chroma_shift()?;
        Some(ChromaGeometry {
            width: chroma_extent(width, shift_x),
            height: chroma_extent(height, shift_y),
        })
    }

    #[inline]
    pub fn size(&self) -> ImageSize {
        ImageSize::new(self.width as usize, self.height as usize)
    }
}
