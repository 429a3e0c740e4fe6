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
use crate::scale_error::{PlanarScaleError, PlaneBufferMismatch};
use std::fmt::Debug;

/// Sample buffer either borrowed from the caller or owned by the image
#[derive(Debug, PartialEq)]
pub enum BufferStore<'a, T: Copy + Debug> {
    Borrowed(&'a mut [T]),
    Owned(Vec<T>),
}

impl<T: Copy + Debug> BufferStore<'_, T> {
    pub fn borrow(&self) -> &[T] {
        match self {
            Self::Borrowed(p_ref) => p_ref,
            Self::Owned(vec) => vec,
        }
    }

    pub fn borrow_mut(&mut self) -> &mut [T] {
        match self {
            Self::Borrowed(p_ref) => p_ref,
            Self::Owned(vec) => vec,
        }
    }

    #[inline]
    pub fn is_owned(&self) -> bool {
        matches!(self, Self::Owned(_))
    }
}

/// Plane samples tagged with their storage width
#[derive(Debug, PartialEq)]
pub enum PlaneStorage<'a> {
    EightBit(BufferStore<'a, u8>),
    SixteenBit(BufferStore<'a, u16>),
}

impl PlaneStorage<'_> {
    #[inline]
    pub fn bytes_per_sample(&self) -> usize {
        match self {
            PlaneStorage::EightBit(_) => 1,
            PlaneStorage::SixteenBit(_) => 2,
        }
    }

    #[inline]
    pub fn storage_bits(&self) -> u32 {
        self.bytes_per_sample() as u32 * 8
    }

    /// Converts row stride in bytes into row stride in samples
    #[inline]
    pub fn stride_in_samples(&self, byte_stride: usize) -> usize {
        byte_stride / self.bytes_per_sample()
    }

    /// Number of samples held
    pub fn len(&self) -> usize {
        match self {
            PlaneStorage::EightBit(store) => store.borrow().len(),
            PlaneStorage::SixteenBit(store) => store.borrow().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_owned(&self) -> bool {
        match self {
            PlaneStorage::EightBit(store) => store.is_owned(),
            PlaneStorage::SixteenBit(store) => store.is_owned(),
        }
    }

    /// Address of the first sample, useful to track buffer identity
    pub fn as_ptr(&self) -> *const u8 {
        match self {
            PlaneStorage::EightBit(store) => store.borrow().as_ptr(),
            PlaneStorage::SixteenBit(store) => store.borrow().as_ptr().cast(),
        }
    }
}

/// One 2-D grid of samples, stride is always in bytes
#[derive(Debug, PartialEq)]
pub struct ImagePlane<'a> {
    pub storage: PlaneStorage<'a>,
    pub stride: usize,
}

impl<'a> ImagePlane<'a> {
    pub fn borrowed_u8(data: &'a mut [u8], stride: usize) -> Self {
        ImagePlane {
            storage: PlaneStorage::EightBit(BufferStore::Borrowed(data)),
            stride,
        }
    }

    pub fn borrowed_u16(data: &'a mut [u16], stride: usize) -> Self {
        ImagePlane {
            storage: PlaneStorage::SixteenBit(BufferStore::Borrowed(data)),
            stride,
        }
    }
}

impl ImagePlane<'static> {
    pub fn owned_u8(data: Vec<u8>, stride: usize) -> Self {
        ImagePlane {
            storage: PlaneStorage::EightBit(BufferStore::Owned(data)),
            stride,
        }
    }

    pub fn owned_u16(data: Vec<u16>, stride: usize) -> Self {
        ImagePlane {
            storage: PlaneStorage::SixteenBit(BufferStore::Owned(data)),
            stride,
        }
    }

    /// Placeholder that holds no allocation
    pub(crate) fn empty() -> Self {
        ImagePlane::owned_u8(Vec::new(), 0)
    }
}

impl ImagePlane<'_> {
    #[inline]
    pub fn stride_in_samples(&self) -> usize {
        self.storage.stride_in_samples(self.stride)
    }

    pub fn as_u8(&self) -> Option<&[u8]> {
        match &self.storage {
            PlaneStorage::EightBit(store) => Some(store.borrow()),
            PlaneStorage::SixteenBit(_) => None,
        }
    }

    pub fn as_u16(&self) -> Option<&[u16]> {
        match &self.storage {
            PlaneStorage::EightBit(_) => None,
            PlaneStorage::SixteenBit(store) => Some(store.borrow()),
        }
    }

    #[inline]
    pub fn is_owned(&self) -> bool {
        self.storage.is_owned()
    }

    /// Checks that plane can hold `width` x `height` samples with its stride
    pub fn check_layout(&self, width: usize, height: usize) -> Result<(), PlanarScaleError> {
        let bytes_per_sample = self.storage.bytes_per_sample();
        let min_stride = width
            .checked_mul(bytes_per_sample)
            .ok_or(PlanarScaleError::InvalidStride(usize::MAX, self.stride))?;
        if self.stride < min_stride || self.stride % bytes_per_sample != 0 {
            return Err(PlanarScaleError::InvalidStride(min_stride, self.stride));
        }
        if height == 0 {
            return Ok(());
        }
        let stride = self.stride_in_samples();
        let expected = stride
            .checked_mul(height - 1)
            .and_then(|x| x.checked_add(width))
            .ok_or(PlanarScaleError::BufferMismatch(PlaneBufferMismatch {
                expected: usize::MAX,
                width,
                height,
                stride,
                slice_len: self.storage.len(),
            }))?;
        if self.storage.len() < expected {
            return Err(PlanarScaleError::BufferMismatch(PlaneBufferMismatch {
                expected,
                width,
                height,
                stride,
                slice_len: self.storage.len(),
            }));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixteen_bit_stride_is_halved() {
        let plane = ImagePlane::owned_u16(vec![0u16; 12], 8);
        assert_eq!(plane.stride_in_samples(), 4);
        let plane = ImagePlane::owned_u8(vec![0u8; 12], 8);
        assert_eq!(plane.stride_in_samples(), 8);
    }

    #[test]
    fn ownership_tag() {
        let mut data = vec![1u8; 4];
        let borrowed = ImagePlane::borrowed_u8(&mut data, 2);
        assert!(!borrowed.is_owned());
        let owned = ImagePlane::owned_u8(vec![1u8; 4], 2);
        assert!(owned.is_owned());
        assert_eq!(borrowed.as_u8(), owned.as_u8());
        assert!(owned.as_u16().is_none());
    }

    #[test]
    fn layout_accepts_padded_last_row() {
        // Last row does not need the padding.
        let plane = ImagePlane::owned_u8(vec![0u8; 8 * 2 + 5], 8);
        assert!(plane.check_layout(5, 3).is_ok());
    }

    #[test]
    fn layout_rejects_odd_sixteen_bit_stride() {
        let plane = ImagePlane::owned_u16(vec![0u16; 64], 9);
        assert_eq!(
            plane.check_layout(4, 4),
            Err(PlanarScaleError::InvalidStride(8, 9))
        );
    }

    #[test]
    fn layout_rejects_short_buffer() {
        let plane = ImagePlane::owned_u16(vec![0u16; 15], 8);
        match plane.check_layout(4, 4) {
            Err(PlanarScaleError::BufferMismatch(mismatch)) => {
                assert_eq!(mismatch.expected, 16);
                assert_eq!(mismatch.slice_len, 15);
            }
            other => panic!("Unexpected result {other:?}"),
        }
    }
}
