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

/// Converts accumulator value back into storage sample, clamped to `bit_depth`
pub(crate) trait MixedStorage<T> {
    fn to_mixed(self, bit_depth: u32) -> T;
}

impl MixedStorage<u8> for f32 {
    #[inline(always)]
    #[allow(clippy::manual_clamp)]
    fn to_mixed(self, _: u32) -> u8 {
        self.round().max(0f32).min(u8::MAX as f32) as u8
    }
}

impl MixedStorage<u16> for f32 {
    #[inline(always)]
    #[allow(clippy::manual_clamp)]
    fn to_mixed(self, bit_depth: u32) -> u16 {
        let max_colors = ((1u32 << bit_depth) - 1) as f32;
        self.round().max(0f32).min(max_colors) as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_storage_u8() {
        let r: u8 = 755.6532f32.to_mixed(8);
        assert_eq!(r, 255);
        let r: u8 = (-755.6532f32).to_mixed(8);
        assert_eq!(r, 0);
        let r: u8 = 127.5f32.to_mixed(8);
        assert_eq!(r, 128);
    }

    #[test]
    fn mixed_storage_u16() {
        let r: u16 = 70000.4f32.to_mixed(16);
        assert_eq!(r, u16::MAX);
        let r: u16 = 1023.2f32.to_mixed(10);
        assert_eq!(r, 1023);
        let r: u16 = 1500.7f32.to_mixed(10);
        assert_eq!(r, 1023);
        let r: u16 = 4096f32.to_mixed(12);
        assert_eq!(r, 4095);
    }
}
