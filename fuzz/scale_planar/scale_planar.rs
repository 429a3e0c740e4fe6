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

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use planar_scale::{
    ImagePlane, PlanarImage, PlanarScaleError, YuvChannel, YuvSubsampling, scale_image,
};

#[derive(Clone, Debug, Arbitrary)]
pub struct SrcImage {
    pub src_width: u16,
    pub src_height: u16,
    pub dst_width: u16,
    pub dst_height: u16,
    pub bit_depth: u8,
    pub subsampling: u8,
    pub row_padding: u8,
    pub with_alpha: bool,
    pub borrow_planes: bool,
}

fuzz_target!(|data: SrcImage| {
    if data.src_width as usize * data.src_height as usize > 1 << 20 {
        return;
    }
    let subsampling = YuvSubsampling::try_from(data.subsampling % 4).unwrap();
    let bit_depth = (data.bit_depth % 16) as u32 + 1;
    let result = if data.borrow_planes {
        scale_borrowed(&data, subsampling, bit_depth)
    } else {
        scale_owned(&data, subsampling, bit_depth)
    };
    if let Err(error) = result {
        assert!(matches!(
            error,
            PlanarScaleError::InvalidDimensions(_, _)
                | PlanarScaleError::SizeLimitExceeded { .. }
                | PlanarScaleError::UnsupportedSourceExtent { .. }
                | PlanarScaleError::ZeroImageDimensions
        ));
    }
});

fn scale_owned(
    data: &SrcImage,
    subsampling: YuvSubsampling,
    bit_depth: u32,
) -> Result<(), PlanarScaleError> {
    let mut image = PlanarImage::alloc(
        data.src_width as u32,
        data.src_height as u32,
        bit_depth,
        subsampling,
        data.with_alpha,
    )?;
    let mut diagnostics = String::new();
    scale_image(
        &mut image,
        data.dst_width as u32,
        data.dst_height as u32,
        1 << 20,
        &mut diagnostics,
    )
}

fn scale_borrowed(
    data: &SrcImage,
    subsampling: YuvSubsampling,
    bit_depth: u32,
) -> Result<(), PlanarScaleError> {
    if bit_depth > 8 {
        return scale_owned(data, subsampling, bit_depth);
    }
    let width = data.src_width as usize;
    let height = data.src_height as usize;
    let stride = width + data.row_padding as usize;
    let (chroma_width, chroma_height) = match subsampling.chroma_shift() {
        Some((sx, sy)) => (width.div_ceil(1 << sx), height.div_ceil(1 << sy)),
        None => (0, 0),
    };
    let mut y = vec![128u8; stride * height];
    let mut u = vec![64u8; chroma_width * chroma_height];
    let mut v = vec![192u8; chroma_width * chroma_height];
    let mut a = vec![255u8; stride * height];
    let mut image = PlanarImage::new(width as u32, height as u32, bit_depth, subsampling)
        .with_plane(YuvChannel::Y, ImagePlane::borrowed_u8(&mut y, stride));
    if subsampling.chroma_shift().is_some() {
        image = image
            .with_plane(YuvChannel::U, ImagePlane::borrowed_u8(&mut u, chroma_width))
            .with_plane(YuvChannel::V, ImagePlane::borrowed_u8(&mut v, chroma_width));
    }
    if data.with_alpha {
        image = image.with_alpha(ImagePlane::borrowed_u8(&mut a, stride));
    }
    let mut diagnostics = String::new();
    scale_image(
        &mut image,
        data.dst_width as u32,
        data.dst_height as u32,
        1 << 20,
        &mut diagnostics,
    )
}
