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
use crate::allocator::PlaneAllocator;
use crate::planar_image::{PlaneGroup, PlaneOwnership};
use crate::plane_store::ImagePlane;
use tracing::trace;

/// Plane detached from an image, released through the allocator when dropped if it was owned
pub(crate) struct DetachedPlane<'a, 'r, A: PlaneAllocator + ?Sized> {
    plane: ImagePlane<'a>,
    owned: bool,
    allocator: &'r A,
}

impl<'a, 'r, A: PlaneAllocator + ?Sized> DetachedPlane<'a, 'r, A> {
    #[inline]
    pub(crate) fn plane(&self) -> &ImagePlane<'a> {
        &self.plane
    }

    #[cfg(test)]
    pub(crate) fn was_owned(&self) -> bool {
        self.owned
    }
}

impl<A: PlaneAllocator + ?Sized> Drop for DetachedPlane<'_, '_, A> {
    fn drop(&mut self) {
        let plane = std::mem::replace(&mut self.plane, ImagePlane::empty());
        if self.owned {
            trace!(stride = plane.stride, "Releasing detached plane");
            self.allocator.release(plane.storage);
        }
    }
}

/// Detaches all planes of the group, the group is left empty.
///
/// Ownership is snapshotted for the whole group before detaching,
/// so every returned plane carries the same release decision.
pub(crate) fn detach_group<'a, 'r, A: PlaneAllocator + ?Sized, const N: usize>(
    group: &mut PlaneGroup<'a, N>,
    allocator: &'r A,
) -> [Option<DetachedPlane<'a, 'r, A>>; N] {
    let owned = group.ownership() == PlaneOwnership::Owned;
    group.take().map(|plane| {
        plane.map(|plane| DetachedPlane {
            plane,
            owned,
            allocator,
        })
    })
}
