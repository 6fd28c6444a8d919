// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rendering seam.

use kurbo::Size;

use crate::shape::{DrawGroup, PrimitiveMode, Shape, TextRun};

/// Opaque handle to a vertex buffer owned by a [`GeometryBackend`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BufferId(pub u32);

/// A sink for retained vertex buffers and batched draws.
///
/// Implementations own GPU (or fake) buffers. IDs must stay valid and refer
/// to the same buffer until [`destroy_buffer`](Self::destroy_buffer) is
/// called. Nothing here rasterizes on its own schedule: the only calls that
/// produce pixels are [`draw_batch`](Self::draw_batch) and
/// [`draw_text`](Self::draw_text), which a [`Batch`](crate::Batch) issues
/// once per group per frame.
pub trait GeometryBackend {
    /// Allocates a buffer for `len` vertices drawn as `mode` in `group`.
    fn create_buffer(&mut self, group: DrawGroup, mode: PrimitiveMode, len: usize) -> BufferId;
    /// Changes the vertex capacity of an existing buffer.
    fn resize_buffer(&mut self, id: BufferId, len: usize);
    /// Uploads vertex, color and texture data. `shape.len()` matches the
    /// buffer's current size.
    fn write_buffer(&mut self, id: BufferId, shape: &Shape);
    /// Releases a buffer.
    fn destroy_buffer(&mut self, id: BufferId);
    /// Draws every listed buffer with the state of `group`.
    fn draw_batch(&mut self, group: DrawGroup, buffers: &[BufferId]);
    /// Draws text on top of all groups.
    fn draw_text(&mut self, runs: &[TextRun]);
    /// Informs the backend of the window size in pixels.
    fn set_viewport(&mut self, size: Size) {
        let _ = size;
    }
}
