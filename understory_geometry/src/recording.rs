// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A [`GeometryBackend`] that records instead of rendering.
//!
//! [`RecordingBackend`] keeps the contents of every live buffer and a log of
//! calls, which is what tests and benchmarks assert on. It never rasterizes.

use hashbrown::HashMap;
use kurbo::Size;

use crate::backend::{BufferId, GeometryBackend};
use crate::shape::{DrawGroup, PrimitiveMode, Shape, TextRun};

/// One call received by a [`RecordingBackend`].
#[derive(Clone, Debug, PartialEq)]
pub enum BackendEvent {
    /// `create_buffer`.
    Create {
        /// New buffer.
        id: BufferId,
        /// Its group.
        group: DrawGroup,
        /// Its primitive mode.
        mode: PrimitiveMode,
        /// Vertex capacity.
        len: usize,
    },
    /// `resize_buffer`.
    Resize {
        /// Buffer.
        id: BufferId,
        /// New vertex capacity.
        len: usize,
    },
    /// `write_buffer`.
    Write {
        /// Buffer.
        id: BufferId,
        /// Key of the shape written.
        key: String,
    },
    /// `destroy_buffer`.
    Destroy {
        /// Buffer.
        id: BufferId,
    },
    /// `draw_batch`.
    DrawBatch {
        /// Group drawn.
        group: DrawGroup,
        /// Buffers drawn.
        buffers: Vec<BufferId>,
    },
    /// `draw_text`.
    DrawText {
        /// Runs drawn.
        runs: Vec<TextRun>,
    },
}

/// Contents of a live buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedBuffer {
    /// Group the buffer was created in.
    pub group: DrawGroup,
    /// Primitive mode.
    pub mode: PrimitiveMode,
    /// Current vertex capacity.
    pub len: usize,
    /// Last shape written, if any.
    pub shape: Option<Shape>,
}

/// Recording geometry backend for tests.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    buffers: HashMap<BufferId, RecordedBuffer>,
    events: Vec<BackendEvent>,
    next_id: u32,
    created: usize,
    viewport: Size,
}

impl RecordingBackend {
    /// Logged calls, oldest first.
    pub fn events(&self) -> &[BackendEvent] {
        &self.events
    }

    /// Clears the log but keeps buffers.
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Number of buffers ever created.
    pub fn created(&self) -> usize {
        self.created
    }

    /// Number of buffers currently alive.
    pub fn live_buffers(&self) -> usize {
        self.buffers.len()
    }

    /// Returns a live buffer.
    pub fn buffer(&self, id: BufferId) -> Option<&RecordedBuffer> {
        self.buffers.get(&id)
    }

    /// Iterates over live buffers whose last written shape has `key`.
    pub fn buffers_with_key<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a RecordedBuffer> + 'a {
        self.buffers
            .values()
            .filter(move |b| b.shape.as_ref().is_some_and(|s| s.key == key))
    }

    /// Text runs of the most recent `draw_text` call.
    pub fn last_texts(&self) -> &[TextRun] {
        self.events
            .iter()
            .rev()
            .find_map(|e| match e {
                BackendEvent::DrawText { runs } => Some(runs.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }

    /// Number of `draw_batch` calls in the log.
    pub fn draw_calls(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, BackendEvent::DrawBatch { .. }))
            .count()
    }

    /// Last viewport size received.
    pub fn viewport(&self) -> Size {
        self.viewport
    }
}

impl GeometryBackend for RecordingBackend {
    fn create_buffer(&mut self, group: DrawGroup, mode: PrimitiveMode, len: usize) -> BufferId {
        let id = BufferId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.created += 1;
        self.buffers.insert(
            id,
            RecordedBuffer {
                group,
                mode,
                len,
                shape: None,
            },
        );
        self.events.push(BackendEvent::Create {
            id,
            group,
            mode,
            len,
        });
        id
    }

    fn resize_buffer(&mut self, id: BufferId, len: usize) {
        if let Some(buffer) = self.buffers.get_mut(&id) {
            buffer.len = len;
        }
        self.events.push(BackendEvent::Resize { id, len });
    }

    fn write_buffer(&mut self, id: BufferId, shape: &Shape) {
        if let Some(buffer) = self.buffers.get_mut(&id) {
            debug_assert_eq!(buffer.len, shape.len(), "write does not match buffer size");
            buffer.shape = Some(shape.clone());
        }
        self.events.push(BackendEvent::Write {
            id,
            key: shape.key.clone(),
        });
    }

    fn destroy_buffer(&mut self, id: BufferId) {
        self.buffers.remove(&id);
        self.events.push(BackendEvent::Destroy { id });
    }

    fn draw_batch(&mut self, group: DrawGroup, buffers: &[BufferId]) {
        self.events.push(BackendEvent::DrawBatch {
            group,
            buffers: buffers.to_vec(),
        });
    }

    fn draw_text(&mut self, runs: &[TextRun]) {
        self.events.push(BackendEvent::DrawText {
            runs: runs.to_vec(),
        });
    }

    fn set_viewport(&mut self, size: Size) {
        self.viewport = size;
    }
}
