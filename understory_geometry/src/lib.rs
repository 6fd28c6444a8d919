// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Geometry: retained shape buffers for immediate-style widgets.
//!
//! Widgets describe what they look like as a [`ShapeList`]: named vertex
//! lists plus text runs. A [`GeometryCache`] per widget turns repeated
//! paints into buffer updates, and a [`Batch`] draws every live buffer with
//! one call per [`DrawGroup`] and finishes with one text call.
//!
//! ## Position in the stack
//!
//! - **Widgets** (`understory_panel`) decide *what* to draw and when.
//! - **This crate** decides which buffers exist, which group they belong to
//!   and whether a repaint needs an allocation.
//! - **Backends** implement [`GeometryBackend`] on top of a real graphics
//!   API. [`RecordingBackend`] records calls for tests.
//!
//! ## Cache discipline
//!
//! | Paint | Effect |
//! |-------|--------|
//! | unknown key | buffer created in the key's group |
//! | known key, new vertex count | buffer resized and rewritten |
//! | known key, same vertex count | buffer rewritten, no allocation |
//! | key missing from a full repaint | buffer released |
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Rect;
//! use understory_geometry::{
//!     Batch, CacheOutcome, Corners, DrawGroup, RecordingBackend, round_base, round_outline,
//! };
//!
//! let mut batch = Batch::new(RecordingBackend::default());
//! let mut cache = batch.create_cache();
//!
//! let rect = Rect::new(10.0, 10.0, 110.0, 26.0);
//! let fill = round_base(0, rect, 6.0, [0.5, 0.5, 0.5, 1.0], [0.6, 0.6, 0.6, 1.0], Corners::ALL);
//! let line = round_outline(0, rect, 6.0, [0.2, 0.2, 0.2, 1.0], Corners::ALL);
//!
//! assert_eq!(cache.add_shape(&mut batch, &fill), CacheOutcome::Created);
//! assert_eq!(cache.add_shape(&mut batch, &line), CacheOutcome::Created);
//! // Repainting at the same size reuses both buffers.
//! assert_eq!(cache.add_shape(&mut batch, &fill), CacheOutcome::Updated);
//!
//! assert_eq!(batch.buffer_count(DrawGroup::Outline), 1);
//! assert_eq!(batch.draw().batches, 2);
//! ```

mod backend;
mod batch;
mod builders;
mod cache;
mod recording;
mod shape;

pub use backend::{BufferId, GeometryBackend};
pub use batch::{Batch, CacheId, DrawStats};
pub use builders::{
    AA_SAMPLES, Corners, aa_jitter, checkmark, color_wheel, hammersley, histogram, round_base,
    round_outline, round_strip,
};
pub use cache::{ApplyStats, CacheOutcome, GeometryCache};
pub use recording::{BackendEvent, RecordedBuffer, RecordingBackend};
pub use shape::{DrawGroup, PrimitiveMode, Shape, ShapeList, TextAnchor, TextCaret, TextRun};
