// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Panel: retained-mode control panels bound to parameters.
//!
//! A [`Ui`] owns a [`ParamStore`](understory_parameter::ParamStore), a tree
//! of stacking layouts and the controls placed in them. Controls are bound
//! either to a registered parameter or to a [`Field`] of a host object, and
//! draw through per-control geometry caches into one shared
//! [`Batch`](understory_geometry::Batch).
//!
//! ## Core Concepts
//!
//! - [`Ui`]: the panel root. Feed it [`InputEvent`]s, call
//!   [`Ui::frame`] once per frame.
//! - [`LayoutMut`]: adds controls and nested layouts to a layout.
//! - [`Widget`]: what every control implements; the stock ones cover
//!   toggles, numeric fields, choices, colors, actions, labels and plots.
//! - [`Binding`]: where a control reads and writes its value.
//!
//! ## Frame cycle
//!
//! 1. Events write parameters. Writes mark them dirty in the store.
//! 2. [`Ui::frame`] drains the dirty set and marks every control bound to a
//!    dirty parameter for repaint. Controls never poll.
//! 3. Layouts lay out again if a height changed, then repainted controls
//!    update their cached geometry.
//! 4. The batch draws each draw group with a single call, then the text.
//!
//! ## Buttons
//!
//! | Button | Numeric field | Toggle | Choice | Action |
//! |--------|---------------|--------|--------|--------|
//! | primary | edit text | flip on release | select | fire on release |
//! | auxiliary | slide the value | | | |
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Size;
//! use understory_geometry::RecordingBackend;
//! use understory_panel::{InputEvent, PointerButtons, Ui};
//! use understory_parameter::Parameter;
//!
//! let mut ui = Ui::new(RecordingBackend::default(), Size::new(800.0, 600.0));
//! let playback = ui.register(
//!     Parameter::builder(1_i32)
//!         .title("Playback")
//!         .enumeration([("Play", 1), ("Pause", 0)])
//!         .build(),
//! );
//! let choice = ui.root_layout().add_parameter(playback, None).unwrap();
//!
//! // The right half of the value area is "Pause".
//! let rect = ui.control_rect(choice).unwrap();
//! let (x, y) = (rect.x1 - 5.0, rect.center().y);
//! ui.handle_event(&InputEvent::press(x, y, PointerButtons::PRIMARY));
//! ui.handle_event(&InputEvent::release(x, y, PointerButtons::PRIMARY));
//! assert_eq!(ui.params().get(playback), Some(&0));
//!
//! let stats = ui.frame();
//! assert_eq!(stats.repainted, 1);
//! ```

mod binding;
mod builder;
mod color;
mod control;
mod drag;
mod error;
mod event;
mod layout;
mod router;
mod style;
mod text;
mod ui;
mod widget;

pub use binding::{Binding, FIELD_RANGE, Field, FieldAccess};
pub use builder::LayoutMut;
pub use color::{hsv_to_rgb, rgb_to_hsv};
pub use control::ControlId;
pub use drag::SlideState;
pub use error::BuildError;
pub use event::{DragEvent, InputEvent, Key, Modifiers, PointerButtons, PointerEvent};
pub use layout::{LayoutId, Orientation};
pub use style::{Gradient, Palette, Style, rgba};
pub use text::{DEGREE, TextField, format_value, parse_value};
pub use ui::{FrameStats, Ui};
pub use widget::{ActionCallback, ControlKind, EventCx, PaintCx, Request, Widget};
