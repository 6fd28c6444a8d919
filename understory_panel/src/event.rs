// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input events delivered by the host window.
//!
//! Coordinates are window pixels with the origin at the bottom left and `y`
//! pointing up.

use bitflags::bitflags;
use kurbo::{Point, Size, Vec2};

bitflags! {
    /// Pointer buttons held during an event.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct PointerButtons: u8 {
        /// Left button. Edits text, flips toggles, fires actions.
        const PRIMARY = 1;
        /// Right button.
        const SECONDARY = 1 << 1;
        /// Middle button. Slides numeric fields.
        const AUXILIARY = 1 << 2;
    }
}

bitflags! {
    /// Keyboard modifiers held during an event.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT = 1;
        /// Control.
        const CONTROL = 1 << 1;
        /// Alt / Option.
        const ALT = 1 << 2;
        /// Super / Command.
        const META = 1 << 3;
    }
}

/// Keys the panel reacts to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Enter on the main keyboard.
    Enter,
    /// Return.
    Return,
    /// Enter on the numeric keypad.
    NumpadEnter,
    /// Escape.
    Escape,
    /// Backspace.
    Backspace,
    /// Forward delete.
    Delete,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Home.
    Home,
    /// End.
    End,
    /// Anything else, by host key code.
    Other(u32),
}

impl Key {
    /// Returns `true` for the keys that confirm a text edit.
    #[must_use]
    pub fn confirms(self) -> bool {
        matches!(self, Self::Enter | Self::Return | Self::NumpadEnter)
    }
}

/// A press or release.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// Pointer position.
    pub pos: Point,
    /// Buttons involved.
    pub buttons: PointerButtons,
    /// Modifiers held.
    pub modifiers: Modifiers,
}

/// Pointer motion with buttons held.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DragEvent {
    /// Pointer position.
    pub pos: Point,
    /// Motion since the previous drag event.
    pub delta: Vec2,
    /// Buttons held.
    pub buttons: PointerButtons,
    /// Modifiers held.
    pub modifiers: Modifiers,
}

/// Everything the host window can send to a [`Ui`](crate::Ui).
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// A button went down.
    PointerDown(PointerEvent),
    /// A button went up.
    PointerUp(PointerEvent),
    /// The pointer moved with buttons held.
    PointerDrag(DragEvent),
    /// Text was typed.
    Text(String),
    /// A key was pressed.
    Key {
        /// The key.
        key: Key,
        /// Modifiers held.
        modifiers: Modifiers,
    },
    /// The window was resized.
    Resize(Size),
}

impl InputEvent {
    /// Press with no modifiers.
    #[must_use]
    pub fn press(x: f64, y: f64, buttons: PointerButtons) -> Self {
        Self::PointerDown(PointerEvent {
            pos: Point::new(x, y),
            buttons,
            modifiers: Modifiers::empty(),
        })
    }

    /// Release with no modifiers.
    #[must_use]
    pub fn release(x: f64, y: f64, buttons: PointerButtons) -> Self {
        Self::PointerUp(PointerEvent {
            pos: Point::new(x, y),
            buttons,
            modifiers: Modifiers::empty(),
        })
    }

    /// Drag with no modifiers.
    #[must_use]
    pub fn drag(x: f64, y: f64, dx: f64, dy: f64, buttons: PointerButtons) -> Self {
        Self::PointerDrag(DragEvent {
            pos: Point::new(x, y),
            delta: Vec2::new(dx, dy),
            buttons,
            modifiers: Modifiers::empty(),
        })
    }

    /// Key press with no modifiers.
    #[must_use]
    pub fn key(key: Key) -> Self {
        Self::Key {
            key,
            modifiers: Modifiers::empty(),
        }
    }
}
