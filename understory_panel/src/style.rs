// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Panel metrics and colors.
//!
//! [`Style`] is the only configuration a [`Ui`](crate::Ui) takes. Its
//! `Default` reproduces the stock look; hosts override fields before
//! constructing the `Ui`.

use peniko::Color;

/// A vertical two-stop gradient for filled shapes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Gradient {
    /// Color at the bottom edge.
    pub bottom: Color,
    /// Color at the top edge.
    pub top: Color,
}

impl Gradient {
    /// Gradient from `bottom` to `top`.
    #[must_use]
    pub const fn new(bottom: Color, top: Color) -> Self {
        Self { bottom, top }
    }

    /// A single flat color.
    #[must_use]
    pub const fn flat(color: Color) -> Self {
        Self {
            bottom: color,
            top: color,
        }
    }
}

const fn gray(level: f32) -> Color {
    Color::new([level, level, level, 1.0])
}

/// Colors used by the stock widgets.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Palette {
    /// Idle field fill.
    pub field: Gradient,
    /// Fill of a field being edited or slid, a checked box, a pressed button.
    pub field_active: Gradient,
    /// Idle button fill.
    pub button: Gradient,
    /// Outline of active or checked shapes.
    pub outline: Color,
    /// Outline of idle checkboxes and buttons.
    pub outline_idle: Color,
    /// Text on idle shapes.
    pub text: Color,
    /// Text on active shapes.
    pub text_active: Color,
    /// Check mark.
    pub check: Color,
    /// Layout background fill.
    pub background: Gradient,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            field: Gradient::new(gray(0.6), gray(0.5)),
            field_active: Gradient::new(gray(0.4), gray(0.3)),
            button: Gradient::new(gray(0.5), gray(0.6)),
            outline: gray(0.2),
            outline_idle: gray(0.25),
            text: Color::BLACK,
            text_active: Color::WHITE,
            check: Color::WHITE,
            background: Gradient::new(
                Color::new([0.3, 0.3, 0.3, 1.0]),
                Color::new([0.4, 0.4, 0.4, 1.0]),
            ),
        }
    }
}

/// Metrics and colors for a [`Ui`](crate::Ui).
#[derive(Clone, Debug, PartialEq)]
pub struct Style {
    /// Height of a one-line control.
    pub row_height: f64,
    /// Fraction of a control's width taken by its title.
    pub label_fraction: f64,
    /// Side of a checkbox.
    pub checkbox_size: f64,
    /// Corner radius of checkboxes.
    pub checkbox_radius: f64,
    /// Corner radius of fields and buttons.
    pub field_radius: f64,
    /// Corner radius of layout backgrounds.
    pub background_radius: f64,
    /// Pixels of horizontal drag that slide a field across its whole range.
    pub slide_pixels: f64,
    /// Height of the color wheel.
    pub wheel_height: f64,
    /// Plot height of a histogram, below its title row.
    pub histogram_height: f64,
    /// Font size of all text.
    pub font_size: f32,
    /// Advance width assumed for one character when wrapping and placing carets.
    pub char_width: f64,
    /// Inset of text from the left edge of its box.
    pub text_inset: f64,
    /// Height of the text baseline above a control's bottom edge.
    pub baseline: f64,
    /// Padding of newly created layouts.
    pub padding: f64,
    /// Left edge of the root layout.
    pub root_x: f64,
    /// Share of the window width given to the root layout.
    pub root_width_fraction: f64,
    /// Width of the color picker popup.
    pub picker_width: f64,
    /// Colors.
    pub palette: Palette,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            row_height: 16.0,
            label_fraction: 0.4,
            checkbox_size: 10.0,
            checkbox_radius: 2.0,
            field_radius: 6.0,
            background_radius: 6.0,
            slide_pixels: 500.0,
            wheel_height: 128.0,
            histogram_height: 64.0,
            font_size: 8.0,
            char_width: 6.0,
            text_inset: 8.0,
            baseline: 4.0,
            padding: 2.0,
            root_x: 10.0,
            root_width_fraction: 0.5,
            picker_width: 200.0,
            palette: Palette::default(),
        }
    }
}

/// Color as the `[r, g, b, a]` array vertex buffers take.
#[must_use]
pub fn rgba(color: Color) -> [f32; 4] {
    color.components
}
