// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-line text editing for numeric fields.
//!
//! A [`TextField`] holds the text being typed plus a caret and a selection
//! mark, both as byte offsets on character boundaries. Editing starts with
//! everything selected so the first keystroke replaces the old value.

use understory_parameter::Subtype;

/// Degree sign appended to angle values.
pub const DEGREE: char = '°';

/// Text, caret and selection of a field being edited.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextField {
    text: String,
    caret: usize,
    mark: usize,
}

impl TextField {
    /// Starts editing `text` with all of it selected.
    #[must_use]
    pub fn begin(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            caret: text.len(),
            mark: 0,
            text,
        }
    }

    /// Current text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Caret byte offset.
    #[must_use]
    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Selection mark; equal to the caret when nothing is selected.
    #[must_use]
    pub fn mark(&self) -> usize {
        self.mark
    }

    /// Selected byte range.
    #[must_use]
    pub fn selection(&self) -> core::ops::Range<usize> {
        self.caret.min(self.mark)..self.caret.max(self.mark)
    }

    /// Returns `true` if some text is selected.
    #[must_use]
    pub fn has_selection(&self) -> bool {
        self.caret != self.mark
    }

    fn delete_selection(&mut self) -> bool {
        if !self.has_selection() {
            return false;
        }
        let range = self.selection();
        self.caret = range.start;
        self.mark = range.start;
        self.text.replace_range(range, "");
        true
    }

    /// Types `input` at the caret, replacing the selection.
    pub fn insert(&mut self, input: &str) {
        self.delete_selection();
        self.text.insert_str(self.caret, input);
        self.caret += input.len();
        self.mark = self.caret;
    }

    fn prev_boundary(&self) -> usize {
        self.text[..self.caret]
            .char_indices()
            .next_back()
            .map_or(0, |(i, _)| i)
    }

    fn next_boundary(&self) -> usize {
        self.text[self.caret..]
            .chars()
            .next()
            .map_or(self.caret, |c| self.caret + c.len_utf8())
    }

    /// Deletes the selection, or the character before the caret.
    pub fn backspace(&mut self) {
        if self.delete_selection() || self.caret == 0 {
            return;
        }
        let start = self.prev_boundary();
        self.text.replace_range(start..self.caret, "");
        self.caret = start;
        self.mark = start;
    }

    /// Deletes the selection, or the character after the caret.
    pub fn delete(&mut self) {
        if self.delete_selection() {
            return;
        }
        let end = self.next_boundary();
        self.text.replace_range(self.caret..end, "");
    }

    /// Moves the caret one character left, collapsing the selection.
    pub fn left(&mut self) {
        self.caret = if self.has_selection() {
            self.selection().start
        } else {
            self.prev_boundary()
        };
        self.mark = self.caret;
    }

    /// Moves the caret one character right, collapsing the selection.
    pub fn right(&mut self) {
        self.caret = if self.has_selection() {
            self.selection().end
        } else {
            self.next_boundary()
        };
        self.mark = self.caret;
    }

    /// Moves the caret to the start.
    pub fn home(&mut self) {
        self.caret = 0;
        self.mark = 0;
    }

    /// Moves the caret to the end.
    pub fn end(&mut self) {
        self.caret = self.text.len();
        self.mark = self.caret;
    }

    /// Places the caret before character `index` (clamped to the text).
    /// With `extend`, the selection mark stays where it was.
    pub fn set_caret(&mut self, index: usize, extend: bool) {
        self.caret = self
            .text
            .char_indices()
            .nth(index)
            .map_or(self.text.len(), |(i, _)| i);
        if !extend {
            self.mark = self.caret;
        }
    }
}

/// Formats a value the way numeric fields display it.
///
/// ```
/// use understory_panel::format_value;
/// use understory_parameter::Subtype;
///
/// assert_eq!(format_value(1.0 / 3.0, Subtype::None), "0.33");
/// assert_eq!(format_value(core::f64::consts::PI, Subtype::Angle), "180.00°");
/// ```
#[must_use]
pub fn format_value(value: f64, subtype: Subtype) -> String {
    match subtype {
        Subtype::None => format!("{value:.2}"),
        Subtype::Angle => format!("{:.2}{DEGREE}", value.to_degrees()),
    }
}

/// Parses typed text back into a value. Returns `None` for anything that is
/// not a finite number.
#[must_use]
pub fn parse_value(text: &str, subtype: Subtype) -> Option<f64> {
    let trimmed = text.trim();
    let number = match subtype {
        Subtype::None => trimmed,
        Subtype::Angle => trimmed.trim_end_matches(DEGREE).trim_end(),
    };
    let value: f64 = number.parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(match subtype {
        Subtype::None => value,
        Subtype::Angle => value.to_radians(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_selects_everything() {
        let mut field = TextField::begin("0.50");
        assert_eq!(field.selection(), 0..4);
        field.insert("7");
        assert_eq!(field.text(), "7");
        assert_eq!(field.caret(), 1);
        assert!(!field.has_selection());
    }

    #[test]
    fn caret_moves_and_edits() {
        let mut field = TextField::begin("12.5");
        field.end();
        field.backspace();
        assert_eq!(field.text(), "12.");
        field.home();
        field.delete();
        assert_eq!(field.text(), "2.");
        field.right();
        field.insert("0");
        assert_eq!(field.text(), "20.");
        field.left();
        field.left();
        assert_eq!(field.caret(), 0);
        field.left();
        assert_eq!(field.caret(), 0);
    }

    #[test]
    fn arrows_collapse_selection() {
        let mut field = TextField::begin("abc");
        field.left();
        assert_eq!(field.caret(), 0);
        assert!(!field.has_selection());
        let mut field = TextField::begin("abc");
        field.right();
        assert_eq!(field.caret(), 3);
    }

    #[test]
    fn set_caret_respects_char_boundaries() {
        let mut field = TextField::begin("90.00°");
        field.set_caret(10, false);
        assert_eq!(field.caret(), field.text().len());
        field.backspace();
        assert_eq!(field.text(), "90.00");
        field.set_caret(1, false);
        field.set_caret(3, true);
        assert_eq!(field.selection(), 1..3);
    }

    #[test]
    fn text_round_trips_within_two_decimals() {
        for v in [0.0, 0.125, -3.14159, 42.0, 99.999] {
            let parsed = parse_value(&format_value(v, Subtype::None), Subtype::None).unwrap();
            assert!((parsed - v).abs() <= 0.005 + 1e-12, "{v} became {parsed}");
        }
    }

    #[test]
    fn angles_display_in_degrees() {
        let text = format_value(core::f64::consts::FRAC_PI_2, Subtype::Angle);
        assert_eq!(text, "90.00°");
        let back = parse_value(&text, Subtype::Angle).unwrap();
        assert!((back - core::f64::consts::FRAC_PI_2).abs() < 1e-9, "got {back}");
        assert!((parse_value(" 45 ", Subtype::Angle).unwrap() - 45f64.to_radians()).abs() < 1e-12);
    }

    #[test]
    fn garbage_does_not_parse() {
        assert_eq!(parse_value("abc", Subtype::None), None);
        assert_eq!(parse_value("", Subtype::None), None);
        assert_eq!(parse_value("inf", Subtype::None), None);
        assert_eq!(parse_value("NaN", Subtype::None), None);
    }
}
