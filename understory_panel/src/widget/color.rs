// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::f64::consts::TAU;

use kurbo::{Point, Rect};
use understory_geometry::{Corners, ShapeList, color_wheel, round_base, round_outline};
use understory_parameter::ParamId;

use super::{ControlKind, EventCx, PaintCx, Request, Widget};
use crate::binding::Binding;
use crate::color::{hsv_to_rgb, rgb_to_hsv};
use crate::event::{DragEvent, PointerButtons, PointerEvent};
use crate::style::{Style, rgba};

/// Side of the marker showing the current color on the wheel.
const MARKER_SIZE: f64 = 6.0;

fn read_rgb(binding: &Binding, params: &understory_parameter::ParamStore) -> [f64; 3] {
    core::array::from_fn(|c| binding.component(params, c).unwrap_or_default())
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "color channels are in 0..=1"
)]
fn to_rgba([r, g, b]: [f64; 3]) -> [f32; 4] {
    [r as f32, g as f32, b as f32, 1.0]
}

/// Color patch. Pressing it asks the `Ui` to open the picker.
#[derive(Debug)]
pub(crate) struct ColorSwatch {
    binding: Binding,
    param: ParamId,
}

impl ColorSwatch {
    pub(crate) fn new(param: ParamId) -> Self {
        Self {
            binding: Binding::Param(param),
            param,
        }
    }
}

impl Widget for ColorSwatch {
    fn kind(&self) -> ControlKind {
        ControlKind::ColorSwatch
    }

    fn paint(&self, cx: &PaintCx<'_>) -> ShapeList {
        let style = cx.style();
        let color = to_rgba(read_rgb(&self.binding, cx.params()));
        let area = cx.value_area();
        let mut list = ShapeList::new();
        list.push_text(cx.title_run(style.text_inset));
        list.push(round_base(0, area, style.field_radius, color, color, Corners::ALL));
        list.push(round_outline(
            0,
            area,
            style.field_radius,
            rgba(style.palette.outline),
            Corners::ALL,
        ));
        list
    }

    fn press(&mut self, cx: &mut EventCx<'_>, event: &PointerEvent) {
        if event.buttons.contains(PointerButtons::PRIMARY) {
            cx.request(Request::OpenColorPicker {
                param: self.param,
                at: event.pos,
            });
        }
    }

    fn binding(&self) -> Option<&Binding> {
        Some(&self.binding)
    }
}

/// Hue/saturation disc editing an RGB color at constant value.
///
/// Hue is the angle around the centre, counter-clockwise from the positive
/// `x` axis, and saturation the distance from the centre over the radius.
#[derive(Debug)]
pub(crate) struct ColorWheel {
    binding: Binding,
}

impl ColorWheel {
    pub(crate) fn new(binding: Binding) -> Self {
        Self { binding }
    }

    /// Centre and radius of the disc, matching the wheel geometry.
    fn disc(rect: Rect) -> (Point, f64) {
        let center = Point::new(
            rect.x0 + (rect.width() * 0.5).trunc(),
            rect.y0 + (rect.height() * 0.5).trunc(),
        );
        (center, rect.height() * 0.5)
    }

    fn pick(&mut self, cx: &mut EventCx<'_>, pos: Point) {
        let (center, radius) = Self::disc(cx.rect());
        if radius <= 0.0 {
            return;
        }
        let offset = pos - center;
        let hue = offset.y.atan2(offset.x).rem_euclid(TAU) / TAU;
        let sat = (offset.hypot() / radius).min(1.0);
        let [_, _, value] = rgb_to_hsv(read_rgb(&self.binding, cx.params));
        // A black color would stay black at any hue; pick at full value instead.
        let value = if value > 0.0 { value } else { 1.0 };
        let rgb = hsv_to_rgb(hue, sat, value);
        self.binding.set_components(cx.params, 0, &rgb);
    }
}

impl Widget for ColorWheel {
    fn kind(&self) -> ControlKind {
        ControlKind::ColorWheel
    }

    fn height(&self, _width: f64, style: &Style) -> f64 {
        style.wheel_height
    }

    fn paint(&self, cx: &PaintCx<'_>) -> ShapeList {
        let style = cx.style();
        let rect = cx.rect();
        let rgb = read_rgb(&self.binding, cx.params());
        let [hue, sat, value] = rgb_to_hsv(rgb);
        #[expect(clippy::cast_possible_truncation, reason = "value is in 0..=1")]
        let gray = value as f32;

        let (center, radius) = Self::disc(rect);
        let angle = hue * TAU;
        let at = Point::new(
            center.x + angle.cos() * sat * radius,
            center.y + angle.sin() * sat * radius,
        );
        let marker = Rect::from_center_size(at, (MARKER_SIZE, MARKER_SIZE));

        let mut list = ShapeList::new();
        list.push(color_wheel(rect, gray));
        list.push(round_outline(
            0,
            marker,
            MARKER_SIZE * 0.5,
            rgba(style.palette.outline),
            Corners::ALL,
        ));
        list
    }

    fn press(&mut self, cx: &mut EventCx<'_>, event: &PointerEvent) {
        if event.buttons.contains(PointerButtons::PRIMARY) {
            cx.activate();
            self.pick(cx, event.pos);
        }
    }

    fn drag(&mut self, cx: &mut EventCx<'_>, event: &DragEvent) {
        if event.buttons.contains(PointerButtons::PRIMARY) {
            self.pick(cx, event.pos);
        }
    }

    fn binding(&self) -> Option<&Binding> {
        Some(&self.binding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Modifiers;
    use crate::widget::testing::Harness;
    use kurbo::Vec2;
    use understory_geometry::DrawGroup;
    use understory_parameter::{Color3, Param, ParamStore, Parameter};

    fn color_param(color: Color3) -> (ParamStore, Param<Color3>) {
        let mut params = ParamStore::new();
        let p = params.register(Parameter::builder(color).title("Tint").range(0.0, 1.0).build());
        (params, p)
    }

    fn press(x: f64, y: f64) -> PointerEvent {
        PointerEvent {
            pos: Point::new(x, y),
            buttons: PointerButtons::PRIMARY,
            modifiers: Modifiers::empty(),
        }
    }

    #[test]
    fn swatch_requests_the_picker() {
        let (params, p) = color_param(Color3::new(1.0, 0.0, 0.0));
        let mut h = Harness::new(params, Rect::new(0.0, 0.0, 200.0, 16.0));
        let mut w = ColorSwatch::new(p.id());
        w.press(&mut h.cx(), &press(150.0, 8.0));
        assert_eq!(
            h.requests,
            [Request::OpenColorPicker {
                param: p.id(),
                at: Point::new(150.0, 8.0)
            }]
        );
        let list = h.paint(&w, "Tint");
        assert_eq!(list.shapes[0].colors[0], [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn wheel_picks_hue_and_saturation() {
        let (params, p) = color_param(Color3::new(0.5, 0.5, 0.5));
        // Disc centred at (100, 64) with radius 64.
        let mut h = Harness::new(params, Rect::new(0.0, 0.0, 200.0, 128.0));
        let mut w = ColorWheel::new(Binding::Param(p.id()));
        assert_eq!(w.height(200.0, &h.style), 128.0);

        // Rim, angle 0: pure red at the existing value.
        w.press(&mut h.cx(), &press(164.0, 64.0));
        assert!(h.frame.active);
        let c = *h.params.get(p).unwrap();
        assert!((c.r - 0.5).abs() < 1e-6 && c.g.abs() < 1e-6 && c.b.abs() < 1e-6, "{c:?}");

        // Centre: no saturation.
        let drag = DragEvent {
            pos: Point::new(100.0, 64.0),
            delta: Vec2::ZERO,
            buttons: PointerButtons::PRIMARY,
            modifiers: Modifiers::empty(),
        };
        w.drag(&mut h.cx(), &drag);
        let c = *h.params.get(p).unwrap();
        assert!((c.r - c.g).abs() < 1e-6 && (c.g - c.b).abs() < 1e-6, "{c:?}");
    }

    #[test]
    fn wheel_uses_the_shader_group() {
        let (params, p) = color_param(Color3::new(0.0, 0.0, 1.0));
        let h = Harness::new(params, Rect::new(0.0, 0.0, 200.0, 128.0));
        let w = ColorWheel::new(Binding::Param(p.id()));
        let list = h.paint(&w, "");
        assert_eq!(list.shapes[0].group(), DrawGroup::Shader);
        assert_eq!(list.shapes[1].group(), DrawGroup::Outline);
    }

    #[test]
    fn black_picks_at_full_value() {
        let (params, p) = color_param(Color3::new(0.0, 0.0, 0.0));
        let mut h = Harness::new(params, Rect::new(0.0, 0.0, 200.0, 128.0));
        let mut w = ColorWheel::new(Binding::Param(p.id()));
        w.press(&mut h.cx(), &press(164.0, 64.0));
        let c = *h.params.get(p).unwrap();
        assert!((c.r - 1.0).abs() < 1e-6, "{c:?}");
    }
}
