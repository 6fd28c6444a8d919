// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `understory_panel` frames.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::Size;
use understory_geometry::RecordingBackend;
use understory_panel::{InputEvent, PointerButtons, Ui};
use understory_parameter::{Color3, Parameter};

/// A panel with `rows` numeric fields, a color swatch and a choice per row.
fn panel(rows: usize) -> Ui<RecordingBackend> {
    let mut ui = Ui::new(RecordingBackend::default(), Size::new(1280.0, 4096.0));
    for i in 0..rows {
        let size = ui.register(
            Parameter::builder(1.0_f64)
                .title(format!("Size {i}"))
                .range(0.0, 100.0)
                .build(),
        );
        let tint = ui.register(
            Parameter::builder(Color3::new(0.5, 0.5, 0.5))
                .title(format!("Tint {i}"))
                .range(0.0, 1.0)
                .build(),
        );
        let mode = ui.register(
            Parameter::builder(1_i32)
                .title(format!("Mode {i}"))
                .enumeration([("Play", 1), ("Pause", 0)])
                .build(),
        );
        let mut root = ui.root_layout();
        for param in [size.id(), tint.id(), mode.id()] {
            root.add_parameter(param, None).unwrap();
        }
    }
    ui.frame();
    ui
}

fn bench_frames(c: &mut Criterion) {
    let mut group = c.benchmark_group("panel/frame");

    for rows in [8_usize, 64] {
        group.bench_function(BenchmarkId::new("idle", rows), |b| {
            let mut ui = panel(rows);
            b.iter(|| black_box(ui.frame()));
        });

        // Steady slide: one parameter changes per frame, no buffer is created.
        group.bench_function(BenchmarkId::new("slider_drag", rows), |b| {
            let mut ui = panel(rows);
            let control = ui.control_ids()[0];
            let rect = ui.control_rect(control).unwrap();
            let (x, y) = (rect.x1 - 10.0, rect.center().y);
            ui.handle_event(&InputEvent::press(x, y, PointerButtons::AUXILIARY));
            let mut dx = 1.0;
            b.iter(|| {
                dx = -dx;
                ui.handle_event(&InputEvent::drag(x, y, dx, 0.0, PointerButtons::AUXILIARY));
                black_box(ui.frame())
            });
        });
    }

    group.bench_function("relayout_64", |b| {
        let mut ui = panel(64);
        let mut wide = false;
        b.iter(|| {
            wide = !wide;
            let width = if wide { 1920.0 } else { 1280.0 };
            ui.handle_event(&InputEvent::Resize(Size::new(width, 4096.0)));
            black_box(ui.frame())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_frames);
criterion_main!(benches);
