use rawsheet_testing::SheetTestRule;
use rawsheet_ui::{SheetConfig, VisibilityState};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const DRAG_STEP_SAMPLES: &[usize] = &[4, 16, 64];
const HEIGHT_SAMPLES: &[f32] = &[260.0, 600.0];

fn config(height: f32) -> SheetConfig {
    SheetConfig::default()
        .with_height(height)
        .with_close_on_drag_down(true)
        .with_modal(true)
}

fn bench_open_close(c: &mut Criterion) {
    let mut group = c.benchmark_group("open_close");
    for &height in HEIGHT_SAMPLES {
        group.bench_with_input(BenchmarkId::from_parameter(height), &height, |b, &height| {
            let mut rule = SheetTestRule::new(config(height)).expect("valid config");
            b.iter(|| {
                rule.sheet().open();
                rule.wait_for_idle();
                rule.sheet().close();
                rule.wait_for_idle();
                black_box(rule.take_history());
            });
        });
    }
    group.finish();
}

fn bench_drag_dismiss(c: &mut Criterion) {
    let mut group = c.benchmark_group("drag_dismiss");
    for &steps in DRAG_STEP_SAMPLES {
        group.bench_with_input(BenchmarkId::from_parameter(steps), &steps, |b, &steps| {
            let mut rule = SheetTestRule::new(config(260.0)).expect("valid config");
            b.iter(|| {
                rule.sheet().open();
                rule.wait_for_idle();
                rule.drag_sheet_by(120.0, steps);
                rule.wait_for_idle();
                debug_assert_eq!(rule.sheet().visibility(), VisibilityState::Closed);
                black_box(rule.take_history());
            });
        });
    }
    group.finish();
}

fn bench_spring_back(c: &mut Criterion) {
    let mut group = c.benchmark_group("spring_back");
    for &steps in DRAG_STEP_SAMPLES {
        group.bench_with_input(BenchmarkId::from_parameter(steps), &steps, |b, &steps| {
            let mut rule = SheetTestRule::new(config(260.0)).expect("valid config");
            rule.sheet().open();
            rule.wait_for_idle();
            b.iter(|| {
                rule.drag_sheet_by(40.0, steps);
                rule.wait_for_idle();
                black_box(rule.take_history());
            });
        });
    }
    group.finish();
}

criterion_group!(
    sheet_cycle,
    bench_open_close,
    bench_drag_dismiss,
    bench_spring_back
);
criterion_main!(sheet_cycle);
