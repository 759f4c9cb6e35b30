use criterion::{black_box, criterion_group, criterion_main, Criterion};

use panelkit::layout::{
    build_render_plan, draw_plan, solve_spacing, CommandRecorder, SvgCanvas,
};

fn bench_solve(c: &mut Criterion) {
    c.bench_function("solve_spacing", |b| {
        b.iter(|| solve_spacing(black_box(100.0), black_box(4), black_box(10.0)))
    });
}

fn bench_plan(c: &mut Criterion) {
    c.bench_function("build_render_plan/5", |b| {
        b.iter(|| build_render_plan(black_box(100.0), 5, 10.0, 17.5, black_box(1280.0)))
    });

    // Many narrow slats: a long fence run
    c.bench_function("build_render_plan/200", |b| {
        b.iter(|| build_render_plan(black_box(5000.0), 200, 2.0, 23.0, black_box(1280.0)))
    });
}

fn bench_draw(c: &mut Criterion) {
    let plan = build_render_plan(100.0, 5, 10.0, 17.5, 1280.0);
    c.bench_function("draw_plan/recorder", |b| {
        let mut target = CommandRecorder::new();
        b.iter(|| draw_plan(&plan, &mut target))
    });
    c.bench_function("draw_plan/svg", |b| {
        b.iter(|| {
            let mut canvas = SvgCanvas::new();
            draw_plan(&plan, &mut canvas);
            canvas.to_svg()
        })
    });
}

criterion_group!(benches, bench_solve, bench_plan, bench_draw);
criterion_main!(benches);
