//! Solver and sketch-plan properties exercised through the public API

use panelkit::layout::{
    build_render_plan, build_render_plan_with, solve_spacing, BlockKind, CanvasConfig,
    LayoutRequest,
};

#[test]
fn gap_width_formula_holds() {
    for gaps in 2..20u32 {
        for &(span, width) in &[(100.0, 10.0), (37.3, 1.7), (2500.0, 45.0), (12.0, 0.5)] {
            let res = solve_spacing(span, gaps, width).expect("valid input");
            let expected = (span - f64::from(gaps - 1) * width) / f64::from(gaps);
            assert!(
                (res.gap_width - expected).abs() < 1e-9,
                "span={} gaps={} width={}",
                span,
                gaps,
                width
            );
        }
    }
}

#[test]
fn invalid_inputs_never_produce_a_number() {
    assert!(solve_spacing(50.0, 1, 10.0).is_err());
    assert!(solve_spacing(50.0, 0, 10.0).is_err());
    assert!(LayoutRequest::parse("fifty", "4", "10").is_err());
    assert!(LayoutRequest::parse("50", "four", "10").is_err());
    assert!(LayoutRequest::parse("50", "4", "NaN").is_err());
}

#[test]
fn plan_alternates_slats_and_gaps() {
    for slats in 2..15u64 {
        let plan = build_render_plan(200.0, slats, 5.0, 12.0, 1024.0);
        assert_eq!(plan.slat_count(), slats as usize);
        assert_eq!(plan.gap_count(), slats as usize - 1);
        assert_eq!(plan.blocks.first().map(|b| b.kind), Some(BlockKind::Slat));
        assert_eq!(plan.blocks.last().map(|b| b.kind), Some(BlockKind::Slat));
        for pair in plan.blocks.windows(2) {
            assert_ne!(pair[0].kind, pair[1].kind);
        }
    }
}

#[test]
fn canvas_width_stays_within_bounds() {
    let canvas = CanvasConfig::default();
    for &available in &[200.0, 320.0, 500.0, 700.0, 1920.0] {
        for &(slats, width, gap) in &[(3u64, 1.0, 1.0), (5, 10.0, 17.5), (9, 80.0, 40.0)] {
            let plan = build_render_plan_with(&canvas, 0.0, slats, width, gap, available);
            let upper = (available * 0.9_f64).min(canvas.max_width);
            assert!(plan.canvas_width >= canvas.min_width);
            if upper >= canvas.min_width {
                assert!(plan.canvas_width <= upper + 1e-9);
            } else {
                assert_eq!(plan.canvas_width, canvas.min_width);
            }
        }
    }
}

#[test]
fn hundred_cm_four_gaps_scenario() {
    let res = solve_spacing(100.0, 4, 10.0).unwrap();
    assert_eq!(res.gap_width, 17.5);
    assert_eq!(res.message(), "Spacing between slats: 17.50 cm");

    let plan = build_render_plan(
        100.0,
        res.request.sketch_slat_count(),
        10.0,
        res.gap_width,
        1280.0,
    );
    assert_eq!(plan.slat_count(), 5);
    assert_eq!(plan.gap_count(), 4);
}

#[test]
fn single_gap_scenario_is_rejected() {
    let err = solve_spacing(50.0, 1, 10.0).unwrap_err();
    assert_eq!(err.to_string(), "Please enter valid numbers!");
}

#[test]
fn tight_scenario_is_valid() {
    let res = solve_spacing(10.0, 2, 8.0).unwrap();
    assert_eq!(res.gap_width, 1.0);
}

#[test]
fn repeated_calls_are_bit_identical() {
    let a = solve_spacing(91.7, 6, 3.3).unwrap();
    let b = solve_spacing(91.7, 6, 3.3).unwrap();
    assert_eq!(a.gap_width.to_bits(), b.gap_width.to_bits());

    let p1 = build_render_plan(91.7, 7, 3.3, a.gap_width, 777.0);
    let p2 = build_render_plan(91.7, 7, 3.3, b.gap_width, 777.0);
    assert_eq!(p1, p2);
    assert_eq!(p1.digest(), p2.digest());
}
