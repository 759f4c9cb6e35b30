//! Slat spacing solver and its proportional sketch.
//!
//! [`solve_spacing`] produces the numeric answer; [`build_render_plan`]
//! scales the layout into canvas coordinates; [`draw_plan`] replays the plan
//! onto any caller-owned [`RenderTarget`].

pub mod paint;
pub mod plan;
pub mod solver;
pub mod svg;

pub use paint::{draw_plan, paint_commands, CommandRecorder, PaintCommand, RenderTarget, Rgb};
pub use plan::{
    build_render_plan, build_render_plan_with, Block, BlockKind, CanvasConfig, GuideLine,
    RenderPlan,
};
pub use solver::{
    solve, solve_spacing, LayoutRequest, LayoutResult, INVALID_INPUT_MESSAGE, MAX_GAP_COUNT,
};
pub use svg::SvgCanvas;

/// Solve a request and build its sketch in one step.
///
/// The sketch uses [`LayoutRequest::sketch_slat_count`] slats.
pub fn solve_and_plan(
    request: LayoutRequest,
    canvas: &CanvasConfig,
    available_width: f64,
) -> (LayoutResult, RenderPlan) {
    let result = solve(request);
    let plan = build_render_plan_with(
        canvas,
        request.total_span,
        request.sketch_slat_count(),
        request.slat_width,
        result.gap_width,
        available_width,
    );
    (result, plan)
}
