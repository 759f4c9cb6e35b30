/// Even-spacing arithmetic for slats across a span

use crate::{Error, Result};

/// Message shown when any of the three inputs is rejected.
pub const INVALID_INPUT_MESSAGE: &str = "Please enter valid numbers!";

/// Largest accepted gap count. Keeps the sketch (gap count + 1 slats) bounded.
pub const MAX_GAP_COUNT: u32 = 10_000;

/// Inputs to the spacing solver, in centimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutRequest {
    /// Span between the inside edges of the end slats
    pub total_span: f64,
    /// Number of gaps entered by the user (must be > 1)
    pub gap_count: u32,
    /// Width of a single slat
    pub slat_width: f64,
}

impl LayoutRequest {
    /// Validate already-numeric inputs.
    pub fn new(total_span: f64, gap_count: u32, slat_width: f64) -> Result<Self> {
        let valid = total_span.is_finite()
            && slat_width.is_finite()
            && total_span > 0.0
            && slat_width > 0.0
            && gap_count > 1
            && gap_count <= MAX_GAP_COUNT;
        if !valid {
            return Err(Error::Validation(INVALID_INPUT_MESSAGE.to_string()));
        }
        Ok(Self {
            total_span,
            gap_count,
            slat_width,
        })
    }

    /// Build a request from the raw text of the three input fields.
    ///
    /// Span and width accept any decimal number; the gap count must be a
    /// whole number. Surrounding whitespace is ignored.
    pub fn parse(total_span: &str, gap_count: &str, slat_width: &str) -> Result<Self> {
        let invalid = || Error::Validation(INVALID_INPUT_MESSAGE.to_string());
        let span = total_span.trim().parse::<f64>().map_err(|_| invalid())?;
        let gaps = gap_count.trim().parse::<u32>().map_err(|_| invalid())?;
        let width = slat_width.trim().parse::<f64>().map_err(|_| invalid())?;
        Self::new(span, gaps, width)
    }

    /// Number of slats the sketch draws: one more than the entered gap count.
    ///
    /// Note this differs from the divisor used by [`solve_spacing`], which
    /// treats `gap_count` itself as the number of slats. Both are kept as-is.
    pub fn sketch_slat_count(&self) -> u64 {
        u64::from(self.gap_count) + 1
    }
}

/// Outcome of a successful solve. `gap_width` may be negative when the
/// slats are wider than the span allows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutResult {
    pub request: LayoutRequest,
    pub gap_width: f64,
}

impl LayoutResult {
    /// Whether the slats physically fit inside the span.
    pub fn fits(&self) -> bool {
        self.gap_width >= 0.0
    }

    /// User-facing result line, rounded to two decimals.
    pub fn message(&self) -> String {
        format!("Spacing between slats: {:.2} cm", self.gap_width)
    }
}

/// Compute the uniform gap width for a span.
///
/// `gap_width = (total_span - (gap_count - 1) * slat_width) / gap_count`
pub fn solve_spacing(total_span: f64, gap_count: u32, slat_width: f64) -> Result<LayoutResult> {
    let request = LayoutRequest::new(total_span, gap_count, slat_width)?;
    Ok(solve(request))
}

/// Solve an already-validated request.
pub fn solve(request: LayoutRequest) -> LayoutResult {
    let gaps = f64::from(request.gap_count);
    let gap_width = (request.total_span - (gaps - 1.0) * request.slat_width) / gaps;
    LayoutResult { request, gap_width }
}
