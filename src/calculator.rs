//! Slat spacing calculator session.
//!
//! Holds the raw text of the three input fields and the most recent
//! calculation. Each call to [`SpacingCalculator::calculate`] recomputes
//! from scratch and replaces the previous outcome, so a resize simply calls
//! it again with the new available width.

use crate::layout::{solve_and_plan, CanvasConfig, LayoutRequest, LayoutResult, RenderPlan};

/// Outcome of the latest calculation.
#[derive(Debug, Clone, PartialEq)]
pub enum Calculation {
    Solved {
        result: LayoutResult,
        plan: RenderPlan,
    },
    /// Inputs were rejected; carries the message to show instead of a number
    Invalid(String),
}

impl Calculation {
    pub fn message(&self) -> String {
        match self {
            Calculation::Solved { result, .. } => result.message(),
            Calculation::Invalid(msg) => msg.clone(),
        }
    }

    pub fn plan(&self) -> Option<&RenderPlan> {
        match self {
            Calculation::Solved { plan, .. } => Some(plan),
            Calculation::Invalid(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SpacingCalculator {
    pub span: String,
    pub gaps: String,
    pub width: String,
    canvas: CanvasConfig,
    last: Option<Calculation>,
}

impl SpacingCalculator {
    pub fn new(canvas: CanvasConfig) -> Self {
        Self {
            canvas,
            ..Default::default()
        }
    }

    pub fn set_inputs(&mut self, span: &str, gaps: &str, width: &str) {
        self.span = span.to_string();
        self.gaps = gaps.to_string();
        self.width = width.to_string();
    }

    /// Recompute from the current inputs.
    ///
    /// Returns `None` and leaves the previous outcome untouched while any
    /// field is still blank.
    pub fn calculate(&mut self, available_width: f64) -> Option<&Calculation> {
        if [&self.span, &self.gaps, &self.width]
            .iter()
            .any(|f| f.trim().is_empty())
        {
            return None;
        }

        let calc = match LayoutRequest::parse(&self.span, &self.gaps, &self.width) {
            Ok(request) => {
                let (result, plan) = solve_and_plan(request, &self.canvas, available_width);
                log::debug!(
                    "solved span={} gaps={} width={} -> gap={}",
                    request.total_span,
                    request.gap_count,
                    request.slat_width,
                    result.gap_width
                );
                Calculation::Solved { result, plan }
            }
            Err(e) => Calculation::Invalid(e.to_string()),
        };
        self.last = Some(calc);
        self.last.as_ref()
    }

    pub fn last(&self) -> Option<&Calculation> {
        self.last.as_ref()
    }

    /// Result line as displayed, empty before the first calculation.
    pub fn result_text(&self) -> String {
        self.last.as_ref().map(Calculation::message).unwrap_or_default()
    }

    /// Clear inputs and the previous outcome. Callers should also clear
    /// whatever render target showed the old sketch.
    pub fn reset(&mut self) {
        self.span.clear();
        self.gaps.clear();
        self.width.clear();
        self.last = None;
    }

    /// Legend lines shown under the sketch.
    pub fn legend(&self) -> [String; 3] {
        let or_zero = |s: &str| {
            if s.is_empty() {
                "0".to_string()
            } else {
                s.to_string()
            }
        };
        let result = self.result_text();
        let spacing = result
            .split_once(": ")
            .map(|(_, rest)| rest.to_string())
            .unwrap_or_else(|| "0 cm".to_string());
        [
            format!("Slat Width: {} cm", or_zero(&self.width)),
            format!("Spacing Between Slats: {}", spacing),
            format!("Total Distance: {} cm", or_zero(&self.span)),
        ]
    }
}
