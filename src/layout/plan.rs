/// Proportional sketch plan for a solved slat layout

use serde::Serialize;
use sha2::{Digest, Sha256};

use super::solver::MAX_GAP_COUNT;

/// Canvas geometry used when scaling a layout into a sketch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasConfig {
    /// Smallest canvas width regardless of available space
    pub min_width: f64,
    /// Largest canvas width regardless of available space
    pub max_width: f64,
    /// Fraction of the available width the canvas may occupy
    pub available_fraction: f64,
    /// Horizontal margin reserved around the drawing (total of both sides)
    pub margin: f64,
    /// Fixed canvas height
    pub height: f64,
    /// Height of every slat and gap block
    pub block_height: f64,
    /// Distance of the guide line above the block row
    pub guide_offset: f64,
    /// Most slats a sketch will lay out; larger requests are capped
    pub max_slats: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            min_width: 300.0,
            max_width: 600.0,
            available_fraction: 0.9,
            margin: 40.0,
            height: 150.0,
            block_height: 50.0,
            guide_offset: 20.0,
            max_slats: MAX_GAP_COUNT + 1,
        }
    }
}

impl CanvasConfig {
    /// Upper bound on canvas width for a given available width.
    pub fn upper_bound(&self, available_width: f64) -> f64 {
        (available_width * self.available_fraction).min(self.max_width)
    }

    /// Clamp a desired width into `[min_width, upper_bound]`. When the upper
    /// bound falls below `min_width`, the minimum wins.
    pub fn clamp_width(&self, desired: f64, available_width: f64) -> f64 {
        self.upper_bound(available_width).min(desired).max(self.min_width)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Slat,
    Gap,
}

/// A positioned rectangle in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Block {
    pub kind: BlockKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Block {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}

/// Horizontal guide spanning the inner edges of the end slats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideLine {
    pub x_start: f64,
    pub x_end: f64,
    pub y: f64,
}

/// Scaled description of the sketch, ready for any [`RenderTarget`](super::paint::RenderTarget).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderPlan {
    pub total_span: f64,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub scale_factor: f64,
    pub blocks: Vec<Block>,
    pub guide_line: GuideLine,
}

impl RenderPlan {
    pub fn slat_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.kind == BlockKind::Slat).count()
    }

    pub fn gap_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.kind == BlockKind::Gap).count()
    }

    /// False when the scale could not be computed (zero required width).
    /// Negative gap widths are still considered drawable.
    pub fn is_drawable(&self) -> bool {
        self.scale_factor.is_finite()
    }

    /// Hex SHA-256 over the bit patterns of every coordinate.
    ///
    /// Two plans built from identical inputs always share a digest, which
    /// makes this suitable for golden files.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        for v in [
            self.total_span,
            self.canvas_width,
            self.canvas_height,
            self.scale_factor,
        ] {
            hasher.update(v.to_bits().to_le_bytes());
        }
        for b in &self.blocks {
            hasher.update([b.kind as u8]);
            for v in [b.x, b.y, b.width, b.height] {
                hasher.update(v.to_bits().to_le_bytes());
            }
        }
        for v in [self.guide_line.x_start, self.guide_line.x_end, self.guide_line.y] {
            hasher.update(v.to_bits().to_le_bytes());
        }
        hex::encode(hasher.finalize())
    }
}

/// Build a sketch plan using the default canvas geometry.
///
/// `slat_count` is the number of slats to draw, normally the entered gap
/// count plus one. It is capped at [`CanvasConfig::max_slats`].
pub fn build_render_plan(
    total_span: f64,
    slat_count: u64,
    slat_width: f64,
    gap_width: f64,
    available_width_hint: f64,
) -> RenderPlan {
    build_render_plan_with(
        &CanvasConfig::default(),
        total_span,
        slat_count,
        slat_width,
        gap_width,
        available_width_hint,
    )
}

pub fn build_render_plan_with(
    canvas: &CanvasConfig,
    total_span: f64,
    slat_count: u64,
    slat_width: f64,
    gap_width: f64,
    available_width_hint: f64,
) -> RenderPlan {
    let slat_count = match u32::try_from(slat_count) {
        Ok(n) if n <= canvas.max_slats => n,
        _ => {
            log::warn!(
                "sketch capped at {} slats ({} requested)",
                canvas.max_slats,
                slat_count
            );
            canvas.max_slats
        }
    };
    let n = f64::from(slat_count);
    let required = n * slat_width + (n - 1.0) * gap_width;

    let canvas_width = canvas.clamp_width(required + canvas.margin, available_width_hint);
    let scale = (canvas_width - canvas.margin) / required;

    let block_y = (canvas.height - canvas.block_height) / 2.0;
    let slat_w = slat_width * scale;
    let gap_w = gap_width * scale;

    let mut x = (canvas_width - required * scale) / 2.0;
    let first_inner = x + slat_w;
    let last_inner = first_inner + (n - 2.0) * (slat_w + gap_w) + gap_w;

    let mut blocks = Vec::with_capacity((slat_count as usize * 2).saturating_sub(1));
    for i in 0..slat_count {
        blocks.push(Block {
            kind: BlockKind::Slat,
            x,
            y: block_y,
            width: slat_w,
            height: canvas.block_height,
        });
        x += slat_w;

        if i + 1 < slat_count {
            blocks.push(Block {
                kind: BlockKind::Gap,
                x,
                y: block_y,
                width: gap_w,
                height: canvas.block_height,
            });
            x += gap_w;
        }
    }

    RenderPlan {
        total_span,
        canvas_width,
        canvas_height: canvas.height,
        scale_factor: scale,
        blocks,
        guide_line: GuideLine {
            x_start: first_inner,
            x_end: last_inner,
            y: block_y - canvas.guide_offset,
        },
    }
}
