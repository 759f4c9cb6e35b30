//! SVG output for sketches.
//!
//! Coordinates are written with two decimals. Rectangles with a negative
//! width (slats that do not fit) are normalised so the document stays valid.

use std::path::Path;

use super::paint::{RenderTarget, Rgb};
use crate::Result;

#[derive(Debug, Clone, Default)]
pub struct SvgCanvas {
    width: f64,
    height: f64,
    body: String,
}

impl SvgCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the full SVG document.
    pub fn to_svg(&self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w:.2}\" height=\"{h:.2}\" viewBox=\"0 0 {w:.2} {h:.2}\">\n{body}</svg>\n",
            w = self.width,
            h = self.height,
            body = self.body
        )
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_svg())?;
        Ok(())
    }
}

impl RenderTarget for SvgCanvas {
    fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.body.clear();
    }

    fn clear(&mut self) {
        self.body.clear();
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgb) {
        let (x, width) = if width < 0.0 { (x + width, -width) } else { (x, width) };
        self.body.push_str(&format!(
            "  <rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\"/>\n",
            x,
            y,
            width,
            height,
            color.hex()
        ));
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Rgb) {
        self.body.push_str(&format!(
            "  <line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"{}\"/>\n",
            from.0,
            from.1,
            to.0,
            to.1,
            color.hex(),
            width
        ));
    }
}
