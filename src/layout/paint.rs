/// Paint command set and the render target seam

use super::plan::{BlockKind, RenderPlan};

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const SLAT: Rgb = Rgb(0x00, 0x7B, 0xFF);
    pub const GAP: Rgb = Rgb(0xFF, 0x00, 0x00);
    pub const GUIDE: Rgb = Rgb(0x66, 0x64, 0x64);

    /// `#RRGGBB` notation.
    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    Clear,
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Rgb,
    },
    StrokeLine {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        width: f64,
        color: Rgb,
    },
}

/// A drawing surface owned by the caller and passed in per draw.
pub trait RenderTarget {
    /// Resize the surface; implementations discard previous content.
    fn resize(&mut self, width: f64, height: f64);
    fn clear(&mut self);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgb);
    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Rgb);

    /// Replay a single command onto this target.
    fn apply(&mut self, cmd: &PaintCommand) {
        match *cmd {
            PaintCommand::Clear => self.clear(),
            PaintCommand::FillRect {
                x,
                y,
                width,
                height,
                color,
            } => self.fill_rect(x, y, width, height, color),
            PaintCommand::StrokeLine {
                x1,
                y1,
                x2,
                y2,
                width,
                color,
            } => self.stroke_line((x1, y1), (x2, y2), width, color),
        }
    }
}

/// Flatten a plan into paint commands: clear, blocks left to right, then the guide line.
pub fn paint_commands(plan: &RenderPlan) -> Vec<PaintCommand> {
    let mut cmds = Vec::with_capacity(plan.blocks.len() + 2);
    cmds.push(PaintCommand::Clear);
    for b in &plan.blocks {
        let color = match b.kind {
            BlockKind::Slat => Rgb::SLAT,
            BlockKind::Gap => Rgb::GAP,
        };
        cmds.push(PaintCommand::FillRect {
            x: b.x,
            y: b.y,
            width: b.width,
            height: b.height,
            color,
        });
    }
    let g = &plan.guide_line;
    cmds.push(PaintCommand::StrokeLine {
        x1: g.x_start,
        y1: g.y,
        x2: g.x_end,
        y2: g.y,
        width: 1.0,
        color: Rgb::GUIDE,
    });
    cmds
}

/// Size `target` to the plan's canvas and draw the sketch onto it.
pub fn draw_plan<T: RenderTarget + ?Sized>(plan: &RenderPlan, target: &mut T) {
    target.resize(plan.canvas_width, plan.canvas_height);
    for cmd in paint_commands(plan) {
        target.apply(&cmd);
    }
}

/// Records every command it receives; handy for tests and debugging.
#[derive(Debug, Default, Clone)]
pub struct CommandRecorder {
    pub width: f64,
    pub height: f64,
    pub commands: Vec<PaintCommand>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderTarget for CommandRecorder {
    fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.commands.clear();
    }

    fn clear(&mut self) {
        self.commands.push(PaintCommand::Clear);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgb) {
        self.commands.push(PaintCommand::FillRect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Rgb) {
        self.commands.push(PaintCommand::StrokeLine {
            x1: from.0,
            y1: from.1,
            x2: to.0,
            y2: to.1,
            width,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::plan::build_render_plan;

    #[test]
    fn colours_render_as_hex() {
        assert_eq!(Rgb::SLAT.hex(), "#007BFF");
        assert_eq!(Rgb::GAP.hex(), "#FF0000");
        assert_eq!(Rgb::GUIDE.hex(), "#666464");
    }

    #[test]
    fn commands_follow_block_order() {
        let plan = build_render_plan(100.0, 3, 10.0, 40.0, 1000.0);
        let cmds = paint_commands(&plan);
        assert_eq!(cmds.len(), 1 + 5 + 1);
        assert_eq!(cmds[0], PaintCommand::Clear);
        match &cmds[1] {
            PaintCommand::FillRect { color, .. } => assert_eq!(*color, Rgb::SLAT),
            other => panic!("unexpected {:?}", other),
        }
        match &cmds[2] {
            PaintCommand::FillRect { color, .. } => assert_eq!(*color, Rgb::GAP),
            other => panic!("unexpected {:?}", other),
        }
        match cmds.last().unwrap() {
            PaintCommand::StrokeLine { y1, y2, color, .. } => {
                assert_eq!(y1, y2);
                assert_eq!(*color, Rgb::GUIDE);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn redraw_replaces_previous_content() {
        let mut target = CommandRecorder::new();
        let first = build_render_plan(100.0, 5, 10.0, 17.5, 1000.0);
        draw_plan(&first, &mut target);
        assert_eq!(target.commands.len(), 11);

        let second = build_render_plan(100.0, 3, 10.0, 40.0, 1000.0);
        draw_plan(&second, &mut target);
        assert_eq!(target.commands.len(), 7);
        assert_eq!(target.width, second.canvas_width);
        assert_eq!(target.height, 150.0);
    }
}
