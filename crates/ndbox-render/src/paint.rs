//! Drawing surfaces.
//!
//! Primitives take their color and line width explicitly; a surface carries no current
//! fill or stroke style between calls.

use ndbox_core::Color;
use ndbox_core::geom::{Rect, Size};
use serde::{Deserialize, Serialize};

pub trait Surface {
    /// Resizes the surface. Existing content is discarded.
    fn resize(&mut self, size: Size);

    /// Fills the whole surface.
    fn clear(&mut self, color: Color);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Strokes the outline of `rect`, centered on its edges.
    fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f64);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum PaintCommand {
    Clear {
        color: Color,
    },
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
    },
    StrokeRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
        line_width: f64,
    },
}

impl PaintCommand {
    /// Area touched by this command, including the outer half of a stroke.
    pub fn extent(&self, canvas: Size) -> Rect {
        match *self {
            PaintCommand::Clear { .. } => Rect::from_size(canvas),
            PaintCommand::FillRect {
                x,
                y,
                width,
                height,
                ..
            } => ndbox_core::geom::rect(x, y, width, height),
            PaintCommand::StrokeRect {
                x,
                y,
                width,
                height,
                line_width,
                ..
            } => {
                let h = line_width / 2.0;
                ndbox_core::geom::rect(x - h, y - h, width + line_width, height + line_width)
            }
        }
    }
}

/// A surface that records what was painted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayList {
    pub width: f64,
    pub height: f64,
    pub commands: Vec<PaintCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(&self) -> Size {
        ndbox_core::geom::size(self.width, self.height)
    }

    /// Replays the recorded commands onto another surface.
    pub fn replay(&self, target: &mut dyn Surface) {
        target.resize(self.size());
        for cmd in &self.commands {
            match *cmd {
                PaintCommand::Clear { color } => target.clear(color),
                PaintCommand::FillRect {
                    x,
                    y,
                    width,
                    height,
                    color,
                } => target.fill_rect(ndbox_core::geom::rect(x, y, width, height), color),
                PaintCommand::StrokeRect {
                    x,
                    y,
                    width,
                    height,
                    color,
                    line_width,
                } => target.stroke_rect(
                    ndbox_core::geom::rect(x, y, width, height),
                    color,
                    line_width,
                ),
            }
        }
    }
}

impl Surface for DisplayList {
    fn resize(&mut self, size: Size) {
        self.width = size.width;
        self.height = size.height;
        self.commands.clear();
    }

    fn clear(&mut self, color: Color) {
        self.commands.push(PaintCommand::Clear { color });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(PaintCommand::FillRect {
            x: rect.origin.x,
            y: rect.origin.y,
            width: rect.size.width,
            height: rect.size.height,
            color,
        });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f64) {
        self.commands.push(PaintCommand::StrokeRect {
            x: rect.origin.x,
            y: rect.origin.y,
            width: rect.size.width,
            height: rect.size.height,
            color,
            line_width,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndbox_core::geom::{rect, size};

    #[test]
    fn resize_discards_previous_commands() {
        let mut list = DisplayList::new();
        list.fill_rect(rect(0.0, 0.0, 1.0, 1.0), Color::rgb(1, 2, 3));
        list.resize(size(10.0, 20.0));
        assert!(list.commands.is_empty());
        assert_eq!(list.size(), size(10.0, 20.0));
    }

    #[test]
    fn replay_reproduces_commands() {
        let mut list = DisplayList::new();
        list.resize(size(5.0, 5.0));
        list.clear(Color::rgb(0, 0, 0));
        list.stroke_rect(rect(1.0, 1.0, 3.0, 3.0), Color::rgb(9, 9, 9), 2.0);

        let mut copy = DisplayList::new();
        list.replay(&mut copy);
        assert_eq!(copy.commands, list.commands);
        assert_eq!(copy.size(), list.size());
    }

    #[test]
    fn stroke_extent_includes_outer_half() {
        let cmd = PaintCommand::StrokeRect {
            x: 10.0,
            y: 10.0,
            width: 4.0,
            height: 4.0,
            color: Color::rgb(0, 0, 0),
            line_width: 2.0,
        };
        assert_eq!(cmd.extent(size(0.0, 0.0)), rect(9.0, 9.0, 6.0, 6.0));
    }

    #[test]
    fn commands_serialize_with_op_tag() {
        let cmd = PaintCommand::FillRect {
            x: 1.0,
            y: 2.0,
            width: 3.0,
            height: 4.0,
            color: Color::rgb(0x3a, 0xb1, 0xd2),
        };
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(json["op"], "fillRect");
        assert_eq!(json["color"], "#3ab1d2");
    }
}
