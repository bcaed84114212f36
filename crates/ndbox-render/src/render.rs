//! Recursive painter for nested-box diagrams.
//!
//! Each painter fills exactly the box that [`crate::layout`] computes for the same sub-shape.
//! Borders are stroked inset by half the line width so nothing spills past that box.

use crate::layout::{box_of, cube_box, fold_axis, layout_shape, matrix_box, row_box};
use crate::model::{Detail, FoldAxis, ShapeLayout};
use crate::paint::Surface;
use ndbox_core::geom::{Point, Rect, inset, point, rect, size, vector};
use ndbox_core::{Color, Shape, StyleConfig};

/// Paints `shape` with its top-left corner at `origin` and returns the bottom-right corner.
pub fn render(
    surface: &mut dyn Surface,
    shape: &Shape,
    style: &StyleConfig,
    origin: Point,
) -> Point {
    render_with_detail(surface, shape, style, origin, Detail::Full)
}

/// Like [`render`], but a rank-2 shape can be painted in its abbreviated form.
pub fn render_with_detail(
    surface: &mut dyn Surface,
    shape: &Shape,
    style: &StyleConfig,
    origin: Point,
    detail: Detail,
) -> Point {
    paint(surface, shape.dims(), style, origin, detail)
}

/// Resizes and clears `surface`, then paints `shape` inside the canvas margin.
pub fn render_canvas(
    surface: &mut dyn Surface,
    shape: &Shape,
    style: &StyleConfig,
) -> ShapeLayout {
    let layout = layout_shape(shape, style);
    surface.resize(size(layout.canvas_width, layout.canvas_height));
    surface.clear(style.background);
    let end = render(surface, shape, style, point(style.margin, style.margin));
    tracing::debug!(
        shape = %shape,
        canvas_width = layout.canvas_width,
        canvas_height = layout.canvas_height,
        end_x = end.x,
        end_y = end.y,
        "rendered canvas"
    );
    layout
}

fn paint(
    surface: &mut dyn Surface,
    dims: &[usize],
    style: &StyleConfig,
    origin: Point,
    detail: Detail,
) -> Point {
    tracing::trace!(rank = dims.len(), x = origin.x, y = origin.y, "paint level");
    match dims {
        [] => origin,
        [n] => paint_row(surface, *n, style, origin),
        [rows, cols] => paint_matrix(surface, *rows, *cols, style, origin, detail),
        [mats, rows, cols] => paint_cube(surface, *mats, *rows, *cols, style, origin),
        [n, rest @ ..] => {
            let b = box_of(dims, style);
            stroke_border(
                surface,
                Rect::new(origin, b),
                style.border_color(dims.len()),
                style,
            );

            let inner = box_of(rest, style);
            let step = match fold_axis(dims.len()) {
                FoldAxis::Horizontal => vector(inner.width + style.ndim_gap, 0.0),
                FoldAxis::Vertical => vector(0.0, inner.height + style.ndim_gap),
            };
            let mut at = origin + vector(style.gap, style.gap);
            for _ in 0..*n {
                paint(surface, rest, style, at, Detail::Full);
                at += step;
            }
            origin + b
        }
    }
}

/// One accent strip carved into `n` cells by background-colored gaps.
fn paint_row(surface: &mut dyn Surface, n: usize, style: &StyleConfig, origin: Point) -> Point {
    let b = row_box(n, style);
    surface.fill_rect(Rect::new(origin, b), style.cell_color);

    if style.gap > 0.0 {
        let mut gap_x = origin.x + style.cell_size;
        for _ in 1..n {
            surface.fill_rect(
                rect(gap_x, origin.y, style.gap, style.cell_size),
                style.background,
            );
            gap_x += style.gap + style.cell_size;
        }
    }
    origin + b
}

fn paint_matrix(
    surface: &mut dyn Surface,
    rows: usize,
    cols: usize,
    style: &StyleConfig,
    origin: Point,
    detail: Detail,
) -> Point {
    let b = matrix_box(rows, cols, style);
    let frame = Rect::new(origin, b);
    surface.fill_rect(frame, style.background);
    stroke_border(surface, frame, style.matrix_border, style);

    let mut at = origin + vector(style.gap, style.gap);
    for row in 0..rows {
        let cells = match detail {
            Detail::Full => cols,
            Detail::Abbreviated if row == 0 => cols,
            Detail::Abbreviated => 1,
        };
        paint_row(surface, cells, style, at);
        at.y += style.cell_size + style.gap;
    }
    origin + b
}

/// Stacked matrices: all but the last abbreviated, each offset diagonally from the previous.
fn paint_cube(
    surface: &mut dyn Surface,
    mats: usize,
    rows: usize,
    cols: usize,
    style: &StyleConfig,
    origin: Point,
) -> Point {
    let b = cube_box(mats, rows, cols, style);
    stroke_border(surface, Rect::new(origin, b), style.cube_border, style);

    let step = vector(style.matrix_gap_x, style.matrix_gap_y);
    let mut at = origin + vector(style.gap, style.gap);
    for _ in 1..mats {
        paint_matrix(surface, rows, cols, style, at, Detail::Abbreviated);
        at += step;
    }
    paint_matrix(surface, rows, cols, style, at, Detail::Full);
    origin + b
}

fn stroke_border(surface: &mut dyn Surface, frame: Rect, color: Color, style: &StyleConfig) {
    if style.line_width <= 0.0 {
        return;
    }
    surface.stroke_rect(inset(frame, style.line_width / 2.0), color, style.line_width);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::compute_box;
    use crate::paint::{DisplayList, PaintCommand};

    fn shape(dims: &[usize]) -> Shape {
        Shape::new(dims.to_vec()).unwrap()
    }

    #[test]
    fn row_paints_strip_then_gaps() {
        let style = StyleConfig::default();
        let mut list = DisplayList::new();
        let end = render(&mut list, &shape(&[4]), &style, point(8.0, 8.0));
        assert_eq!(end, point(132.0, 33.0));
        assert_eq!(list.commands.len(), 4);
        assert_eq!(
            list.commands[0],
            PaintCommand::FillRect {
                x: 8.0,
                y: 8.0,
                width: 124.0,
                height: 25.0,
                color: style.cell_color,
            }
        );
        assert_eq!(
            list.commands[1],
            PaintCommand::FillRect {
                x: 33.0,
                y: 8.0,
                width: 8.0,
                height: 25.0,
                color: style.background,
            }
        );
    }

    #[test]
    fn single_cell_row_has_no_gaps() {
        let mut list = DisplayList::new();
        render(
            &mut list,
            &shape(&[1]),
            &StyleConfig::default(),
            point(0.0, 0.0),
        );
        assert_eq!(list.commands.len(), 1);
    }

    #[test]
    fn abbreviated_matrix_stubs_later_rows() {
        let style = StyleConfig::default();
        let mut list = DisplayList::new();
        let end = render_with_detail(
            &mut list,
            &shape(&[3, 4]),
            &style,
            point(0.0, 0.0),
            Detail::Abbreviated,
        );
        let b = compute_box(&shape(&[3, 4]), &style);
        assert_eq!(end, point(b.width, b.height));

        let strips = list
            .commands
            .iter()
            .filter_map(|c| match *c {
                PaintCommand::FillRect { width, color, .. } if color == style.cell_color => {
                    Some(width)
                }
                _ => None,
            })
            .collect::<Vec<_>>();
        assert_eq!(strips, vec![124.0, 25.0, 25.0]);
    }

    #[test]
    fn borders_are_inset_by_half_the_line_width() {
        let style = StyleConfig::default();
        let mut list = DisplayList::new();
        render(&mut list, &shape(&[1, 1]), &style, point(10.0, 10.0));
        let stroke = list
            .commands
            .iter()
            .find(|c| matches!(c, PaintCommand::StrokeRect { .. }))
            .unwrap();
        assert_eq!(
            *stroke,
            PaintCommand::StrokeRect {
                x: 11.0,
                y: 11.0,
                width: 39.0,
                height: 39.0,
                color: style.matrix_border,
                line_width: 2.0,
            }
        );
    }

    #[test]
    fn canvas_is_cleared_once_at_the_top() {
        let style = StyleConfig::default();
        let mut list = DisplayList::new();
        let layout = render_canvas(&mut list, &shape(&[2, 2, 2, 2]), &style);
        assert_eq!(list.width, layout.canvas_width);
        assert_eq!(list.height, layout.canvas_height);
        let clears = list
            .commands
            .iter()
            .filter(|c| matches!(c, PaintCommand::Clear { .. }))
            .count();
        assert_eq!(clears, 1);
        assert!(matches!(list.commands[0], PaintCommand::Clear { .. }));
    }
}
