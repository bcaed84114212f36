//! Bounding-box computation for nested-box diagrams.
//!
//! Every function here mirrors a painter in [`crate::render`]; the two must agree on the box
//! of every sub-shape, which is what lets the renderer return `origin + box` and lets callers
//! size the canvas up front.

use crate::model::{FoldAxis, LevelLayout, ShapeLayout};
use ndbox_core::geom::{Size, size};
use ndbox_core::{Error, Shape, StyleConfig};

/// Largest canvas side, in pixels, that a checked layout or a raster surface accepts.
pub const MAX_CANVAS_SIDE: f64 = 16_384.0;
/// Largest canvas area, in pixels.
pub const MAX_CANVAS_AREA: f64 = 67_108_864.0;

/// Pixel box of the whole diagram for `shape`, excluding the canvas margin.
pub fn compute_box(shape: &Shape, style: &StyleConfig) -> Size {
    box_of(shape.dims(), style)
}

/// Axis along which the copies of a rank-`rank` box's sub-shape are laid out (rank > 3).
///
/// Even ranks fold horizontally and odd ranks vertically, so adjacent levels always alternate.
pub fn fold_axis(rank: usize) -> FoldAxis {
    if rank % 2 == 0 {
        FoldAxis::Horizontal
    } else {
        FoldAxis::Vertical
    }
}

pub(crate) fn box_of(dims: &[usize], style: &StyleConfig) -> Size {
    match dims {
        [] => size(0.0, 0.0),
        [n] => row_box(*n, style),
        [rows, cols] => matrix_box(*rows, *cols, style),
        [mats, rows, cols] => cube_box(*mats, *rows, *cols, style),
        [n, rest @ ..] => {
            let inner = box_of(rest, style);
            let n = *n as f64;
            let along = |extent: f64| n * extent + (n - 1.0) * style.ndim_gap + 2.0 * style.gap;
            let across = |extent: f64| extent + 2.0 * style.gap;
            match fold_axis(dims.len()) {
                FoldAxis::Horizontal => size(along(inner.width), across(inner.height)),
                FoldAxis::Vertical => size(across(inner.width), along(inner.height)),
            }
        }
    }
}

pub(crate) fn row_box(n: usize, style: &StyleConfig) -> Size {
    let n = n as f64;
    size(style.cell_size * n + style.gap * (n - 1.0), style.cell_size)
}

pub(crate) fn matrix_box(rows: usize, cols: usize, style: &StyleConfig) -> Size {
    let (rows, cols) = (rows as f64, cols as f64);
    size(
        cols * style.cell_size + (cols + 1.0) * style.gap,
        rows * style.cell_size + (rows + 1.0) * style.gap,
    )
}

pub(crate) fn cube_box(mats: usize, rows: usize, cols: usize, style: &StyleConfig) -> Size {
    let base = matrix_box(rows, cols, style);
    let extra = mats as f64 - 1.0;
    size(
        base.width + 2.0 * style.gap + extra * style.matrix_gap_x,
        base.height + 2.0 * style.gap + extra * style.matrix_gap_y,
    )
}

/// Box, canvas size and per-level breakdown for `shape`.
pub fn layout_shape(shape: &Shape, style: &StyleConfig) -> ShapeLayout {
    let dims = shape.dims();
    let levels = (0..dims.len())
        .map(|depth| {
            let suffix = &dims[depth..];
            let rank = suffix.len();
            let b = box_of(suffix, style);
            LevelLayout {
                depth,
                rank,
                extent: suffix[0],
                width: b.width,
                height: b.height,
                fold: (rank > 3).then(|| fold_axis(rank)),
            }
        })
        .collect::<Vec<_>>();

    let b = compute_box(shape, style);
    tracing::debug!(
        shape = %shape,
        width = b.width,
        height = b.height,
        "computed layout"
    );
    ShapeLayout {
        shape: dims.to_vec(),
        width: b.width,
        height: b.height,
        margin: style.margin,
        canvas_width: b.width + 2.0 * style.margin,
        canvas_height: b.height + 2.0 * style.margin,
        levels,
    }
}

/// Rejects canvases beyond [`MAX_CANVAS_SIDE`] or [`MAX_CANVAS_AREA`].
pub fn check_canvas(width: f64, height: f64) -> ndbox_core::Result<()> {
    let fits = width <= MAX_CANVAS_SIDE
        && height <= MAX_CANVAS_SIDE
        && width * height <= MAX_CANVAS_AREA;
    if fits {
        Ok(())
    } else {
        Err(Error::CanvasTooLarge { width, height })
    }
}

/// [`layout_shape`], rejecting shapes whose canvas is too large to draw.
pub fn checked_layout(shape: &Shape, style: &StyleConfig) -> ndbox_core::Result<ShapeLayout> {
    let layout = layout_shape(shape, style);
    check_canvas(layout.canvas_width, layout.canvas_height).inspect_err(|err| {
        tracing::warn!(shape = %shape, error = %err, "rejected oversized canvas");
    })?;
    Ok(layout)
}
