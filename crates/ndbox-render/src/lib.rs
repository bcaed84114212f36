#![forbid(unsafe_code)]

pub mod layout;
pub mod model;
pub mod paint;
pub mod render;
pub mod svg;

pub use layout::{
    MAX_CANVAS_AREA, MAX_CANVAS_SIDE, check_canvas, checked_layout, compute_box, fold_axis,
    layout_shape,
};
pub use model::{Detail, FoldAxis, LevelLayout, ShapeLayout};
pub use paint::{DisplayList, PaintCommand, Surface};
pub use render::{render, render_canvas, render_with_detail};

use ndbox_core::{Shape, StyleConfig};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] ndbox_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Parses `text` and lays it out.
pub fn layout_text(text: &str, style: &StyleConfig) -> Result<ShapeLayout> {
    let shape = Shape::parse(text)?;
    Ok(checked_layout(&shape, style)?)
}

/// Records the full-canvas render of `shape`.
pub fn paint_shape(shape: &Shape, style: &StyleConfig) -> DisplayList {
    let mut list = DisplayList::new();
    render_canvas(&mut list, shape, style);
    list
}

/// Parses `text` and records its full-canvas render.
pub fn paint_text(text: &str, style: &StyleConfig) -> Result<DisplayList> {
    let shape = Shape::parse(text)?;
    checked_layout(&shape, style)?;
    Ok(paint_shape(&shape, style))
}

/// Parses `text` and renders it to an SVG document.
pub fn render_svg_text(
    text: &str,
    style: &StyleConfig,
    options: &svg::SvgRenderOptions,
) -> Result<String> {
    let shape = Shape::parse(text)?;
    checked_layout(&shape, style)?;
    Ok(svg::render_svg(&paint_shape(&shape, style), options))
}
