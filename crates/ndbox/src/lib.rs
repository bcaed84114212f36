#![forbid(unsafe_code)]

//! `ndbox` draws the structure of an N-dimensional array shape as nested boxes.
//!
//! The innermost axis is a row of cells, the next one a bordered matrix of rows, the third a
//! stack of matrices offset to suggest depth, and every axis above that repeats the boxes
//! below it along alternating horizontal/vertical fold axes.
//!
//! # Features
//!
//! - `render` (default): layout + SVG rendering (`ndbox::render`)
//! - `raster`: PNG/JPG/PDF output and the [`render::session::Visualizer`] controller

pub use ndbox_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use ndbox_render::model::{Detail, FoldAxis, LevelLayout, ShapeLayout};
    pub use ndbox_render::paint::{DisplayList, PaintCommand, Surface};
    pub use ndbox_render::svg::{SvgRenderOptions, sanitize_svg_id};
    pub use ndbox_render::{
        MAX_CANVAS_AREA, MAX_CANVAS_SIDE, check_canvas, checked_layout, compute_box, fold_axis,
        layout_shape, paint_shape, render, render_canvas, render_with_detail,
    };

    use ndbox_core::StyleConfig;

    #[cfg(feature = "raster")]
    pub mod raster;
    #[cfg(feature = "raster")]
    pub mod session;

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Shape(#[from] ndbox_core::Error),
        #[error(transparent)]
        Render(#[from] ndbox_render::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Parses `text` and returns its layout summary.
    pub fn layout_sync(text: &str, style: &StyleConfig) -> Result<ShapeLayout> {
        Ok(ndbox_render::layout_text(text, style)?)
    }

    /// Parses `text` and records the paint commands of a full-canvas render.
    pub fn paint_sync(text: &str, style: &StyleConfig) -> Result<DisplayList> {
        Ok(ndbox_render::paint_text(text, style)?)
    }

    /// Parses `text` and renders it to SVG.
    pub fn render_svg_sync(
        text: &str,
        style: &StyleConfig,
        svg_options: &SvgRenderOptions,
    ) -> Result<String> {
        Ok(ndbox_render::render_svg_text(text, style, svg_options)?)
    }

    /// Convenience wrapper that bundles a style and SVG options for repeated renders.
    #[derive(Debug, Clone, Default)]
    pub struct HeadlessRenderer {
        pub style: StyleConfig,
        pub svg_options: SvgRenderOptions,
    }

    impl HeadlessRenderer {
        pub fn new(style: StyleConfig) -> Self {
            Self {
                style,
                svg_options: SvgRenderOptions::default(),
            }
        }

        pub fn with_svg_options(mut self, svg_options: SvgRenderOptions) -> Self {
            self.svg_options = svg_options;
            self
        }

        pub fn layout(&self, text: &str) -> Result<ShapeLayout> {
            layout_sync(text, &self.style)
        }

        pub fn render_svg(&self, text: &str) -> Result<String> {
            render_svg_sync(text, &self.style, &self.svg_options)
        }
    }

}
