#![forbid(unsafe_code)]

//! Redraw-on-demand controller with a download guard.
//!
//! A [`Visualizer`] owns one canvas. Each [`Visualizer::visualize`] call repaints it from
//! scratch; [`Visualizer::serialize`] turns the painted canvas into a PNG and only then does
//! [`Visualizer::download`] hand the image out.

use super::raster::{PixmapSurface, RasterError, RasterOptions, encode_png};
use crate::render::{ShapeLayout, checked_layout, render_canvas};
use ndbox_core::{Shape, StyleConfig};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Enter a valid shape! ({0})")]
    Shape(#[from] ndbox_core::Error),
    #[error("Image is not yet created!")]
    ImageNotReady,
    #[error("nothing has been drawn yet")]
    NothingPainted,
    #[error(transparent)]
    Raster(#[from] RasterError),
}

pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Debug, Clone)]
pub struct Visualizer {
    style: StyleConfig,
    canvas: PixmapSurface,
    layout: Option<ShapeLayout>,
    /// Painted but not yet serialized.
    pending: bool,
    image: Option<Vec<u8>>,
    image_ready: bool,
}

impl Default for Visualizer {
    fn default() -> Self {
        Self::new(StyleConfig::default(), &RasterOptions::default())
    }
}

impl Visualizer {
    pub fn new(style: StyleConfig, options: &RasterOptions) -> Self {
        Self {
            style,
            canvas: PixmapSurface::new(options.scale),
            layout: None,
            pending: false,
            image: None,
            image_ready: false,
        }
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Layout of the most recent successful draw.
    pub fn layout(&self) -> Option<&ShapeLayout> {
        self.layout.as_ref()
    }

    pub fn is_image_ready(&self) -> bool {
        self.image_ready
    }

    pub fn canvas(&self) -> &PixmapSurface {
        &self.canvas
    }

    /// Parses `text` and repaints the canvas, dropping the previous image.
    ///
    /// On any error nothing changes: the previous canvas, layout and image stay as they were.
    pub fn visualize(&mut self, text: &str) -> Result<&ShapeLayout> {
        let shape = Shape::parse(text).inspect_err(|err| {
            tracing::warn!(error = %err, "rejected shape input");
        })?;
        checked_layout(&shape, &self.style)?;

        let mut canvas = PixmapSurface::new(self.canvas.scale());
        let layout = render_canvas(&mut canvas, &shape, &self.style);
        canvas.pixmap().inspect_err(|err| {
            tracing::warn!(error = %err, "canvas not repainted");
        })?;

        self.canvas = canvas;
        self.image = None;
        self.image_ready = false;
        self.pending = true;
        tracing::debug!(shape = %shape, "canvas repainted; image pending");
        Ok(self.layout.insert(layout))
    }

    /// Encodes the painted canvas and marks the image ready for download.
    pub fn serialize(&mut self) -> Result<()> {
        if !self.pending {
            return if self.image_ready {
                Ok(())
            } else {
                Err(SessionError::NothingPainted)
            };
        }
        let bytes = encode_png(self.canvas.pixmap()?)?;
        tracing::debug!(bytes = bytes.len(), "image serialized");
        self.image = Some(bytes);
        self.pending = false;
        self.image_ready = true;
        Ok(())
    }

    /// The serialized PNG. Rejected until the latest draw has been serialized.
    pub fn download(&self) -> Result<&[u8]> {
        match (&self.image, self.image_ready) {
            (Some(image), true) => Ok(image),
            _ => {
                tracing::warn!("download requested before the image was created");
                Err(SessionError::ImageNotReady)
            }
        }
    }

    /// `visualize` followed by `serialize`.
    pub fn draw(&mut self, text: &str) -> Result<&[u8]> {
        self.visualize(text)?;
        self.serialize()?;
        self.download()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn download_is_blocked_until_serialized() {
        let mut vis = Visualizer::default();
        assert!(matches!(vis.download(), Err(SessionError::ImageNotReady)));
        assert!(matches!(vis.download(), Err(SessionError::ImageNotReady)));

        vis.visualize("2 3").unwrap();
        assert!(!vis.is_image_ready());
        assert!(matches!(vis.download(), Err(SessionError::ImageNotReady)));

        vis.serialize().unwrap();
        assert!(vis.is_image_ready());
        assert!(vis.download().unwrap().starts_with(b"\x89PNG\r\n\x1a\n"));
    }

    #[test]
    fn successful_visualize_drops_stale_image() {
        let mut vis = Visualizer::default();
        vis.draw("3").unwrap();
        assert!(vis.image.is_some());

        vis.visualize("2 2").unwrap();
        assert!(vis.image.is_none());
        assert!(vis.pending);
    }

    #[test]
    fn serialize_without_a_draw_fails() {
        let mut vis = Visualizer::default();
        assert!(matches!(vis.serialize(), Err(SessionError::NothingPainted)));
    }

    #[test]
    fn error_message_matches_user_alert() {
        assert_eq!(
            SessionError::ImageNotReady.to_string(),
            "Image is not yet created!"
        );
    }
}
