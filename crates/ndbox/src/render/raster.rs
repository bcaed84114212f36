#![forbid(unsafe_code)]

use crate::render::{
    DisplayList, HeadlessError, Surface, SvgRenderOptions, check_canvas, checked_layout,
    render_canvas,
};
use ndbox_core::geom::{Rect, Size};
use ndbox_core::{Color, Shape, StyleConfig};

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error(transparent)]
    Headless(#[from] HeadlessError),
    #[error("failed to parse SVG")]
    SvgParse,
    #[error("failed to allocate pixmap for raster rendering")]
    PixmapAlloc,
    #[error("failed to encode PNG")]
    PngEncode,
    #[error("JPG rendering requires an opaque background color")]
    JpegOpaqueBackgroundRequired,
    #[error("failed to encode JPG")]
    JpegEncode,
    #[error("failed to convert SVG to PDF")]
    PdfConvert,
}

impl From<ndbox_core::Error> for RasterError {
    fn from(value: ndbox_core::Error) -> Self {
        Self::Headless(value.into())
    }
}

pub type Result<T> = std::result::Result<T, RasterError>;

#[derive(Debug, Clone)]
pub struct RasterOptions {
    pub scale: f32,
    pub jpeg_quality: u8,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            jpeg_quality: 90,
        }
    }
}

/// A [`Surface`] backed by a `tiny-skia` pixmap.
///
/// Diagram units are multiplied by `scale`. If the scaled canvas exceeds the canvas limits or
/// the pixmap cannot be allocated on resize, the surface ignores paint calls and
/// [`PixmapSurface::pixmap`] reports the failure.
#[derive(Debug, Clone)]
pub struct PixmapSurface {
    pixmap: Option<tiny_skia::Pixmap>,
    scale: f32,
}

impl PixmapSurface {
    pub fn new(scale: f32) -> Self {
        Self {
            pixmap: None,
            scale,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn pixmap(&self) -> Result<&tiny_skia::Pixmap> {
        self.pixmap.as_ref().ok_or(RasterError::PixmapAlloc)
    }

    pub fn into_pixmap(self) -> Result<tiny_skia::Pixmap> {
        self.pixmap.ok_or(RasterError::PixmapAlloc)
    }

    fn transform(&self) -> tiny_skia::Transform {
        tiny_skia::Transform::from_scale(self.scale, self.scale)
    }
}

impl Surface for PixmapSurface {
    fn resize(&mut self, size: Size) {
        let width = (size.width * self.scale as f64).ceil().max(1.0);
        let height = (size.height * self.scale as f64).ceil().max(1.0);
        if let Err(err) = check_canvas(width, height) {
            tracing::warn!(error = %err, "refusing to allocate pixmap");
            self.pixmap = None;
            return;
        }
        let (width_px, height_px) = (width as u32, height as u32);
        self.pixmap = tiny_skia::Pixmap::new(width_px, height_px);
        if self.pixmap.is_none() {
            tracing::warn!(width_px, height_px, "pixmap allocation failed");
        }
    }

    fn clear(&mut self, color: Color) {
        if let Some(pixmap) = self.pixmap.as_mut() {
            pixmap.fill(skia_color(color));
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let transform = self.transform();
        let Some(pixmap) = self.pixmap.as_mut() else {
            return;
        };
        let Some(r) = skia_rect(rect) else {
            return;
        };
        pixmap.fill_rect(r, &paint(color), transform, None);
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f64) {
        let transform = self.transform();
        let Some(pixmap) = self.pixmap.as_mut() else {
            return;
        };
        let Some(r) = skia_rect(rect) else {
            return;
        };
        let path = tiny_skia::PathBuilder::from_rect(r);
        let stroke = tiny_skia::Stroke {
            width: line_width as f32,
            ..Default::default()
        };
        pixmap.stroke_path(&path, &paint(color), &stroke, transform, None);
    }
}

fn skia_color(color: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a)
}

fn skia_rect(rect: Rect) -> Option<tiny_skia::Rect> {
    tiny_skia::Rect::from_xywh(
        rect.origin.x as f32,
        rect.origin.y as f32,
        rect.size.width as f32,
        rect.size.height as f32,
    )
}

fn paint(color: Color) -> tiny_skia::Paint<'static> {
    let mut paint = tiny_skia::Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint
}

/// Paints `shape` onto a freshly allocated pixmap sized to the canvas.
pub fn render_pixmap(
    shape: &Shape,
    style: &StyleConfig,
    options: &RasterOptions,
) -> Result<tiny_skia::Pixmap> {
    checked_layout(shape, style)?;
    let mut surface = PixmapSurface::new(options.scale);
    render_canvas(&mut surface, shape, style);
    surface.into_pixmap()
}

/// Replays a recorded render onto a pixmap.
pub fn rasterize(list: &DisplayList, options: &RasterOptions) -> Result<tiny_skia::Pixmap> {
    let mut surface = PixmapSurface::new(options.scale);
    list.replay(&mut surface);
    surface.into_pixmap()
}

pub fn render_png_sync(
    text: &str,
    style: &StyleConfig,
    options: &RasterOptions,
) -> Result<Vec<u8>> {
    let shape = Shape::parse(text)?;
    let pixmap = render_pixmap(&shape, style, options)?;
    encode_png(&pixmap)
}

pub fn render_jpeg_sync(
    text: &str,
    style: &StyleConfig,
    options: &RasterOptions,
) -> Result<Vec<u8>> {
    if !style.background.is_opaque() {
        return Err(RasterError::JpegOpaqueBackgroundRequired);
    }
    let shape = Shape::parse(text)?;
    let pixmap = render_pixmap(&shape, style, options)?;
    encode_jpeg(&pixmap, options.jpeg_quality)
}

pub fn render_pdf_sync(
    text: &str,
    style: &StyleConfig,
    svg_options: &SvgRenderOptions,
) -> Result<Vec<u8>> {
    let svg = super::render_svg_sync(text, style, svg_options)?;
    svg_to_pdf(&svg)
}

pub fn encode_png(pixmap: &tiny_skia::Pixmap) -> Result<Vec<u8>> {
    pixmap.encode_png().map_err(|_| RasterError::PngEncode)
}

/// Encodes an opaque pixmap as JPG. Alpha is dropped.
pub fn encode_jpeg(pixmap: &tiny_skia::Pixmap, quality: u8) -> Result<Vec<u8>> {
    let (w, h) = (pixmap.width(), pixmap.height());

    // tiny-skia renders into an RGBA8 buffer. The canvas is always cleared to an opaque
    // background first, so the alpha channel is always 255 and can be dropped safely.
    let rgba = pixmap.data();
    let mut rgb = vec![0u8; (w as usize) * (h as usize) * 3];
    for (src, dst) in rgba.chunks_exact(4).zip(rgb.chunks_exact_mut(3)) {
        dst[0] = src[0];
        dst[1] = src[1];
        dst[2] = src[2];
    }

    let mut out = Vec::new();
    let mut enc = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, quality);
    enc.encode(&rgb, w, h, image::ExtendedColorType::Rgb8)
        .map_err(|_| RasterError::JpegEncode)?;
    Ok(out)
}

pub fn svg_to_pdf(svg: &str) -> Result<Vec<u8>> {
    let opt = svg2pdf::usvg::Options::default();
    let tree = svg2pdf::usvg::Tree::from_str(svg, &opt).map_err(|_| RasterError::SvgParse)?;

    svg2pdf::to_pdf(
        &tree,
        svg2pdf::ConversionOptions::default(),
        svg2pdf::PageOptions::default(),
    )
    .map_err(|_| RasterError::PdfConvert)
}
