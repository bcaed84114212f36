use crate::paint::{DisplayList, PaintCommand};
use std::fmt::Write as _;

#[derive(Debug, Clone, Default)]
pub struct SvgRenderOptions {
    /// Root `id`; sanitized with [`sanitize_svg_id`].
    pub diagram_id: Option<String>,
    /// Emitted as the SVG `<title>` when set.
    pub title: Option<String>,
}

/// Serializes a recorded render into a standalone SVG document.
pub fn render_svg(list: &DisplayList, options: &SvgRenderOptions) -> String {
    let w = fmt(list.width.max(1.0));
    let h = fmt(list.height.max(1.0));

    let mut out = String::new();
    out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg""#);
    if let Some(id) = options.diagram_id.as_deref() {
        let _ = write!(&mut out, r#" id="{}""#, escape_xml(&sanitize_svg_id(id)));
    }
    let _ = write!(
        &mut out,
        r#" width="{w}" height="{h}" viewBox="0 0 {w} {h}" shape-rendering="crispEdges">"#
    );
    if let Some(title) = options.title.as_deref() {
        let _ = write!(&mut out, "<title>{}</title>", escape_xml(title));
    }

    for cmd in &list.commands {
        match *cmd {
            PaintCommand::Clear { color } => {
                let _ = write!(
                    &mut out,
                    r#"<rect x="0" y="0" width="{w}" height="{h}" fill="{}"/>"#,
                    color.to_hex()
                );
            }
            PaintCommand::FillRect {
                x,
                y,
                width,
                height,
                color,
            } => {
                let _ = write!(
                    &mut out,
                    r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
                    fmt(x),
                    fmt(y),
                    fmt(width),
                    fmt(height),
                    color.to_hex()
                );
            }
            PaintCommand::StrokeRect {
                x,
                y,
                width,
                height,
                color,
                line_width,
            } => {
                let _ = write!(
                    &mut out,
                    r#"<rect x="{}" y="{}" width="{}" height="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
                    fmt(x),
                    fmt(y),
                    fmt(width),
                    fmt(height),
                    color.to_hex(),
                    fmt(line_width)
                );
            }
        }
    }

    out.push_str("</svg>");
    out
}

/// Converts an arbitrary string into a conservative SVG `id` token.
///
/// This helper:
/// - trims whitespace
/// - replaces unsupported characters with `-`
/// - ensures the id starts with an ASCII letter by prefixing `nd-` when needed
pub fn sanitize_svg_id(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return "nd-untitled".to_string();
    }

    let mut out = String::with_capacity(raw.len() + 4);
    for ch in raw.chars() {
        let ok = ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || ch == ':' || ch == '.';
        out.push(if ok { ch } else { '-' });
    }

    let starts_ok = out.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
    if !starts_ok {
        out.insert_str(0, "nd-");
    }

    while out.contains("--") {
        out = out.replace("--", "-");
    }
    let out = out.trim_matches('-');
    if out.is_empty() || out == "nd" {
        return "nd-untitled".to_string();
    }
    out.to_string()
}

fn fmt(v: f64) -> String {
    // Avoid `-0` and tiny float noise from our own calculations.
    if !v.is_finite() {
        return "0".to_string();
    }

    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    }
    let s = v.to_string();
    if s == "-0" { "0".to_string() } else { s }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
