use ndbox::StyleConfig;
use ndbox::render::raster::{RasterError, RasterOptions};
use ndbox::render::{HeadlessError, SvgRenderOptions};
use serde::Serialize;
use std::io::{Read, Write};
use std::str::FromStr;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Shape(ndbox::Error),
    Style(ndbox::Error),
    Raster(RasterError),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Shape(err) => write!(f, "Enter a valid shape! {err}"),
            CliError::Style(err) => write!(f, "style error: {err}"),
            CliError::Raster(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<HeadlessError> for CliError {
    fn from(value: HeadlessError) -> Self {
        match value {
            HeadlessError::Shape(err) => Self::Shape(err),
            HeadlessError::Render(ndbox_render::Error::Core(err)) => Self::Shape(err),
        }
    }
}

impl From<RasterError> for CliError {
    fn from(value: RasterError) -> Self {
        match value {
            RasterError::Headless(err) => err.into(),
            other => Self::Raster(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    Layout,
    Paint,
    #[default]
    Render,
}

#[derive(Debug, Clone, Copy, Default)]
enum RenderFormat {
    #[default]
    Svg,
    Png,
    Jpeg,
    Pdf,
}

impl RenderFormat {
    fn extension(self) -> &'static str {
        match self {
            RenderFormat::Svg => "svg",
            RenderFormat::Png => "png",
            RenderFormat::Jpeg => "jpg",
            RenderFormat::Pdf => "pdf",
        }
    }
}

impl FromStr for RenderFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "pdf" => Ok(Self::Pdf),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    shape_tokens: Vec<String>,
    input: Option<String>,
    pretty: bool,
    render_format: RenderFormat,
    render_scale: f32,
    style: Option<String>,
    diagram_id: Option<String>,
    title: Option<String>,
    out: Option<String>,
}

#[derive(Serialize)]
struct PaintOut<'a> {
    layout: &'a ndbox::render::ShapeLayout,
    display_list: &'a ndbox::render::DisplayList,
}

fn usage() -> &'static str {
    "ndbox-cli\n\
\n\
USAGE:\n\
  ndbox-cli layout [--pretty] [--style <path.json>] [--input <path>|-] [<dim>...]\n\
  ndbox-cli paint [--pretty] [--style <path.json>] [--input <path>|-] [<dim>...]\n\
  ndbox-cli [render] [--format svg|png|jpg|pdf] [--scale <n>] [--style <path.json>] [--id <diagram-id>] [--title <text>] [--out <path>] [--input <path>|-] [<dim>...]\n\
\n\
NOTES:\n\
  - The shape is given as dimension arguments (e.g. `ndbox-cli render 2 3 4`), or read from\n\
    --input (a file, or '-' for stdin). With neither, it is read from stdin.\n\
  - layout prints the computed boxes as JSON; paint also prints the paint commands.\n\
  - render prints SVG to stdout by default; use --out to write a file.\n\
  - PNG/JPG/PDF output defaults to writing next to the --input file (or ./out.<ext>).\n\
  - --style takes a JSON object of overrides, e.g. {\"cellSize\": 16, \"background\": \"#ffffff\"}.\n\
  - Set RUST_LOG (e.g. RUST_LOG=ndbox_render=debug) to enable diagnostics on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        command: Command::Render,
        render_format: RenderFormat::Svg,
        render_scale: 1.0,
        ..Default::default()
    };

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "layout" => args.command = Command::Layout,
            "paint" => args.command = Command::Paint,
            "render" => args.command = Command::Render,
            "--pretty" => args.pretty = true,
            "--format" => {
                let Some(fmt) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.render_format = fmt
                    .parse::<RenderFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--scale" => {
                let Some(scale) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.render_scale = scale.parse::<f32>().map_err(|_| CliError::Usage(usage()))?;
                if !(args.render_scale.is_finite() && args.render_scale > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
            }
            "--style" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.style = Some(path.clone());
            }
            "--id" => {
                let Some(id) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.diagram_id = Some(id.clone());
            }
            "--title" => {
                let Some(title) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.title = Some(title.clone());
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--input" => {
                let Some(input) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.input = Some(input.clone());
            }
            "--" => {
                args.shape_tokens.extend(it.by_ref().cloned());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            token => args.shape_tokens.push(token.to_string()),
        }
    }

    if args.input.is_some() && !args.shape_tokens.is_empty() {
        return Err(CliError::Usage(usage()));
    }
    Ok(args)
}

fn read_shape_text(args: &Args) -> Result<String, CliError> {
    if !args.shape_tokens.is_empty() {
        return Ok(args.shape_tokens.join(" "));
    }
    match args.input.as_deref() {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn load_style(path: Option<&str>) -> Result<StyleConfig, CliError> {
    let Some(path) = path else {
        return Ok(StyleConfig::default());
    };
    let text = std::fs::read_to_string(path)?;
    StyleConfig::from_json_str(&text).map_err(CliError::Style)
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut stdout, value)?;
    } else {
        serde_json::to_writer(&mut stdout, value)?;
    }
    writeln!(stdout)?;
    Ok(())
}

fn default_out_path(input: Option<&str>, ext: &str) -> std::path::PathBuf {
    match input {
        Some(path) if path != "-" => std::path::PathBuf::from(path).with_extension(ext),
        _ => std::path::PathBuf::from(format!("out.{ext}")),
    }
}

fn write_bytes(bytes: &[u8], out: &str) -> Result<(), CliError> {
    if out == "-" {
        std::io::stdout().lock().write_all(bytes)?;
    } else {
        std::fs::write(out, bytes)?;
    }
    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    // Only initialize if RUST_LOG is set.
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let style = load_style(args.style.as_deref())?;
    let text = read_shape_text(&args)?;
    tracing::debug!(command = ?args.command, text = %text.trim(), "running");

    match args.command {
        Command::Layout => {
            let layout = ndbox::render::layout_sync(&text, &style)?;
            write_json(&layout, args.pretty)
        }
        Command::Paint => {
            let layout = ndbox::render::layout_sync(&text, &style)?;
            let list = ndbox::render::paint_sync(&text, &style)?;
            write_json(
                &PaintOut {
                    layout: &layout,
                    display_list: &list,
                },
                args.pretty,
            )
        }
        Command::Render => {
            let svg_options = SvgRenderOptions {
                diagram_id: args.diagram_id.clone(),
                title: args.title.clone(),
            };
            let raster = RasterOptions {
                scale: args.render_scale,
                ..Default::default()
            };

            let bytes = match args.render_format {
                RenderFormat::Svg => {
                    let svg = ndbox::render::render_svg_sync(&text, &style, &svg_options)?;
                    match args.out.as_deref() {
                        None => {
                            println!("{svg}");
                            return Ok(());
                        }
                        Some(_) => svg.into_bytes(),
                    }
                }
                RenderFormat::Png => {
                    ndbox::render::raster::render_png_sync(&text, &style, &raster)?
                }
                RenderFormat::Jpeg => {
                    ndbox::render::raster::render_jpeg_sync(&text, &style, &raster)?
                }
                RenderFormat::Pdf => {
                    ndbox::render::raster::render_pdf_sync(&text, &style, &svg_options)?
                }
            };

            let out = args.out.clone().unwrap_or_else(|| {
                default_out_path(args.input.as_deref(), args.render_format.extension())
                    .to_string_lossy()
                    .to_string()
            });
            write_bytes(&bytes, &out)
        }
    }
}

fn main() {
    init_tracing();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(err @ CliError::Shape(_)) => {
            eprintln!("{err}");
            std::process::exit(3);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
