use futures::executor::block_on;
use mindloom::MindmapConfig;
use mindloom::render::raster::{self, PdfPageOptions, RasterError, RasterOptions};
use mindloom::render::{
    DeterministicTextMeasurer, LayoutOptions, TextMeasurer, UnicodeWidthTextMeasurer,
    layout_markdown, render_layout_drawing, render_layout_svg,
};
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Config(mindloom::Error),
    Render(mindloom_render::Error),
    Raster(RasterError),
    Json(serde_json::Error),
    NoOutline,
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Config(err) => write!(f, "{err}"),
            CliError::Render(err) => write!(f, "{err}"),
            CliError::Raster(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::NoOutline => write!(f, "No mind-map outline found (no bullet lines)"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<mindloom::Error> for CliError {
    fn from(value: mindloom::Error) -> Self {
        Self::Config(value)
    }
}

impl From<mindloom_render::Error> for CliError {
    fn from(value: mindloom_render::Error) -> Self {
        Self::Render(value)
    }
}

impl From<RasterError> for CliError {
    fn from(value: RasterError) -> Self {
        Self::Raster(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Parse,
    Layout,
    Render,
}

#[derive(Debug, Clone, Copy, Default)]
enum TextMeasurerKind {
    #[default]
    Deterministic,
    Unicode,
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
    input: Option<String>,
    pretty: bool,
    verbosity: u8,
    config: Option<String>,
    text_measurer: TextMeasurerKind,
    render_format: RenderFormat,
    render_scale: f32,
    background: Option<String>,
    max_width: Option<f64>,
    max_height: Option<f64>,
    out: Option<String>,
}

fn usage() -> &'static str {
    "mindloom-cli\n\
\n\
USAGE:\n\
  mindloom-cli [parse] [--pretty] [--config <path>] [<path>|-]\n\
  mindloom-cli layout [--pretty] [--config <path>] [--text-measurer deterministic|unicode] [<path>|-]\n\
  mindloom-cli render [--format svg|png|jpg|pdf] [--scale <n>] [--background <color>] [--max-width <w>] [--max-height <h>] [--config <path>] [--text-measurer deterministic|unicode] [--out <path>] [<path>|-]\n\
\n\
OPTIONS:\n\
  -v, --verbose   Log to stderr; repeat for more detail (RUST_LOG overrides).\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - parse prints the outline tree as JSON; layout prints the positioned mind map as JSON.\n\
  - --config reads JSON, or YAML for .yaml/.yml files; omitted keys keep their defaults.\n\
  - render prints SVG to stdout by default; use --out to write a file.\n\
  - PNG/JPG/PDF output defaults to writing next to the input file (or ./out.<ext> for stdin).\n\
  - PDF output is the page drawing; --max-width/--max-height shrink it to fit (never enlarge).\n\
  - Exit code 3 means the input has no bullet outline to draw.\n\
"
}

fn next_value<'a>(it: &mut impl Iterator<Item = &'a String>) -> Result<&'a String, CliError> {
    it.next().ok_or(CliError::Usage(usage()))
}

fn parse_positive(raw: &str) -> Result<f64, CliError> {
    let v = raw.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
    if v.is_finite() && v > 0.0 {
        Ok(v)
    } else {
        Err(CliError::Usage(usage()))
    }
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        render_scale: 1.0,
        ..Default::default()
    };

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "parse" => args.command = Command::Parse,
            "layout" => args.command = Command::Layout,
            "render" => args.command = Command::Render,
            "--pretty" => args.pretty = true,
            "-v" | "--verbose" => args.verbosity = args.verbosity.saturating_add(1),
            "--config" => args.config = Some(next_value(&mut it)?.clone()),
            "--text-measurer" => {
                args.text_measurer = match next_value(&mut it)?.as_str() {
                    "deterministic" => TextMeasurerKind::Deterministic,
                    "unicode" => TextMeasurerKind::Unicode,
                    _ => return Err(CliError::Usage(usage())),
                };
            }
            "--format" => {
                args.render_format = next_value(&mut it)?
                    .parse::<RenderFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--scale" => {
                args.render_scale = parse_positive(next_value(&mut it)?)? as f32;
            }
            "--background" => {
                let bg = next_value(&mut it)?;
                if !bg.trim().is_empty() {
                    args.background = Some(bg.trim().to_string());
                }
            }
            "--max-width" => args.max_width = Some(parse_positive(next_value(&mut it)?)?),
            "--max-height" => args.max_height = Some(parse_positive(next_value(&mut it)?)?),
            "--out" => args.out = Some(next_value(&mut it)?.clone()),
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

/// Logs go to stderr so stdout stays clean for SVG/JSON output.
fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn load_config(path: Option<&str>) -> Result<MindmapConfig, CliError> {
    let Some(path) = path else {
        return Ok(MindmapConfig::default());
    };
    let text = std::fs::read_to_string(path)?;
    let is_yaml = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));
    let config = if is_yaml {
        MindmapConfig::from_yaml_str(&text)?
    } else {
        MindmapConfig::from_json_str(&text)?
    };
    tracing::info!(path, "loaded config");
    Ok(config)
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    Ok(())
}

fn build_text_measurer(
    kind: TextMeasurerKind,
    char_width: f64,
) -> Arc<dyn TextMeasurer + Send + Sync> {
    match kind {
        TextMeasurerKind::Deterministic => Arc::new(DeterministicTextMeasurer::new(char_width)),
        TextMeasurerKind::Unicode => Arc::new(UnicodeWidthTextMeasurer::new(char_width)),
    }
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn default_raster_out_path(input: Option<&str>, ext: &str) -> PathBuf {
    match input {
        Some(path) if path != "-" => PathBuf::from(path).with_extension(ext),
        _ => PathBuf::from(format!("out.{ext}")),
    }
}

fn write_bytes(bytes: &[u8], args: &Args) -> Result<(), CliError> {
    let out = args.out.clone().unwrap_or_else(|| {
        default_raster_out_path(args.input.as_deref(), args.render_format.extension())
            .to_string_lossy()
            .to_string()
    });
    if out == "-" {
        use std::io::Write;
        std::io::stdout().lock().write_all(bytes)?;
    } else {
        std::fs::write(&out, bytes)?;
        tracing::info!(path = %out, bytes = bytes.len(), "wrote output");
    }
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let config = load_config(args.config.as_deref())?;
    let char_width = config.layout.avg_char_width;
    let layout_opts = LayoutOptions::from_config(config)?
        .with_text_measurer(build_text_measurer(args.text_measurer, char_width));

    match args.command {
        Command::Parse => {
            let Some(outline) = mindloom::parse_outline_with(&text, &layout_opts.config.outline)
            else {
                return Err(CliError::NoOutline);
            };
            write_json(&outline, args.pretty)?;
            Ok(())
        }
        Command::Layout => {
            let Some(layout) = block_on(layout_markdown(&text, &layout_opts)) else {
                return Err(CliError::NoOutline);
            };
            write_json(&layout, args.pretty)?;
            Ok(())
        }
        Command::Render => {
            let Some(layout) = block_on(layout_markdown(&text, &layout_opts)) else {
                return Err(CliError::NoOutline);
            };

            let raster_options = RasterOptions {
                scale: args.render_scale,
                background: args.background.clone(),
                ..Default::default()
            };
            match args.render_format {
                RenderFormat::Svg => {
                    let svg = render_layout_svg(&layout, &layout_opts.config);
                    write_text(&svg, args.out.as_deref())?;
                }
                RenderFormat::Png => {
                    let svg = render_layout_svg(&layout, &layout_opts.config);
                    write_bytes(&raster::svg_to_png(&svg, &raster_options)?, &args)?;
                }
                RenderFormat::Jpeg => {
                    let svg = render_layout_svg(&layout, &layout_opts.config);
                    write_bytes(&raster::svg_to_jpeg(&svg, &raster_options)?, &args)?;
                }
                RenderFormat::Pdf => {
                    let drawing = render_layout_drawing(
                        &layout,
                        &layout_opts.config,
                        args.max_width,
                        args.max_height,
                    );
                    let bytes = raster::drawing_to_pdf(&drawing, &PdfPageOptions::default())?;
                    write_bytes(&bytes, &args)?;
                }
            }
            Ok(())
        }
    }
}

fn main() {
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
    setup_logging(args.verbosity);

    match run(args) {
        Ok(()) => {}
        Err(CliError::NoOutline) => {
            eprintln!("{}", CliError::NoOutline);
            std::process::exit(3);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
