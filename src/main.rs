//! process-canvas CLI entry point.
//!
//! Renders a JSON step list to SVG, text, PNG or layout JSON.

use std::fs;
use std::io::{self, Read, Write};
use std::process;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;
use web_time::Instant;

use process_canvas::{CanvasConfig, CharSet, ProcessCanvas, parse_steps};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Svg,
    Text,
    Png,
    Layout,
}

/// Process flowchart layout and rendering.
#[derive(Parser, Debug)]
#[command(
    name = "process-canvas",
    version = env!("PROCESS_CANVAS_VERSION"),
    about = "Lay out a process step list and render it as SVG, text, PNG or layout JSON"
)]
struct Cli {
    /// Step list JSON file (reads from stdin if not provided)
    input: Option<String>,

    /// Write output to this file instead of stdout
    #[arg(short = 'o', long = "output")]
    output: Option<String>,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value_t = Format::Svg)]
    format: Format,

    /// Canvas width in pixels (overrides the config file)
    #[arg(long)]
    width: Option<f64>,

    /// Canvas height in pixels (overrides the config file)
    #[arg(long)]
    height: Option<f64>,

    /// Fit the whole diagram into the canvas before rendering
    #[arg(long)]
    fit: bool,

    /// Zoom in this many steps
    #[arg(long = "zoom-in", default_value = "0")]
    zoom_in: u32,

    /// Zoom out this many steps
    #[arg(long = "zoom-out", default_value = "0")]
    zoom_out: u32,

    /// Highlight this step as selected
    #[arg(long)]
    select: Option<String>,

    /// Canvas configuration JSON file
    #[arg(short = 'c', long)]
    config: Option<String>,

    /// Use plain ASCII instead of Unicode box-drawing characters (text format)
    #[arg(short = 'a', long = "ascii")]
    use_ascii: bool,

    /// Device pixel ratio for PNG output
    #[arg(long, default_value = "1.0")]
    scale: f32,

    /// Print structural diagnostics instead of rendering; exit 1 on problems
    #[arg(long)]
    check: bool,
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("PROCESS_CANVAS_LOG")
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("error: {}", message);
    process::exit(1);
}

fn load_config(cli: &Cli) -> CanvasConfig {
    let mut config = match cli.config {
        Some(ref path) => {
            let text = fs::read_to_string(path)
                .unwrap_or_else(|e| fail(format!("cannot read '{}': {}", path, e)));
            CanvasConfig::from_json(&text).unwrap_or_else(|e| fail(e))
        }
        None => CanvasConfig::default(),
    };
    if let Some(w) = cli.width {
        config.width = w;
    }
    if let Some(h) = cli.height {
        config.height = h;
    }
    if let Err(e) = config.validate() {
        fail(e);
    }
    config
}

fn read_input(cli: &Cli) -> String {
    if let Some(ref path) = cli.input {
        fs::read_to_string(path).unwrap_or_else(|e| fail(format!("cannot read '{}': {}", path, e)))
    } else {
        let mut buf = String::new();
        if let Err(e) = io::stdin().read_to_string(&mut buf) {
            fail(format!("cannot read stdin: {}", e));
        }
        buf
    }
}

#[cfg(feature = "raster")]
fn render_png(canvas: &ProcessCanvas, scale: f32) -> Vec<u8> {
    process_canvas::renderers::raster::render_png(&canvas.render_svg(), scale)
        .unwrap_or_else(|e| fail(e))
}

#[cfg(not(feature = "raster"))]
fn render_png(_canvas: &ProcessCanvas, _scale: f32) -> Vec<u8> {
    fail("png output requires building with the `raster` feature")
}

fn to_json<T: serde::Serialize>(value: &T) -> Vec<u8> {
    let mut out = serde_json::to_string_pretty(value).unwrap_or_else(|e| fail(e));
    out.push('\n');
    out.into_bytes()
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let config = load_config(&cli);
    let text = read_input(&cli);
    let steps = parse_steps(&text).unwrap_or_else(|e| fail(e));

    let mut canvas = ProcessCanvas::new(config).with_steps(steps);

    if cli.check {
        let report = canvas.diagnostics();
        let mut stdout = io::stdout();
        if let Err(e) = stdout.write_all(&to_json(&report)).and_then(|_| stdout.flush()) {
            fail(format!("cannot write stdout: {}", e));
        }
        process::exit(if report.is_clean() { 0 } else { 1 });
    }

    if cli.fit {
        canvas.fit_to_content();
    }
    for _ in 0..cli.zoom_in {
        canvas.zoom_in();
    }
    for _ in 0..cli.zoom_out {
        canvas.zoom_out();
    }
    if let Some(ref id) = cli.select {
        canvas.select(id.clone(), Instant::now());
    }

    let rendered: Vec<u8> = match cli.format {
        Format::Svg => {
            let mut svg = canvas.render_svg();
            svg.push('\n');
            svg.into_bytes()
        }
        Format::Text => {
            let charset = if cli.use_ascii {
                CharSet::Ascii
            } else {
                CharSet::Unicode
            };
            canvas.render_text(charset).into_bytes()
        }
        Format::Png => render_png(&canvas, cli.scale),
        Format::Layout => to_json(canvas.layout()),
    };

    // Write output to file or stdout
    if let Some(ref path) = cli.output {
        if let Err(e) = fs::write(path, &rendered) {
            fail(format!("cannot write '{}': {}", path, e));
        }
    } else {
        let mut stdout = io::stdout();
        if let Err(e) = stdout.write_all(&rendered).and_then(|_| stdout.flush()) {
            fail(format!("cannot write stdout: {}", e));
        }
    }
}
