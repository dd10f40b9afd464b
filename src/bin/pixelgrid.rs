use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "pixelgrid", version)]
struct Cli {
    /// Log at debug level to stderr.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a stroke script and write the result as SVG.
    Render(RenderArgs),
    /// Replay a stroke script and write the result as a PNG.
    Frame(FrameArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Stroke script JSON.
    #[arg(long)]
    script: PathBuf,

    /// Session config JSON; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output SVG path; the configured export file name when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Stroke script JSON.
    #[arg(long)]
    script: PathBuf,

    /// Session config JSON; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Raster width in pixels.
    #[arg(long, default_value_t = 256)]
    width: u32,

    /// Raster height in pixels.
    #[arg(long, default_value_t = 256)]
    height: u32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
    }
}

fn read_config(path: Option<&Path>) -> anyhow::Result<pixelgrid::SessionConfig> {
    let Some(path) = path else {
        return Ok(pixelgrid::SessionConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config '{}'", path.display()))?;
    pixelgrid::SessionConfig::from_json(&text)
        .with_context(|| format!("load config '{}'", path.display()))
}

fn read_script(path: &Path) -> anyhow::Result<pixelgrid::StrokeScript> {
    let f = File::open(path).with_context(|| format!("open script '{}'", path.display()))?;
    let script: pixelgrid::StrokeScript = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse stroke script '{}'", path.display()))?;
    Ok(script)
}

fn replay(script: &Path, config: Option<&Path>) -> anyhow::Result<pixelgrid::Session> {
    let config = read_config(config)?;
    let script = read_script(script)?;

    let start = Duration::ZERO;
    let mut session = pixelgrid::Session::new(config, start)?;
    let end = script.replay(&mut session, start)?;
    tracing::debug!(end_ms = end.as_millis() as u64, "script replayed");
    Ok(session)
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let session = replay(&args.script, args.config.as_deref())?;
    let svg = session.export_svg()?;

    let out = args
        .out
        .unwrap_or_else(|| PathBuf::from(session.export_file_name()));
    ensure_parent(&out)?;
    std::fs::write(&out, svg).with_context(|| format!("write svg '{}'", out.display()))?;

    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let session = replay(&args.script, args.config.as_deref())?;
    let svg = session.export_svg()?;
    let pixels = pixelgrid::rasterize_svg(&svg, args.width, args.height)?;

    ensure_parent(&args.out)?;
    image::save_buffer_with_format(
        &args.out,
        &pixels,
        args.width,
        args.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
