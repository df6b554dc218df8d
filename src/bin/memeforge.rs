use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "memeforge", version)]
struct Cli {
    /// Log session events and effects to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the fit rectangle for an image inside a canvas as JSON.
    Fit(FitArgs),
    /// Caption an image and write the canvas as a PNG.
    Compose(ComposeArgs),
    /// Rasterize the volume icon for a slider value.
    Icon(IconArgs),
}

#[derive(Parser, Debug)]
struct FitArgs {
    /// Canvas size as WIDTHxHEIGHT.
    #[arg(long, value_parser = parse_size)]
    canvas: (f64, f64),

    /// Image size as WIDTHxHEIGHT.
    #[arg(long, value_parser = parse_size)]
    image: (f64, f64),
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Input image (any format the `image` crate decodes).
    #[arg(long)]
    image: PathBuf,

    /// Top caption.
    #[arg(long, default_value = "")]
    top: String,

    /// Bottom caption.
    #[arg(long, default_value = "")]
    bottom: String,

    /// Session config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Font file for captions (overrides the config).
    #[arg(long)]
    font: Option<PathBuf>,

    /// Also read the captions aloud (logged; no audio device is used).
    #[arg(long, default_value_t = false)]
    read: bool,

    /// Volume slider value, 0..=100.
    #[arg(long, default_value = "100")]
    volume: String,

    /// JSON array of voices offered to `--voice` (`[{"name": ..., "lang": ..., "is_default": ...}]`).
    #[arg(long)]
    voices: Option<PathBuf>,

    /// Voice name to read with; unknown names fall back to the default voice.
    #[arg(long)]
    voice: Option<String>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct IconArgs {
    /// Volume slider value, 0..=100.
    #[arg(long)]
    volume: String,

    /// Icon edge length in pixels.
    #[arg(long, default_value_t = 64)]
    size: u32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let reads_aloud = matches!(&cli.cmd, Command::Compose(args) if args.read);
    init_logging(cli.verbose, reads_aloud);
    match cli.cmd {
        Command::Fit(args) => cmd_fit(args),
        Command::Compose(args) => cmd_compose(args),
        Command::Icon(args) => cmd_icon(args),
    }
}

// Spoken captions are reported through `tracing`, so `--read` needs a subscriber even when quiet.
fn init_logging(verbose: bool, reads_aloud: bool) {
    let level = match (verbose, reads_aloud) {
        (true, _) => tracing::Level::DEBUG,
        (false, true) => tracing::Level::INFO,
        (false, false) => return,
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn parse_size(s: &str) -> Result<(f64, f64), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid dimension '{v}': {e}"))
    };
    Ok((parse(w)?, parse(h)?))
}

fn cmd_fit(args: FitArgs) -> anyhow::Result<()> {
    let (cw, ch) = args.canvas;
    let (iw, ih) = args.image;
    let fit = memeforge::fit(cw, ch, iw, ih);
    println!("{}", serde_json::to_string_pretty(&fit)?);
    Ok(())
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => memeforge::MemeConfig::from_path(path)?,
        None => memeforge::MemeConfig::default(),
    };
    if let Some(font) = args.font {
        config.caption.font_path = Some(font);
    }
    let volume = memeforge::SliderValue::parse(&args.volume)?;
    let source = memeforge::ImageSource::from_path(&args.image)?;

    let voices = match &args.voices {
        Some(path) => memeforge::Voice::list_from_path(path)?,
        None => Vec::new(),
    };
    if let Some(name) = &args.voice
        && !voices.iter().any(|v| &v.name == name)
    {
        tracing::warn!(voice = %name, "voice not offered; the default voice will be used");
    }

    let mut session = memeforge::MemeSession::new(
        config,
        Some(memeforge::TracingSynthesizer::new(voices)),
    )?;
    if !session.can_draw_captions() {
        tracing::warn!("no caption font found; writing the image without captions");
    }

    session.dispatch(memeforge::Event::VolumeChanged(volume));
    session.dispatch(memeforge::Event::ImageSelected(Some(source)));
    if session.image().is_none() {
        anyhow::bail!("could not decode image '{}'", args.image.display());
    }

    let captions = memeforge::CaptionPair::new(args.top, args.bottom);
    session.dispatch(memeforge::Event::FormSubmitted(captions.clone()));
    if let Some(voice) = args.voice {
        session.dispatch(memeforge::Event::VoiceSelected(voice));
    }
    if args.read {
        session.dispatch(memeforge::Event::ReadClicked(captions));
    }

    session.surface().write_png(&args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_icon(args: IconArgs) -> anyhow::Result<()> {
    let level = memeforge::SliderValue::parse(&args.volume)?.level();
    let icon = level.rasterize(args.size)?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        &args.out,
        &icon.to_straight_rgba8(),
        icon.width,
        icon.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {} ({})", args.out.display(), level.icon_path());
    Ok(())
}
