use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::de::DeserializeOwned;

#[derive(Parser, Debug)]
#[command(name = "evagen", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render text as a strip of square cells and save `eva-text.png`.
    Grid(GridArgs),
    /// Render a title card and save `eva-title.jpg`.
    Title(TitleArgs),
    /// Print a default configuration as JSON.
    Defaults {
        #[arg(value_enum)]
        kind: ConfigKind,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ConfigKind {
    Grid,
    Title,
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Directory the image is written to.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Font file for grid cells and labels (falls back to $EVAGEN_SANS_FONT).
    #[arg(long)]
    sans_font: Option<PathBuf>,

    /// Font file for the title block (falls back to $EVAGEN_SERIF_FONT).
    #[arg(long)]
    serif_font: Option<PathBuf>,

    /// Use only the font files given above, never installed system fonts.
    #[arg(long)]
    no_system_fonts: bool,
}

#[derive(Parser, Debug)]
struct GridArgs {
    /// Base configuration JSON; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    text: Option<String>,

    /// Font size in px (24..=200, step 2).
    #[arg(long)]
    font_size: Option<f64>,

    /// Gap between cells in px (0..=40).
    #[arg(long)]
    gap: Option<f64>,

    /// Outer padding in px (0..=80, step 2).
    #[arg(long)]
    padding: Option<f64>,

    #[arg(long, value_enum)]
    direction: Option<DirectionChoice>,

    /// Canvas background, CSS hex.
    #[arg(long)]
    canvas_bg: Option<evagen::Rgba8>,

    /// Cell background, CSS hex.
    #[arg(long)]
    cell_bg: Option<evagen::Rgba8>,

    /// Glyph color, CSS hex.
    #[arg(long)]
    text_color: Option<evagen::Rgba8>,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Parser, Debug)]
struct TitleArgs {
    /// Base configuration JSON; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    top: Option<String>,

    #[arg(long)]
    episode: Option<String>,

    /// Title text; `\n` separates stacked lines.
    #[arg(long)]
    title: Option<String>,

    #[arg(long)]
    bottom: Option<String>,

    #[arg(long, value_enum)]
    theme: Option<ThemeChoice>,

    /// Scanlines and chromatic aberration; a bare `--effects` means `true`.
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    effects: Option<bool>,

    /// Percent scales (10..=300).
    #[arg(long)]
    top_scale: Option<f64>,
    #[arg(long)]
    episode_scale: Option<f64>,
    #[arg(long)]
    bottom_scale: Option<f64>,
    #[arg(long)]
    title_scale: Option<f64>,

    /// Frame width in px; height follows 16:9 (min 400).
    #[arg(long, default_value_t = evagen::DEFAULT_FRAME_WIDTH)]
    width: u32,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DirectionChoice {
    Horizontal,
    Vertical,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ThemeChoice {
    BlackWhite,
    WhiteBlack,
    BlackRed,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Grid(args) => cmd_grid(args),
        Command::Title(args) => cmd_title(args),
        Command::Defaults { kind } => cmd_defaults(kind),
    }
}

fn read_config_json<T: DeserializeOwned + Default>(path: Option<&Path>) -> anyhow::Result<T> {
    let Some(path) = path else {
        return Ok(T::default());
    };
    let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
    let r = BufReader::new(f);
    serde_json::from_reader(r).with_context(|| format!("parse config JSON '{}'", path.display()))
}

fn make_backend(output: &OutputArgs) -> anyhow::Result<evagen::CpuBackend> {
    let mut book = evagen::FontBook::new().system_fonts(!output.no_system_fonts);
    if let Some(p) = &output.sans_font {
        book = book.load(evagen::FontRole::Sans, p)?;
    }
    if let Some(p) = &output.serif_font {
        book = book.load(evagen::FontRole::Serif, p)?;
    }
    let book = book.with_env_fallbacks()?;
    if book.is_empty() {
        if book.uses_system_fonts() {
            tracing::debug!("no font file configured; text resolves through system fonts");
        } else {
            tracing::warn!("no font configured; only backgrounds and cells will be painted");
        }
    }
    Ok(evagen::CpuBackend::with_fonts(&book)?)
}

fn cmd_grid(args: GridArgs) -> anyhow::Result<()> {
    let mut config: evagen::GridConfig = read_config_json(args.config.as_deref())?;
    if let Some(v) = args.text {
        config.text = v;
    }
    if let Some(v) = args.font_size {
        config.font_size_px = v;
    }
    if let Some(v) = args.gap {
        config.gap_px = v;
    }
    if let Some(v) = args.padding {
        config.padding_px = v;
    }
    if let Some(v) = args.direction {
        config.direction = match v {
            DirectionChoice::Horizontal => evagen::Direction::Horizontal,
            DirectionChoice::Vertical => evagen::Direction::Vertical,
        };
    }
    if let Some(v) = args.canvas_bg {
        config.canvas_background = v;
    }
    if let Some(v) = args.cell_bg {
        config.cell_background = v;
    }
    if let Some(v) = args.text_color {
        config.text_color = v;
    }
    let config = config.clamped_to_controls();

    let mut backend = make_backend(&args.output)?;
    let image = evagen::render_grid(&config, &mut backend)?;

    let exporter = evagen::Exporter::new(&args.output.out_dir);
    match exporter.export_grid(Some(&image)) {
        Some(path) => eprintln!("wrote {}", path.display()),
        None => eprintln!("nothing written"),
    }
    Ok(())
}

fn title_config(args: &TitleArgs) -> anyhow::Result<evagen::TitleCardConfig> {
    let mut config: evagen::TitleCardConfig = read_config_json(args.config.as_deref())?;
    if let Some(v) = &args.top {
        config.top_text = v.clone();
    }
    if let Some(v) = &args.episode {
        config.episode_label = v.clone();
    }
    if let Some(v) = &args.title {
        config.title = v.replace("\\n", "\n");
    }
    if let Some(v) = &args.bottom {
        config.bottom_text = v.clone();
    }
    if let Some(v) = args.theme {
        config.theme = match v {
            ThemeChoice::BlackWhite => evagen::Theme::BlackWhite,
            ThemeChoice::WhiteBlack => evagen::Theme::WhiteBlack,
            ThemeChoice::BlackRed => evagen::Theme::BlackRed,
        };
    }
    if let Some(v) = args.effects {
        config.effects_enabled = v;
    }
    if let Some(v) = args.top_scale {
        config.top_scale = v;
    }
    if let Some(v) = args.episode_scale {
        config.episode_scale = v;
    }
    if let Some(v) = args.bottom_scale {
        config.bottom_scale = v;
    }
    if let Some(v) = args.title_scale {
        config.title_scale = v;
    }
    Ok(config.clamped_to_controls())
}

fn cmd_title(args: TitleArgs) -> anyhow::Result<()> {
    let config = title_config(&args)?;

    let mut backend = make_backend(&args.output)?;
    let image =
        evagen::render_title_card(&config, evagen::FrameSpec::new(args.width), &mut backend)?;

    let exporter = evagen::Exporter::new(&args.output.out_dir);
    match exporter.export_title_card(Some(&image)) {
        Some(path) => eprintln!("wrote {}", path.display()),
        None => eprintln!("nothing written"),
    }
    Ok(())
}

fn cmd_defaults(kind: ConfigKind) -> anyhow::Result<()> {
    let json = match kind {
        ConfigKind::Grid => serde_json::to_string_pretty(&evagen::GridConfig::default()),
        ConfigKind::Title => serde_json::to_string_pretty(&evagen::TitleCardConfig::default()),
    }
    .context("serialize default config")?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/bin/evagen.rs"]
mod tests;
