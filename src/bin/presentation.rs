use std::path::PathBuf;

use anyhow::Context as _;
use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\n",
    "Copyright (C) 2024 Sam Christy.\n",
    "License GPLv3+: GNU GPL version 3 or later <http://gnu.org/licenses/gpl.html>\n",
    "\n",
    "This is free software; you are free to change and redistribute it.\n",
    "There is NO WARRANTY, to the extent permitted by law."
);

/// Render a slide deck to numbered PNG files.
#[derive(Parser, Debug)]
#[command(
    name = "presentation",
    version = LONG_VERSION,
    long_version = LONG_VERSION,
    disable_version_flag = true
)]
struct Cli {
    /// Print the version number
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: Option<bool>,

    /// Output directory
    #[arg(short = 'o', long = "output", default_value = "output")]
    output: PathBuf,

    /// Screen width
    #[arg(short = 'x', long = "width", default_value_t = 1920)]
    width: u32,

    /// Screen height
    #[arg(short = 'y', long = "height", default_value_t = 1080)]
    height: u32,

    /// Font file for slide text (default: the system sans-serif face).
    #[arg(long)]
    font: Option<PathBuf>,

    /// JSON deck description (default: the built-in demo deck).
    #[arg(long)]
    deck: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let canvas =
        presentation::CanvasSize::new(cli.width, cli.height).context("invalid canvas size")?;

    let font = match &cli.font {
        Some(path) => presentation::FontFace::from_path(path)?,
        None => presentation::FontFace::system_sans()
            .context("resolve a sans-serif font (pass --font to choose one)")?,
    };
    tracing::debug!(family = font.family(), "using font face");

    if let Err(e) = presentation::ensure_output_dir(&cli.output) {
        tracing::error!(error = %e, "failed to create output directory");
    }

    let settings = presentation::DeckSettings {
        canvas,
        output_dir: cli.output,
        font: Some(font),
    };
    let mut deck = match &cli.deck {
        Some(path) => presentation::Deck::from_json_path(path, settings)?,
        None => presentation::Deck::with_slides(settings, presentation::demo_deck_slides()),
    };

    let report = deck.render()?;
    tracing::info!(
        written = report.written_count(),
        skipped = report.skipped_count(),
        "deck rendered"
    );
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
