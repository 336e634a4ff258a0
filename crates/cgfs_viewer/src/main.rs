use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};

mod scenes;
mod settings;
mod sink;

use scenes::Chapter;
use settings::RenderSettings;
use sink::PngSink;

#[derive(Parser, Debug)]
#[command(name = "cgfs_viewer")]
#[command(about = "Render a cgfs chapter scene to a PNG file", long_about = None)]
struct Cli {
    /// Chapter scene to render
    #[arg(long, value_enum)]
    chapter: Option<Chapter>,

    /// List the built-in chapters and exit
    #[arg(long)]
    list: bool,

    /// Canvas width in pixels (overrides the settings file)
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height in pixels (overrides the settings file)
    #[arg(long)]
    height: Option<u32>,

    /// Output PNG path (defaults to <chapter>.png)
    #[arg(long)]
    output: Option<PathBuf>,

    /// JSON render settings
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Trace ray-traced chapters on all cores
    #[arg(long)]
    parallel: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();

    if cli.list {
        for chapter in Chapter::value_variants() {
            println!("{:<18} {}", chapter.name(), chapter.description());
        }
        return Ok(());
    }

    let Some(chapter) = cli.chapter else {
        bail!("No chapter given; pass --chapter <name> or --list");
    };

    let mut settings = match &cli.settings {
        Some(path) => RenderSettings::load(path)?,
        None => RenderSettings::default(),
    };
    if let Some(width) = cli.width {
        settings.width = width;
    }
    if let Some(height) = cli.height {
        settings.height = height;
    }
    settings.parallel |= cli.parallel;

    if settings.parallel && !chapter.is_ray_traced() {
        log::warn!("--parallel only affects ray-traced chapters");
    }

    let output = cli
        .output
        .unwrap_or_else(|| PathBuf::from(format!("{}.png", chapter.name())));

    let mut sink = PngSink::new(settings.width, settings.height, &output)
        .context("Failed to create output canvas")?;
    chapter
        .render(&settings, &mut sink)
        .with_context(|| format!("Failed to render chapter '{}'", chapter.name()))?;

    log::info!("Done: {}", sink.path().display());
    Ok(())
}
