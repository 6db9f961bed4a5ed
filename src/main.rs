use anyhow::Context;
use clap::Parser;
use demoplayer::config::PlayerConfig;
use demoplayer::demo::Catalog;
use demoplayer::runtime::native::{self, NativeOptions};
use demoplayer::visual::Rgb;
use std::path::PathBuf;

/// Play a portfolio audio demo with its scrolling visualizer in the terminal.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON player configuration; defaults are used for missing fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON demo catalog; the built-in catalog is used if omitted
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Demo id to play
    #[arg(long)]
    demo: Option<String>,

    /// Override the demo accent color ("#rrggbb" or "r, g, b")
    #[arg(long)]
    color: Option<Rgb>,

    /// Seed for the note layout and pitch sequence
    #[arg(long)]
    seed: Option<u64>,

    /// Print an ASCII preview every N frames (0 disables)
    #[arg(long, default_value_t = 30)]
    preview_every: u64,

    /// Output device name fragment
    #[arg(long)]
    device: Option<String>,

    /// Run without opening an audio device
    #[arg(long)]
    mute: bool,

    /// Start playing immediately
    #[arg(long)]
    autoplay: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => PlayerConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PlayerConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let catalog = match &args.catalog {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("loading catalog {}", path.display()))?,
        None => Catalog::builtin()?,
    };
    let mut demo = match &args.demo {
        Some(id) => catalog
            .find(id)
            .with_context(|| format!("no demo with id {:?}", id))?
            .clone(),
        None => catalog.first().context("demo catalog is empty")?.clone(),
    };
    if let Some(color) = args.color {
        demo.color = color;
    }

    let related_paper = catalog.related_paper(&demo).cloned();
    let mut options = NativeOptions::new(config, demo);
    options.related_paper = related_paper;
    options.preview_every = args.preview_every;
    options.mute = args.mute;
    options.device_hint = args.device;
    options.autoplay = args.autoplay;

    native::start(options)
}
