use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use retro_snake::game::{GameSettings, Size};
use retro_snake::modes::PlayMode;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "retro_snake")]
#[command(version, about = "Snake on a wrap-around grid")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "play")]
    mode: Mode,

    /// JSON settings file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width in cells
    #[arg(long)]
    width: Option<i32>,

    /// Grid height in cells
    #[arg(long)]
    height: Option<i32>,

    /// Milliseconds between snake steps
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Snake grows for free until it reaches this length
    #[arg(long)]
    grow_until: Option<usize>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (the game owns the terminal)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Play,
}

impl Cli {
    fn settings(&self) -> Result<GameSettings> {
        let mut settings = match &self.config {
            Some(path) => GameSettings::load(path)?,
            None => GameSettings::default(),
        };

        if self.width.is_some() || self.height.is_some() {
            settings.grid_size = Size::new(
                self.width.unwrap_or(settings.grid_size.width),
                self.height.unwrap_or(settings.grid_size.height),
            );
        }
        if let Some(tick_ms) = self.tick_ms {
            settings.tick_interval_ms = tick_ms;
        }
        if let Some(grow_until) = self.grow_until {
            settings.auto_grow_until = grow_until;
        }

        settings.validate().context("Invalid settings")?;
        Ok(settings)
    }
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.log_file.as_ref())?;
    let settings = cli.settings()?;

    match cli.mode {
        Mode::Play => {
            tracing::info!(?settings, seed = ?cli.seed, "starting game");
            let mut play_mode = PlayMode::new(settings, cli.seed);
            play_mode.run().await?;
        }
    }

    Ok(())
}
