use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use engine::TaskDriver;
use engine::app::{AppConfig, run_task};
use tracker::session::SessionLogic;
use tracker::settings::{SettingsStore, TaskSettings};
use tracker::spawner::TargetSpawner;
use tracker::target::PaintingArea;
use tracker::windowed::{DumpTarget, WindowedSession, rgba};

#[derive(Debug, Parser)]
#[command(name = "tracker")]
#[command(about = "Pointer reaction task: chase the disk until the trial count is reached")]
struct Cli {
    /// Settings file (defaults to the per-user config location).
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Override the number of trials.
    #[arg(long)]
    trials: Option<u32>,

    /// Override the target radius, in pixels.
    #[arg(long)]
    radius: Option<u32>,

    /// Override the frame-rate limit.
    #[arg(long)]
    fps: Option<u32>,

    /// Override the antialiasing level (subsamples per edge pixel).
    #[arg(long)]
    aa: Option<u32>,

    /// Override the background color, as RRGGBB hex.
    #[arg(long)]
    background: Option<String>,

    /// Write the per-trial telemetry dump here after the session ("-" for stdout).
    #[arg(long)]
    dump: Option<PathBuf>,
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_rgb(text: &str) -> Result<[u8; 3]> {
    let hex = text.trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        bail!("expected RRGGBB hex, got {text:?}");
    }
    let value = u32::from_str_radix(hex, 16).expect("validated hex digits");
    Ok([(value >> 16) as u8, (value >> 8) as u8, value as u8])
}

fn effective_settings(cli: &Cli) -> Result<TaskSettings> {
    let store = match &cli.settings {
        Some(path) => SettingsStore::at(path.clone()),
        None => SettingsStore::from_env(),
    };
    let mut settings = store.load();
    if let Some(trials) = cli.trials {
        settings.trial_count = trials;
    }
    if let Some(radius) = cli.radius {
        settings.target_radius = radius;
    }
    if let Some(fps) = cli.fps {
        settings.frame_rate = fps;
    }
    if let Some(aa) = cli.aa {
        settings.antialiasing = aa;
    }
    if let Some(background) = &cli.background {
        settings.background = parse_rgb(background)?;
    }
    Ok(settings.sanitized())
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let settings = effective_settings(&cli)?;
    let dump = cli.dump.map(|path| {
        if path.as_os_str() == "-" {
            DumpTarget::Stdout
        } else {
            DumpTarget::File(path)
        }
    });

    let config = AppConfig {
        title: "AttentionTracker".to_string(),
        desired_size: None,
        frame_rate: settings.frame_rate,
        clear_color: rgba(settings.background),
    };

    run_task(config, move |surface| {
        let area = PaintingArea::from_window(surface.width, surface.height, settings.target_radius);
        let logic = SessionLogic::new(
            area,
            settings.target_radius,
            settings.trial_count,
            TargetSpawner::from_clock(),
        );
        WindowedSession::new(TaskDriver::new(logic), &settings, dump)
    })
    .context("failed to start the session window")
}
