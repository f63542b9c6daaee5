// src/main.rs

use std::time::Duration;

use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use hearth_pilot::app::config::BotConfig;
use hearth_pilot::app::control::OperatingMode;
use hearth_pilot::app::App;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Ranked,
    Unranked,
    Practice,
    Expert,
}

impl From<ModeArg> for OperatingMode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::Ranked => OperatingMode::TournamentRanked,
            ModeArg::Unranked => OperatingMode::TournamentUnranked,
            ModeArg::Practice => OperatingMode::PracticeNormal,
            ModeArg::Expert => OperatingMode::PracticeExpert,
        }
    }
}

/// Runs the bot against the built-in simulated client.
#[derive(Debug, Parser)]
#[command(name = "hearth_pilot", version)]
struct Cli {
    #[arg(long, value_enum, default_value_t = ModeArg::Practice)]
    mode: ModeArg,
    /// Number of driver ticks before stopping.
    #[arg(long, default_value_t = 2000)]
    ticks: u64,
    #[arg(long, default_value_t = 250)]
    tick_ms: u64,
    /// Sleep between ticks instead of advancing a virtual clock.
    #[arg(long)]
    realtime: bool,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value_t = 10000)]
    error_backoff_ms: u64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let mut config = BotConfig {
        error_backoff: Duration::from_millis(cli.error_backoff_ms),
        ..BotConfig::default()
    };
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    info!("Starting bot in {:?} mode for {} ticks", cli.mode, cli.ticks);
    let mut app = App::new(config, cli.mode.into(), Duration::from_millis(cli.tick_ms), cli.realtime);
    if let Err(e) = app.run(cli.ticks) {
        error!("Bot stopped: {}", e);
        std::process::exit(1);
    }
}
