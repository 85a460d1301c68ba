//! # Tien Len Demo Table
//!
//! Opens a macroquad window and runs a self-playing table against the card
//! renderer.

use clap::Parser;
use macroquad::window::{request_new_screen_size, screen_height, screen_width};
use std::path::PathBuf;
use tienlen_render::scenes::TableScene;
use tienlen_render::{RenderConfig, RenderResult};
#[cfg(feature = "dev-tools")]
use tracing::{info, warn, Level};

#[cfg(not(feature = "dev-tools"))]
use log::{info, warn};

/// Command line arguments for the demo table.
#[derive(Parser, Debug)]
#[command(name = "tienlen-table")]
#[command(about = "A Tien Len table showcasing the card renderer")]
#[command(version)]
struct Args {
    /// JSON file overriding render settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Force the reduced-cost render preset
    #[arg(long)]
    mobile: bool,

    /// Random seed for dealing
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of bot opponents (1-3)
    #[arg(short, long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=3))]
    bots: u8,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[macroquad::main("Tien Len")]
async fn main() -> RenderResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level);

    info!("Starting Tien Len table v{}", tienlen_render::VERSION);

    request_new_screen_size(1280.0, 800.0);

    let config = select_config(&args);
    let seed = args.seed.unwrap_or_else(rand::random);
    info!("Dealing with seed {} against {} bots", seed, args.bots);

    let mut scene = TableScene::new(config, args.bots as usize, seed);
    scene.run().await
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) {
    #[cfg(feature = "dev-tools")]
    {
        let level = match log_level.to_lowercase().as_str() {
            "error" => Level::ERROR,
            "warn" => Level::WARN,
            "info" => Level::INFO,
            "debug" => Level::DEBUG,
            "trace" => Level::TRACE,
            _ => Level::INFO,
        };

        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .init();
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
            .format_target(false)
            .init();
    }
}

/// Picks the render preset, then applies the override file if one was given.
fn select_config(args: &Args) -> RenderConfig {
    let preset = if args.mobile {
        RenderConfig::performance()
    } else {
        RenderConfig::detect(screen_width(), screen_height(), false)
    };

    let Some(path) = &args.config else {
        return preset;
    };
    match RenderConfig::load(path) {
        Ok(config) => config,
        Err(e) => {
            warn!("Ignoring render config {}: {}", path.display(), e);
            preset
        }
    }
}
