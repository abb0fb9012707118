//! Heartfall Player - standalone overlay host binary
//!
//! Usage:
//!   heartfall-player [--config <overlay.toml>] [--seed <n>] [--show] [--fullscreen]

use anyhow::Result;
use clap::Parser;
use heartfall_player::{load_config, PlayerApp};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use winit::event_loop::{ControlFlow, EventLoop};

#[derive(Parser)]
#[command(name = "heartfall-player")]
#[command(about = "Heartfall player - falling, draggable hearts over a page")]
struct Args {
    /// Path to an overlay config file (defaults are used when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for body generation, overriding the config
    #[arg(long)]
    seed: Option<u64>,

    /// Show the overlay as soon as the window opens
    #[arg(long)]
    show: bool,

    /// Launch in fullscreen mode
    #[arg(long)]
    fullscreen: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = load_config(args.config.as_deref(), args.seed)?;

    println!("Hearts: {}", config.bodies.count);
    println!();
    println!("Controls:");
    println!("  Space/Enter - Toggle overlay");
    println!("  Mouse/Touch - Drag a heart");
    println!("  R           - Reload config and regenerate");
    println!("  F11         - Toggle fullscreen");
    println!("  Escape      - Exit");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = PlayerApp::new(config, args.config, args.seed, args.fullscreen, args.show);
    event_loop.run_app(&mut app)?;

    if let Some(err) = app.take_error() {
        return Err(err);
    }
    Ok(())
}
