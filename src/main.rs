//! Trackball Scroll - Main Application
//!
//! Grabs a trackball and turns its motion into scroll wheel events.
//! Needs read access to /dev/input/event* and write access to /dev/uinput.

use clap::Parser;
use trackball_scroll::mapping::config::{DEFAULT_DEAD_ZONE, DEFAULT_SENSITIVITY};
use trackball_scroll::Settings;

#[derive(Parser, Debug)]
#[command(name = "trackball-scroll")]
#[command(version, about = "Converts trackball movement to scroll events")]
struct Cli {
    /// Scroll sensitivity
    #[arg(long, default_value_t = DEFAULT_SENSITIVITY)]
    sensitivity: f64,

    /// Dead zone for ignoring small movements
    #[arg(long, default_value_t = DEFAULT_DEAD_ZONE)]
    deadzone: u32,

    /// Path to the trackball device, or "auto" to detect it
    #[arg(long, default_value = "auto")]
    device: String,
}

#[cfg(target_os = "linux")]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use trackball_scroll::shutdown::{shutdown_channel, spawn_signal_listener};
    use trackball_scroll::{MotionSource, ScrollManager};

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    println!("Trackball Scroll - Converting trackball movement to scroll events");

    let settings = Settings::new(cli.sensitivity, cli.deadzone, &cli.device)?;
    let mut manager = ScrollManager::start(&settings).context("Failed to start")?;

    // Listener goes up before the ready line so Ctrl+C is never missed
    let (handle, token) = shutdown_channel();
    spawn_signal_listener(handle).context("Failed to install signal handlers")?;

    println!("Ready: {} | Press Ctrl+C to exit", manager.source().name());

    manager.run(&token).context("Error processing events")?;

    println!("Trackball scroller stopped.");
    Ok(())
}

#[cfg(not(target_os = "linux"))]
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    Settings::new(cli.sensitivity, cli.deadzone, &cli.device)?;
    anyhow::bail!("trackball-scroll needs Linux evdev and uinput")
}
