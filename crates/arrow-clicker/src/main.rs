//! Arrow Clicker entry point.
//!
//! Loads the configuration, installs the keyboard hook, and runs the pointer
//! engine until Ctrl-C or the console window is closed.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_or_create()         -- TOML config (or legacy integer file)
//!  └─ PointerEngine::start()
//!       ├─ KeyboardHook         (OS hook thread)
//!       ├─ run_control_loop     (Tokio task)
//!       └─ run_motion_loop      (Tokio task)
//!  └─ shutdown_signal().await  -- Ctrl-C, console close, logoff, shutdown
//!  └─ RunningEngine::stop()     -- hook removal, release protocol
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use arrow_clicker::application::engine::{EngineSettings, PointerEngine};
use arrow_clicker::infrastructure::keyboard_hook::platform_hook;
use arrow_clicker::infrastructure::pointer_injection::platform_injector;
use arrow_clicker::infrastructure::storage::config::{
    config_file_path, load_or_create, AppConfig, ConfigSource,
};
use arrow_clicker_core::keymap::{
    LEFT_CLICK_KEYS, MIDDLE_CLICK_KEYS, RIGHT_CLICK_KEYS, TOGGLE_KEY,
};
use arrow_clicker_core::{Mode, MotionParams};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Drive the mouse pointer from the keyboard.
///
/// Arrow keys move the pointer with acceleration, left Ctrl / Windows / Alt
/// click, and the toggle key switches back to normal typing.
#[derive(Debug, Parser)]
#[command(name = "arrow-clicker", version)]
struct Cli {
    /// Path to the config file.  Defaults to the platform config directory.
    #[arg(long, env = "ARROW_CLICKER_CONFIG")]
    config: Option<PathBuf>,

    /// Speed ceiling in pixels per tick for this run, overriding the config.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    max_speed: Option<u32>,

    /// Log level used when `RUST_LOG` is not set, overriding the config.
    #[arg(long)]
    log_level: Option<String>,
}

/// Result of resolving and reading the config file, logged once tracing is up.
enum ConfigOutcome {
    Read(PathBuf, ConfigSource),
    Fallback(String),
}

fn load_config(cli: &Cli) -> (AppConfig, ConfigOutcome) {
    let path = match cli.config.clone() {
        Some(path) => path,
        None => match config_file_path() {
            Ok(path) => path,
            Err(e) => return (AppConfig::default(), ConfigOutcome::Fallback(e.to_string())),
        },
    };

    match load_or_create(&path) {
        Ok((config, source)) => (config, ConfigOutcome::Read(path, source)),
        Err(e) => (
            AppConfig::default(),
            ConfigOutcome::Fallback(format!("{}: {e}", path.display())),
        ),
    }
}

fn banner_lines(params: &MotionParams) -> Vec<String> {
    vec![
        "Arrow Clicker started".to_string(),
        format!("  toggle key : {TOGGLE_KEY}"),
        format!("  max speed  : {} px/tick", params.max_speed),
        "  move       : arrow keys".to_string(),
        format!("  left click : {}", LEFT_CLICK_KEYS[0]),
        format!("  mid click  : {}", MIDDLE_CLICK_KEYS[0]),
        format!("  right click: {}", RIGHT_CLICK_KEYS[0]),
        format!("  mode       : {}", Mode::default().label()),
        format!(
            "  exit       : close this window, or Ctrl-C with right ctrl (left ctrl works in {})",
            Mode::PassThrough.label()
        ),
    ]
}

fn log_banner(params: &MotionParams) {
    for line in banner_lines(params) {
        info!("{line}");
    }
}

/// Waits for a request to exit and returns what triggered it.
///
/// On Windows, closing the console window, logging off, and system shutdown
/// count as well as Ctrl-C.
async fn shutdown_signal() -> anyhow::Result<&'static str> {
    #[cfg(target_os = "windows")]
    {
        use tokio::signal::windows::{ctrl_close, ctrl_logoff, ctrl_shutdown};

        let mut close = ctrl_close().context("failed to listen for console close")?;
        let mut logoff = ctrl_logoff().context("failed to listen for logoff")?;
        let mut shutdown = ctrl_shutdown().context("failed to listen for shutdown")?;
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                result.context("failed to listen for Ctrl-C")?;
                Ok("Ctrl-C")
            }
            _ = close.recv() => Ok("console close"),
            _ = logoff.recv() => Ok("logoff"),
            _ = shutdown.recv() => Ok("system shutdown"),
        }
    }

    #[cfg(not(target_os = "windows"))]
    {
        tokio::signal::ctrl_c()
            .await
            .context("failed to listen for Ctrl-C")?;
        Ok("Ctrl-C")
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The config supplies the default log level, so it is read before the
    // subscriber exists and its outcome is logged afterwards.
    let (mut config, outcome) = load_config(&cli);
    if let Some(level) = &cli.log_level {
        config.app.log_level = level.clone();
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.app.log_level)),
        )
        .init();

    match outcome {
        ConfigOutcome::Read(path, source) => match source {
            ConfigSource::Loaded => info!("config loaded from {}", path.display()),
            ConfigSource::Legacy => info!("legacy config loaded from {}", path.display()),
            ConfigSource::Created => info!("default config written to {}", path.display()),
        },
        ConfigOutcome::Fallback(reason) => warn!("using default config: {reason}"),
    }

    if let Some(max_speed) = cli.max_speed {
        config.motion.max_speed = max_speed;
    }
    let motion = match config.motion_params() {
        Ok(params) => params,
        Err(e) => {
            warn!("{e}; using the default speed ceiling");
            MotionParams::default()
        }
    };
    let settings = EngineSettings {
        motion,
        rounding: config.motion.rounding,
        ..EngineSettings::default()
    };

    let hook = platform_hook().context("failed to create the keyboard hook")?;
    let injector = platform_injector().context("failed to create the pointer injector")?;

    let engine = PointerEngine::new(settings, injector, hook)
        .start()
        .context("failed to start the pointer engine")?;
    log_banner(&settings.motion);

    match shutdown_signal().await {
        Ok(trigger) => info!("received {trigger}, shutting down"),
        Err(e) => warn!("{e:#}; shutting down"),
    }

    engine.stop().await.context("engine shutdown failed")?;
    info!("Arrow Clicker stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_banner_lists_toggle_key_and_speed() {
        let lines = banner_lines(&MotionParams::with_max_speed(42).unwrap());

        assert!(lines.iter().any(|l| l.contains(TOGGLE_KEY)));
        assert!(lines.iter().any(|l| l.contains("42 px/tick")));
        assert!(lines.iter().any(|l| l.contains(Mode::PointerControl.label())));
    }

    #[test]
    fn test_banner_explains_exit_without_suppressed_left_ctrl() {
        // Left ctrl is the left mouse button in pointer-control mode, so the
        // exit hint must name a key combination that reaches the console.
        let lines = banner_lines(&MotionParams::default());

        let exit = lines
            .iter()
            .find(|l| l.contains("exit"))
            .expect("banner has an exit line");
        assert!(exit.contains("right ctrl"));
        assert!(exit.contains("close this window"));
        assert!(exit.contains(Mode::PassThrough.label()));
    }

    #[tokio::test]
    async fn test_shutdown_signal_stays_pending_without_a_signal() {
        let waited = tokio::time::timeout(Duration::from_millis(20), shutdown_signal()).await;

        assert!(waited.is_err(), "no exit request was sent");
    }
}
