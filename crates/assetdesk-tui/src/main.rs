//! `assetdesk`: terminal dashboard for an IT asset inventory.
//!
//! Customers, sites, infrastructure locations, virtual machines and network
//! devices are browsed, searched, created, edited and deleted against the
//! inventory REST backend. Navigation runs through a collapsible sidebar; each
//! view reloads from the backend whenever it is opened.
//!
//! Logs are written to a file (default `/tmp/assetdesk.log`) to avoid
//! corrupting the terminal UI.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, and app launch.

mod action;
mod app;
mod component;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use assetdesk_config::Config;
use assetdesk_core::Inventory;

use crate::app::{App, AppOptions};
use crate::screen::ScreenId;

/// Terminal dashboard for managing customers, sites, infrastructure and assets.
#[derive(Parser, Debug)]
#[command(name = "assetdesk", version, about)]
struct Cli {
    /// Inventory backend URL (e.g., http://localhost:8000)
    #[arg(short = 'u', long, env = "ASSETDESK_API_URL")]
    api_url: Option<String>,

    /// View to open at startup (dashboard, customers, sites, vms, switches,
    /// firewalls, infrastructure, aws, azure, datacenter, on_premise)
    #[arg(long)]
    view: Option<String>,

    /// Log file path (defaults to /tmp/assetdesk.log)
    #[arg(long, default_value = "/tmp/assetdesk.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Write the resolved settings, these flags included, to the config file
    #[arg(long)]
    save_config: bool,
}

/// Set up file-based tracing. Nothing may log to stdout/stderr while the
/// terminal UI owns them. The returned guard flushes logs on drop.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "assetdesk={log_level},assetdesk_core={log_level},assetdesk_api={log_level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("assetdesk.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Config file and environment, with CLI flags applied on top.
fn resolve_config(cli: &Cli) -> Config {
    let config = assetdesk_config::load_config().unwrap_or_else(|e| {
        warn!(error = %e, "config could not be loaded, using defaults");
        Config::default()
    });
    apply_overrides(config, cli)
}

fn apply_overrides(mut config: Config, cli: &Cli) -> Config {
    if let Some(url) = &cli.api_url {
        config.api.base_url.clone_from(url);
    }
    if let Some(view) = &cli.view {
        config.ui.start_view.clone_from(view);
    }
    config
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file; hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    let config = resolve_config(&cli);
    let service = assetdesk_config::to_service_config(&config)?;
    if cli.save_config {
        assetdesk_config::save_config(&config)?;
        info!(path = %assetdesk_config::config_path().display(), "config saved");
    }
    let start_view = ScreenId::from_key(&config.ui.start_view);

    info!(
        api = %service.base_url,
        view = start_view.key(),
        "starting assetdesk"
    );

    let inventory = Inventory::new(service)?;
    let mut app = App::new(
        inventory,
        AppOptions {
            start_view,
            sidebar_open: config.ui.sidebar_open,
            tick_rate: config.ui.tick_rate(),
        },
    );
    app.run().await?;

    Ok(())
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn flags_override_the_file_and_are_what_gets_saved() {
        let cli = Cli::parse_from([
            "assetdesk",
            "-u",
            "http://inventory:9000",
            "--view",
            "sites",
            "--save-config",
        ]);
        assert!(cli.save_config);

        let config = apply_overrides(Config::default(), &cli);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assetdesk_config::save_config_to(&config, &path).unwrap();

        let saved = assetdesk_config::load_config_from(&path).unwrap();
        assert_eq!(saved.api.base_url, "http://inventory:9000");
        assert_eq!(saved.ui.start_view, "sites");
        assert_eq!(saved.api.timeout_secs, Config::default().api.timeout_secs);
    }

    #[test]
    fn no_flags_leave_the_config_alone() {
        let cli = Cli::parse_from(["assetdesk"]);
        assert!(!cli.save_config);
        let config = apply_overrides(Config::default(), &cli);
        assert_eq!(config.ui.start_view, "dashboard");
    }
}
