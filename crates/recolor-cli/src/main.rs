mod cli;
mod commands;
mod shutdown;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Command};
use recolor_core::Config;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG overrides the default filter
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("recolor=info,recolor_core=info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = load_config(args.config.as_deref());

    match args.command {
        Command::Extract { pac_dir, output } => commands::extract::run(&pac_dir, &output),
        Command::ExtractOne { pac_file, output } => commands::extract::run_one(&pac_file, &output),
        Command::List {
            pac_file,
            sprites_only,
        } => commands::list::run(&pac_file, sprites_only),
        Command::Find {
            pac_dir,
            pattern,
            output,
        } => commands::find::run(&pac_dir, &pattern, &output),
        Command::Process { input, output } => commands::process::run(&input, &output, &config),
        Command::Full { pac_dir, output } => commands::full::run(&pac_dir, &output, &config),
        Command::Inspect { sprite, json } => commands::inspect::run(&sprite, json, &config),
        Command::Recolor {
            scheme,
            pid,
            dry_run,
        } => commands::recolor::run(&scheme, pid, dry_run, &config),
        Command::Watch {
            scheme,
            pid,
            interval_ms,
        } => commands::watch::run(&scheme, pid, interval_ms, &config),
        Command::Config { output } => commands::config::run(&output),
        Command::Schemes => commands::schemes::run(),
    }
}

fn load_config(path: Option<&str>) -> Config {
    let Some(path) = path else {
        return Config::default();
    };
    match Config::load(path) {
        Ok(config) => {
            info!("Loaded config from {}", path);
            config
        }
        Err(e) => {
            warn!("Failed to load config from {}: {}", path, e);
            Config::default()
        }
    }
}
