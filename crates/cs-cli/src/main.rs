use std::io::{Write, stdout};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cs_cli::commands::{
    delete, events, export, import, reset, sessions, share, stats, status, timer, util,
};
use cs_cli::{Cli, Commands, Config};

/// Load config and open database, ensuring the parent directory exists.
fn open_database(config_path: Option<&Path>) -> Result<(cs_db::Database, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    let db = cs_db::Database::open(&config.database_path).context("failed to open database")?;
    Ok((db, config))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so exported data on stdout stays clean
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let now = Utc::now();
    let stdout = stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Some(Commands::Start { at }) => {
            let (db, _config) = open_database(cli.config.as_deref())?;
            timer::start(&mut out, &db, util::resolve_time(at.as_deref(), now)?)?;
        }
        Some(Commands::Stop { at }) => {
            let (db, _config) = open_database(cli.config.as_deref())?;
            timer::stop(&mut out, &db, util::resolve_time(at.as_deref(), now)?)?;
        }
        Some(Commands::Toggle) => {
            let (db, _config) = open_database(cli.config.as_deref())?;
            timer::toggle(&mut out, &db, now)?;
        }
        Some(Commands::Status) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            status::run(&mut out, &db, &config.database_path, now)?;
        }
        Some(Commands::Sessions { json }) => {
            let (db, _config) = open_database(cli.config.as_deref())?;
            sessions::run(&mut out, &db, *json)?;
        }
        Some(Commands::Events { json }) => {
            let (db, _config) = open_database(cli.config.as_deref())?;
            events::run(&mut out, &db, *json)?;
        }
        Some(Commands::Delete { index }) => {
            let (mut db, _config) = open_database(cli.config.as_deref())?;
            delete::run(&mut out, &mut db, *index)?;
        }
        Some(Commands::Reset) => {
            let (db, _config) = open_database(cli.config.as_deref())?;
            reset::run(&mut out, &db)?;
        }
        Some(Commands::Stats {
            now: at,
            window_minutes,
            json,
        }) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            let until = util::resolve_time(at.as_deref(), now)?;
            let window = window_minutes.unwrap_or(config.window_minutes);
            stats::run(&mut out, &db, until, window, *json)?;
        }
        Some(Commands::Export { format, events }) => {
            let (db, _config) = open_database(cli.config.as_deref())?;
            export::run(&mut out, &db, *format, *events)?;
        }
        Some(Commands::Share) => {
            let (db, _config) = open_database(cli.config.as_deref())?;
            share::run(&mut out, &db)?;
        }
        Some(Commands::ViewShare { start, stop }) => {
            // Decoding a shared link needs no local state
            share::view(&mut out, start.as_deref(), stop.as_deref())?;
        }
        Some(Commands::Import { path }) => {
            let (mut db, _config) = open_database(cli.config.as_deref())?;
            let imported = import::run(&mut out, &mut db, path)?;
            tracing::info!(imported, "import complete");
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    out.flush()?;
    Ok(())
}
