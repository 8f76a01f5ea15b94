mod cli;
mod config;
mod db;
mod models;
mod session;
mod tui;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;
use rusqlite::Connection;

use cli::args::{Cli, Commands};
use cli::handlers;
use config::AppConfig;
use db::migrations::run_migrations;
use session::Session;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Loading config")?;

    // Ensure data directory exists and open DB
    AppConfig::ensure_data_dir()?;
    let db_path = AppConfig::db_path()?;
    let conn = Connection::open(&db_path)
        .with_context(|| format!("Opening database at {:?}", db_path))?;

    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    run_migrations(&conn).context("Creating storage schema")?;

    // Loading (and migrating) finishes here, before anything can be saved.
    let mut session = Session::open(conn).context("Loading tracker state")?;

    match cli.command {
        Some(Commands::Status) => handlers::handle_status(&session, &config)?,
        Some(Commands::Mark {
            participant,
            task,
            day,
        }) => handlers::handle_mark(&mut session, &config, &participant, &task, day)?,
        Some(Commands::Zakat { participant }) => {
            handlers::handle_zakat(&mut session, &config, &participant)?
        }
        Some(Commands::Export) => handlers::handle_export(&session)?,
        Some(Commands::Reset { yes }) => handlers::handle_reset(&mut session, yes)?,
        None => tui::app::run(session, config)?,
    }

    Ok(())
}
