//! Compass CLI Application
//!
//! Command-line consumer of the Compass sync engine: goal tree, routines,
//! backups, and session management over one per-user document.

mod args;
mod cli;
mod renderer;

use std::sync::Arc;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use compass_core::{DirStorage, SessionIdentity, SqliteStore, SyncEngineBuilder};
use log::info;
use renderer::TerminalRenderer;

use cli::{Cli, StderrNotifier};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        storage_dir,
        session_file,
        no_color,
        command,
    } = Args::parse();

    let store = match database_file {
        Some(path) => SqliteStore::open(path),
        None => SqliteStore::open_default(),
    }
    .context("Failed to open the document store")?;

    let backups = match storage_dir {
        Some(dir) => DirStorage::open(dir),
        None => DirStorage::from_xdg(),
    }
    .context("Failed to open backup storage")?;

    let identity = Arc::new(match session_file {
        Some(path) => SessionIdentity::new(path),
        None => SessionIdentity::from_xdg().context("Failed to resolve the session file")?,
    });

    let engine = SyncEngineBuilder::new()
        .with_store(Arc::new(store))
        .with_identity(Arc::clone(&identity) as Arc<dyn compass_core::IdentityProvider>)
        .with_backups(Arc::new(backups))
        .with_notifier(Arc::new(StderrNotifier))
        .build()
        .context("Failed to initialize the sync engine")?;

    let cli = Cli::new(engine, identity, TerminalRenderer::new(!no_color));

    info!("Compass started");

    match command {
        Some(Goal { command }) => cli.handle_goal_command(command).await,
        Some(Task { command }) => cli.handle_task_command(command).await,
        Some(Item { command }) => cli.handle_item_command(command).await,
        Some(Routines) => cli.show_routines().await,
        Some(Order { command }) => cli.handle_order_command(command).await,
        Some(Backup { command }) => cli.handle_backup_command(command).await,
        Some(Maintenance { command }) => cli.handle_maintenance_command(command).await,
        Some(Login { uid }) => cli.login(&uid).await,
        Some(Logout) => cli.logout().await,
        Some(Whoami) => {
            cli.whoami();
            Ok(())
        }
        None => cli.show_dashboard().await,
    }
}
