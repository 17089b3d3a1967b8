use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{
    BackupCommands, GoalCommands, ItemCommands, MaintenanceCommands, OrderCommands, TaskCommands,
};

/// Main command-line interface for the Compass dashboard
///
/// Compass is a personal goals and tasks dashboard built around a single
/// per-user document. It keeps a hierarchical collection of goals and tasks
/// (with recurring routines, calendar placement, and decision notes) synced
/// through a local document store, with demo data shown to anonymous
/// sessions.
#[derive(Parser)]
#[command(version, about, name = "compass")]
pub struct Args {
    /// Path to the SQLite document store. Defaults to
    /// $XDG_DATA_HOME/compass/compass.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Directory holding daily backup slots. Defaults to
    /// $XDG_DATA_HOME/compass/backups
    #[arg(long, global = true)]
    pub storage_dir: Option<PathBuf>,

    /// Path to the sign-in session file. Defaults to
    /// $XDG_STATE_HOME/compass/session
    #[arg(long, global = true)]
    pub session_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Compass CLI
///
/// Running with no command shows the goal tree. Mutating commands persist
/// through the sync engine and flush before exiting, so every invocation
/// leaves durable state behind.
#[derive(Subcommand)]
pub enum Commands {
    /// Manage goals
    #[command(alias = "g")]
    Goal {
        #[command(subcommand)]
        command: GoalCommands,
    },
    /// Manage tasks
    #[command(alias = "t")]
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Operate on any item by id
    #[command(alias = "i")]
    Item {
        #[command(subcommand)]
        command: ItemCommands,
    },
    /// Show the daily routine board
    #[command(alias = "r")]
    Routines,
    /// Show or set the goal display order
    Order {
        #[command(subcommand)]
        command: OrderCommands,
    },
    /// List or restore local backups
    Backup {
        #[command(subcommand)]
        command: BackupCommands,
    },
    /// Maintenance operations on the stored collection
    Maintenance {
        #[command(subcommand)]
        command: MaintenanceCommands,
    },
    /// Sign in as a user
    Login {
        /// User id to sign in as
        uid: String,
    },
    /// Sign out and return to the anonymous demo
    Logout,
    /// Show the signed-in user
    Whoami,
}
