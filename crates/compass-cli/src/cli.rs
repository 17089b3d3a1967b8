//! Command-line interface definitions and handlers.
//!
//! Arg structs here wrap the core parameter types with clap derives and
//! convert via `From`, keeping framework concerns out of compass-core.
//! The [`Cli`] struct owns the engine and renders every result as markdown.

use std::io::Write;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use compass_core::{
    models::collect_subtree_ids,
    params::{CompleteItem, CreateGoal, CreateTask, Id},
    BackupSlots, GoalTree, IdentityProvider, Item, Notifier, OperationStatus, RoutineBoard,
    SessionIdentity, SyncEngine,
};

use crate::renderer::TerminalRenderer;

/// Add a new goal
///
/// Creates a top-level goal by default; pass --parent to nest it under an
/// existing goal.
#[derive(Args)]
pub struct AddGoalArgs {
    /// Text of the goal
    pub text: String,
    /// Id of the parent goal to nest under
    #[arg(long, help = "Id of an existing goal to nest this goal under")]
    pub parent: Option<String>,
    /// Calendar date for the goal (YYYY-MM-DD)
    #[arg(long, help = "Calendar date for the goal (YYYY-MM-DD)")]
    pub schedule: Option<String>,
    /// Tags - comma-separated list
    #[arg(long, value_delimiter = ',', help = "Tags as comma-separated list")]
    pub tag: Vec<String>,
}

impl From<AddGoalArgs> for CreateGoal {
    fn from(val: AddGoalArgs) -> Self {
        CreateGoal {
            text: val.text,
            parent_goal_id: val.parent,
            scheduled: val.schedule,
            tags: val.tag,
        }
    }
}

/// Add a new task
///
/// Tasks attach to a goal with --goal, or float free (routines often do).
/// Daily routines may name a time-of-day bucket.
#[derive(Args)]
pub struct AddTaskArgs {
    /// Text of the task
    pub text: String,
    /// Id of the goal this task belongs to
    #[arg(long, help = "Id of the goal this task belongs to")]
    pub goal: Option<String>,
    /// Recurrence cadence (daily, weekly, monthly)
    #[arg(long, help = "Recurrence cadence: daily, weekly, or monthly")]
    pub recurs: Option<String>,
    /// Time-of-day bucket for daily routines
    #[arg(
        long,
        help = "Bucket for daily routines: firstThing, morning, afternoon, evening, or endOfDay"
    )]
    pub time_of_day: Option<String>,
    /// Calendar date for the task (YYYY-MM-DD)
    #[arg(long, help = "Calendar date for the task (YYYY-MM-DD)")]
    pub schedule: Option<String>,
}

impl From<AddTaskArgs> for CreateTask {
    fn from(val: AddTaskArgs) -> Self {
        CreateTask {
            text: val.text,
            goal_id: val.goal,
            recurs: val.recurs,
            time_of_day: val.time_of_day,
            scheduled: val.schedule,
        }
    }
}

/// Mark an item as completed
#[derive(Args)]
pub struct DoneArgs {
    /// Id of the item to complete
    pub id: String,
    /// How the item was resolved
    #[arg(long, help = "Short note recording how the item was resolved")]
    pub resolution: Option<String>,
}

impl From<DoneArgs> for CompleteItem {
    fn from(val: DoneArgs) -> Self {
        CompleteItem {
            id: val.id,
            resolution: val.resolution,
        }
    }
}

/// Remove an item and everything nested beneath it
#[derive(Args)]
pub struct RemoveArgs {
    /// Id of the item to remove
    pub id: String,
}

impl From<RemoveArgs> for Id {
    fn from(val: RemoveArgs) -> Self {
        Id { id: val.id }
    }
}

/// Set the goal display order explicitly
#[derive(Args)]
pub struct SetOrderArgs {
    /// Root goal ids in the desired display order
    #[arg(required = true)]
    pub ids: Vec<String>,
}

/// Restore a local backup slot
#[derive(Args)]
pub struct RestoreArgs {
    /// Backup slot key to restore (e.g. backup-2024-01-01); prompts when
    /// omitted
    #[arg(long)]
    pub slot: Option<String>,
    /// Skip the confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

#[derive(Subcommand)]
pub enum GoalCommands {
    /// Add a new goal
    #[command(alias = "a")]
    Add(AddGoalArgs),
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a new task
    #[command(alias = "a")]
    Add(AddTaskArgs),
}

#[derive(Subcommand)]
pub enum ItemCommands {
    /// Mark an item as completed
    #[command(alias = "d")]
    Done(DoneArgs),
    /// Remove an item and its descendants
    #[command(aliases = ["rm", "delete"])]
    Remove(RemoveArgs),
}

#[derive(Subcommand)]
pub enum OrderCommands {
    /// Show the effective goal order
    Show,
    /// Replace the goal order
    Set(SetOrderArgs),
}

#[derive(Subcommand)]
pub enum BackupCommands {
    /// List local backup slots
    #[command(aliases = ["l", "ls"])]
    List,
    /// Restore a backup slot as the live collection
    Restore(RestoreArgs),
}

#[derive(Subcommand)]
pub enum MaintenanceCommands {
    /// Remove duplicate items from the stored collection
    Dedupe,
}

/// Notifier that surfaces engine notices on stderr.
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, message: &str) {
        eprintln!("note: {message}");
    }
}

/// Command handlers bound to one engine instance.
pub struct Cli {
    engine: SyncEngine,
    identity: Arc<SessionIdentity>,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(engine: SyncEngine, identity: Arc<SessionIdentity>, renderer: TerminalRenderer) -> Self {
        Self {
            engine,
            identity,
            renderer,
        }
    }

    /// The default view: the goal tree in self-healed display order.
    pub async fn show_dashboard(&self) -> Result<()> {
        let items = self.engine.load_decisions(false).await?;
        let order = self.engine.sync_goal_order(&items).await?;
        self.renderer
            .render(&GoalTree::new(&items, &order).to_string());
        Ok(())
    }

    pub async fn handle_goal_command(&self, command: GoalCommands) -> Result<()> {
        match command {
            GoalCommands::Add(args) => {
                let params: CreateGoal = args.into();
                let mut items = self.engine.load_decisions(false).await?;

                if let Some(parent) = &params.parent_goal_id {
                    if !items.iter().any(|i| &i.id == parent) {
                        bail!("No goal with id {parent} exists");
                    }
                }

                let item = params.into_item();
                let message = format!("Added goal '{}' with id {}", item.text, item.id);
                items.push(item);
                self.persist(&items).await?;
                self.render_status(OperationStatus::success(message));
                Ok(())
            }
        }
    }

    pub async fn handle_task_command(&self, command: TaskCommands) -> Result<()> {
        match command {
            TaskCommands::Add(args) => {
                let params: CreateTask = args.into();
                let mut items = self.engine.load_decisions(false).await?;

                if let Some(goal_id) = &params.goal_id {
                    if !items.iter().any(|i| &i.id == goal_id) {
                        bail!("No goal with id {goal_id} exists");
                    }
                }

                let item = params.into_item()?;
                let message = format!("Added task '{}' with id {}", item.text, item.id);
                items.push(item);
                self.persist(&items).await?;
                self.render_status(OperationStatus::success(message));
                Ok(())
            }
        }
    }

    pub async fn handle_item_command(&self, command: ItemCommands) -> Result<()> {
        match command {
            ItemCommands::Done(args) => {
                let params: CompleteItem = args.into();
                let mut items = self.engine.load_decisions(false).await?;

                if !params.apply(&mut items) {
                    bail!("No item with id {} exists", params.id);
                }

                self.persist(&items).await?;
                self.render_status(OperationStatus::success(format!(
                    "Completed item {}",
                    params.id
                )));
                Ok(())
            }
            ItemCommands::Remove(args) => {
                let params: Id = args.into();
                let items = self.engine.load_decisions(false).await?;

                if !items.iter().any(|i| i.id == params.id) {
                    bail!("No item with id {} exists", params.id);
                }

                let doomed = collect_subtree_ids(&items, &params.id);
                let remaining: Vec<Item> = items
                    .into_iter()
                    .filter(|i| !doomed.contains(&i.id))
                    .collect();
                let removed = doomed.len();

                // The engine refuses to persist an empty collection, so an
                // all-clearing remove would silently go nowhere. Say so.
                if !remaining.iter().any(Item::is_persistable) {
                    bail!("Removing this would empty the collection, which is never persisted");
                }

                self.persist(&remaining).await?;
                self.render_status(OperationStatus::success(format!(
                    "Removed {removed} item(s)"
                )));
                Ok(())
            }
        }
    }

    pub async fn show_routines(&self) -> Result<()> {
        let items = self.engine.load_decisions(false).await?;
        self.renderer.render(&RoutineBoard(&items).to_string());
        Ok(())
    }

    pub async fn handle_order_command(&self, command: OrderCommands) -> Result<()> {
        match command {
            OrderCommands::Show => {
                let items = self.engine.load_decisions(false).await?;
                let order = self.engine.sync_goal_order(&items).await?;
                if order.is_empty() {
                    self.renderer.render("No goals to order.");
                } else {
                    let listing: String = order
                        .iter()
                        .enumerate()
                        .map(|(i, id)| format!("{}. {id}\n", i + 1))
                        .collect();
                    self.renderer.render(&listing);
                }
                Ok(())
            }
            OrderCommands::Set(args) => {
                if self.identity.current_uid().is_none() {
                    bail!("Sign in before setting the goal order");
                }
                self.engine.save_goal_order(&args.ids).await;
                self.render_status(OperationStatus::success(format!(
                    "Goal order set ({} goals)",
                    args.ids.len()
                )));
                Ok(())
            }
        }
    }

    pub async fn handle_backup_command(&self, command: BackupCommands) -> Result<()> {
        match command {
            BackupCommands::List => {
                let keys = self.engine.list_backups()?;
                self.renderer.render(&BackupSlots(keys).to_string());
                Ok(())
            }
            BackupCommands::Restore(args) => {
                let RestoreArgs { slot, yes } = args;

                let restored = self
                    .engine
                    .restore_backup(
                        move |keys| match slot {
                            Some(slot) => keys.contains(&slot).then_some(slot),
                            None => prompt_select(keys),
                        },
                        move |prompt| {
                            if yes {
                                println!("{prompt}");
                                true
                            } else {
                                prompt_confirm(prompt)
                            }
                        },
                    )
                    .await?;

                match restored {
                    Some(key) => {
                        self.render_status(OperationStatus::success(format!("Restored {key}")));
                    }
                    None => {
                        self.render_status(OperationStatus::failure(
                            "Nothing restored".to_string(),
                        ));
                    }
                }
                Ok(())
            }
        }
    }

    pub async fn handle_maintenance_command(&self, command: MaintenanceCommands) -> Result<()> {
        match command {
            MaintenanceCommands::Dedupe => {
                let items = self
                    .engine
                    .remove_duplicate_decisions()
                    .await
                    .context("Duplicate removal failed")?;
                self.render_status(OperationStatus::success(format!(
                    "Collection holds {} item(s) after duplicate removal",
                    items.len()
                )));
                Ok(())
            }
        }
    }

    pub async fn login(&self, uid: &str) -> Result<()> {
        self.identity.sign_in(uid)?;
        self.engine.clear();
        self.render_status(OperationStatus::success(format!("Signed in as {uid}")));
        Ok(())
    }

    pub async fn logout(&self) -> Result<()> {
        // Commit anything still pending for the outgoing user first
        self.engine.flush_pending_decisions().await?;
        self.identity.sign_out()?;
        self.engine.clear();
        self.render_status(OperationStatus::success("Signed out".to_string()));
        Ok(())
    }

    pub fn whoami(&self) {
        match self.identity.current_uid() {
            Some(uid) => self.renderer.render(&format!("Signed in as {uid}\n")),
            None => self.renderer.render("Anonymous (demo data only)\n"),
        }
    }

    /// Save plus flush: CLI invocations end immediately, so every mutation
    /// commits before the process exits.
    async fn persist(&self, items: &[Item]) -> Result<()> {
        self.engine.save_decisions(items).await;
        self.engine.flush_pending_decisions().await?;
        Ok(())
    }

    fn render_status(&self, status: OperationStatus) {
        self.renderer.render(&status.to_string());
    }
}

fn prompt_select(keys: &[String]) -> Option<String> {
    eprintln!("Available backups:");
    for (i, key) in keys.iter().enumerate() {
        eprintln!("  {}. {key}", i + 1);
    }
    eprint!("Restore which backup? [1-{}, empty to cancel] ", keys.len());
    let _ = std::io::stderr().flush();

    let mut line = String::new();
    if std::io::stdin().read_line(&mut line).is_err() {
        return None;
    }
    let choice: usize = line.trim().parse().ok()?;
    keys.get(choice.checked_sub(1)?).cloned()
}

fn prompt_confirm(prompt: &str) -> bool {
    eprint!("{prompt} [y/N] ");
    let _ = std::io::stderr().flush();

    let mut line = String::new();
    if std::io::stdin().read_line(&mut line).is_err() {
        return false;
    }
    matches!(line.trim().to_lowercase().as_str(), "y" | "yes")
}
