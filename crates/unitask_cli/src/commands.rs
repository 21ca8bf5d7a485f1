//! CLI command definitions and handlers.

use crate::render;
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{ArgAction, Args, Parser, Subcommand};
use log::info;
use std::path::{Path, PathBuf};
use std::time::Duration;
use unitask_core::model::task::parse_due_date;
use unitask_core::{
    backup_file_name, open_db, AppError, CalendarCursor, LogAlertSink, NewTask, Priority,
    Registration, SettingUpdate, SqliteSnapshotRepository, StatusMessage, SystemClock, TaskFilter,
    TaskSort, Theme, UniTaskApp,
};

const DEFAULT_DB_FILE: &str = "unitask.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "unitask-logs";
const DEFAULT_WATCH_INTERVAL_SECS: u64 = 60;
/// A century either way.
const MAX_CALENDAR_OFFSET: i64 = 1200;

type CliApp<'conn> = UniTaskApp<SqliteSnapshotRepository<'conn>, SystemClock, LogAlertSink>;

/// UniTask - student task tracker with reminders.
#[derive(Debug, Parser)]
#[command(name = "unitask")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// SQLite file holding the local snapshot.
    #[arg(long, global = true, env = "UNITASK_DB", default_value = DEFAULT_DB_FILE)]
    pub db: PathBuf,

    /// Directory for rolling log files (defaults to <tmp>/unitask-logs).
    #[arg(long, global = true, env = "UNITASK_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error (defaults by build mode).
    #[arg(long, global = true, env = "UNITASK_LOG_LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Manage tasks
    #[command(subcommand)]
    Task(TaskCommands),

    /// Notification center
    #[command(subcommand)]
    Notify(NotifyCommands),

    /// Summary counts, upcoming tasks and resources
    Dashboard,

    /// Browse the resource directory
    Resources(ResourcesArgs),

    /// Month calendar of due dates
    Calendar(CalendarArgs),

    /// Tasks due today
    Today,

    /// Show or change preferences
    #[command(subcommand)]
    Settings(SettingsCommands),

    /// Write a JSON backup of all data
    Export(ExportArgs),

    /// Replace all data with a JSON backup
    Import(ImportArgs),

    /// Delete all tasks and notifications and restore defaults
    Clear(ClearArgs),

    /// Run one reminder check
    Tick,

    /// Run reminder checks periodically until interrupted
    Watch(WatchArgs),

    /// Sign in (demo mode, any non-empty credentials)
    Login(LoginArgs),

    /// Create a demo account with sample tasks
    Register(RegisterArgs),

    /// Sign out
    Logout,

    /// Show or rename the signed-in profile
    Profile(ProfileArgs),
}

#[derive(Debug, Subcommand)]
pub enum TaskCommands {
    /// Create a task
    Add(AddTaskArgs),

    /// List tasks
    List(ListTaskArgs),

    /// Search titles and descriptions
    Search(SearchTaskArgs),

    /// Flip a task between pending and completed
    Toggle { id: i64 },

    /// Delete a task
    Delete { id: i64 },
}

#[derive(Debug, Args)]
pub struct AddTaskArgs {
    pub title: String,

    /// Due date, YYYY-MM-DD
    #[arg(long, value_parser = parse_due_date)]
    pub due: NaiveDate,

    #[arg(long, default_value = "medium")]
    pub priority: Priority,

    #[arg(short, long, default_value = "")]
    pub description: String,

    #[arg(short, long, default_value = "")]
    pub category: String,

    /// Remind at the start of the day before the due date
    #[arg(long)]
    pub remind: bool,
}

#[derive(Debug, Args)]
pub struct ListTaskArgs {
    /// all|pending|completed|overdue
    #[arg(long, default_value = "all")]
    pub filter: TaskFilter,

    /// dueDate|priority|title|created
    #[arg(long, default_value = "dueDate")]
    pub sort: TaskSort,
}

#[derive(Debug, Args)]
pub struct SearchTaskArgs {
    pub term: String,

    #[command(flatten)]
    pub list: ListTaskArgs,
}

#[derive(Debug, Subcommand)]
pub enum NotifyCommands {
    /// Show the notification feed
    List,

    /// Mark one notification as read
    Read { id: i64 },

    /// Mark every notification as read
    ReadAll,
}

#[derive(Debug, Args)]
pub struct ResourcesArgs {
    /// Category to show, or `all`
    #[arg(long, default_value = "all")]
    pub category: String,

    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Debug, Args)]
pub struct CalendarArgs {
    /// Months relative to the current month
    #[arg(
        long,
        default_value_t = 0,
        allow_negative_numbers = true,
        value_parser = clap::value_parser!(i32).range(-MAX_CALENDAR_OFFSET..=MAX_CALENDAR_OFFSET)
    )]
    pub offset: i32,
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommands {
    Show,

    /// light|dark|auto
    Theme { value: Theme },

    TaskReminders {
        #[arg(action = ArgAction::Set)]
        enabled: bool,
    },

    ResourceUpdates {
        #[arg(action = ArgAction::Set)]
        enabled: bool,
    },

    DailyDigest {
        #[arg(action = ArgAction::Set)]
        enabled: bool,
    },
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Output file (defaults to unitask-backup-YYYY-MM-DD.json)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    pub file: PathBuf,
}

#[derive(Debug, Args)]
pub struct ClearArgs {
    /// Confirm the irreversible clear
    #[arg(long)]
    pub yes: bool,
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    #[arg(long, default_value_t = DEFAULT_WATCH_INTERVAL_SECS)]
    pub interval_secs: u64,

    /// Stop after this many checks
    #[arg(long)]
    pub count: Option<u64>,
}

#[derive(Debug, Args)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub password: String,
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub student_id: String,

    #[arg(long)]
    pub password: String,

    #[arg(long)]
    pub confirm_password: String,
}

#[derive(Debug, Args)]
pub struct ProfileArgs {
    /// New display name
    #[arg(long)]
    pub name: Option<String>,
}

impl Cli {
    /// Absolute log directory, resolving relative paths against the working
    /// directory.
    pub fn resolved_log_dir(&self) -> Result<PathBuf> {
        let dir = self
            .log_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME));
        if dir.is_absolute() {
            return Ok(dir);
        }
        let cwd = std::env::current_dir().context("failed to resolve working directory")?;
        Ok(cwd.join(dir))
    }

    pub fn log_level(&self) -> &str {
        self.log_level
            .as_deref()
            .unwrap_or_else(|| unitask_core::default_log_level())
    }

    pub fn execute(self) -> Result<()> {
        let conn = open_db(&self.db)
            .with_context(|| format!("failed to open `{}`", self.db.display()))?;
        let repo = SqliteSnapshotRepository::new(&conn);
        let mut app = UniTaskApp::load_with_alerts(repo, SystemClock, LogAlertSink)?;

        match self.command {
            Commands::Task(cmd) => run_task(&mut app, cmd),
            Commands::Notify(cmd) => run_notify(&mut app, cmd),
            Commands::Dashboard => {
                print!("{}", render::dashboard(&app.dashboard_view()));
                Ok(())
            }
            Commands::Resources(args) => {
                let cards = app.resource_cards(&args.category, args.search.as_deref());
                print!(
                    "{}",
                    render::resource_cards(&cards, &app.resource_categories())
                );
                Ok(())
            }
            Commands::Calendar(args) => {
                let cursor = CalendarCursor::containing(app.today())
                    .navigate(args.offset)
                    .context("calendar offset is out of range")?;
                print!("{}", render::calendar(&app.calendar_view(cursor)));
                Ok(())
            }
            Commands::Today => {
                print!("{}", render::today_events(&app.today_events()));
                Ok(())
            }
            Commands::Settings(cmd) => run_settings(&mut app, cmd),
            Commands::Export(args) => run_export(&app, args),
            Commands::Import(args) => run_import(&mut app, &args.file),
            Commands::Clear(args) => {
                if !args.yes {
                    bail!("refusing to clear all data without --yes");
                }
                app.clear_all()?;
                println!("{}", StatusMessage::data_cleared());
                Ok(())
            }
            Commands::Tick => {
                let posted = app.start()?;
                print!("{}", render::posted_notifications(&posted));
                Ok(())
            }
            Commands::Watch(args) => run_watch(&mut app, args),
            Commands::Login(args) => {
                let profile = app.login(&args.email, &args.password)?;
                println!("{}", StatusMessage::login_succeeded());
                print!("{}", render::profile(&profile));
                Ok(())
            }
            Commands::Register(args) => {
                let registration = Registration {
                    name: args.name,
                    email: args.email,
                    student_id: args.student_id,
                    password: args.password,
                    confirm_password: args.confirm_password,
                };
                let profile = app.register(&registration)?;
                println!("{}", StatusMessage::registration_succeeded());
                print!("{}", render::profile(&profile));
                Ok(())
            }
            Commands::Logout => {
                app.logout()?;
                println!("{}", StatusMessage::logged_out());
                Ok(())
            }
            Commands::Profile(args) => run_profile(&mut app, args),
        }
    }
}

fn run_task(app: &mut CliApp<'_>, cmd: TaskCommands) -> Result<()> {
    match cmd {
        TaskCommands::Add(args) => {
            let input = NewTask::new(args.title, args.due, args.priority)
                .with_description(args.description)
                .with_category(args.category)
                .with_reminder(args.remind);
            let task = app.create_task(input)?;
            println!("{} (id {})", StatusMessage::task_added(), task.id);
        }
        TaskCommands::List(args) => {
            print!("{}", render::task_list(&app.task_list_view(args.filter, args.sort)));
        }
        TaskCommands::Search(args) => {
            let view = app.task_search_view(&args.term, args.list.filter, args.list.sort);
            print!("{}", render::task_list(&view));
        }
        TaskCommands::Toggle { id } => match app.toggle_task(id)? {
            Some(task) => println!("{}", StatusMessage::task_toggled(task.completed)),
            None => bail!("no task with id {id}"),
        },
        TaskCommands::Delete { id } => {
            if !app.delete_task(id)? {
                bail!("no task with id {id}");
            }
            println!("{}", StatusMessage::task_deleted());
        }
    }
    Ok(())
}

fn run_notify(app: &mut CliApp<'_>, cmd: NotifyCommands) -> Result<()> {
    match cmd {
        NotifyCommands::List => {
            print!("{}", render::notification_feed(&app.notification_feed_view()));
        }
        NotifyCommands::Read { id } => {
            if !app.mark_notification_read(id)? {
                bail!("no notification with id {id}");
            }
            println!("Marked as read ({} unread)", app.unread_count());
        }
        NotifyCommands::ReadAll => {
            app.mark_all_notifications_read()?;
            println!("{}", StatusMessage::all_read());
        }
    }
    Ok(())
}

fn run_settings(app: &mut CliApp<'_>, cmd: SettingsCommands) -> Result<()> {
    let update = match cmd {
        SettingsCommands::Show => {
            print!("{}", render::settings(app.settings()));
            return Ok(());
        }
        SettingsCommands::Theme { value } => SettingUpdate::Theme(value),
        SettingsCommands::TaskReminders { enabled } => SettingUpdate::TaskReminders(enabled),
        SettingsCommands::ResourceUpdates { enabled } => SettingUpdate::ResourceUpdates(enabled),
        SettingsCommands::DailyDigest { enabled } => SettingUpdate::DailyDigest(enabled),
    };
    let settings = app.update_setting(update)?;
    println!("{}", StatusMessage::settings_updated());
    print!("{}", render::settings(&settings));
    Ok(())
}

fn run_export(app: &CliApp<'_>, args: ExportArgs) -> Result<()> {
    let path = args
        .out
        .unwrap_or_else(|| PathBuf::from(backup_file_name(app.today())));
    let json = app.export_json()?;
    std::fs::write(&path, json)
        .with_context(|| format!("failed to write `{}`", path.display()))?;
    println!("{} to {}", StatusMessage::data_exported(), path.display());
    Ok(())
}

fn run_import(app: &mut CliApp<'_>, file: &Path) -> Result<()> {
    let json = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read `{}`", file.display()))?;
    let summary = match app.import_json(&json) {
        Ok(summary) => summary,
        Err(err @ AppError::Import(_)) => {
            eprintln!("{}", StatusMessage::invalid_data_file());
            return Err(err.into());
        }
        Err(err) => return Err(err.into()),
    };
    println!(
        "{} ({} tasks, {} notifications, {} resources)",
        StatusMessage::data_imported(),
        summary.tasks,
        summary.notifications,
        summary.resources
    );
    Ok(())
}

fn run_watch(app: &mut CliApp<'_>, args: WatchArgs) -> Result<()> {
    let interval = Duration::from_secs(args.interval_secs.max(1));
    info!(
        "event=watch_start module=cli status=ok interval_secs={}",
        interval.as_secs()
    );

    let mut checks = 0_u64;
    loop {
        // Other commands may have written since the last check.
        app.reload()?;
        let posted = app.tick()?;
        print!("{}", render::posted_notifications(&posted));
        checks += 1;
        if args.count.is_some_and(|limit| checks >= limit) {
            return Ok(());
        }
        std::thread::sleep(interval);
    }
}

fn run_profile(app: &mut CliApp<'_>, args: ProfileArgs) -> Result<()> {
    if let Some(name) = args.name {
        if !app.update_profile_name(&name)? {
            bail!("not signed in, or the name is blank");
        }
        println!("{}", StatusMessage::profile_updated());
    }
    match app.user() {
        Some(user) => print!("{}", render::profile(user)),
        None => println!("Not signed in"),
    }
    Ok(())
}
