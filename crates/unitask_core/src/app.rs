//! Composition root owning all session state.
//!
//! # Responsibility
//! - Own the task store, notification engine, reminder scheduler, resource
//!   catalog, settings and demo user for one application session.
//! - Route every mutation through a full snapshot write before returning.
//! - Expose view projections for the external renderer.
//!
//! # Invariants
//! - A mutating call returns only after its snapshot write completed; a
//!   failed write is reported to the caller as `AppError::Repo`.
//! - Calls addressed by an unknown id change nothing and write nothing.
//! - A rejected import or invalid input leaves every collection untouched.

use crate::clock::Clock;
use crate::model::notification::{Notification, NotificationId, NotificationKind};
use crate::model::resource::{default_resources, Resource};
use crate::model::settings::{SettingUpdate, Settings};
use crate::model::task::{NewTask, Priority, Task, TaskId, TaskValidationError};
use crate::model::user::UserProfile;
use crate::repo::snapshot_repo::{RepoError, SnapshotRepository};
use crate::service::notification_engine::{AlertSink, NoopAlertSink, NotificationEngine};
use crate::service::reminder::{ReminderNotice, ReminderScheduler};
use crate::service::resource_directory::{categories, filter_by_category, search_resources};
use crate::service::session::{self, AuthError, Registration};
use crate::service::task_store::{TaskFilter, TaskSort, TaskStore};
use crate::transfer::{parse_import, ExportDocument, ImportError};
use crate::view::calendar::{
    events_for_date, project_calendar_month, CalendarCursor, CalendarEvent, CalendarMonthView,
};
use crate::view::projection::{
    project_dashboard, project_notification_feed, project_resource_cards, project_task_list,
    project_task_search, DashboardView, NotificationFeedView, ResourceCard, TaskListView,
};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const WELCOME_TITLE: &str = "Welcome to UniTask!";

pub type AppResult<T> = Result<T, AppError>;

/// Caller-visible failure of an app operation. Never fatal.
#[derive(Debug)]
pub enum AppError {
    Validation(TaskValidationError),
    Auth(AuthError),
    Import(ImportError),
    Repo(RepoError),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Auth(err) => write!(f, "{err}"),
            Self::Import(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Auth(err) => Some(err),
            Self::Import(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<TaskValidationError> for AppError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<AuthError> for AppError {
    fn from(value: AuthError) -> Self {
        Self::Auth(value)
    }
}

impl From<ImportError> for AppError {
    fn from(value: ImportError) -> Self {
        Self::Import(value)
    }
}

impl From<RepoError> for AppError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Counts of what an accepted import installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub tasks: usize,
    pub notifications: usize,
    pub resources: usize,
}

/// One application session.
pub struct UniTaskApp<R: SnapshotRepository, C: Clock, A: AlertSink = NoopAlertSink> {
    repo: R,
    clock: C,
    alerts: A,
    tasks: TaskStore,
    notifications: NotificationEngine,
    reminders: ReminderScheduler,
    resources: Vec<Resource>,
    settings: Settings,
    user: Option<UserProfile>,
}

impl<R: SnapshotRepository, C: Clock> UniTaskApp<R, C, NoopAlertSink> {
    /// Restores a session from `repo` with alert hooks disabled.
    pub fn load(repo: R, clock: C) -> AppResult<Self> {
        Self::load_with_alerts(repo, clock, NoopAlertSink)
    }
}

impl<R: SnapshotRepository, C: Clock, A: AlertSink> UniTaskApp<R, C, A> {
    /// Restores a session from `repo`; absent or corrupt collections start
    /// from their defaults.
    pub fn load_with_alerts(repo: R, clock: C, alerts: A) -> AppResult<Self> {
        let snapshot = repo.load_all()?;
        info!(
            "event=app_load module=app status=ok tasks={} notifications={} resources={} signed_in={}",
            snapshot.tasks.len(),
            snapshot.notifications.len(),
            snapshot.resources.len(),
            snapshot.user.is_some()
        );
        let mut app = Self {
            repo,
            clock,
            alerts,
            tasks: TaskStore::from_tasks(snapshot.tasks),
            notifications: NotificationEngine::from_notifications(snapshot.notifications),
            reminders: ReminderScheduler::new(),
            resources: snapshot.resources,
            settings: snapshot.settings,
            user: snapshot.user,
        };
        app.sync_reminders();
        Ok(app)
    }

    /// Re-reads every collection from the store, replacing in-memory state.
    ///
    /// Daily reminder flags survive; pending one-shot reminders are aligned
    /// with the reloaded tasks. Long-running sessions call this before each
    /// tick so writes made by other sessions are not overwritten.
    pub fn reload(&mut self) -> AppResult<()> {
        let snapshot = self.repo.load_all()?;
        self.tasks.replace_all(snapshot.tasks);
        self.notifications.replace_all(snapshot.notifications);
        self.resources = snapshot.resources;
        self.settings = snapshot.settings;
        self.user = snapshot.user;
        self.sync_reminders();
        debug!(
            "event=app_reload module=app status=ok tasks={} notifications={} pending_reminders={}",
            self.tasks.tasks().len(),
            self.notifications.notifications().len(),
            self.reminders.pending().len()
        );
        Ok(())
    }

    fn sync_reminders(&mut self) {
        let added = self.reminders.sync_tasks(self.tasks.tasks(), self.clock.now());
        if added > 0 {
            info!("event=reminder_restore module=app status=ok scheduled={added}");
        }
    }

    /// Runs the immediate startup reminder check.
    pub fn start(&mut self) -> AppResult<Vec<Notification>> {
        self.tick()
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn tasks(&self) -> &[Task] {
        self.tasks.tasks()
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(id)
    }

    pub fn notifications(&self) -> &[Notification] {
        self.notifications.notifications()
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn reminders(&self) -> &ReminderScheduler {
        &self.reminders
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.unread_count()
    }

    // Tasks

    /// Creates a task, persists, and schedules its reminder when requested.
    pub fn create_task(&mut self, input: NewTask) -> AppResult<Task> {
        let now = self.clock.now();
        let task = self.tasks.create(input, now)?.clone();
        self.persist_bundle()?;

        if task.reminder {
            if let Some(fire_at) = self.reminders.schedule(&task, now) {
                info!(
                    "event=reminder_schedule module=app status=ok task_id={} fire_at={}",
                    task.id, fire_at
                );
            }
        }

        info!(
            "event=task_create module=app status=ok task_id={} priority={} reminder={}",
            task.id,
            task.priority.as_str(),
            task.reminder
        );
        Ok(task)
    }

    /// Flips completion. Returns the updated task, or `None` for an unknown id.
    pub fn toggle_task(&mut self, id: TaskId) -> AppResult<Option<Task>> {
        let Some(task) = self.tasks.toggle_completion(id).cloned() else {
            return Ok(None);
        };
        self.persist_bundle()?;
        info!(
            "event=task_toggle module=app status=ok task_id={} completed={}",
            task.id, task.completed
        );
        Ok(Some(task))
    }

    /// Deletes a task and cancels its pending reminder. Returns whether a
    /// task was removed.
    pub fn delete_task(&mut self, id: TaskId) -> AppResult<bool> {
        if self.tasks.delete(id).is_none() {
            return Ok(false);
        }
        self.reminders.cancel(id);
        self.persist_bundle()?;
        info!("event=task_delete module=app status=ok task_id={id}");
        Ok(true)
    }

    // Notifications

    /// Posts a notification, persists, and fires alert hooks when task
    /// reminders are enabled.
    pub fn add_notification(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        kind: NotificationKind,
    ) -> AppResult<Notification> {
        let now = self.clock.now();
        let notification = self.notifications.add(title, message, kind, now).clone();
        self.persist_bundle()?;

        if self.settings.task_reminders {
            self.alerts.desktop_alert(&notification);
            self.alerts.play_sound();
        }
        Ok(notification)
    }

    pub fn mark_notification_read(&mut self, id: NotificationId) -> AppResult<bool> {
        if !self.notifications.mark_read(id) {
            return Ok(false);
        }
        self.persist_bundle()?;
        Ok(true)
    }

    pub fn mark_all_notifications_read(&mut self) -> AppResult<usize> {
        let changed = self.notifications.mark_all_read();
        self.persist_bundle()?;
        Ok(changed)
    }

    // Reminders

    /// Periodic check. Fires due one-shot reminders, then, when task
    /// reminders are enabled, the once-per-day aggregates.
    ///
    /// Returns the notifications posted by this tick.
    pub fn tick(&mut self) -> AppResult<Vec<Notification>> {
        let now = self.clock.now();
        let mut notices = self.reminders.take_due(self.tasks.tasks(), now);
        if self.settings.task_reminders {
            notices.extend(self.reminders.check(self.tasks.tasks(), now));
        }
        self.post_notices(notices)
    }

    fn post_notices(&mut self, notices: Vec<ReminderNotice>) -> AppResult<Vec<Notification>> {
        let mut posted = Vec::with_capacity(notices.len());
        for notice in notices {
            posted.push(self.add_notification(notice.title, notice.message, notice.kind)?);
        }
        Ok(posted)
    }

    // Settings

    pub fn update_setting(&mut self, update: SettingUpdate) -> AppResult<Settings> {
        self.settings.apply(update);
        self.repo.save_settings(&self.settings)?;
        info!("event=settings_update module=app status=ok field={update:?}");
        Ok(self.settings)
    }

    // Import / export / clear

    pub fn export_document(&self) -> ExportDocument {
        ExportDocument {
            tasks: self.tasks.tasks().to_vec(),
            notifications: self.notifications.notifications().to_vec(),
            resources: self.resources.clone(),
            settings: self.settings,
            user: self.user.clone(),
            exported_at: self.clock.now(),
        }
    }

    /// Pretty-printed backup document.
    pub fn export_json(&self) -> AppResult<String> {
        serde_json::to_string_pretty(&self.export_document())
            .map_err(|err| AppError::Repo(RepoError::Encode(err)))
    }

    /// Replaces all state with a backup document.
    ///
    /// # Errors
    /// - `AppError::Import` when the payload is rejected; state is unchanged.
    pub fn import_json(&mut self, json: &str) -> AppResult<ImportSummary> {
        let payload = match parse_import(json) {
            Ok(payload) => payload,
            Err(err) => {
                warn!("event=data_import module=app status=rejected error={err}");
                return Err(err.into());
            }
        };

        let summary = ImportSummary {
            tasks: payload.tasks.len(),
            notifications: payload.notifications.len(),
            resources: payload.resources.len(),
        };

        self.tasks.replace_all(payload.tasks);
        self.notifications.replace_all(payload.notifications);
        self.resources = payload.resources;
        self.settings = payload.settings;
        self.reminders.cancel_all();
        self.sync_reminders();
        if payload.user.is_some() {
            self.user = payload.user;
            self.repo.save_user(self.user.as_ref())?;
        }

        self.persist_bundle()?;
        self.repo.save_settings(&self.settings)?;
        info!(
            "event=data_import module=app status=ok tasks={} notifications={} resources={}",
            summary.tasks, summary.notifications, summary.resources
        );
        Ok(summary)
    }

    /// Empties tasks and notifications and restores the default catalog and
    /// settings. The signed-in user is kept.
    pub fn clear_all(&mut self) -> AppResult<()> {
        self.tasks.clear();
        self.notifications.clear();
        self.reminders.cancel_all();
        self.resources = default_resources();
        self.settings = Settings::default();

        self.persist_bundle()?;
        self.repo.save_settings(&self.settings)?;
        info!("event=data_clear module=app status=ok");
        Ok(())
    }

    // Demo session

    /// Demo login: accepts any non-empty credentials.
    pub fn login(&mut self, email: &str, password: &str) -> AppResult<UserProfile> {
        let profile = session::login(email, password, self.clock.now())?;
        self.sign_in(profile.clone())?;
        self.add_notification(
            WELCOME_TITLE,
            "Get started by adding your first task.",
            NotificationKind::Success,
        )?;
        Ok(profile)
    }

    /// Demo registration; seeds sample tasks for the new user.
    pub fn register(&mut self, registration: &Registration) -> AppResult<UserProfile> {
        let profile = session::register(registration)?;
        self.sign_in(profile.clone())?;
        self.add_notification(
            WELCOME_TITLE,
            "Your account has been created successfully.",
            NotificationKind::Success,
        )?;
        self.add_sample_tasks()?;
        Ok(profile)
    }

    pub fn logout(&mut self) -> AppResult<()> {
        self.user = None;
        self.repo.save_user(None)?;
        info!("event=session_logout module=app status=ok");
        Ok(())
    }

    /// Renames the signed-in user. Blank names and signed-out sessions are
    /// ignored and return `false`.
    pub fn update_profile_name(&mut self, name: &str) -> AppResult<bool> {
        let name = name.trim();
        let Some(user) = self.user.as_mut() else {
            return Ok(false);
        };
        if name.is_empty() {
            return Ok(false);
        }
        user.name = name.to_string();
        self.repo.save_user(self.user.as_ref())?;
        Ok(true)
    }

    fn sign_in(&mut self, profile: UserProfile) -> AppResult<()> {
        self.user = Some(profile);
        self.repo.save_user(self.user.as_ref())?;
        info!("event=session_login module=app status=ok");
        Ok(())
    }

    fn add_sample_tasks(&mut self) -> AppResult<()> {
        let now = self.clock.now();
        let today = now.date();
        let samples = [
            (
                "Complete Math Assignment",
                "Chapter 5 exercises 1-20",
                2,
                Priority::High,
                "assignment",
            ),
            (
                "Study for Physics Exam",
                "Review chapters 1-4",
                7,
                Priority::High,
                "exam",
            ),
            (
                "Group Project Meeting",
                "Discuss project progress",
                1,
                Priority::Medium,
                "project",
            ),
        ];
        for (title, description, days_ahead, priority, category) in samples {
            let input = NewTask::new(title, today + Duration::days(days_ahead), priority)
                .with_description(description)
                .with_category(category);
            self.tasks.create(input, now)?;
        }
        self.persist_bundle()
    }

    fn persist_bundle(&self) -> AppResult<()> {
        self.repo.save_tasks_bundle(
            self.tasks.tasks(),
            self.notifications.notifications(),
            &self.resources,
        )?;
        Ok(())
    }

    // Views

    pub fn task_list_view(&self, filter: TaskFilter, sort: TaskSort) -> TaskListView {
        project_task_list(self.tasks.tasks(), filter, sort, self.today())
    }

    pub fn task_search_view(&self, term: &str, filter: TaskFilter, sort: TaskSort) -> TaskListView {
        project_task_search(self.tasks.tasks(), term, filter, sort, self.today())
    }

    pub fn notification_feed_view(&self) -> NotificationFeedView {
        project_notification_feed(&self.notifications, self.now())
    }

    pub fn dashboard_view(&self) -> DashboardView {
        project_dashboard(
            self.tasks.tasks(),
            &self.resources,
            self.notifications.unread_count(),
            self.today(),
        )
    }

    /// Categories present in the catalog, sorted, without `all`.
    pub fn resource_categories(&self) -> Vec<&str> {
        categories(&self.resources)
    }

    /// Resource cards narrowed by category and then by search term.
    pub fn resource_cards(&self, category: &str, term: Option<&str>) -> Vec<ResourceCard> {
        let by_category = filter_by_category(&self.resources, category);
        match term.map(str::trim).filter(|term| !term.is_empty()) {
            Some(term) => {
                let matches = search_resources(&self.resources, term);
                project_resource_cards(
                    by_category
                        .into_iter()
                        .filter(|resource| matches.iter().any(|hit| hit.id == resource.id)),
                )
            }
            None => project_resource_cards(by_category),
        }
    }

    pub fn calendar_view(&self, cursor: CalendarCursor) -> CalendarMonthView {
        project_calendar_month(self.tasks.tasks(), cursor, self.today())
    }

    pub fn today_events(&self) -> Vec<CalendarEvent> {
        events_for_date(self.tasks.tasks(), self.today())
    }
}
