use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{Datelike, NaiveDate};
use planboard_core::{AppError, AppResult, AssignmentId, MonthKey};
use planboard_domain::ResourceAssignment;
use planboard_domain::analytics::{
    self, CalendarDayBucket, ProductGroup, ProjectRollup, SummaryStats, TeamRollup,
};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::{AssignmentStore, BootstrapSource, RemoteAssignmentStore, SnapshotCache};


/// Number of entries in the top-projects ranking.
pub const TOP_PROJECT_LIMIT: usize = 5;

/// Input for creating or fully replacing a monthly assignment.
#[derive(Debug, Clone)]
pub struct CreateAssignmentInput {
    /// Person or label string.
    pub name: String,
    /// Team name.
    pub team: String,
    /// Product grouping key.
    pub product: String,
    /// Project grouping key.
    pub project: String,
    /// Month bucket; `YYYY-MM` or a full date that gets truncated.
    pub month: String,
    /// Booked hours for the month.
    pub hours_per_month: u32,
    /// Billing rate in whole currency units per hour.
    pub hourly_rate: u32,
}

/// Input from the planning form.
#[derive(Debug, Clone)]
pub struct CreatePlanningInput {
    /// Team name.
    pub team: String,
    /// Project grouping key.
    pub project: String,
    /// Planned hours per week.
    pub hours_per_week: u32,
    /// Billing rate in whole currency units per hour.
    pub hourly_rate: u32,
    /// Planning range start.
    pub start_date: NaiveDate,
    /// Planning range end.
    pub end_date: NaiveDate,
}

/// The refreshed set of view-models handed to the renderer after every
/// mutation or month change.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardViewModel {
    /// Month the dashboard is currently focused on.
    pub visible_month: MonthKey,
    /// Headline statistics for the visible month.
    pub summary: SummaryStats,
    /// Product → project drill-down tree for the visible month.
    pub hierarchy: Vec<ProductGroup>,
    /// Top projects by cost for the visible month.
    pub top_projects: Vec<ProjectRollup>,
    /// Team ranking by cost for the visible month.
    pub teams: Vec<TeamRollup>,
    /// One bucket per day of the visible month.
    pub calendar: Vec<CalendarDayBucket>,
}

/// Session-level application state: the record store, the persistence
/// fallback chain, and the visible-month cursor.
///
/// Mutations update the in-memory store first, then write the snapshot to
/// the local cache, then fire a remote sync task whose outcome is only
/// logged. No persistence failure ever reaches the caller.
pub struct DashboardService {
    store: Arc<AssignmentStore>,
    cache: Arc<dyn SnapshotCache>,
    remote: Option<Arc<dyn RemoteAssignmentStore>>,
    bootstrap: Arc<dyn BootstrapSource>,
    remote_enabled: AtomicBool,
    visible_month: RwLock<MonthKey>,
}

impl DashboardService {
    /// Creates a service over the given persistence backends.
    ///
    /// Passing `None` for the remote store models the unconfigured case: the
    /// remote tier is skipped for the whole session without being an error.
    #[must_use]
    pub fn new(
        cache: Arc<dyn SnapshotCache>,
        remote: Option<Arc<dyn RemoteAssignmentStore>>,
        bootstrap: Arc<dyn BootstrapSource>,
        initial_month: MonthKey,
    ) -> Self {
        let remote_enabled = AtomicBool::new(remote.is_some());

        Self {
            store: Arc::new(AssignmentStore::new()),
            cache,
            remote,
            bootstrap,
            remote_enabled,
            visible_month: RwLock::new(initial_month),
        }
    }

    /// Populates the store through the startup fallback chain: remote store,
    /// then snapshot cache, then bootstrap dataset, stopping at the first
    /// tier that yields records.
    pub async fn initialize(&self) {
        let mut records = self.load_remote_tier().await;

        if records.is_empty() {
            records = self.load_cache_tier().await;
        }

        if records.is_empty() {
            records = self.bootstrap.generate();
            info!(count = records.len(), "seeded store from bootstrap dataset");
        }

        self.store.replace_all(records).await;
    }

    /// Creates a monthly assignment.
    pub async fn create_assignment(
        &self,
        input: CreateAssignmentInput,
    ) -> AppResult<ResourceAssignment> {
        let assignment = Self::monthly_from_input(AssignmentId::new(), &input)?;
        Ok(self.commit_upsert(assignment).await)
    }

    /// Fully replaces an existing assignment, keeping its id and position.
    ///
    /// Returns `Ok(None)` without mutating anything when the id is unknown;
    /// validation failures surface before the existence check.
    pub async fn update_assignment(
        &self,
        id: AssignmentId,
        input: CreateAssignmentInput,
    ) -> AppResult<Option<ResourceAssignment>> {
        let replacement = Self::monthly_from_input(id, &input)?;

        if self.store.get(id).await.is_none() {
            return Ok(None);
        }

        Ok(Some(self.commit_upsert(replacement).await))
    }

    /// Deletes an assignment; an unknown id is a no-op.
    pub async fn delete_assignment(&self, id: AssignmentId) {
        if self.store.remove(id).await {
            self.persist_snapshot().await;
            self.spawn_remote_delete(id);
        }
    }

    /// Creates a planned assignment from the planning form.
    pub async fn create_planning(
        &self,
        input: CreatePlanningInput,
    ) -> AppResult<ResourceAssignment> {
        let assignment = ResourceAssignment::planned(
            AssignmentId::new(),
            input.team,
            input.project,
            input.hours_per_week,
            input.hourly_rate,
            input.start_date,
            input.end_date,
        )?;

        Ok(self.commit_upsert(assignment).await)
    }

    /// Moves the dashboard focus to the given month.
    pub async fn set_visible_month(&self, month: MonthKey) {
        *self.visible_month.write().await = month;
    }

    /// Steps the visible month forward or backward and returns the new
    /// cursor.
    pub async fn step_month(&self, forward: bool) -> MonthKey {
        let mut cursor = self.visible_month.write().await;
        *cursor = if forward {
            cursor.next()
        } else {
            cursor.previous()
        };
        *cursor
    }

    /// Returns the month the dashboard is focused on.
    pub async fn visible_month(&self) -> MonthKey {
        *self.visible_month.read().await
    }

    /// Returns whether the remote tier is configured and still active.
    #[must_use]
    pub fn remote_enabled(&self) -> bool {
        self.remote.is_some() && self.remote_enabled.load(Ordering::Relaxed)
    }

    /// Returns a snapshot of every stored assignment.
    pub async fn assignments(&self) -> Vec<ResourceAssignment> {
        self.store.all().await
    }

    /// Recomputes the full set of renderer view-models.
    pub async fn view_model(&self) -> DashboardViewModel {
        let assignments = self.store.all().await;
        let month = self.visible_month().await;
        let filtered = analytics::filter_by_month(&assignments, month);

        DashboardViewModel {
            visible_month: month,
            summary: analytics::summary_stats(&filtered),
            hierarchy: analytics::group_hierarchy(&filtered),
            top_projects: analytics::rank_projects(&filtered, TOP_PROJECT_LIMIT),
            teams: analytics::group_by_team(&filtered),
            calendar: Self::calendar_for_month(&assignments, month),
        }
    }

    fn monthly_from_input(
        id: AssignmentId,
        input: &CreateAssignmentInput,
    ) -> AppResult<ResourceAssignment> {
        if input.month.trim().is_empty() {
            return Err(AppError::Validation("month is required".to_owned()));
        }

        ResourceAssignment::monthly(
            id,
            input.name.clone(),
            input.team.clone(),
            input.product.clone(),
            input.project.clone(),
            MonthKey::normalize(&input.month),
            input.hours_per_month,
            input.hourly_rate,
        )
    }

    async fn load_remote_tier(&self) -> Vec<ResourceAssignment> {
        let Some(remote) = self.remote.as_ref() else {
            info!("remote persistence disabled (no configuration)");
            return Vec::new();
        };

        match remote.list_all().await {
            Ok(records) => {
                if !records.is_empty() {
                    info!(count = records.len(), "loaded assignments from remote store");
                }
                records
            }
            Err(error) => {
                warn!(
                    error = %error,
                    "remote load failed; disabling remote tier for this session"
                );
                self.remote_enabled.store(false, Ordering::Relaxed);
                Vec::new()
            }
        }
    }

    async fn load_cache_tier(&self) -> Vec<ResourceAssignment> {
        match self.cache.load().await {
            Ok(records) => records,
            Err(error) => {
                warn!(error = %error, "snapshot cache unreadable; treating as empty");
                Vec::new()
            }
        }
    }

    async fn commit_upsert(&self, assignment: ResourceAssignment) -> ResourceAssignment {
        let stored = self.store.upsert(assignment).await;
        self.persist_snapshot().await;
        self.spawn_remote_upsert(stored.clone());
        stored
    }

    async fn persist_snapshot(&self) {
        let snapshot = self.store.all().await;
        if let Err(error) = self.cache.store(&snapshot).await {
            warn!(error = %error, "snapshot cache write failed; keeping in-memory state");
        }
    }

    fn spawn_remote_upsert(&self, assignment: ResourceAssignment) {
        let Some(remote) = self.active_remote() else {
            return;
        };

        tokio::spawn(async move {
            if let Err(error) = remote.upsert(&assignment).await {
                warn!(error = %error, id = %assignment.id(), "remote upsert failed");
            }
        });
    }

    fn spawn_remote_delete(&self, id: AssignmentId) {
        let Some(remote) = self.active_remote() else {
            return;
        };

        tokio::spawn(async move {
            if let Err(error) = remote.delete(id).await {
                warn!(error = %error, id = %id, "remote delete failed");
            }
        });
    }

    fn active_remote(&self) -> Option<Arc<dyn RemoteAssignmentStore>> {
        if !self.remote_enabled.load(Ordering::Relaxed) {
            return None;
        }

        self.remote.clone()
    }

    fn calendar_for_month(
        assignments: &[ResourceAssignment],
        month: MonthKey,
    ) -> Vec<CalendarDayBucket> {
        let Some(first) = NaiveDate::from_ymd_opt(month.year(), month.month(), 1) else {
            return Vec::new();
        };

        let mut buckets = Vec::new();
        let mut day = first;
        while day.year() == month.year() && day.month() == month.month() {
            buckets.push(analytics::calendar_bucket(assignments, day));
            day = match day.succ_opt() {
                Some(next) => next,
                None => break,
            };
        }

        buckets
    }
}
