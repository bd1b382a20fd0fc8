//! Session state and the shared dashboard handle
//!
//! [`Session`] is the single owner of everything mutable: load state, the
//! last applied snapshot, the generation counter and the acknowledgment set.
//! [`Dashboard`] shares one session between the action handlers and runs
//! loads without holding the lock across a retrieval.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::RwLock;

use crate::ack::{AckTracker, ImplementationNotice};
use crate::fetch::{load_all, Generation, LoadOutcome, Snapshot};
use crate::identity::{identity_of, RecommendationId};
use crate::observability::{DashboardMetrics, StructuredLogger};
use crate::source::DataSource;
use crate::view::DashboardView;

/// Load state machine: `Idle -> Loading -> {Ready, Failed}`, and
/// `Failed -> Loading` on retry.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed { reason: String },
}

#[derive(Debug, Default)]
pub struct Session {
    state: LoadState,
    snapshot: Option<Snapshot>,
    latest: Generation,
    acks: AckTracker,
}

/// What happened to a load outcome handed to [`Session::apply`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyResult {
    Applied,
    /// A newer load was dispatched; the outcome was dropped
    Superseded,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Last successfully applied snapshot, kept across later failures
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    pub fn latest_generation(&self) -> Generation {
        self.latest
    }

    /// Start a new load attempt. Any attempt still in flight is superseded.
    pub fn begin_load(&mut self) -> Generation {
        self.latest = self.latest.next();
        self.state = LoadState::Loading;
        self.latest
    }

    /// Apply the outcome of attempt `generation`, unless a newer attempt has
    /// been dispatched since. A failure never touches the snapshot.
    pub fn apply(&mut self, generation: Generation, outcome: LoadOutcome) -> ApplyResult {
        if generation != self.latest {
            return ApplyResult::Superseded;
        }
        match outcome {
            LoadOutcome::Ready(snapshot) => {
                self.snapshot = Some(snapshot);
                self.state = LoadState::Ready;
            }
            LoadOutcome::Failed { reason } => {
                self.state = LoadState::Failed { reason };
            }
        }
        ApplyResult::Applied
    }

    /// Mark a recommendation from the current snapshot as implemented.
    ///
    /// Name and savings for the notice are taken from the snapshot; with
    /// duplicate identities the last one wins. Returns `None` when the
    /// identity was already marked, is not in the snapshot, or the session
    /// is not `Ready` (a retained snapshot is not on screen).
    pub fn mark_implemented(&mut self, id: &RecommendationId) -> Option<ImplementationNotice> {
        if self.state != LoadState::Ready {
            return None;
        }
        let rec = self
            .snapshot
            .as_ref()?
            .recommendations
            .iter()
            .rev()
            .find(|rec| identity_of(rec) == *id)?;
        self.acks
            .mark_implemented(id.clone(), &rec.resource_name, rec.monthly_savings)
    }

    pub fn is_implemented(&self, id: &RecommendationId) -> bool {
        self.acks.is_implemented(id)
    }

    pub fn acknowledgments(&self) -> &AckTracker {
        &self.acks
    }

    /// Project the current state for rendering
    pub fn view(&self) -> DashboardView {
        match (&self.state, &self.snapshot) {
            (LoadState::Failed { reason }, _) => DashboardView::Failed {
                reason: reason.clone(),
            },
            (LoadState::Ready, Some(snapshot)) => DashboardView::ready(snapshot, &self.acks),
            _ => DashboardView::Loading,
        }
    }
}

/// Shared handle over one session and its data source
#[derive(Clone)]
pub struct Dashboard {
    session: Arc<RwLock<Session>>,
    source: Arc<dyn DataSource>,
    metrics: DashboardMetrics,
    logger: StructuredLogger,
}

impl Dashboard {
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        let logger = StructuredLogger::new(source.describe());
        Self {
            session: Arc::new(RwLock::new(Session::new())),
            source,
            metrics: DashboardMetrics::new(),
            logger,
        }
    }

    pub fn metrics(&self) -> &DashboardMetrics {
        &self.metrics
    }

    pub fn source(&self) -> &Arc<dyn DataSource> {
        &self.source
    }

    /// Run one full load and apply it if no newer load was started meanwhile
    pub async fn refresh(&self) -> ApplyResult {
        let generation = self.session.write().await.begin_load();
        self.logger.log_load_started(generation);
        self.metrics.inc_loads_started();

        let started = Instant::now();
        let outcome = load_all(self.source.as_ref(), &self.logger).await;
        self.metrics.observe_load(started.elapsed(), outcome.is_ready());

        let mut session = self.session.write().await;
        let result = session.apply(generation, outcome);
        match result {
            ApplyResult::Applied => {
                if let Some(snapshot) = session.snapshot() {
                    self.metrics
                        .set_visible_recommendations(snapshot.recommendations.len());
                }
            }
            ApplyResult::Superseded => {
                self.logger
                    .log_stale_discarded(generation, session.latest_generation());
                self.metrics.inc_stale_discarded();
            }
        }
        result
    }

    /// Re-run all three retrievals from scratch
    pub async fn retry(&self) -> ApplyResult {
        self.refresh().await
    }

    pub async fn mark_implemented(&self, id: &RecommendationId) -> Option<ImplementationNotice> {
        let notice = self.session.write().await.mark_implemented(id);
        match &notice {
            Some(n) => {
                self.logger
                    .log_implemented(&n.id, &n.resource_name, n.monthly_savings);
                self.metrics.record_implemented(n.monthly_savings);
            }
            None => {
                if !self.is_implemented(id).await {
                    self.logger.log_unknown_recommendation(id);
                }
            }
        }
        notice
    }

    pub async fn is_implemented(&self, id: &RecommendationId) -> bool {
        self.session.read().await.is_implemented(id)
    }

    pub async fn state(&self) -> LoadState {
        self.session.read().await.state().clone()
    }

    pub async fn snapshot(&self) -> Option<Snapshot> {
        self.session.read().await.snapshot().cloned()
    }

    pub async fn view(&self) -> DashboardView {
        self.session.read().await.view()
    }
}
