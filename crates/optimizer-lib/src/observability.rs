//! Observability for the dashboard core
//!
//! Provides:
//! - Prometheus metrics (load latency, load failures, stale responses, acknowledgments)
//! - Structured logging with tracing

use prometheus::{
    register_counter, register_histogram, register_int_counter, register_int_gauge, Counter,
    Histogram, IntCounter, IntGauge,
};
use std::sync::OnceLock;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::fetch::Generation;
use crate::identity::RecommendationId;
use crate::source::FetchError;

/// Histogram buckets for a full three-way load (in seconds)
const LOAD_LATENCY_BUCKETS: &[f64] = &[0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0];

/// Global metrics instance (registered once)
static GLOBAL_METRICS: OnceLock<DashboardMetricsInner> = OnceLock::new();

struct DashboardMetricsInner {
    load_latency_seconds: Histogram,
    loads_started: IntCounter,
    loads_failed: IntCounter,
    stale_loads_discarded: IntCounter,
    recommendations_implemented: IntCounter,
    savings_acknowledged: Counter,
    visible_recommendations: IntGauge,
}

impl DashboardMetricsInner {
    fn new() -> Self {
        Self {
            load_latency_seconds: register_histogram!(
                "cod_load_latency_seconds",
                "Time spent loading resources, recommendations and summary",
                LOAD_LATENCY_BUCKETS.to_vec()
            )
            .expect("Failed to register load_latency_seconds"),

            loads_started: register_int_counter!(
                "cod_loads_started_total",
                "Number of dashboard loads dispatched"
            )
            .expect("Failed to register loads_started"),

            loads_failed: register_int_counter!(
                "cod_loads_failed_total",
                "Number of dashboard loads that failed"
            )
            .expect("Failed to register loads_failed"),

            stale_loads_discarded: register_int_counter!(
                "cod_stale_loads_discarded_total",
                "Load results discarded because a newer load was dispatched"
            )
            .expect("Failed to register stale_loads_discarded"),

            recommendations_implemented: register_int_counter!(
                "cod_recommendations_implemented_total",
                "Recommendations marked as implemented in this session"
            )
            .expect("Failed to register recommendations_implemented"),

            savings_acknowledged: register_counter!(
                "cod_savings_acknowledged_dollars_total",
                "Monthly savings announced when recommendations were marked implemented"
            )
            .expect("Failed to register savings_acknowledged"),

            visible_recommendations: register_int_gauge!(
                "cod_visible_recommendations",
                "Recommendations in the currently applied snapshot"
            )
            .expect("Failed to register visible_recommendations"),
        }
    }
}

/// Dashboard metrics for Prometheus exposition
///
/// Lightweight handle to the global metrics instance.
/// Multiple clones share the same underlying metrics.
#[derive(Clone)]
pub struct DashboardMetrics {
    _private: (),
}

impl Default for DashboardMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardMetrics {
    pub fn new() -> Self {
        GLOBAL_METRICS.get_or_init(DashboardMetricsInner::new);
        Self { _private: () }
    }

    fn inner(&self) -> &DashboardMetricsInner {
        GLOBAL_METRICS.get_or_init(DashboardMetricsInner::new)
    }

    pub fn inc_loads_started(&self) {
        self.inner().loads_started.inc();
    }

    pub fn observe_load(&self, latency: Duration, succeeded: bool) {
        self.inner().load_latency_seconds.observe(latency.as_secs_f64());
        if !succeeded {
            self.inner().loads_failed.inc();
        }
    }

    pub fn inc_stale_discarded(&self) {
        self.inner().stale_loads_discarded.inc();
    }

    pub fn record_implemented(&self, monthly_savings: f64) {
        self.inner().recommendations_implemented.inc();
        if monthly_savings.is_finite() && monthly_savings > 0.0 {
            self.inner().savings_acknowledged.inc_by(monthly_savings);
        }
    }

    pub fn set_visible_recommendations(&self, count: usize) {
        self.inner().visible_recommendations.set(count as i64);
    }

    /// Render all registered metrics in the Prometheus text format
    pub fn encode_text(&self) -> String {
        use prometheus::{Encoder, TextEncoder};

        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        if let Err(e) = encoder.encode(&prometheus::gather(), &mut buffer) {
            warn!(error = %e, "Failed to encode metrics");
        }
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

/// Structured logger for dashboard events
#[derive(Clone)]
pub struct StructuredLogger {
    session: String,
}

impl StructuredLogger {
    pub fn new(session: impl Into<String>) -> Self {
        Self {
            session: session.into(),
        }
    }

    pub fn log_load_started(&self, generation: Generation) {
        debug!(
            event = "load_started",
            session = %self.session,
            generation = generation.0,
            "Loading dashboard data"
        );
    }

    pub fn log_fetch_completed(&self, resources: usize, recommendations: usize, elapsed: Duration) {
        info!(
            event = "load_completed",
            session = %self.session,
            resources = resources,
            recommendations = recommendations,
            elapsed_ms = elapsed.as_millis() as u64,
            "Loaded dashboard data"
        );
    }

    pub fn log_fetch_failed(&self, error: &FetchError, elapsed: Duration) {
        warn!(
            event = "load_failed",
            session = %self.session,
            error = %error,
            elapsed_ms = elapsed.as_millis() as u64,
            "Dashboard load failed"
        );
    }

    pub fn log_stale_discarded(&self, generation: Generation, latest: Generation) {
        debug!(
            event = "stale_discarded",
            session = %self.session,
            generation = generation.0,
            latest = latest.0,
            "Discarding superseded load result"
        );
    }

    pub fn log_implemented(&self, id: &RecommendationId, resource_name: &str, monthly_savings: f64) {
        info!(
            event = "recommendation_implemented",
            session = %self.session,
            recommendation = %id,
            resource_name = %resource_name,
            monthly_savings = monthly_savings,
            "Recommendation marked as implemented"
        );
    }

    pub fn log_unknown_recommendation(&self, id: &RecommendationId) {
        warn!(
            event = "unknown_recommendation",
            session = %self.session,
            recommendation = %id,
            "Recommendation not in the current snapshot, ignoring"
        );
    }
}
