//! Core library for the cloud optimization dashboard
//!
//! This crate provides:
//! - Typed models for resources, recommendations and the cost summary
//! - Utilization classification into Low/Medium/High bands
//! - Stable recommendation identities
//! - An all-or-nothing three-way load against the optimization API
//! - Session state with stale-load guarding and implemented-recommendation tracking
//! - A renderable projection of that state

pub mod ack;
pub mod classify;
pub mod fetch;
pub mod identity;
pub mod models;
pub mod observability;
pub mod session;
pub mod source;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use ack::{AckTracker, ImplementationNotice};
pub use classify::{classify, Band, Metric, Severity, UtilizationBadge};
pub use fetch::{load_all, Generation, LoadOutcome, Snapshot};
pub use identity::{identity_of, RecommendationId};
pub use models::*;
pub use observability::{DashboardMetrics, StructuredLogger};
pub use session::{ApplyResult, Dashboard, LoadState, Session};
pub use source::{ClientConfig, DataSource, FetchError, HealthStatus, HttpDataSource};
pub use view::{DashboardView, RecommendationView, RecommendationsView, ResourceView};
