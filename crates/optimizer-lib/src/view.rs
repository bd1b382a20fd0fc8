//! Renderable projection of the session state
//!
//! Pure composition of fetched data, utilization bands and acknowledgment
//! state. Nothing here mutates the snapshot it reads from.

use serde::Serialize;

use crate::ack::AckTracker;
use crate::classify::{Metric, UtilizationBadge};
use crate::fetch::Snapshot;
use crate::identity::{identity_of, RecommendationId};
use crate::models::{Recommendation, Resource, Summary};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceView {
    pub resource: Resource,
    pub cpu: Option<UtilizationBadge>,
    pub memory: Option<UtilizationBadge>,
}

impl ResourceView {
    pub fn project(resource: &Resource) -> Self {
        Self {
            cpu: UtilizationBadge::new(Metric::Cpu, resource.cpu_utilization),
            memory: UtilizationBadge::new(Metric::Memory, resource.memory_utilization),
            resource: resource.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationView {
    pub id: RecommendationId,
    pub implemented: bool,
    pub recommendation: Recommendation,
}

impl RecommendationView {
    pub fn project(recommendation: &Recommendation, acks: &AckTracker) -> Self {
        let id = identity_of(recommendation);
        Self {
            implemented: acks.is_implemented(&id),
            id,
            recommendation: recommendation.clone(),
        }
    }
}

/// Recommendations section. An empty list is a state of its own, distinct
/// from loading and from failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "items", rename_all = "snake_case")]
pub enum RecommendationsView {
    FullyOptimized,
    Items(Vec<RecommendationView>),
}

impl RecommendationsView {
    pub fn is_fully_optimized(&self) -> bool {
        matches!(self, RecommendationsView::FullyOptimized)
    }

    pub fn items(&self) -> &[RecommendationView] {
        match self {
            RecommendationsView::FullyOptimized => &[],
            RecommendationsView::Items(items) => items,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DashboardView {
    Loading,
    Failed {
        reason: String,
    },
    Ready {
        summary: Summary,
        resources: Vec<ResourceView>,
        recommendations: RecommendationsView,
    },
}

impl DashboardView {
    /// Project a successfully loaded snapshot
    pub fn ready(snapshot: &Snapshot, acks: &AckTracker) -> Self {
        let resources = snapshot.resources.iter().map(ResourceView::project).collect();

        let recommendations = if snapshot.recommendations.is_empty() {
            RecommendationsView::FullyOptimized
        } else {
            RecommendationsView::Items(
                snapshot
                    .recommendations
                    .iter()
                    .map(|rec| RecommendationView::project(rec, acks))
                    .collect(),
            )
        };

        DashboardView::Ready {
            summary: snapshot.summary.clone(),
            resources,
            recommendations,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, DashboardView::Loading)
    }
}
