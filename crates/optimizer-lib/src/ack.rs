//! Session-local tracking of recommendations marked as implemented
//!
//! Membership only grows. Nothing here is sent back to the API, and the set
//! is gone when the session ends.

use std::collections::HashSet;

use serde::Serialize;

use crate::identity::RecommendationId;

/// Confirmation raised when a recommendation is first marked implemented.
/// The savings figure is the one shown at mark time and is never updated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImplementationNotice {
    pub id: RecommendationId,
    pub resource_name: String,
    pub monthly_savings: f64,
}

impl std::fmt::Display for ImplementationNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Recommendation implemented for {}! Potential savings: ${}/month",
            self.resource_name, self.monthly_savings
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct AckTracker {
    implemented: HashSet<RecommendationId>,
}

impl AckTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `id` as implemented. Returns a notice only the first time.
    pub fn mark_implemented(
        &mut self,
        id: RecommendationId,
        resource_name: &str,
        monthly_savings: f64,
    ) -> Option<ImplementationNotice> {
        if self.implemented.contains(&id) {
            return None;
        }
        self.implemented.insert(id.clone());
        Some(ImplementationNotice {
            id,
            resource_name: resource_name.to_string(),
            monthly_savings,
        })
    }

    pub fn is_implemented(&self, id: &RecommendationId) -> bool {
        self.implemented.contains(id)
    }

    pub fn len(&self) -> usize {
        self.implemented.len()
    }

    pub fn is_empty(&self) -> bool {
        self.implemented.is_empty()
    }
}
