//! Stable recommendation identity
//!
//! A recommendation is identified by its subject resource and its type only.
//! Savings, reasoning and confidence are regenerated by the API on every
//! fetch and do not take part.

use serde::{Deserialize, Serialize};

use crate::models::Recommendation;

/// Separator between resource id and type. Resource ids are integers, so
/// the first occurrence always marks the boundary.
pub const SEPARATOR: &str = "::";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecommendationId(String);

impl RecommendationId {
    pub fn new(resource_id: i64, recommendation_type: &str) -> Self {
        Self(format!("{}{}{}", resource_id, SEPARATOR, recommendation_type))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

}

impl std::fmt::Display for RecommendationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for RecommendationId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, kind) = s
            .split_once(SEPARATOR)
            .ok_or_else(|| format!("expected <resource_id>{}<type>, got '{}'", SEPARATOR, s))?;
        let id: i64 = id
            .trim()
            .parse()
            .map_err(|_| format!("invalid resource id in '{}'", s))?;
        Ok(Self::new(id, kind))
    }
}

/// Identity of a recommendation
pub fn identity_of(rec: &Recommendation) -> RecommendationId {
    RecommendationId::new(rec.resource_id, &rec.recommendation_type)
}
