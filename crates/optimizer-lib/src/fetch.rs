//! Three-way dashboard load
//!
//! Resources, recommendations and summary are requested concurrently and
//! joined. Either all three arrive and form one [`Snapshot`], or the attempt
//! as a whole fails. Which retrieval failed is logged but not reported.

use std::time::Instant;

use serde::Serialize;

use crate::models::{Recommendation, Resource, Summary};
use crate::observability::StructuredLogger;
use crate::source::DataSource;

/// Attempt counter used to discard superseded loads
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Generation(pub u64);

impl Generation {
    pub fn next(self) -> Self {
        Generation(self.0 + 1)
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Everything one successful load returned
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snapshot {
    pub resources: Vec<Resource>,
    pub recommendations: Vec<Recommendation>,
    pub summary: Summary,
}

/// Result of one load attempt
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Ready(Snapshot),
    Failed { reason: String },
}

impl LoadOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, LoadOutcome::Ready(_))
    }
}

/// User-facing reason for a failed load. Deliberately generic.
pub fn failure_reason(source: &str) -> String {
    format!(
        "Failed to fetch data. Make sure the optimization API is running at {}.",
        source
    )
}

/// Load resources, recommendations and summary as one unit of work
pub async fn load_all(source: &dyn DataSource, logger: &StructuredLogger) -> LoadOutcome {
    let started = Instant::now();
    let joined = tokio::try_join!(
        source.fetch_resources(),
        source.fetch_recommendations(),
        source.fetch_summary(),
    );
    let elapsed = started.elapsed();

    match joined {
        Ok((resources, recommendations, summary)) => {
            logger.log_fetch_completed(resources.len(), recommendations.len(), elapsed);
            LoadOutcome::Ready(Snapshot {
                resources,
                recommendations,
                summary,
            })
        }
        Err(err) => {
            logger.log_fetch_failed(&err, elapsed);
            LoadOutcome::Failed {
                reason: failure_reason(&source.describe()),
            }
        }
    }
}
