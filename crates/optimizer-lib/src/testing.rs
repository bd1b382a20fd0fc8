//! In-memory data source and fixtures for unit tests

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use reqwest::StatusCode;
use tokio::sync::oneshot;

use crate::fetch::Snapshot;
use crate::models::{Confidence, Provider, Recommendation, Resource, ResourceKind, Summary};
use crate::source::{DataSource, FetchError, HealthStatus};

pub(crate) fn sample_resource(id: i64, cpu: Option<f64>, memory: Option<f64>) -> Resource {
    let kind = if cpu.is_some() || memory.is_some() {
        ResourceKind::Compute
    } else {
        ResourceKind::Storage
    };
    Resource {
        id,
        name: format!("resource-{}", id),
        resource_type: kind,
        provider: Provider::Aws,
        instance_type: "t3.large".to_string(),
        cpu_utilization: cpu,
        memory_utilization: memory,
        storage_gb: None,
        monthly_cost: 100.0,
        created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
    }
}

pub(crate) fn sample_recommendation(resource_id: i64, kind: &str, savings: f64) -> Recommendation {
    Recommendation {
        resource_id,
        resource_name: format!("resource-{}", resource_id),
        recommendation_type: kind.to_string(),
        current_config: "t3.large".to_string(),
        recommended_config: "t3.medium".to_string(),
        reasoning: "Low utilization detected".to_string(),
        monthly_savings: savings,
        confidence: Confidence::High,
    }
}

/// Snapshot whose summary agrees with its contents
pub(crate) fn snapshot_of(resources: Vec<Resource>, recommendations: Vec<Recommendation>) -> Snapshot {
    let summary = Summary {
        total_resources: resources.len() as u64,
        total_monthly_cost: resources.iter().map(|r| r.monthly_cost).sum(),
        total_potential_savings: recommendations.iter().map(|r| r.monthly_savings).sum(),
        optimization_opportunities: recommendations.len() as u64,
    };
    Snapshot {
        resources,
        recommendations,
        summary,
    }
}

struct Step<T> {
    result: Result<T, String>,
    gate: Option<oneshot::Receiver<()>>,
}

impl<T> Step<T> {
    fn ok(value: T) -> Self {
        Self {
            result: Ok(value),
            gate: None,
        }
    }

    fn err(endpoint: &str) -> Self {
        Self {
            result: Err(endpoint.to_string()),
            gate: None,
        }
    }

    async fn run(self) -> Result<T, FetchError> {
        if let Some(gate) = self.gate {
            // A dropped sender releases the gate as well
            let _ = gate.await;
        }
        self.result.map_err(|endpoint| FetchError::Status {
            endpoint,
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "scripted failure".to_string(),
        })
    }
}

/// Data source answering from per-endpoint queues. Every load pops one step
/// from each queue, so each `push_*` call scripts exactly one load.
pub(crate) struct ScriptedSource {
    resources: Mutex<VecDeque<Step<Vec<Resource>>>>,
    recommendations: Mutex<VecDeque<Step<Vec<Recommendation>>>>,
    summary: Mutex<VecDeque<Step<Summary>>>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    pub(crate) fn new() -> Self {
        Self {
            resources: Mutex::new(VecDeque::new()),
            recommendations: Mutex::new(VecDeque::new()),
            summary: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of retrievals started so far
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn push_ok(&self, resources: Vec<Resource>, recommendations: Vec<Recommendation>) {
        self.push_snapshot(snapshot_of(resources, recommendations));
    }

    pub(crate) fn push_snapshot(&self, snapshot: Snapshot) {
        self.push_steps(
            Step::ok(snapshot.resources),
            Step::ok(snapshot.recommendations),
            Step::ok(snapshot.summary),
        );
    }

    /// Script a load whose `endpoint` retrieval fails.
    ///
    /// The join polls resources, recommendations, summary in that order and
    /// stops at the first error, so only the steps up to the failing one are
    /// queued. Later loads stay aligned.
    pub(crate) fn push_failure(&self, endpoint: &str) {
        match endpoint {
            "resources" => {
                self.resources.lock().unwrap().push_back(Step::err(endpoint));
            }
            "recommendations" => {
                self.resources.lock().unwrap().push_back(Step::ok(Vec::new()));
                self.recommendations
                    .lock()
                    .unwrap()
                    .push_back(Step::err(endpoint));
            }
            _ => self.push_steps(Step::ok(Vec::new()), Step::ok(Vec::new()), Step::err(endpoint)),
        }
    }

    /// Script a load whose summary retrieval blocks until the returned
    /// sender fires
    pub(crate) fn push_gated(&self, snapshot: Snapshot) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.push_steps(
            Step::ok(snapshot.resources),
            Step::ok(snapshot.recommendations),
            Step {
                result: Ok(snapshot.summary),
                gate: Some(rx),
            },
        );
        tx
    }

    fn push_steps(
        &self,
        resources: Step<Vec<Resource>>,
        recommendations: Step<Vec<Recommendation>>,
        summary: Step<Summary>,
    ) {
        self.resources.lock().unwrap().push_back(resources);
        self.recommendations.lock().unwrap().push_back(recommendations);
        self.summary.lock().unwrap().push_back(summary);
    }

    fn next<T>(&self, queue: &Mutex<VecDeque<Step<T>>>, endpoint: &str) -> Step<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Step::err(endpoint))
    }
}

#[async_trait]
impl DataSource for ScriptedSource {
    async fn fetch_resources(&self) -> Result<Vec<Resource>, FetchError> {
        self.next(&self.resources, "resources").run().await
    }

    async fn fetch_recommendations(&self) -> Result<Vec<Recommendation>, FetchError> {
        self.next(&self.recommendations, "recommendations").run().await
    }

    async fn fetch_summary(&self) -> Result<Summary, FetchError> {
        self.next(&self.summary, "summary").run().await
    }

    async fn health(&self) -> Result<HealthStatus, FetchError> {
        Ok(HealthStatus {
            status: "healthy".to_string(),
            message: None,
        })
    }

    fn describe(&self) -> String {
        "scripted".to_string()
    }
}
