//! Mock API fixtures for command tests

use std::sync::Arc;
use std::time::Duration;

use optimizer_lib::{ClientConfig, Dashboard, HttpDataSource};

pub const RECOMMENDATIONS: &str = r#"[
    {
        "resource_id": 1,
        "resource_name": "web-server-1",
        "type": "rightsizing",
        "current_config": "t3.xlarge - 20% CPU, 85% Memory",
        "recommended_config": "Smaller instance type (50% less resources)",
        "reasoning": "Low CPU utilization detected",
        "monthly_savings": 40.0,
        "confidence": "High"
    }
]"#;

const RESOURCES: &str = r#"[
    {
        "id": 1,
        "name": "web-server-1",
        "resource_type": "compute",
        "provider": "AWS",
        "instance_type": "t3.xlarge",
        "cpu_utilization": 20.0,
        "memory_utilization": 85.0,
        "storage_gb": 100.0,
        "monthly_cost": 100.0,
        "created_at": "2024-05-01T12:30:00"
    }
]"#;

const SUMMARY: &str = r#"{
    "total_resources": 1,
    "total_monthly_cost": 100.0,
    "total_potential_savings": 40.0,
    "optimization_opportunities": 1
}"#;

async fn mock_json(server: &mut mockito::ServerGuard, path: &str, body: &str) -> mockito::Mock {
    server
        .mock("GET", path)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

/// Mock API serving one resource, `recommendations` and a matching summary.
/// The mocks must be kept alive for as long as the server is used.
pub async fn mock_api(recommendations: &str) -> (mockito::ServerGuard, Vec<mockito::Mock>) {
    let mut server = mockito::Server::new_async().await;
    let mocks = vec![
        mock_json(&mut server, "/resources", RESOURCES).await,
        mock_json(&mut server, "/recommendations", recommendations).await,
        mock_json(&mut server, "/summary", SUMMARY).await,
    ];
    (server, mocks)
}

/// Dashboard over `server` with one load already applied
pub async fn loaded_dashboard(server: &mockito::ServerGuard) -> Dashboard {
    let source = HttpDataSource::new(&ClientConfig {
        base_url: server.url(),
        request_timeout: Some(Duration::from_secs(5)),
    })
    .unwrap();
    let dashboard = Dashboard::new(Arc::new(source));
    dashboard.refresh().await;
    dashboard
}
