//! Integration tests for the HTTP data source and full dashboard loads

use std::sync::Arc;
use std::time::Duration;

use optimizer_lib::{
    ApplyResult, Band, ClientConfig, Dashboard, DashboardView, DataSource, FetchError,
    HttpDataSource, LoadState, Provider, RecommendationId,
};

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
        "created_at": "2024-05-01T12:30:00.123456"
    },
    {
        "id": 2,
        "name": "log-storage",
        "resource_type": "storage",
        "provider": "GCP",
        "instance_type": "Cloud Storage",
        "cpu_utilization": null,
        "memory_utilization": null,
        "storage_gb": 500.0,
        "monthly_cost": 75.0,
        "created_at": "2024-05-01T12:30:00"
    }
]"#;

const RECOMMENDATIONS: &str = r#"[
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

const SUMMARY: &str = r#"{
    "total_resources": 2,
    "total_monthly_cost": 175.0,
    "total_potential_savings": 40.0,
    "optimization_opportunities": 1
}"#;

async fn mock_json(
    server: &mut mockito::Server,
    path: &str,
    status: usize,
    body: &str,
) -> mockito::Mock {
    server
        .mock("GET", path)
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

fn source_for(server: &mockito::Server) -> HttpDataSource {
    HttpDataSource::new(&ClientConfig {
        base_url: server.url(),
        request_timeout: Some(Duration::from_secs(5)),
    })
    .unwrap()
}

#[tokio::test]
async fn test_fetch_resources_decodes_payload() {
    let mut server = mockito::Server::new_async().await;
    let mock = mock_json(&mut server, "/resources", 200, RESOURCES).await;

    let resources = source_for(&server).fetch_resources().await.unwrap();

    mock.assert_async().await;
    assert_eq!(resources.len(), 2);
    assert_eq!(resources[0].provider, Provider::Aws);
    assert_eq!(resources[1].cpu_utilization, None);
}

#[tokio::test]
async fn test_non_success_status_is_status_error() {
    let mut server = mockito::Server::new_async().await;
    let _summary = mock_json(&mut server, "/summary", 500, r#"{"detail": "db down"}"#).await;

    let err = source_for(&server).fetch_summary().await.unwrap_err();
    match err {
        FetchError::Status { status, body, .. } => {
            assert_eq!(status.as_u16(), 500);
            assert!(body.contains("db down"));
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_payload_is_decode_error() {
    let mut server = mockito::Server::new_async().await;
    let _recommendations = mock_json(&mut server, "/recommendations", 200, r#"{"not": "a list"}"#).await;

    let err = source_for(&server).fetch_recommendations().await.unwrap_err();
    assert!(matches!(err, FetchError::Decode { .. }));
}

#[tokio::test]
async fn test_health_probe() {
    let mut server = mockito::Server::new_async().await;
    let _health = mock_json(
        &mut server,
        "/health",
        200,
        r#"{"status": "healthy", "message": "API is running properly"}"#,
    )
    .await;

    let health = source_for(&server).health().await.unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.message.as_deref(), Some("API is running properly"));
}

#[tokio::test]
async fn test_dashboard_end_to_end() {
    let mut server = mockito::Server::new_async().await;
    let _resources = mock_json(&mut server, "/resources", 200, RESOURCES).await;
    let _recommendations = mock_json(&mut server, "/recommendations", 200, RECOMMENDATIONS).await;
    let _summary = mock_json(&mut server, "/summary", 200, SUMMARY).await;

    let dashboard = Dashboard::new(Arc::new(source_for(&server)));
    assert_eq!(dashboard.refresh().await, ApplyResult::Applied);
    assert_eq!(dashboard.state().await, LoadState::Ready);

    let DashboardView::Ready {
        summary,
        resources,
        recommendations,
    } = dashboard.view().await
    else {
        panic!("expected ready view");
    };

    assert_eq!(summary.total_monthly_cost, 175.0);
    assert_eq!(resources[0].cpu.unwrap().band, Band::Low);
    assert_eq!(resources[0].memory.unwrap().band, Band::High);
    assert!(resources[1].cpu.is_none());

    let id = RecommendationId::new(1, "rightsizing");
    assert_eq!(recommendations.items()[0].id, id);
    assert!(!dashboard.is_implemented(&id).await);

    let notice = dashboard.mark_implemented(&id).await.unwrap();
    assert_eq!(notice.resource_name, "web-server-1");
    assert_eq!(notice.monthly_savings, 40.0);
    assert!(dashboard.mark_implemented(&id).await.is_none());
    assert!(dashboard.is_implemented(&id).await);
}

#[tokio::test]
async fn test_dashboard_partial_failure_reports_generic_reason() {
    let mut server = mockito::Server::new_async().await;
    let _resources = mock_json(&mut server, "/resources", 200, RESOURCES).await;
    let _recommendations = mock_json(&mut server, "/recommendations", 503, "unavailable").await;
    let _summary = mock_json(&mut server, "/summary", 200, SUMMARY).await;

    let dashboard = Dashboard::new(Arc::new(source_for(&server)));
    dashboard.refresh().await;

    match dashboard.view().await {
        DashboardView::Failed { reason } => {
            assert!(reason.starts_with("Failed to fetch data."));
            assert!(!reason.contains("recommendations"));
        }
        other => panic!("expected failed view, got {:?}", other),
    }
    assert!(dashboard.snapshot().await.is_none());
}

#[tokio::test]
async fn test_summary_with_wrong_shape_fails_whole_load() {
    let mut server = mockito::Server::new_async().await;
    let _resources = mock_json(&mut server, "/resources", 200, "[]").await;
    let _recommendations = mock_json(&mut server, "/recommendations", 200, "[]").await;
    let _summary = mock_json(
        &mut server,
        "/summary",
        200,
        r#"{"detail": "database unavailable"}"#,
    )
    .await;

    let source = source_for(&server);
    assert!(matches!(
        source.fetch_summary().await,
        Err(FetchError::Decode { .. })
    ));

    let dashboard = Dashboard::new(Arc::new(source));
    dashboard.refresh().await;
    assert!(matches!(dashboard.state().await, LoadState::Failed { .. }));
    assert!(dashboard.snapshot().await.is_none());
}

#[tokio::test]
async fn test_unreachable_api_fails_load() {
    // Nothing listens on port 9 (discard) in the test environment
    let source = HttpDataSource::new(&ClientConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        request_timeout: Some(Duration::from_secs(2)),
    })
    .unwrap();

    let dashboard = Dashboard::new(Arc::new(source));
    dashboard.refresh().await;
    assert!(matches!(dashboard.state().await, LoadState::Failed { .. }));
}
