use anyhow::Result;
use coach_trainer::api::{ApiClient, ApiError, DataSource, TodaySource};
use coach_trainer::config::Config;
use coach_trainer::models::SessionStatus;
use std::path::PathBuf;

const TODAY_BODY: &str = r#"{
    "profile": { "id": "p1", "full_name": "Marta Gomez" },
    "trainingSessions": [
        { "id": "s1", "scheduled_time": "10:00", "duration_minutes": 60,
          "status": "scheduled", "type": "Strength",
          "client": { "id": "c1", "full_name": "Ana" } },
        { "id": "s2", "scheduled_time": "08:00", "duration_minutes": 30,
          "status": "completed", "type": "Cardio" }
    ],
    "clients": [ { "id": "c1", "full_name": "Ana", "email": "ana@example.com" } ]
}"#;

fn config_for(server: &mockito::ServerGuard, token: &str) -> Config {
    let mut config = Config::default();
    config.api.base_url = server.url();
    config.api.token = token.to_string();
    config.api.timeout_seconds = 5;
    config
}

#[tokio::test]
async fn test_fetch_today_sends_bearer_token() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1/trainer/today")
        .match_header("authorization", "Bearer secret")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(TODAY_BODY)
        .create_async()
        .await;

    let client = ApiClient::new(&config_for(&server, "secret"))?;
    let snapshot = client.fetch_today().await?;

    mock.assert_async().await;
    assert_eq!(snapshot.first_name(), "Marta");
    assert_eq!(snapshot.training_sessions.len(), 2);
    assert_eq!(snapshot.training_sessions[1].status, SessionStatus::Completed);
    assert_eq!(snapshot.training_sessions[1].client_name(), "Unknown Client");

    Ok(())
}

#[tokio::test]
async fn test_fetch_today_maps_http_errors() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/v1/trainer/today")
        .with_status(401)
        .create_async()
        .await;

    let client = ApiClient::new(&config_for(&server, ""))?;
    let err = client.fetch_today().await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ApiError>(),
        Some(ApiError::Unauthorized(_))
    ));

    Ok(())
}

#[tokio::test]
async fn test_fetch_today_rejects_malformed_body() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/v1/trainer/today")
        .with_status(200)
        .with_body(r#"{"trainingSessions": [{"id": "s1"}]}"#)
        .create_async()
        .await;

    let client = ApiClient::new(&config_for(&server, ""))?;
    assert!(client.fetch_today().await.is_err());

    Ok(())
}

#[tokio::test]
async fn test_data_source_prefers_snapshot_file() -> Result<()> {
    let fixture = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/today.json");

    let source = DataSource::from_config(&Config::default(), Some(fixture.clone()))?;
    assert_eq!(source.describe(), fixture.display().to_string());

    let snapshot = source.fetch_today().await?;
    assert_eq!(snapshot.clients.len(), 2);

    Ok(())
}
