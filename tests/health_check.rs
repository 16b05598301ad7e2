mod common;

use std::sync::Arc;

use common::{MockMessenger, spawn_app, spawn_configured_app};
use submission_relay::models::RelayConfig;

#[tokio::test]
async fn health_check_works() {
    let (address, messenger) = spawn_configured_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{address}/health-check"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(Some(0), response.content_length());
    assert_eq!(messenger.call_count(), 0);
}

#[tokio::test]
async fn health_check_works_without_configuration() {
    let messenger = Arc::new(MockMessenger::new());
    let address = spawn_app(RelayConfig::new(None, None), messenger).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{address}/health-check"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), reqwest::StatusCode::OK);
}
