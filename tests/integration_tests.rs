use github_telegram_notifier::{CliConfig, JsonFileStore, NotifierEngine, NotifyPipeline};
use httpmock::prelude::*;
use tempfile::TempDir;

fn test_config(server: &MockServer, state_file: &str) -> CliConfig {
    CliConfig {
        github_token: Some("gh-test-token".to_string()),
        telegram_token: Some("123:tg-test-token".to_string()),
        telegram_chat_id: Some("-1000".to_string()),
        github_api_url: server.base_url(),
        telegram_api_url: server.base_url(),
        state_file: state_file.to_string(),
        poll_interval_seconds: 10,
        config: None,
        once: true,
        verbose: false,
        log_json: false,
        log_level: None,
    }
}

fn notification(id: &str, unread: bool, title: &str, repo: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "unread": unread,
        "reason": "subscribed",
        "updated_at": "2024-01-15T08:30:00Z",
        "subject": { "title": title, "type": "Issue" },
        "repository": { "full_name": repo }
    })
}

#[tokio::test]
async fn test_end_to_end_notification_delivery() {
    let temp_dir = TempDir::new().unwrap();
    let state_file = temp_dir.path().join("notifications.json");
    let state_path = state_file.to_str().unwrap().to_string();

    let server = MockServer::start();
    let github_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/notifications")
            .header("authorization", "Bearer gh-test-token");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([
                notification("1", true, "Fix flaky test", "acme/widgets"),
                notification("2", true, "Release v2", "acme/gadgets"),
                notification("3", false, "Old news", "acme/widgets"),
            ]));
    });
    let telegram_mock = server.mock(|when, then| {
        when.method(POST).path("/bot123:tg-test-token/sendMessage");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"ok": true, "result": {}}));
    });

    let config = test_config(&server, &state_path);
    let store = JsonFileStore::new(&state_path);
    let pipeline = NotifyPipeline::new(store, config);
    let engine = NotifierEngine::new(pipeline);

    let summary = engine.run_once().await.unwrap();

    github_mock.assert();
    telegram_mock.assert_hits(2); // the read notification is never delivered
    assert_eq!(summary.delivered, 2);

    // State file holds exactly the delivered IDs, sorted.
    let raw = std::fs::read_to_string(&state_file).unwrap();
    let ids: Vec<String> = serde_json::from_str(&raw).unwrap();
    assert_eq!(ids, vec!["1".to_string(), "2".to_string()]);
}

#[tokio::test]
async fn test_second_cycle_does_not_resend() {
    let temp_dir = TempDir::new().unwrap();
    let state_path = temp_dir
        .path()
        .join("notifications.json")
        .to_str()
        .unwrap()
        .to_string();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/notifications");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([
                notification("42", true, "Still unread upstream", "acme/widgets"),
            ]));
    });
    let telegram_mock = server.mock(|when, then| {
        when.method(POST).path("/bot123:tg-test-token/sendMessage");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"ok": true, "result": {}}));
    });

    let config = test_config(&server, &state_path);
    let store = JsonFileStore::new(&state_path);
    let pipeline = NotifyPipeline::new(store, config);
    let engine = NotifierEngine::new(pipeline);

    engine.run_once().await.unwrap();
    telegram_mock.assert_hits(1);

    // The upstream notification is still unread, but it was already forwarded.
    let summary = engine.run_once().await.unwrap();
    telegram_mock.assert_hits(1);
    assert_eq!(summary.delivered, 0);
}

#[tokio::test]
async fn test_preseeded_state_skips_known_ids() {
    let temp_dir = TempDir::new().unwrap();
    let state_file = temp_dir.path().join("notifications.json");
    std::fs::write(&state_file, r#"["1"]"#).unwrap();
    let state_path = state_file.to_str().unwrap().to_string();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/notifications");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([
                notification("1", true, "Sent last run", "acme/widgets"),
                notification("2", true, "New since last run", "acme/widgets"),
            ]));
    });
    let telegram_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/bot123:tg-test-token/sendMessage")
            .json_body_partial(r#"{"text": "New since last run (acme/widgets)"}"#);
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"ok": true, "result": {}}));
    });

    let config = test_config(&server, &state_path);
    let store = JsonFileStore::new(&state_path);
    let pipeline = NotifyPipeline::new(store, config);
    let engine = NotifierEngine::new(pipeline);

    let summary = engine.run_once().await.unwrap();

    telegram_mock.assert();
    assert_eq!(summary.delivered, 1);

    let raw = std::fs::read_to_string(&state_file).unwrap();
    let ids: Vec<String> = serde_json::from_str(&raw).unwrap();
    assert_eq!(ids, vec!["1".to_string(), "2".to_string()]);
}

#[tokio::test]
async fn test_github_failure_delivers_nothing_and_keeps_state() {
    let temp_dir = TempDir::new().unwrap();
    let state_file = temp_dir.path().join("notifications.json");
    let state_path = state_file.to_str().unwrap().to_string();

    let server = MockServer::start();
    let github_mock = server.mock(|when, then| {
        when.method(GET).path("/notifications");
        then.status(500);
    });
    let telegram_mock = server.mock(|when, then| {
        when.method(POST).path("/bot123:tg-test-token/sendMessage");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"ok": true, "result": {}}));
    });

    let config = test_config(&server, &state_path);
    let store = JsonFileStore::new(&state_path);
    let pipeline = NotifyPipeline::new(store, config);
    let engine = NotifierEngine::new(pipeline);

    let result = engine.run_once().await;

    github_mock.assert();
    telegram_mock.assert_hits(0);
    assert!(result.is_err());
    assert!(!state_file.exists());
}
