//! End-to-end startup against a mocked backend.

use std::path::PathBuf;

use mockito::{Matcher, Server};
use serde_json::json;
use tempfile::TempDir;

use ems_core::app_dirs::AppDirs;
use ems_core::config::AppConfig;
use ems_core::{AppState, UnauthenticatedReason, UserId};
use ems_runtime::bootstrap::{run_app, WiringError};

const USER_ID: &str = "5d1e2f3a-aaaa-4bbb-8ccc-123456789abc";

fn app_dirs(dir: &TempDir) -> AppDirs {
    AppDirs {
        app_data_root: dir.path().join("data"),
        app_config_root: dir.path().join("config"),
    }
}

fn config_for(url: String, session_file: PathBuf) -> AppConfig {
    AppConfig {
        backend_url: url,
        backend_anon_key: "anon".to_string(),
        request_timeout_secs: 5,
        block_onboarding_on_write_failure: false,
        session_file_path: session_file,
    }
}

fn write_session(path: &PathBuf) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    let session = json!({
        "access_token": "stored-access",
        "refresh_token": "stored-refresh",
        "expires_at": null,
        "user": { "id": USER_ID, "email": "user@example.com" }
    });
    std::fs::write(path, session.to_string()).unwrap();
}

#[tokio::test]
async fn without_stored_session_startup_routes_to_sign_in() {
    let server = Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let config = config_for(server.url(), PathBuf::new());

    let report = run_app(config, app_dirs(&dir)).await.unwrap();

    assert_eq!(
        report.state,
        AppState::Unauthenticated {
            reason: UnauthenticatedReason::NoSession
        }
    );
    assert!(report.dashboard.is_none());
}

#[tokio::test]
async fn onboarded_user_lands_on_home_with_dashboard() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let session_file = dir.path().join("data").join("session.json");
    write_session(&session_file);

    let profile = server
        .mock("GET", "/rest/v1/profiles")
        .match_query(Matcher::UrlEncoded("id".into(), format!("eq.{USER_ID}")))
        .match_header("authorization", "Bearer stored-access")
        .with_status(200)
        .with_body(json!([{ "id": USER_ID, "is_onboarded": true }]).to_string())
        .create_async()
        .await;
    let goals = server
        .mock("GET", "/rest/v1/goals")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            json!([
                { "id": "g1", "userId": USER_ID, "title": "Read", "proofType": "Photo", "isCompleted": false },
                { "id": "g2", "userId": USER_ID, "title": "Run", "proofType": "GPS", "isCompleted": true }
            ])
            .to_string(),
        )
        .create_async()
        .await;

    let report = run_app(config_for(server.url(), session_file), app_dirs(&dir))
        .await
        .unwrap();

    profile.assert_async().await;
    goals.assert_async().await;
    assert_eq!(
        report.state,
        AppState::Ready {
            user_id: UserId::from(USER_ID)
        }
    );
    let dashboard = report.dashboard.unwrap();
    assert_eq!(dashboard.active_goals, 1);
    assert_eq!(dashboard.completed_goals, 1);
}

#[tokio::test]
async fn new_user_is_sent_to_onboarding() {
    let mut server = Server::new_async().await;
    let dir = TempDir::new().unwrap();
    // Empty session path: the default under the app data root is used.
    let session_file = dir.path().join("data").join("session.json");
    write_session(&session_file);

    server
        .mock("GET", "/rest/v1/profiles")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!([{ "id": USER_ID, "is_onboarded": null }]).to_string())
        .create_async()
        .await;

    let report = run_app(config_for(server.url(), PathBuf::new()), app_dirs(&dir))
        .await
        .unwrap();

    assert_eq!(
        report.state,
        AppState::NeedsOnboarding {
            user_id: UserId::from(USER_ID)
        }
    );
}

#[tokio::test]
async fn missing_backend_url_fails_wiring() {
    let dir = TempDir::new().unwrap();

    let err = run_app(AppConfig::empty(), app_dirs(&dir)).await.unwrap_err();

    assert!(err.downcast_ref::<WiringError>().is_some());
}
