//! End-to-end tests of the HTTP router.

use std::path::Path;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use metrics_exporter_prometheus::PrometheusBuilder;
use pretty_assertions::assert_eq;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use pickdesk::api::{create_router, AppState};
use pickdesk::config::Config;
use pickdesk::status::{Capability, StaticCredentials};

const INDEX_HTML: &str = "<!doctype html><title>Picks</title>";

fn config_for(root: &Path) -> Config {
    Config {
        static_dir: root.join("static"),
        index_file: root.join("index.html"),
        ..Config::default()
    }
}

fn app(config: &Config, credentials: StaticCredentials) -> Router {
    create_router(AppState::new(config).with_credentials(credentials))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, content_type, body.to_vec())
}

async fn model_status(credentials: StaticCredentials) -> Value {
    let dir = TempDir::new().unwrap();
    let (status, _, body) = get(app(&config_for(dir.path()), credentials), "/model-status").await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn no_credentials_reports_degraded() {
    let report = model_status(StaticCredentials::new()).await;

    assert_eq!(report["status"], "degraded");
    for key in ["betstack", "odds_api", "roster_api", "ai_api"] {
        assert_eq!(report["api_keys_configured"][key], false, "{}", key);
        assert_eq!(report["api_health"][key], "not_configured", "{}", key);
    }
    assert_eq!(report["api_health"]["database"], "healthy");
    for key in ["real_time_odds", "player_props", "roster_data", "ai_analysis"] {
        assert_eq!(report["capabilities"][key], false, "{}", key);
    }
}

#[tokio::test]
async fn all_credentials_reports_operational() {
    let report = model_status(StaticCredentials::all_configured()).await;

    assert_eq!(report["status"], "operational");
    for key in ["betstack", "odds_api", "roster_api", "ai_api", "database"] {
        assert_eq!(report["api_health"][key], "healthy", "{}", key);
    }
    for key in ["betstack", "odds_api", "roster_api", "ai_api"] {
        assert_eq!(report["api_keys_configured"][key], true, "{}", key);
    }
}

#[tokio::test]
async fn capabilities_follow_their_credentials() {
    let report = model_status(
        StaticCredentials::new()
            .with(Capability::OddsApi, "odds")
            .with(Capability::AiApi, "ai"),
    )
    .await;

    assert_eq!(report["status"], "degraded");
    assert_eq!(report["capabilities"]["real_time_odds"], true);
    assert_eq!(report["capabilities"]["ai_analysis"], true);
    assert_eq!(report["capabilities"]["player_props"], false);
    assert_eq!(report["capabilities"]["roster_data"], false);
}

#[tokio::test]
async fn performance_block_is_constant_and_tagged() {
    let degraded = model_status(StaticCredentials::new()).await;
    let operational = model_status(StaticCredentials::all_configured()).await;

    assert_eq!(degraded["performance"], operational["performance"]);
    let performance = &degraded["performance"];
    assert_eq!(performance["hit_rate"], 0.54);
    assert_eq!(performance["avg_ev"], 0.032);
    assert_eq!(performance["clv"], 0.021);
    assert_eq!(performance["roi"], 0.045);
    assert_eq!(performance["total_picks"], 150);
    assert_eq!(performance["graded_picks"], 120);
    assert_eq!(performance["pending_picks"], 30);
    assert_eq!(performance["source"], "placeholder");
    assert!(degraded["last_updated"].is_string());
}

#[tokio::test]
async fn serves_index_and_static_assets() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("index.html"), INDEX_HTML).unwrap();
    std::fs::create_dir(dir.path().join("static")).unwrap();
    std::fs::write(dir.path().join("static/app.css"), "body{}").unwrap();
    let config = config_for(dir.path());

    let (status, content_type, body) = get(app(&config, StaticCredentials::new()), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/html"));
    assert_eq!(body, INDEX_HTML.as_bytes());

    let (status, content_type, body) =
        get(app(&config, StaticCredentials::new()), "/static/app.css").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/css"));
    assert_eq!(body, b"body{}");
}

#[tokio::test]
async fn missing_static_directory_skips_mount() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("index.html"), INDEX_HTML).unwrap();
    let config = config_for(dir.path());

    let (status, _, body) = get(app(&config, StaticCredentials::new()), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, INDEX_HTML.as_bytes());

    let (status, _, _) = get(app(&config, StaticCredentials::new()), "/static/app.css").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_index_is_not_found() {
    let dir = TempDir::new().unwrap();
    let (status, _, body) = get(app(&config_for(dir.path()), StaticCredentials::new()), "/").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "Not Found");
}

#[tokio::test]
async fn health_is_always_ok() {
    let dir = TempDir::new().unwrap();
    let (status, _, body) =
        get(app(&config_for(dir.path()), StaticCredentials::new()), "/health").await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["service"], "frontend");
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn serves_index_that_is_not_utf8() {
    let dir = TempDir::new().unwrap();
    let latin1: &[u8] = b"<html>caf\xe9</html>";
    std::fs::write(dir.path().join("index.html"), latin1).unwrap();

    let (status, content_type, body) =
        get(app(&config_for(dir.path()), StaticCredentials::new()), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/html"));
    assert_eq!(body, latin1);
}

#[tokio::test]
async fn static_requests_are_counted() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("static")).unwrap();
    std::fs::write(dir.path().join("static/app.css"), "body{}").unwrap();
    let config = config_for(dir.path());

    let recorder = PrometheusBuilder::new().build_recorder();
    let handle = recorder.handle();
    // Current-thread runtime: the whole request runs under this local recorder.
    let _guard = metrics::set_default_local_recorder(&recorder);

    let (status, _, _) = get(app(&config, StaticCredentials::new()), "/static/app.css").await;
    assert_eq!(status, StatusCode::OK);

    let rendered = handle.render();
    assert!(
        rendered.contains(r#"http_requests_total{endpoint="/static/*",status="200"} 1"#),
        "{}",
        rendered
    );
}
