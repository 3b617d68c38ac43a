use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeFile;

use crate::pipeline;
use crate::predictions::Loader;
use crate::render::Variant;

#[derive(Clone)]
pub struct AppState {
    pub loader: Loader,
    pub variant: Variant,
    pub animate: bool,
    /// Served as-is at `/predictions.json` when the document lives on disk
    pub predictions_path: Option<PathBuf>,
}

/// Build the Axum router for the dashboard.
pub fn router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/", get(index_handler))
        .route("/api/predictions", get(predictions_handler));
    if let Some(path) = &state.predictions_path {
        router = router.route_service("/predictions.json", ServeFile::new(path));
    }
    router
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// Serve the page, running a fresh load → render cycle per request.
async fn index_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let cycle = pipeline::run(&state.loader, state.variant, state.animate).await;
    Html(cycle.html())
}

/// GET /api/predictions
async fn predictions_handler(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    // Bars are irrelevant to the JSON view.
    let cycle = pipeline::run(&state.loader, state.variant, false).await;
    let Some(normalized) = &cycle.normalized else {
        let reason = cycle
            .outcome
            .error()
            .map(|e| e.to_string())
            .unwrap_or_else(|| "predictions unavailable".to_string());
        return Err((StatusCode::SERVICE_UNAVAILABLE, reason));
    };

    Ok(Json(serde_json::json!({
        "source": cycle.outcome.source_label(),
        "policy": state.loader.policy(),
        "lastUpdated": cycle.meta.last_updated,
        "modelInfo": cycle.meta.model,
        "error": cycle.outcome.error().map(|e| e.to_string()),
        "groups": normalized.groups,
        "dropped": normalized.dropped,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predictions::{source_for, FailurePolicy};
    use std::net::SocketAddr;

    async fn serve(state: AppState) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router(state)).await.unwrap();
        });
        addr
    }

    fn state(location: &str, variant: Variant, policy: FailurePolicy) -> AppState {
        AppState {
            loader: Loader::new(source_for(location).unwrap(), policy),
            variant,
            animate: true,
            predictions_path: None,
        }
    }

    #[tokio::test]
    async fn test_index_renders_fallback_page() {
        let addr = serve(state(
            "./no-such-dir/predictions.json",
            Variant::Conference,
            FailurePolicy::Fallback,
        ))
        .await;

        let resp = reqwest::get(format!("http://{}/", addr)).await.unwrap();
        assert!(resp.status().is_success());
        let body = resp.text().await.unwrap();
        assert!(body.contains(r#"id="eastern-conference""#));
        assert!(body.contains("<h3>Denver Nuggets</h3>"));
        assert!(body.contains(r#"data-target="96.0""#));
    }

    #[tokio::test]
    async fn test_api_returns_grouped_fallback() {
        let addr = serve(state(
            "./no-such-dir/predictions.json",
            Variant::Conference,
            FailurePolicy::Fallback,
        ))
        .await;

        let json: serde_json::Value = reqwest::get(format!("http://{}/api/predictions", addr))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(json["source"], "fallback");
        assert_eq!(json["policy"], "fallback");
        assert_eq!(json["groups"]["eastern-conference"].as_array().unwrap().len(), 15);
        assert_eq!(json["groups"]["western-conference"][0]["team"], "Denver Nuggets");
        assert!(json["error"].as_str().unwrap().contains("no-such-dir"));
    }

    #[tokio::test]
    async fn test_api_unavailable_under_placeholder_policy() {
        let addr = serve(state(
            "./no-such-dir/predictions.json",
            Variant::Division,
            FailurePolicy::Placeholder,
        ))
        .await;

        let resp = reqwest::get(format!("http://{}/api/predictions", addr))
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::SERVICE_UNAVAILABLE);

        let page = reqwest::get(format!("http://{}/", addr))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert_eq!(
            page.matches(crate::render::LOAD_FAILED_MESSAGE).count(),
            6
        );
    }

    #[tokio::test]
    async fn test_serves_predictions_file() {
        let path = std::env::temp_dir().join(format!(
            "playoff-oracle-dashboard-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, include_str!("../../data/division_predictions.json")).unwrap();

        let mut app = state(path.to_str().unwrap(), Variant::Division, FailurePolicy::Placeholder);
        app.predictions_path = Some(path.clone());
        let addr = serve(app).await;

        let raw: serde_json::Value = reqwest::get(format!("http://{}/predictions.json", addr))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(raw["schema"], "division");

        let api: serde_json::Value = reqwest::get(format!("http://{}/api/predictions", addr))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(api["source"], "remote");
        assert_eq!(api["groups"]["pacific-division"].as_array().unwrap().len(), 5);
        assert_eq!(api["lastUpdated"], "February 19, 2026, 12:00 PM");
        let _ = std::fs::remove_file(path);
    }
}
