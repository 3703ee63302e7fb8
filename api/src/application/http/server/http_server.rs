use std::sync::Arc;

use crate::application::http::diagnosis::router::diagnosis_routes;
use crate::application::http::flag::router::flag_routes;
use crate::application::http::health::health_routes;
use crate::application::http::server::app_state::AppState;
use crate::application::http::server::openapi::ApiDoc;
use crate::application::http::ui::ui_routes;
use crate::args::Args;

use axum::Router;
use axum::http::header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum_prometheus::PrometheusMetricLayer;
use doctorvision_core::{application::create_service, domain::common::DoctorVisionConfig};
use tower_http::cors::CorsLayer;
use tracing::{debug, info_span, warn};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

pub async fn state(args: Arc<Args>) -> Result<AppState, anyhow::Error> {
    let config = DoctorVisionConfig::from(args.as_ref().clone());
    let service = create_service(config)?;

    tokio::fs::create_dir_all(&args.server.upload_dir).await?;

    Ok(AppState::new(args, service))
}

/// Application routes and layers, without the process-wide metrics recorder.
pub fn routes(state: AppState) -> Result<Router, anyhow::Error> {
    let trace_layer = tower_http::trace::TraceLayer::new_for_http().make_span_with(
        |request: &axum::extract::Request| {
            let uri: String = request.uri().to_string();
            info_span!("http_request", method = ?request.method(), uri)
        },
    );

    let allowed_origins = state
        .args
        .server
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(origin = %origin, "ignoring invalid allowed origin: {}", e);
                None
            }
        })
        .collect::<Vec<HeaderValue>>();

    debug!("Allowed origins: {:?}", allowed_origins);

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_origin(allowed_origins)
        .allow_headers([CONTENT_TYPE, CONTENT_LENGTH, ACCEPT]);

    let mut openapi = ApiDoc::openapi();
    let mut paths = openapi.paths.clone();
    paths.paths = openapi
        .paths
        .paths
        .into_iter()
        .map(|(path, item)| (format!("{}{path}", state.args.server.root_path), item))
        .collect();
    openapi.paths = paths;

    let root_path = state.args.server.root_path.clone();
    let api_docs_url = format!("{}/api-docs/openapi.json", root_path);

    let router = axum::Router::new()
        .merge(Scalar::with_url(
            format!("{}/scalar", root_path),
            openapi.clone(),
        ))
        .merge(SwaggerUi::new(format!("{}/swagger-ui", root_path)).url(api_docs_url, openapi))
        .merge(ui_routes(&root_path))
        .merge(diagnosis_routes(state.clone()))
        .merge(flag_routes(state.clone()))
        .merge(health_routes(&root_path))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state);
    Ok(router)
}

///  Returns the [`Router`] of this application.
pub fn router(state: AppState) -> Result<Router, anyhow::Error> {
    let root_path = state.args.server.root_path.clone();
    let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();

    let router = routes(state)?
        .route(
            &format!("{}/metrics", root_path),
            get(|| async move { metric_handle.render() }),
        )
        .layer(prometheus_layer);
    Ok(router)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use axum::http::StatusCode;
    use axum_test::{
        TestServer,
        multipart::{MultipartForm, Part},
    };
    use clap::Parser;
    use serde_json::{Value, json};

    use super::*;

    async fn server_with_flag_log(dir: &Path, flag_log: &Path) -> TestServer {
        let args = Args::try_parse_from([
            "doctorvision",
            "--upload-dir",
            dir.join("uploads").to_str().unwrap(),
            "--flag-log-path",
            flag_log.to_str().unwrap(),
            "--vision-base-url",
            "http://127.0.0.1:9",
            "--vision-timeout",
            "2",
        ])
        .unwrap();

        let state = state(Arc::new(args)).await.unwrap();
        TestServer::new(routes(state).unwrap()).unwrap()
    }

    async fn server(dir: &Path) -> TestServer {
        server_with_flag_log(dir, &dir.join("flags.log")).await
    }

    #[tokio::test]
    async fn test_submit_without_image_classifies_symptoms() {
        let dir = tempfile::tempdir().unwrap();
        let server = server(dir.path()).await;

        let response = server
            .post("/diagnoses")
            .multipart(MultipartForm::new().add_text("symptoms", " dandruff and rash noted "))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["user_prompt"], "dandruff and rash noted");
        assert_eq!(body["data"]["disease_category"], "dandruff");
        assert_eq!(body["data"]["disease_type"], "scalp_condition");
        assert_eq!(body["data"]["recommended_doctor"], "Dermatologist");
        assert_eq!(body["data"]["urgency"], "non_emergency");
        assert_eq!(body["data"]["uploaded_image"], "");
    }

    #[tokio::test]
    async fn test_submit_unmatched_text_is_unknown() {
        let dir = tempfile::tempdir().unwrap();
        let server = server(dir.path()).await;

        let response = server
            .post("/diagnoses")
            .multipart(MultipartForm::new().add_text("symptoms", "feeling fine"))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["disease_category"], "unknown");
        assert_eq!(body["data"]["disease_type"], "unknown");
        assert_eq!(body["data"]["recommended_doctor"], "Primary care physician");
        assert_eq!(body["data"]["solutions"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_submit_with_image_surfaces_vision_failure_and_discards_upload() {
        let dir = tempfile::tempdir().unwrap();
        let server = server(dir.path()).await;

        let image = Part::bytes(vec![0xFF, 0xD8, 0xFF, 0xE0])
            .file_name("arm.jpg")
            .mime_type("image/jpeg");
        let response = server
            .post("/diagnoses")
            .multipart(
                MultipartForm::new()
                    .add_text("symptoms", "red patch")
                    .add_part("image", image),
            )
            .await;

        response.assert_status(StatusCode::BAD_GATEWAY);
        let body: Value = response.json();
        assert_eq!(body["code"], "E_EXTERNAL_SERVICE");

        let uploads: Vec<_> = std::fs::read_dir(dir.path().join("uploads"))
            .unwrap()
            .collect();
        assert!(uploads.is_empty());
    }

    #[tokio::test]
    async fn test_submit_rejects_oversized_symptoms() {
        let dir = tempfile::tempdir().unwrap();
        let server = server(dir.path()).await;

        let response = server
            .post("/diagnoses")
            .multipart(MultipartForm::new().add_text("symptoms", "a".repeat(5001)))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_clear_returns_reset_state() {
        let dir = tempfile::tempdir().unwrap();
        let server = server(dir.path()).await;

        let response = server.post("/diagnoses/clear").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(
            body["data"],
            json!({ "image": null, "symptoms": "", "record": {} })
        );
    }

    #[tokio::test]
    async fn test_flag_appends_submitted_record() {
        let dir = tempfile::tempdir().unwrap();
        let server = server(dir.path()).await;

        let submitted: Value = server
            .post("/diagnoses")
            .multipart(MultipartForm::new().add_text("symptoms", "hives on my neck"))
            .await
            .json();

        for _ in 0..2 {
            let response = server.post("/flags").json(&submitted["data"]).await;
            response.assert_status_ok();
            let body: Value = response.json();
            assert_eq!(body["data"]["status"], "flagged");
            assert_eq!(body["data"]["message"], "Flagged. Thank you.");
        }

        let content = std::fs::read_to_string(dir.path().join("flags.log")).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in lines {
            let (_, json) = line.split_once(' ').unwrap();
            let record: Value = serde_json::from_str(json).unwrap();
            assert_eq!(record["disease_category"], "hives");
        }
    }

    #[tokio::test]
    async fn test_flag_write_failure_is_a_warning() {
        let dir = tempfile::tempdir().unwrap();
        let server =
            server_with_flag_log(dir.path(), &dir.path().join("missing").join("flags.log")).await;

        let submitted: Value = server
            .post("/diagnoses")
            .multipart(MultipartForm::new().add_text("symptoms", "acne"))
            .await
            .json();

        let response = server.post("/flags").json(&submitted["data"]).await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["status"], "warning");
        assert!(
            body["data"]["message"]
                .as_str()
                .unwrap()
                .starts_with("Could not flag:")
        );

        // the server keeps serving after a failed flag
        server.get("/health/live").await.assert_status_ok();
    }

    #[tokio::test]
    async fn test_index_serves_form() {
        let dir = tempfile::tempdir().unwrap();
        let server = server(dir.path()).await;

        let response = server.get("/").await;

        response.assert_status_ok();
        assert!(response.text().contains("<form"));
    }
}
