//! # HTTP Routes
//!
//! | Method | Path             | Response                                  |
//! |--------|------------------|-------------------------------------------|
//! | GET    | `/api/tree`      | Catalog of categories and calculations    |
//! | GET    | `/api/config`    | `ui_config.json` of one calculation       |
//! | POST   | `/api/calculate` | `CalculationResult` of one invocation     |
//! | GET    | anything else    | Static files from the public directory    |
//!
//! Request-level problems (bad JSON, unknown calculation, broken data files)
//! are answered with a 4xx/5xx status and `{"error": ...}`. Anything the
//! calculator itself reports, including validation failures, is a 200 with
//! `{"success": false, "error": ...}`.

use std::any::Any;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use axum::body::{Body, Bytes};
use axum::extract::rejection::BytesRejection;
use axum::extract::{DefaultBodyLimit, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use calc_core::{CalcError, Library};
use serde_json::{Map, Value};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::response::{error_response, json_response};

pub const CONFIG_NOT_FOUND: &str = "Configuration not found";
pub const CONFIG_MALFORMED: &str = "Configuration file is malformed";
pub const INVALID_JSON: &str = "Invalid JSON";
pub const IDENTIFIERS_REQUIRED: &str = "category and calculation are required";
pub const INPUTS_NOT_OBJECT: &str = "inputs must be a JSON object";
pub const MODULE_NOT_FOUND: &str = "Calculation module not found";
pub const DATA_NOT_LOADED: &str = "Calculation data could not be loaded";
pub const INTERNAL_ERROR: &str = "Internal server error";
pub const BODY_TOO_LARGE: &str = "Request body too large";
pub const BODY_UNREADABLE: &str = "Request body could not be read";

/// Largest accepted `/api/calculate` body
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    library: Arc<Library>,
}

impl AppState {
    pub fn new(library: Library) -> Self {
        AppState {
            library: Arc::new(library),
        }
    }
}

/// API routes plus the static file fallback.
pub fn router(state: AppState, public_dir: &Path) -> Router {
    Router::new()
        .route("/api/tree", get(tree))
        .route("/api/config", get(config))
        .route("/api/calculate", post(calculate))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .fallback_service(ServeDir::new(public_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(panic_response))
        .with_state(state)
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = detail, "request handler panicked");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
}

/// Run blocking library work (directory scans, data file reads) off the
/// async worker threads.
async fn blocking<T, F>(state: &AppState, f: F) -> Result<T, Response>
where
    F: FnOnce(&Library) -> T + Send + 'static,
    T: Send + 'static,
{
    let library = Arc::clone(&state.library);
    tokio::task::spawn_blocking(move || f(&library)).await.map_err(|e| {
        tracing::error!(error = %e, "blocking task failed");
        error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
    })
}

async fn tree(State(state): State<AppState>) -> Response {
    match blocking(&state, |library| library.catalog()).await {
        Ok(catalog) => json_response(StatusCode::OK, &catalog),
        Err(response) => response,
    }
}

async fn config(State(state): State<AppState>, Query(params): Query<HashMap<String, String>>) -> Response {
    let (category, calculation) = match (params.get("category"), params.get("calculation")) {
        (Some(category), Some(calculation)) if !category.is_empty() && !calculation.is_empty() => {
            (category.clone(), calculation.clone())
        }
        _ => return error_response(StatusCode::NOT_FOUND, CONFIG_NOT_FOUND),
    };

    let lookup = blocking(&state, move |library| library.ui_config(&category, &calculation)).await;
    match lookup {
        Ok(Ok(Some(config))) => json_response(StatusCode::OK, &config),
        Ok(Ok(None)) => error_response(StatusCode::NOT_FOUND, CONFIG_NOT_FOUND),
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "malformed ui configuration");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, CONFIG_MALFORMED)
        }
        Err(response) => response,
    }
}

/// A validated `/api/calculate` request body.
#[derive(Debug, PartialEq)]
struct CalculateRequest {
    category: String,
    calculation: String,
    inputs: Map<String, Value>,
}

fn non_empty_string(body: &Map<String, Value>, key: &str) -> Option<String> {
    match body.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn parse_calculate_request(body: &[u8]) -> Result<CalculateRequest, &'static str> {
    let value: Value = serde_json::from_slice(body).map_err(|_| INVALID_JSON)?;
    let Value::Object(mut body) = value else {
        return Err(IDENTIFIERS_REQUIRED);
    };

    let (category, calculation) = match (
        non_empty_string(&body, "category"),
        non_empty_string(&body, "calculation"),
    ) {
        (Some(category), Some(calculation)) => (category, calculation),
        _ => return Err(IDENTIFIERS_REQUIRED),
    };

    let inputs = match body.remove("inputs") {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(inputs)) => inputs,
        Some(_) => return Err(INPUTS_NOT_OBJECT),
    };

    Ok(CalculateRequest {
        category,
        calculation,
        inputs,
    })
}

fn body_rejection_response(rejection: BytesRejection) -> Response {
    let status = rejection.status();
    tracing::warn!(%status, error = %rejection, "calculate request body rejected");
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        error_response(status, BODY_TOO_LARGE)
    } else {
        error_response(status, BODY_UNREADABLE)
    }
}

async fn calculate(State(state): State<AppState>, body: Result<Bytes, BytesRejection>) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => return body_rejection_response(rejection),
    };
    let request = match parse_calculate_request(&body) {
        Ok(request) => request,
        Err(message) => return error_response(StatusCode::BAD_REQUEST, message),
    };

    let outcome = blocking(&state, move |library| {
        library
            .resolve(&request.category, &request.calculation)
            .map(|calc| calc.calculate(&request.inputs))
    })
    .await;

    match outcome {
        Ok(Ok(result)) => json_response(StatusCode::OK, &result),
        Ok(Err(CalcError::CalculationNotFound { category, calculation })) => {
            tracing::warn!(%category, %calculation, "calculation not found");
            error_response(StatusCode::NOT_FOUND, MODULE_NOT_FOUND)
        }
        Ok(Err(e @ CalcError::DataFile { .. })) => {
            tracing::error!(error = %e, "calculation data could not be loaded");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, DATA_NOT_LOADED)
        }
        Ok(Err(e)) => {
            tracing::error!(error = %e, code = e.error_code(), "calculation dispatch failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
        }
        Err(response) => response,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, Request};
    use calc_core::calculations::{Calculation, Computed};
    use calc_core::data::{FormulasTable, ModuleData};
    use calc_core::inputs::Inputs;
    use calc_core::{CalcResult, CalculationRegistry, Calculator};
    use http_body_util::BodyExt;
    use std::fs;
    use tempfile::TempDir;
    use tower::ServiceExt;

    struct Fixture {
        _calculations: TempDir,
        _public: TempDir,
        app: Router,
    }

    fn fixture() -> Fixture {
        let calculations = tempfile::tempdir().unwrap();
        let dir = calculations.path().join("technological_calculations/pipe_mass");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("calculation.json"), r#"{"module": "pipe_mass"}"#).unwrap();
        fs::write(
            dir.join("ui_config.json"),
            r#"{"title": "Pipe Mass", "description": "Mass of pipes", "input_form": []}"#,
        )
        .unwrap();

        let broken = calculations.path().join("technological_calculations/broken_mass");
        fs::create_dir_all(&broken).unwrap();
        fs::write(broken.join("calculation.json"), r#"{"module": "pipe_mass"}"#).unwrap();
        fs::write(broken.join("constants.json"), "{ nope").unwrap();
        fs::write(broken.join("ui_config.json"), "{ nope").unwrap();

        let public = tempfile::tempdir().unwrap();
        fs::write(public.path().join("index.html"), "<html>formulas</html>").unwrap();

        let state = AppState::new(Library::new(calculations.path()));
        let app = router(state, public.path());
        Fixture {
            _calculations: calculations,
            _public: public,
            app,
        }
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Option<String>, Vec<u8>) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let body = response.into_body().collect().await.unwrap().to_bytes().to_vec();
        (status, content_type, body)
    }

    async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
        let request = Request::get(uri).body(Body::empty()).unwrap();
        let (status, content_type, body) = send(app, request).await;
        assert_eq!(content_type.as_deref(), Some(crate::response::JSON_CONTENT_TYPE));
        (status, serde_json::from_slice(&body).unwrap())
    }

    async fn post_calculate(app: &Router, body: &str) -> (StatusCode, Value) {
        let request = Request::post("/api/calculate")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let (status, content_type, body) = send(app, request).await;
        assert_eq!(content_type.as_deref(), Some(crate::response::JSON_CONTENT_TYPE));
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_tree() {
        let fx = fixture();
        let (status, json) = get_json(&fx.app, "/api/tree").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json[0]["id"], "technological_calculations");
        let calcs = json[0]["calculations"].as_array().unwrap();
        assert_eq!(calcs.len(), 2);
        assert_eq!(calcs[0]["id"], "broken_mass");
        assert_eq!(calcs[0]["title"], "broken mass");
        assert_eq!(calcs[1]["title"], "Pipe Mass");
        assert_eq!(calcs[1]["path"], "technological_calculations/pipe_mass");
    }

    #[tokio::test]
    async fn test_config() {
        let fx = fixture();
        let (status, json) =
            get_json(&fx.app, "/api/config?category=technological_calculations&calculation=pipe_mass").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["title"], "Pipe Mass");

        let (status, json) = get_json(&fx.app, "/api/config?category=technological_calculations").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], CONFIG_NOT_FOUND);

        let (status, _) = get_json(&fx.app, "/api/config?category=..&calculation=pipe_mass").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, json) =
            get_json(&fx.app, "/api/config?category=technological_calculations&calculation=broken_mass").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], CONFIG_MALFORMED);
    }

    #[tokio::test]
    async fn test_calculate_success() {
        let fx = fixture();
        let body = r#"{
            "category": "technological_calculations",
            "calculation": "pipe_mass",
            "inputs": {"outer_diameter": 273, "wall_thickness": 10, "length": 6,
                       "quantity": 100, "material": "Carbon Steel"}
        }"#;
        let (status, json) = post_calculate(&fx.app, body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert_eq!(json["outputs"]["inner_diameter_mm"], 253.0);
        assert_eq!(json["inputs"]["material"], "Carbon Steel");
    }

    #[tokio::test]
    async fn test_validation_failure_is_200() {
        let fx = fixture();
        let body = r#"{"category": "technological_calculations", "calculation": "pipe_mass"}"#;
        let (status, json) = post_calculate(&fx.app, body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Missing required field: outer_diameter");
    }

    #[tokio::test]
    async fn test_request_errors() {
        let fx = fixture();
        let cases = [
            ("not json", StatusCode::BAD_REQUEST, INVALID_JSON),
            ("[1, 2]", StatusCode::BAD_REQUEST, IDENTIFIERS_REQUIRED),
            (r#"{"category": "technological_calculations"}"#, StatusCode::BAD_REQUEST, IDENTIFIERS_REQUIRED),
            (r#"{"category": "", "calculation": "pipe_mass"}"#, StatusCode::BAD_REQUEST, IDENTIFIERS_REQUIRED),
            (r#"{"category": 1, "calculation": "pipe_mass"}"#, StatusCode::BAD_REQUEST, IDENTIFIERS_REQUIRED),
            (
                r#"{"category": "technological_calculations", "calculation": "pipe_mass", "inputs": [1]}"#,
                StatusCode::BAD_REQUEST,
                INPUTS_NOT_OBJECT,
            ),
            (
                r#"{"category": "technological_calculations", "calculation": "beam"}"#,
                StatusCode::NOT_FOUND,
                MODULE_NOT_FOUND,
            ),
            (
                r#"{"category": "..", "calculation": "pipe_mass"}"#,
                StatusCode::NOT_FOUND,
                MODULE_NOT_FOUND,
            ),
            (
                r#"{"category": "technological_calculations", "calculation": "broken_mass"}"#,
                StatusCode::INTERNAL_SERVER_ERROR,
                DATA_NOT_LOADED,
            ),
        ];

        for (body, expected_status, expected_error) in cases {
            let (status, json) = post_calculate(&fx.app, body).await;
            assert_eq!(status, expected_status, "body: {}", body);
            assert_eq!(json["error"], expected_error, "body: {}", body);
        }
    }

    #[tokio::test]
    async fn test_content_length_matches_body() {
        let fx = fixture();
        let request = Request::get("/api/tree").body(Body::empty()).unwrap();
        let response = fx.app.clone().oneshot(request).await.unwrap();
        let length: usize = response.headers()[header::CONTENT_LENGTH].to_str().unwrap().parse().unwrap();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(length, body.len());
    }

    #[tokio::test]
    async fn test_static_fallback() {
        let fx = fixture();
        let request = Request::get("/").body(Body::empty()).unwrap();
        let (status, _, body) = send(&fx.app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"<html>formulas</html>");

        let request = Request::get("/missing.js").body(Body::empty()).unwrap();
        let (status, _, _) = send(&fx.app, request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_parse_calculate_request_defaults_inputs() {
        let request = parse_calculate_request(br#"{"category": "a", "calculation": "b", "inputs": null}"#).unwrap();
        assert!(request.inputs.is_empty());
        let request = parse_calculate_request(br#"{"category": "a", "calculation": "b"}"#).unwrap();
        assert!(request.inputs.is_empty());
    }

    #[tokio::test]
    async fn test_panics_become_500() {
        let app: Router = Router::new()
            .route("/boom", get(|| async { let response: () = panic!("boom"); response }))
            .layer(CatchPanicLayer::custom(panic_response));
        let request = Request::get("/boom").body(Body::empty()).unwrap();
        let (status, content_type, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(content_type.as_deref(), Some(crate::response::JSON_CONTENT_TYPE));
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], INTERNAL_ERROR);
    }

    #[tokio::test]
    async fn test_oversized_body_is_json_413() {
        let fx = fixture();
        let padding = "x".repeat(MAX_BODY_BYTES);
        let body = format!(
            r#"{{"category": "technological_calculations", "calculation": "pipe_mass", "pad": "{}"}}"#,
            padding
        );
        let (status, json) = post_calculate(&fx.app, &body).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(json["error"], BODY_TOO_LARGE);
    }

    struct Faulty {
        formulas: FormulasTable,
    }

    impl Calculation for Faulty {
        type Input = ();

        fn name(&self) -> &'static str {
            "Faulty"
        }

        fn validate(&self, _inputs: &Inputs<'_>) -> CalcResult<()> {
            Ok(())
        }

        fn compute(&self, _input: &()) -> CalcResult<Computed> {
            panic!("formula blew up")
        }

        fn formulas(&self) -> &FormulasTable {
            &self.formulas
        }
    }

    fn faulty(_data: &ModuleData) -> CalcResult<Box<dyn Calculator>> {
        Ok(Box::new(Faulty {
            formulas: FormulasTable::new(),
        }))
    }

    #[tokio::test]
    async fn test_calculator_panic_is_500_and_server_keeps_serving() {
        let calculations = tempfile::tempdir().unwrap();
        let dir = calculations.path().join("test_calculations/faulty");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("calculation.json"), r#"{"module": "faulty"}"#).unwrap();
        let public = tempfile::tempdir().unwrap();

        let mut registry = CalculationRegistry::builtin();
        registry.register("faulty", faulty);
        let state = AppState::new(Library::with_registry(calculations.path(), registry));
        let app = router(state, public.path());

        let body = r#"{"category": "test_calculations", "calculation": "faulty"}"#;
        let (status, json) = post_calculate(&app, body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], INTERNAL_ERROR);

        let (status, json) = get_json(&app, "/api/tree").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json[0]["calculations"][0]["id"], "faulty");
    }
}
