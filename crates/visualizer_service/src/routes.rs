// =============================================================================
// Quantum State Visualizer - HTTP Routes
// =============================================================================
// Table of Contents:
//   1. Route assembly - Filters, CORS and request tracing
//   2. Health endpoint
//   3. Circuit processing endpoint
//   4. Rejection handling
// =============================================================================
// Purpose: Thin warp layer over the Bloch engine. Computation runs on the
//          blocking pool; the engine is shared through an Arc without locks.
// =============================================================================

use crate::configuration::ServiceConfiguration;
use bloch_engine::catalog::{example_circuit_library, supported_gate_catalog};
use bloch_engine::circuit_program::CircuitRequestPayload;
use bloch_engine::execution::BlochPipelineEngine;
use bloch_engine::result_assembly::ErrorResponsePayload;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;
use warp::http::StatusCode;
use warp::hyper::body::Bytes;
use warp::reply::Response;
use warp::{Filter, Rejection, Reply};

pub const NO_CIRCUIT_DATA_MESSAGE: &str = "No circuit data provided";
pub const ENDPOINT_NOT_FOUND_MESSAGE: &str = "Endpoint not found";

// =============================================================================
// 1. Route assembly
// =============================================================================

pub fn service_routes(
    configuration: ServiceConfiguration,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let engine = Arc::new(BlochPipelineEngine::new().with_tolerances(configuration.tolerances));
    let with_engine = warp::any().map(move || Arc::clone(&engine));

    let health = warp::path::end()
        .and(warp::get())
        .map(|| warp::reply::json(&HealthResponse::running()));

    let process_circuit = warp::path!("api" / "process-circuit")
        .and(warp::post())
        .and(warp::body::content_length_limit(configuration.maximum_request_bytes))
        .and(warp::body::bytes())
        .and(with_engine)
        .and_then(process_circuit_handler);

    let example_circuits = warp::path!("api" / "example-circuits")
        .and(warp::get())
        .map(|| warp::reply::json(&example_circuit_library()));

    let supported_gates = warp::path!("api" / "supported-gates")
        .and(warp::get())
        .map(|| warp::reply::json(&supported_gate_catalog()));

    let cors = warp::cors()
        .allow_any_origin()
        .allow_methods(vec!["GET", "POST", "OPTIONS"])
        .allow_headers(vec!["content-type"]);

    health
        .or(process_circuit)
        .or(example_circuits)
        .or(supported_gates)
        .recover(handle_rejection)
        .with(cors)
        .with(warp::trace::request())
}

fn json_with_status<T: Serialize>(payload: &T, status: StatusCode) -> Response {
    warp::reply::with_status(warp::reply::json(payload), status).into_response()
}

fn error_reply(status: StatusCode, message: impl Into<String>) -> Response {
    json_with_status(&ErrorResponsePayload::new(message), status)
}

// =============================================================================
// 2. Health endpoint
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub message: String,
    pub status: String,
    pub version: String,
}

impl HealthResponse {
    pub fn running() -> Self {
        Self {
            message: "Quantum State Visualizer API".to_string(),
            status: "running".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// 3. Circuit processing endpoint
// =============================================================================

/// An empty body, `null` or `{}` all count as "no circuit data".
pub fn decode_circuit_request(body: &[u8]) -> Result<CircuitRequestPayload, String> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(NO_CIRCUIT_DATA_MESSAGE.to_string());
    }

    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|err| format!("Invalid JSON: {err}"))?;
    match &value {
        serde_json::Value::Null => return Err(NO_CIRCUIT_DATA_MESSAGE.to_string()),
        serde_json::Value::Object(fields) if fields.is_empty() => {
            return Err(NO_CIRCUIT_DATA_MESSAGE.to_string());
        }
        serde_json::Value::Object(_) => {}
        _ => return Err("Circuit data must be a JSON object".to_string()),
    }

    serde_json::from_value(value).map_err(|err| format!("Invalid circuit data: {err}"))
}

async fn process_circuit_handler(
    body: Bytes,
    engine: Arc<BlochPipelineEngine>,
) -> Result<Response, Infallible> {
    let span = tracing::info_span!("process_circuit", request_id = %Uuid::new_v4());
    Ok(respond_to_circuit(body, engine, span.clone()).instrument(span).await)
}

async fn respond_to_circuit(
    body: Bytes,
    engine: Arc<BlochPipelineEngine>,
    span: tracing::Span,
) -> Response {
    let request = match decode_circuit_request(&body) {
        Ok(request) => request,
        Err(message) => {
            tracing::warn!(%message, "rejected request body");
            return error_reply(StatusCode::BAD_REQUEST, message);
        }
    };

    let outcome = tokio::task::spawn_blocking(move || {
        let _entered = span.enter();
        engine.process_request(&request)
    })
    .await;

    match outcome {
        Ok(Ok(response)) => {
            tracing::info!(qubits = response.num_qubits, "circuit processed");
            json_with_status(&response, StatusCode::OK)
        }
        Ok(Err(err)) if err.is_validation() => {
            tracing::warn!(error = %err, "circuit failed validation");
            json_with_status(&ErrorResponsePayload::from(&err), StatusCode::BAD_REQUEST)
        }
        Ok(Err(err)) => {
            tracing::error!(error = %err, "circuit processing hit an internal consistency failure");
            json_with_status(&ErrorResponsePayload::from(&err), StatusCode::INTERNAL_SERVER_ERROR)
        }
        Err(join_error) => {
            tracing::error!(error = %join_error, "processing task did not complete");
            error_reply(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

// =============================================================================
// 4. Rejection handling
// =============================================================================

pub async fn handle_rejection(rejection: Rejection) -> Result<Response, Infallible> {
    let (status, message) = if rejection.is_not_found() {
        (StatusCode::NOT_FOUND, ENDPOINT_NOT_FOUND_MESSAGE)
    } else if rejection.find::<warp::reject::PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large")
    } else if rejection.find::<warp::reject::LengthRequired>().is_some() {
        (StatusCode::LENGTH_REQUIRED, "Content-Length header is required")
    } else if rejection.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
    } else {
        tracing::error!(?rejection, "unhandled rejection");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    };

    Ok(error_reply(status, message))
}
