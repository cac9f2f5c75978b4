//! JSON generation endpoint.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::error::ErrorBody;
use crate::services::generate::{self, GenerateError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub script: String,
}

fn status_for(err: &GenerateError) -> StatusCode {
    match err {
        GenerateError::EmptyDescription => StatusCode::BAD_REQUEST,
        GenerateError::EmptyResponse | GenerateError::Llm(_) => StatusCode::BAD_GATEWAY,
    }
}

/// `POST /api/generate` — generate a script without touching session state.
pub async fn generate(State(state): State<AppState>, Json(req): Json<GenerateRequest>) -> Response {
    match generate::generate_script(state.llm.as_ref(), &req.description).await {
        Ok(script) => Json(GenerateResponse { script }).into_response(),
        Err(e) => ErrorBody::from_error(&e).into_response_with(status_for(&e)),
    }
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
