mod config;
mod error;
mod llm;
mod routes;
mod services;
mod state;
mod view;

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::error::ErrorCode;
use crate::llm::GeminiClient;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = ServerConfig::from_env();

    // Missing credentials are fatal: there is no mode without a model.
    let llm = match GeminiClient::from_env() {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(code = e.error_code(), error = %e, "LLM client configuration failed");
            std::process::exit(1);
        }
    };
    tracing::info!(model = llm.model(), "LLM client configured");

    let state = state::AppState::new(Arc::new(llm), config);
    let _pruner = services::session::spawn_session_pruner(state.sessions.clone(), config.session_idle);

    let app = routes::app(state);
    let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(port = config.port, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    tracing::info!(port = config.port, "scriptgen listening");
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server failed");
        std::process::exit(1);
    }
}
