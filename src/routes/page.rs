//! Page routes: render the form and accept submissions.
//!
//! DESIGN
//! ======
//! The browser is identified by an HTTP-only session cookie holding a UUID.
//! A missing or malformed cookie gets a fresh session, and every response
//! refreshes the cookie's max-age. `POST /` only starts
//! the generation and redirects back; the rendered page auto-refreshes until
//! the session leaves `InFlight`.

use axum::Form;
use axum::extract::State;
use axum::http::header;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use time::Duration;
use uuid::Uuid;

use crate::services::session;
use crate::state::AppState;
use crate::view;

pub const SESSION_COOKIE_NAME: &str = "scriptgen_session";

#[derive(Debug, Deserialize)]
pub struct PromptForm {
    #[serde(default)]
    pub prompt: String,
}

/// Resolve the caller's session and (re)issue its cookie.
///
/// The cookie is re-added on every request to restart its max-age.
fn resolve_session(state: &AppState, jar: CookieJar) -> (Uuid, CookieJar) {
    let id = jar
        .get(SESSION_COOKIE_NAME)
        .and_then(|c| Uuid::parse_str(c.value()).ok())
        .unwrap_or_else(Uuid::new_v4);

    let max_age = i64::try_from(state.config.session_idle.as_secs()).unwrap_or(i64::MAX);
    let cookie = Cookie::build((SESSION_COOKIE_NAME, id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.cookie_secure)
        .max_age(Duration::seconds(max_age));
    (id, jar.add(cookie))
}

/// `GET /` — render the page for the caller's session.
pub async fn show(State(state): State<AppState>, jar: CookieJar) -> Response {
    let (session_id, jar) = resolve_session(&state, jar);
    let form = state.sessions.snapshot(session_id).await;
    let html = view::render_page(&form);
    (jar, [(header::CACHE_CONTROL, "no-store")], Html(html)).into_response()
}

/// `POST /` — start a generation for the submitted prompt, then redirect to `/`.
pub async fn submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<PromptForm>,
) -> Response {
    let (session_id, jar) = resolve_session(&state, jar);
    // Rejections leave the session untouched; the redirect shows its current state.
    let _ = session::start_submission(&state, session_id, &form.prompt).await;
    (jar, Redirect::to("/")).into_response()
}

#[cfg(test)]
#[path = "page_test.rs"]
mod tests;
