use crate::cache::{ResponseCache, cache_responses};
use crate::error::ApiError;
use app::repositories::{Driver, DriverStore, SessionProvider, User};
use app::tracking::{TrackingSnapshot, mock_snapshot};
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::COOKIE},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;

pub const SESSION_COOKIE: &str = "session";

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<dyn SessionProvider>,
    pub drivers: Arc<dyn DriverStore>,
}

#[derive(Serialize)]
struct AuthResponse {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<User>,
}

#[derive(Serialize)]
struct Empty {}

pub fn create_router(state: AppState, track_cache_ttl: Duration) -> Router {
    let track_cache = ResponseCache::new(track_cache_ttl);

    Router::new()
        .route(
            "/.well-known/appspecific/com.chrome.devtools.json",
            get(devtools_probe),
        )
        .route("/api/auth/me", get(auth_me))
        .route("/api/drivers", get(list_drivers))
        .route(
            "/api/track/mock",
            get(track_mock).layer(middleware::from_fn_with_state(track_cache, cache_responses)),
        )
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

async fn devtools_probe() -> Json<Empty> {
    Json(Empty {})
}

async fn auth_me(State(state): State<AppState>, headers: HeaderMap) -> Result<Response, ApiError> {
    let user = state.sessions.current_user(session_token(&headers)).await?;

    let response = match user {
        Some(user) => Json(AuthResponse {
            ok: true,
            user: Some(user),
        })
        .into_response(),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(AuthResponse {
                ok: false,
                user: None,
            }),
        )
            .into_response(),
    };

    Ok(response)
}

async fn list_drivers(State(state): State<AppState>) -> Result<Json<Vec<Driver>>, ApiError> {
    Ok(Json(state.drivers.list_active().await?))
}

async fn track_mock() -> Json<TrackingSnapshot> {
    Json(mock_snapshot())
}

/// Value of the session cookie, if the request carries one.
fn session_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value)
}
