//! Fixed-TTL response memoization for idempotent GET routes.
//!
//! The first successful response for a path is buffered and replayed to every
//! request for that path until it is `ttl` old. The query string is not part
//! of the key. Non-success responses and non-GET requests pass through
//! untouched.

use axum::{
    body::{Body, Bytes},
    extract::{Request, State},
    http::{HeaderMap, HeaderValue, Method, StatusCode, header::CACHE_CONTROL},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

const MAX_CACHED_BODY: usize = 1024 * 1024;

#[derive(Clone)]
pub struct ResponseCache {
    ttl: Duration,
    entries: Arc<Mutex<HashMap<String, CachedResponse>>>,
}

#[derive(Clone)]
struct CachedResponse {
    stored_at: Instant,
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn get(&self, key: &str) -> Option<CachedResponse> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        match entries.get(key) {
            Some(hit) if hit.stored_at.elapsed() < self.ttl => Some(hit.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    fn put(&self, key: String, entry: CachedResponse) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.retain(|_, e| e.stored_at.elapsed() < self.ttl);
        entries.insert(key, entry);
    }
}

impl CachedResponse {
    fn to_response(&self) -> Response {
        let mut response = Response::new(Body::from(self.body.clone()));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers.clone();
        response
    }
}

pub async fn cache_responses(
    State(cache): State<ResponseCache>,
    req: Request,
    next: Next,
) -> Response {
    if req.method() != Method::GET {
        return next.run(req).await;
    }

    let key = req.uri().path().to_string();

    if let Some(hit) = cache.get(&key) {
        debug!("Serving cached response for {}", key);
        return hit.to_response();
    }

    let response = next.run(req).await;
    if !response.status().is_success() {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let body = match axum::body::to_bytes(body, MAX_CACHED_BODY).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Failed to buffer response for {}: {}", key, e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    if let Ok(value) = HeaderValue::from_str(&format!("public, max-age={}", cache.ttl.as_secs()))
    {
        parts.headers.insert(CACHE_CONTROL, value);
    }

    let entry = CachedResponse {
        stored_at: Instant::now(),
        status: parts.status,
        headers: parts.headers.clone(),
        body: body.clone(),
    };
    cache.put(key, entry);

    Response::from_parts(parts, Body::from(body))
}
