use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use super::api::{self, Catalog};
use super::page;
use super::sync::{apply_sync, SyncReport, SYNC_TOKEN_HEADER};
use super::AppState;
use crate::data::DatasetKind;
use crate::error::{Error, Result};
use crate::export::{export_file_name, ExportRequest, PlanDocument};
use crate::quote::{Quote, QuoteRequest};

pub fn router(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();
    Router::new()
        .route("/", get(index).post(index))
        .route("/api/health", get(health))
        .route("/api/courses", get(courses))
        .route("/api/ping", post(ping_courses))
        .route("/api/ping/:kind", post(ping_kind))
        .route("/api/quote", post(quote))
        .route("/export-pdf", post(export_pdf))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Default, Deserialize)]
struct IndexQuery {
    format: Option<String>,
}

async fn index(State(state): State<AppState>, Query(query): Query<IndexQuery>, headers: HeaderMap) -> Result<Response> {
    let catalog = load_catalog(&state).await?;
    if wants_json(&headers, query.format.as_deref()) {
        Ok(Json(catalog).into_response())
    } else {
        Ok(Html(page::index_html(&catalog)?).into_response())
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(api::health_payload())
}

async fn courses(State(state): State<AppState>) -> Result<Json<Catalog>> {
    Ok(Json(load_catalog(&state).await?))
}

async fn ping_courses(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Result<Json<SyncReport>> {
    sync(state, DatasetKind::Courses, &headers, body).await
}

async fn ping_kind(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    match kind.parse::<DatasetKind>() {
        Ok(kind) => sync(state, kind, &headers, body).await.into_response(),
        Err(err) => error_response(StatusCode::NOT_FOUND, &err.to_string()),
    }
}

async fn sync(state: AppState, kind: DatasetKind, headers: &HeaderMap, body: Bytes) -> Result<Json<SyncReport>> {
    let provided = headers
        .get(SYNC_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let report = blocking(move || {
        apply_sync(
            &state.store,
            state.config.sync_token.as_deref(),
            kind,
            provided.as_deref(),
            &body,
        )
    })
    .await?;
    Ok(Json(report))
}

async fn quote(State(state): State<AppState>, body: Bytes) -> Result<Json<Quote>> {
    let request = QuoteRequest::parse(utf8_body(&body)?)?;
    let kind = request.kind();
    let store = state.store.clone();
    let dataset = blocking(move || store.load(kind)).await?;
    Ok(Json(request.quote(&dataset)?))
}

async fn export_pdf(State(state): State<AppState>, body: Bytes) -> Result<Response> {
    let request = ExportRequest::parse(utf8_body(&body)?)?;
    let now = chrono::Local::now();
    let doc = PlanDocument::from_request(&request, &now.format("%d/%m/%Y, %H:%M").to_string());
    let renderer = state.renderer.clone();
    let bytes = blocking(move || renderer.render(&doc)).await?;

    let disposition = format!("attachment; filename=\"{}\"", export_file_name(now.date_naive()));
    let mut response = (StatusCode::OK, bytes).into_response();
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/pdf"));
    if let Ok(value) = HeaderValue::from_str(&disposition) {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }
    Ok(response)
}

async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Route not found")
}

async fn load_catalog(state: &AppState) -> Result<Catalog> {
    let store = state.store.clone();
    blocking(move || api::load_catalog(&store)).await
}

fn utf8_body(body: &[u8]) -> Result<&str> {
    std::str::from_utf8(body).map_err(|err| Error::Validation(format!("request body is not valid UTF-8: {err}")))
}

/// Run store I/O on the blocking pool.
async fn blocking<T, F>(task: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|err| Error::Internal(err.to_string()))?
}

fn wants_json(headers: &HeaderMap, format: Option<&str>) -> bool {
    if let Some(format) = format {
        return format.eq_ignore_ascii_case("json");
    }
    headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|accept| accept.contains("application/json") && !accept.contains("text/html"))
}

pub fn status_for(err: &Error) -> StatusCode {
    match err {
        Error::Auth => StatusCode::UNAUTHORIZED,
        Error::EmptyPayload | Error::Validation(_) => StatusCode::BAD_REQUEST,
        Error::Schema(_)
        | Error::StoreRead { .. }
        | Error::StoreWrite { .. }
        | Error::Export(_)
        | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else {
            warn!(error = %self, status = status.as_u16(), "request rejected");
        }
        error_response(status, &self.to_string())
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    let body = serde_json::json!({
        "status": "error",
        "message": message,
    });
    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_follows_error_category() {
        assert_eq!(status_for(&Error::Auth), StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(&Error::EmptyPayload), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(&Error::Validation("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_for(&Error::store_read("data/courses.csv", "gone")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn json_negotiation() {
        let mut headers = HeaderMap::new();
        assert!(!wants_json(&headers, None));
        assert!(wants_json(&headers, Some("JSON")));
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        assert!(wants_json(&headers, None));
        assert!(!wants_json(&headers, Some("html")));
        headers.insert(header::ACCEPT, HeaderValue::from_static("text/html,application/json;q=0.9"));
        assert!(!wants_json(&headers, None));
    }
}
