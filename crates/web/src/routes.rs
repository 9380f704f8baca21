//! Axum routes for the certificate page and JSON API.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use certify_core::config::CertifyConfig;
use certify_core::lookup::{CertificateLookup, GridSource, LookupState};
use certify_core::models::query::Query as LookupQuery;
use serde::Deserialize;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::presenter;

/// Shared state for all routes. Immutable after startup.
pub struct AppState {
    pub config: CertifyConfig,
    pub lookup: CertificateLookup,
}

impl AppState {
    pub fn new(config: CertifyConfig, source: Arc<dyn GridSource>) -> Self {
        let lookup = CertificateLookup::new(source, config.sheets.clone());
        Self { config, lookup }
    }
}

/// Raw query string parameters.
#[derive(Debug, Deserialize)]
pub struct CertificateParams {
    pub id: Option<String>,
    pub sheet: Option<String>,
}

impl From<CertificateParams> for LookupQuery {
    fn from(params: CertificateParams) -> Self {
        LookupQuery::from_params(params.id, params.sheet)
    }
}

/// Build the certify router.
pub fn router(state: Arc<AppState>) -> Router {
    let assets_dir = state
        .config
        .branding
        .assets_dir
        .clone()
        .filter(|dir| !dir.is_empty());

    let mut app = Router::new()
        .route("/", get(certificate_page))
        .route("/api/certificate", get(certificate_json))
        .route("/healthz", get(healthz));

    if let Some(dir) = assets_dir {
        app = app.nest_service("/assets", ServeDir::new(dir));
    }

    app.with_state(state)
}

/// Add the response headers every page carries.
pub fn with_security_headers(app: Router) -> Router {
    app.layer(SetResponseHeaderLayer::overriding(
        axum::http::header::X_FRAME_OPTIONS,
        HeaderValue::from_static("DENY"),
    ))
    .layer(SetResponseHeaderLayer::overriding(
        axum::http::header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    ))
    .layer(SetResponseHeaderLayer::overriding(
        axum::http::header::REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    ))
}

// -- Handlers --

async fn certificate_page(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CertificateParams>,
) -> Response {
    let query = LookupQuery::from(params);
    let outcome = state.lookup.run(&query).await;
    presenter::render_state(&state.config, &outcome)
}

async fn certificate_json(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CertificateParams>,
) -> Response {
    let query = LookupQuery::from(params);
    match state.lookup.run(&query).await {
        LookupState::Resolved { sheet, record } => {
            Json(serde_json::json!({ "sheet": sheet, "record": record })).into_response()
        }
        LookupState::NotFound { sheet } => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "not found", "sheet": sheet })),
        )
            .into_response(),
        LookupState::Idle | LookupState::Loading { .. } => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "missing id" })),
        )
            .into_response(),
    }
}

async fn healthz() -> &'static str {
    "ok"
}
