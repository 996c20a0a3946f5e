use crate::collaborators::{AssetStore, FormSink};
use crate::state::{NewPage, PageFilter, PageStore, StoreError, UpdatePage};
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use pagecraft_blocks::{VNode, Viewport};
use pagecraft_engine::render_all;
use pagecraft_page::Page;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Shared state behind every route.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PageStore>,
    pub assets: Arc<dyn AssetStore>,
    pub forms: Arc<dyn FormSink>,
}

/// The full HTTP surface.
///
/// `/api/**` and `/preview/**` belong to the authoring side and serve
/// any lifecycle state; `/lp/{slug}` is the public route and serves a
/// page iff it is published — everything else there is a 404.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/pages", get(list_pages).post(create_page))
        .route("/api/pages/:slug", get(get_page).put(update_page))
        .route("/api/pages/:id/publish", post(publish_page))
        .route("/api/pages/:id/archive", post(archive_page))
        .route("/api/pages/:id/clone", post(clone_page))
        .route("/api/pages/:id/submissions", post(submit_form))
        .route("/api/uploads", post(upload_asset))
        .route("/preview/:slug", get(preview_page))
        .route("/lp/:slug", get(public_page))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let (status, details) = match &self {
            StoreError::NotFound => (StatusCode::NOT_FOUND, None),
            StoreError::SlugTaken(_) => (StatusCode::CONFLICT, None),
            StoreError::InvalidSlug(_) => (StatusCode::UNPROCESSABLE_ENTITY, None),
            StoreError::Validation(failures) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                serde_json::to_value(failures).ok(),
            ),
            StoreError::Status(_) => (StatusCode::CONFLICT, None),
        };

        let body = ErrorBody {
            error: self.to_string(),
            details,
        };
        (status, Json(body)).into_response()
    }
}

async fn list_pages(
    State(state): State<AppState>,
    Query(filter): Query<PageFilter>,
) -> Json<Vec<Page>> {
    Json(state.store.list(&filter))
}

async fn create_page(
    State(state): State<AppState>,
    Json(new): Json<NewPage>,
) -> Result<(StatusCode, Json<Page>), StoreError> {
    let page = state.store.create(new)?;
    Ok((StatusCode::CREATED, Json(page)))
}

/// Authoring read path: any lifecycle state, addressed by slug. This is
/// also what the polling preview clients hit every tick.
async fn get_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Page>, StoreError> {
    state.store.get_by_slug(&slug).map(Json).ok_or(StoreError::NotFound)
}

async fn update_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<UpdatePage>,
) -> Result<Json<Page>, StoreError> {
    state.store.update(&id, update).map(Json)
}

async fn publish_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Page>, StoreError> {
    state.store.publish(&id).map(Json)
}

async fn archive_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Page>, StoreError> {
    state.store.archive(&id).map(Json)
}

#[derive(Debug, Deserialize)]
struct ClonePage {
    title: String,
    slug: String,
}

async fn clone_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<ClonePage>,
) -> Result<(StatusCode, Json<Page>), StoreError> {
    let copy = state.store.clone_page(&id, &body.title, &body.slug)?;
    Ok((StatusCode::CREATED, Json(copy)))
}

async fn submit_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(fields): Json<Map<String, Value>>,
) -> Response {
    if state.store.get_by_id(&id).is_none() {
        return StoreError::NotFound.into_response();
    }

    match state.forms.submit(&id, &fields) {
        Ok(receipt) => Json(json!({ "success": true, "id": receipt.id })).into_response(),
        Err(err) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "success": false, "error": err.to_string() })),
        )
            .into_response(),
    }
}

#[derive(Debug, Deserialize)]
struct UploadQuery {
    filename: String,
}

async fn upload_asset(
    State(state): State<AppState>,
    Query(query): Query<UploadQuery>,
    body: Bytes,
) -> Response {
    match state.assets.store(&query.filename, &body) {
        Ok(asset) => Json(asset).into_response(),
        Err(err) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorBody {
                error: err.to_string(),
                details: None,
            }),
        )
            .into_response(),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RenderQuery {
    viewport: Option<Viewport>,
}

/// Rendered page payload for a surface: metadata passthrough plus the
/// ordered node tree at the requested viewport.
#[derive(Debug, Serialize)]
struct RenderedPage {
    slug: String,
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    meta_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    meta_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    og_image: Option<String>,
    viewport: Viewport,
    updated_at: DateTime<Utc>,
    nodes: Vec<VNode>,
}

fn rendered(state: &AppState, page: Page, viewport: Viewport, editable: bool) -> RenderedPage {
    let nodes = render_all(&page.content, state.store.registry(), viewport, editable);
    RenderedPage {
        slug: page.slug,
        title: page.title,
        meta_title: page.meta_title,
        meta_description: page.meta_description,
        og_image: page.og_image,
        viewport,
        updated_at: page.updated_at,
        nodes,
    }
}

/// Preview render: reachable for every lifecycle state.
async fn preview_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<RenderQuery>,
) -> Result<Json<RenderedPage>, StoreError> {
    let page = state.store.get_by_slug(&slug).ok_or(StoreError::NotFound)?;
    let viewport = query.viewport.unwrap_or_default();
    Ok(Json(rendered(&state, page, viewport, false)))
}

/// Public render: published pages only; drafts and archived pages do
/// not exist on this route.
async fn public_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<RenderQuery>,
) -> Result<Json<RenderedPage>, StoreError> {
    let page = state.store.get_by_slug(&slug).ok_or(StoreError::NotFound)?;
    if !page.is_public() {
        return Err(StoreError::NotFound);
    }
    let viewport = query.viewport.unwrap_or_default();
    Ok(Json(rendered(&state, page, viewport, false)))
}
