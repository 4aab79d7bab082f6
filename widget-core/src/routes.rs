//! HTTP boundary: the `/widget` mock API plus favorites endpoints.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tracing::{debug, warn};
use widget_common::SortOrder;

use crate::catalog::Catalog;
use crate::config::ParamPolicy;
use crate::delay::Delay;
use crate::favorites::FavoritesStore;
use crate::query::{self, QueryError, QueryParams};

pub struct WidgetRouteState {
    pub catalog: Arc<Catalog>,
    pub favorites: FavoritesStore,
    /// Applied before every successful `/widget` response
    pub latency: Arc<dyn Delay>,
    pub default_page_size: usize,
    pub param_policy: ParamPolicy,
}

#[derive(Serialize)]
struct ErrorMessage {
    message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FavoritesSummary {
    ids: Vec<String>,
    last_added: Option<String>,
    count: usize,
}

#[derive(Serialize)]
struct FavoriteStatus {
    id: String,
    favorite: bool,
    loading: bool,
}

#[derive(Serialize)]
struct ToggleResponse {
    #[serde(flatten)]
    status: FavoriteStatus,
    /// False when a toggle for this id was already in flight
    accepted: bool,
}

pub fn create_router(state: Arc<WidgetRouteState>) -> Router {
    Router::new()
        .route("/widget", get(get_widget))
        .route("/tags", get(list_tags))
        .route("/favorites", get(list_favorites).delete(clear_favorites))
        .route("/favorites/:id", get(favorite_status))
        .route("/favorites/:id/toggle", post(toggle_favorite))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn message(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorMessage {
            message: message.into(),
        }),
    )
        .into_response()
}

fn query_error_to_response(err: QueryError) -> Response {
    match err {
        QueryError::NotFound(id) => {
            debug!("Widget {id} not found");
            message(StatusCode::NOT_FOUND, "Widget not found")
        }
        err @ QueryError::InvalidParameter { .. } => {
            warn!("Rejected widget query: {err}");
            message(StatusCode::BAD_REQUEST, err.to_string())
        }
    }
}

/// Read a positive integer parameter.
///
/// Missing or empty means `default`. Anything else that is not a whole
/// number of at least 1 is either replaced by `default` or rejected,
/// depending on the policy.
fn positive_param(
    params: &HashMap<String, String>,
    name: &'static str,
    default: usize,
    policy: ParamPolicy,
) -> Result<usize, QueryError> {
    let raw = match params.get(name).map(|v| v.trim()) {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Ok(default),
    };
    match raw.parse::<usize>() {
        Ok(value) if value >= 1 => Ok(value),
        _ => match policy {
            ParamPolicy::Coerce => Ok(default),
            ParamPolicy::Strict => Err(QueryError::InvalidParameter {
                name,
                value: raw.to_string(),
            }),
        },
    }
}

fn sort_param(
    params: &HashMap<String, String>,
    policy: ParamPolicy,
) -> Result<SortOrder, QueryError> {
    let raw = match params.get("sort").map(|v| v.trim()) {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Ok(SortOrder::default()),
    };
    match (raw.parse::<SortOrder>(), policy) {
        (Ok(sort), _) => Ok(sort),
        (Err(_), ParamPolicy::Coerce) => Ok(SortOrder::default()),
        (Err(_), ParamPolicy::Strict) => Err(QueryError::InvalidParameter {
            name: "sort",
            value: raw.to_string(),
        }),
    }
}

/// Build list query parameters from the raw query string map.
pub fn parse_list_params(
    params: &HashMap<String, String>,
    default_page_size: usize,
    policy: ParamPolicy,
) -> Result<QueryParams, QueryError> {
    let tags: Vec<String> = params
        .get("tags")
        .map(|csv| {
            csv.split(',')
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Ok(QueryParams::new(positive_param(
        params,
        "pageSize",
        default_page_size,
        policy,
    )?)
    .with_search(params.get("search").cloned().unwrap_or_default())
    .with_tags(tags)
    .with_sort(sort_param(params, policy)?)
    .with_page(positive_param(params, "page", 1, policy)?))
}

/// `GET /widget?id=...` for one widget, otherwise a filtered list.
async fn get_widget(
    State(state): State<Arc<WidgetRouteState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Some(id) = params.get("id").filter(|id| !id.is_empty()) {
        return match query::find_by_id(state.catalog.widgets(), id) {
            Ok(widget) => {
                let widget = widget.clone();
                state.latency.wait().await;
                Json(widget).into_response()
            }
            Err(err) => query_error_to_response(err),
        };
    }

    let query_params =
        match parse_list_params(&params, state.default_page_size, state.param_policy) {
            Ok(query_params) => query_params,
            Err(err) => return query_error_to_response(err),
        };

    let result = query::query(state.catalog.widgets(), &query_params);
    debug!(
        "Widget query matched {} of {} (page {}, size {})",
        result.total,
        state.catalog.len(),
        result.page,
        result.page_size
    );
    state.latency.wait().await;
    Json(result).into_response()
}

async fn list_tags(State(state): State<Arc<WidgetRouteState>>) -> Response {
    Json(state.catalog.available_tags()).into_response()
}

async fn list_favorites(State(state): State<Arc<WidgetRouteState>>) -> Response {
    let snapshot = state.favorites.snapshot();
    Json(FavoritesSummary {
        ids: snapshot.favorite_ids().to_vec(),
        last_added: snapshot.last_added().map(str::to_string),
        count: snapshot.count(),
    })
    .into_response()
}

fn status_of(favorites: &FavoritesStore, id: String) -> FavoriteStatus {
    let snapshot = favorites.snapshot();
    FavoriteStatus {
        favorite: snapshot.is_favorite(&id),
        loading: snapshot.is_loading(&id),
        id,
    }
}

async fn favorite_status(
    State(state): State<Arc<WidgetRouteState>>,
    Path(id): Path<String>,
) -> Response {
    Json(status_of(&state.favorites, id)).into_response()
}

/// Start a toggle and answer right away; the change lands when the
/// simulated round-trip finishes.
async fn toggle_favorite(
    State(state): State<Arc<WidgetRouteState>>,
    Path(id): Path<String>,
) -> Response {
    if let Err(err) = query::find_by_id(state.catalog.widgets(), &id) {
        return query_error_to_response(err);
    }

    let accepted = state.favorites.toggle(&id).is_some();
    let status = status_of(&state.favorites, id);
    (StatusCode::ACCEPTED, Json(ToggleResponse { status, accepted })).into_response()
}

async fn clear_favorites(State(state): State<Arc<WidgetRouteState>>) -> Response {
    state.favorites.clear();
    StatusCode::NO_CONTENT.into_response()
}

async fn health() -> &'static str {
    "ok"
}
