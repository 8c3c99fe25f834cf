//! REST handlers
//!
//! Each handler parses the payload, delegates to the engine, and lets
//! `ApiError` turn rejections into status codes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use engine::core::projector;
use engine::{EngineError, ItemId, MealSlot, Projection, UserProfile, VoterId};
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::types::{
    AddFlexibleRequest, AddSundayRequest, CreatedResponse, RegisterRequest, ViewerQuery,
    VoteRequest, VoteResponse,
};

fn voter(id: &str) -> ApiResult<VoterId> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ApiError::BadRequest("user id must not be empty".into()));
    }
    Ok(VoterId::new(id))
}

pub async fn register_user(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Json<CreatedResponse>> {
    let id = voter(&req.id)?;
    state
        .directory
        .register(
            id.clone(),
            UserProfile {
                nickname: req.nickname,
                email: req.email,
            },
        )
        .await;
    debug!(user = %id, "user registered");
    Ok(Json(CreatedResponse { id: id.to_string() }))
}

pub async fn add_sunday(
    State(state): State<AppState>,
    Json(req): Json<AddSundayRequest>,
) -> ApiResult<Json<CreatedResponse>> {
    let voter = voter(&req.user)?;
    let id = state.voting.add_sunday(&voter, &req.name).await?;
    Ok(Json(CreatedResponse { id: id.to_string() }))
}

pub async fn add_flexible(
    State(state): State<AppState>,
    Json(req): Json<AddFlexibleRequest>,
) -> ApiResult<Json<CreatedResponse>> {
    let voter = voter(&req.user)?;
    let slot = req
        .meal
        .as_deref()
        .map(str::parse::<MealSlot>)
        .transpose()
        .map_err(EngineError::from)?;
    let id = state
        .voting
        .add_flexible(&voter, &req.name, slot, req.date)
        .await?;
    Ok(Json(CreatedResponse { id: id.to_string() }))
}

pub async fn toggle_vote(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<VoteRequest>,
) -> ApiResult<Json<VoteResponse>> {
    let voter = voter(&req.user)?;
    let op = state.voting.toggle_vote(&voter, &ItemId::new(id)).await?;
    Ok(Json(VoteResponse { op }))
}

pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ViewerQuery>,
) -> ApiResult<StatusCode> {
    let voter = voter(&query.user)?;
    state.voting.delete(&voter, &ItemId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// One-shot projection for polling clients; `/ws` serves the same view
/// as a stream
pub async fn view(
    State(state): State<AppState>,
    Query(query): Query<ViewerQuery>,
) -> ApiResult<Json<Projection>> {
    let voter = voter(&query.user)?;
    let now = state.clock.now();
    let view_date = query.date.unwrap_or_else(|| now.date_naive());
    let items = state.voting.watch_items().borrow().clone();
    Ok(Json(projector::project(&voter, view_date, &items, now)))
}
