//! Request Handlers
//!
//! Thin adapters: validate the request shape, call one service operation,
//! serialize the result.

use std::sync::Arc;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Extension, Json,
};
use crate::models::admin::PlatformStats;
use crate::models::game::{CreateGameRequest, GameDetail, GameResult, SubmitResultRequest};
use crate::models::pro_request::{Decision, DecideRequest, ProRequestView};
use crate::models::user::{RegisterUserRequest, User, UserOverview, UserStats};
use crate::services::ServiceFactory;
use crate::utils::helpers::build_share_url;
use super::errors::{ApiError, ResultExt};
use super::middleware::RequestId;
use super::models::*;

/// Shared application state
pub struct AppState {
    pub services: ServiceFactory,
    pub web_app_url: String,
}

type ApiResult<T> = Result<Json<T>, ApiError>;

/// Health check handler
/// GET /health
pub async fn health_handler(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    let health = state.services.health_check().await;
    let (status, database) = if health.is_healthy() {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
    };

    let issues = health.get_issues();
    if !issues.is_empty() {
        tracing::warn!(issues = ?issues, "Health check reported issues");
    }

    (
        status,
        Json(HealthResponse {
            status: if health.is_healthy() { "ok" } else { "degraded" }.to_string(),
            database: database.to_string(),
            version: crate::VERSION.to_string(),
        }),
    )
}

/// POST /api/register
pub async fn register_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegisterUserRequest>, JsonRejection>,
) -> ApiResult<MessageResponse> {
    let Json(body) = payload.with_request_id(&request_id)?;

    state.services.user_service.register(body).await.with_request_id(&request_id)?;
    Ok(Json(MessageResponse::ok("User registered")))
}

/// GET /api/user/{user_id}
pub async fn get_user_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<User> {
    let Path(user_id) = path.with_request_id(&request_id)?;

    let user = state.services.user_service.get_user(user_id).await.with_request_id(&request_id)?;
    Ok(Json(user))
}

/// GET /api/user/{user_id}/stats
pub async fn user_stats_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<UserStats> {
    let Path(user_id) = path.with_request_id(&request_id)?;

    let stats = state.services.user_service.user_stats(user_id).await.with_request_id(&request_id)?;
    Ok(Json(stats))
}

/// POST /api/games
pub async fn create_game_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateGameBody>, JsonRejection>,
) -> ApiResult<CreateGameResponse> {
    let Json(body) = payload.with_request_id(&request_id)?;

    let game_type = body.game_type.trim();
    let title = body.title.trim();
    if game_type.is_empty() {
        return Err(ApiError::validation(&request_id, "game_type is required"));
    }
    if title.is_empty() {
        return Err(ApiError::validation(&request_id, "title is required"));
    }
    if !body.questions.is_array() {
        return Err(ApiError::validation(&request_id, "questions must be a JSON array"));
    }

    let request = CreateGameRequest {
        creator_id: body.creator_id,
        game_type: game_type.to_string(),
        title: title.to_string(),
        description: body.description,
        questions: body.questions,
        settings: body.settings,
        is_pro_only: body.is_pro_only,
    };

    let created = state.services.game_service.create(request).await.with_request_id(&request_id)?;
    Ok(Json(CreateGameResponse {
        success: true,
        game_id: created.game_id,
        share_url: created.share_url,
    }))
}

/// GET /api/games/{game_id}
///
/// Every successful call counts as one play.
pub async fn get_game_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<GameDetail> {
    let Path(game_id) = path.with_request_id(&request_id)?;

    let mut game = state.services.game_service.fetch_for_play(&game_id).await.with_request_id(&request_id)?;
    if game.settings.is_none() {
        game.settings = Some(serde_json::json!({}));
    }
    Ok(Json(game))
}

/// GET /api/my-games/{user_id}
pub async fn my_games_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Vec<OwnedGame>> {
    let Path(user_id) = path.with_request_id(&request_id)?;

    let games = state.services.game_service.list_by_owner(user_id).await.with_request_id(&request_id)?;
    let games = games
        .into_iter()
        .map(|game| {
            let share_url = build_share_url(&state.web_app_url, &game.game_id)
                .map_err(|e| ApiError::from_domain(&request_id, e.into()))?;
            Ok(OwnedGame { game, share_url })
        })
        .collect::<Result<Vec<_>, ApiError>>()?;

    Ok(Json(games))
}

/// POST /api/games/{game_id}/results
pub async fn submit_result_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<SubmitResultBody>, JsonRejection>,
) -> Result<(StatusCode, Json<GameResult>), ApiError> {
    let Path(game_id) = path.with_request_id(&request_id)?;
    let Json(body) = payload.with_request_id(&request_id)?;

    let result = state
        .services
        .game_service
        .submit_result(SubmitResultRequest {
            game_id,
            player_id: body.player_id,
            player_name: body.player_name,
            score: body.score,
        })
        .await
        .with_request_id(&request_id)?;

    Ok((StatusCode::CREATED, Json(result)))
}

/// GET /api/games/{game_id}/leaderboard?limit=
pub async fn leaderboard_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<LeaderboardQuery>, QueryRejection>,
) -> ApiResult<Vec<GameResult>> {
    let Path(game_id) = path.with_request_id(&request_id)?;
    let Query(params) = query.with_request_id(&request_id)?;

    let results = state
        .services
        .game_service
        .leaderboard(&game_id, params.limit)
        .await
        .with_request_id(&request_id)?;
    Ok(Json(results))
}

/// POST /api/pro-request
pub async fn pro_request_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ProRequestBody>, JsonRejection>,
) -> ApiResult<ProRequestCreated> {
    let Json(body) = payload.with_request_id(&request_id)?;

    let request = state
        .services
        .pro_request_service
        .create_request(body.user_id)
        .await
        .with_request_id(&request_id)?;

    Ok(Json(ProRequestCreated {
        success: true,
        message: "Request submitted".to_string(),
        request_id: request.id,
        status: request.status,
    }))
}

/// GET /api/admin/pro-requests
pub async fn list_pro_requests_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Vec<ProRequestView>> {
    let requests = state.services.pro_request_service.list_requests().await.with_request_id(&request_id)?;
    Ok(Json(requests))
}

/// POST /api/admin/approve-pro
pub async fn decide_pro_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<DecideBody>, JsonRejection>,
) -> ApiResult<DecisionResponse> {
    let Json(body) = payload.with_request_id(&request_id)?;

    let decision = body
        .action
        .as_deref()
        .unwrap_or("approve")
        .parse::<Decision>()
        .with_request_id(&request_id)?;

    let request = state
        .services
        .pro_request_service
        .decide(DecideRequest {
            request_id: body.request_id,
            admin_id: body.admin_id,
            decision,
            note: body.admin_note,
        })
        .await
        .with_request_id(&request_id)?;

    let message = match decision {
        Decision::Approve => "PRO status approved",
        Decision::Reject => "PRO request rejected",
    };

    Ok(Json(DecisionResponse {
        success: true,
        message: message.to_string(),
        request_id: request.id,
        status: request.status,
    }))
}

/// GET /api/admin/users?limit=&offset=
pub async fn list_users_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    query: Result<Query<UsersQuery>, QueryRejection>,
) -> ApiResult<Vec<UserOverview>> {
    let Query(params) = query.with_request_id(&request_id)?;

    let users = state
        .services
        .admin_service
        .list_users(params.limit, params.offset)
        .await
        .with_request_id(&request_id)?;
    Ok(Json(users))
}

/// POST /api/admin/block-user
pub async fn block_user_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BlockUserBody>, JsonRejection>,
) -> ApiResult<MessageResponse> {
    let Json(body) = payload.with_request_id(&request_id)?;

    state
        .services
        .admin_service
        .set_blocked(body.admin_id, body.user_id, body.blocked)
        .await
        .with_request_id(&request_id)?;

    let message = if body.blocked { "User blocked" } else { "User unblocked" };
    Ok(Json(MessageResponse::ok(message)))
}

/// GET /api/admin/stats
pub async fn platform_stats_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<PlatformStats> {
    let stats = state.services.admin_service.platform_stats().await.with_request_id(&request_id)?;
    Ok(Json(stats))
}
