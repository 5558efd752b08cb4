//! Route Definitions
//!
//! Maps URLs to handlers; privileged routes sit behind bearer auth.

use super::{auth::{bearer_auth_middleware, BearerAuth}, handlers::*};
use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Build the API router with all endpoints
pub fn create_router(state: Arc<AppState>, auth: BearerAuth) -> Router {
    let public = Router::new()
        .route("/health", get(health_handler))
        .route("/api/register", post(register_handler))
        .route("/api/user/{user_id}", get(get_user_handler))
        .route("/api/user/{user_id}/stats", get(user_stats_handler))
        .route("/api/games/{game_id}", get(get_game_handler))
        .route("/api/games/{game_id}/leaderboard", get(leaderboard_handler))
        .route("/api/games/{game_id}/results", post(submit_result_handler))
        .route("/api/my-games/{user_id}", get(my_games_handler));

    let protected = Router::new()
        .route("/api/games", post(create_game_handler))
        .route("/api/pro-request", post(pro_request_handler))
        .route("/api/admin/pro-requests", get(list_pro_requests_handler))
        .route("/api/admin/approve-pro", post(decide_pro_handler))
        .route("/api/admin/users", get(list_users_handler))
        .route("/api/admin/block-user", post(block_user_handler))
        .route("/api/admin/stats", get(platform_stats_handler))
        .route_layer(from_fn_with_state(auth, bearer_auth_middleware));

    public
        .merge(protected)
        .with_state(state)
}
