use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use tracing::{error, info};

use crate::db::user_queries;
use crate::errors::AppError;
use crate::middleware::auth::AuthUser;
use crate::models::UserProfile;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/me", get(me))
}

pub async fn me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<UserProfile>, AppError> {
    info!("GET /users/me - Fetching profile for {}", user_id);
    let user = user_queries::fetch_one(&state.pool, user_id)
        .await
        .map_err(|e| {
            error!("Failed to fetch user {}: {}", user_id, e);
            AppError::Db(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

    Ok(Json(UserProfile {
        id: user.id,
        email: user.email,
        username: user.username,
        balance: user.balance,
    }))
}
