use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use tracing::{error, info, warn};

use crate::errors::AppError;
use crate::models::{AuthResponse, LoginRequest, SignupRequest};
use crate::services;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}

pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    info!("POST /auth/signup - Creating account for {}", req.email);
    let response = services::auth_service::signup(&state.pool, &state.config, req)
        .await
        .map_err(|e| {
            match &e {
                AppError::Conflict(_) | AppError::Validation(_) => warn!("Signup rejected: {}", e),
                _ => error!("Signup failed: {}", e),
            }
            e
        })?;
    Ok(Json(response))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    info!("POST /auth/login - Login attempt for {}", req.email);
    let response = services::auth_service::login(&state.pool, &state.config, req)
        .await
        .map_err(|e| {
            match &e {
                AppError::AuthFailure(_) => warn!("Login rejected: {}", e),
                _ => error!("Login failed: {}", e),
            }
            e
        })?;
    Ok(Json(response))
}
