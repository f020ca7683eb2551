use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use sqlx::PgPool;
use tracing::{info, warn};

use crate::config::Config;
use crate::db::user_queries;
use crate::errors::AppError;
use crate::middleware::auth::Claims;
use crate::models::{AuthResponse, LoginRequest, SignupRequest, User};

/// Create an account with the default virtual balance and hand back a token.
/// A duplicate email surfaces as a conflict the signup form can display.
pub async fn signup(
    pool: &PgPool,
    config: &Config,
    req: SignupRequest,
) -> Result<AuthResponse, AppError> {
    if req.email.trim().is_empty() || req.username.trim().is_empty() {
        return Err(AppError::Validation("email and username are required".into()));
    }
    if req.password.len() < 8 {
        return Err(AppError::Validation("password must be at least 8 characters".into()));
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(req.password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("password hashing failed: {}", e)))?
        .to_string();

    let user = user_queries::create(pool, req.email.trim(), req.username.trim(), &password_hash)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint().is_some() {
                    warn!("Signup rejected: email {} already registered", req.email);
                    return AppError::Conflict("Email already registered".into());
                }
            }
            AppError::Db(e)
        })?;

    info!("New user {} signed up with starting balance {}", user.username, user.balance);
    issue_token(&user, config)
}

pub async fn login(
    pool: &PgPool,
    config: &Config,
    req: LoginRequest,
) -> Result<AuthResponse, AppError> {
    let user = user_queries::fetch_by_email(pool, req.email.trim())
        .await?
        .ok_or_else(|| AppError::AuthFailure("Invalid email or password".into()))?;

    let parsed = PasswordHash::new(&user.password_hash)
        .map_err(|e| AppError::Internal(format!("stored password hash is invalid: {}", e)))?;

    if Argon2::default()
        .verify_password(req.password.as_bytes(), &parsed)
        .is_err()
    {
        return Err(AppError::AuthFailure("Invalid email or password".into()));
    }

    issue_token(&user, config)
}

fn issue_token(user: &User, config: &Config) -> Result<AuthResponse, AppError> {
    let exp = (Utc::now() + Duration::hours(config.jwt_expiry_hours)).timestamp();
    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("token encoding failed: {}", e)))?;

    Ok(AuthResponse {
        token,
        user_id: user.id,
        email: user.email.clone(),
        username: user.username.clone(),
    })
}
