//! Auth route handlers: register, login, current profile.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::auth::RequireAuth;
use crate::models::User;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Maximum accepted display-name length.
const MAX_NAME_LENGTH: usize = 120;

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterPayload {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

/// Public view of a user, without the password hash.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub role: String,
    pub name: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.into_inner(),
            email: user.email.into_inner(),
            role: user.role.as_str().to_owned(),
            name: user.name,
        }
    }
}

/// Response body for register and login: a bearer token plus the user.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub user: UserResponse,
}

/// Create the auth routes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
}

/// `POST /api/auth/register`
#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<impl IntoResponse> {
    let name = payload.name.unwrap_or_default();
    if name.len() > MAX_NAME_LENGTH {
        return Err(AppError::BadRequest(format!(
            "name must be at most {MAX_NAME_LENGTH} characters"
        )));
    }

    let (user, token) = AuthService::new(state.store(), state.jwt()).register(
        &payload.email,
        &payload.password,
        &name,
    )?;

    Ok((
        StatusCode::CREATED,
        Json(TokenResponse {
            token,
            user: user.into(),
        }),
    ))
}

/// `POST /api/auth/login`
#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<TokenResponse>> {
    let (user, token) =
        AuthService::new(state.store(), state.jwt()).login(&payload.email, &payload.password)?;

    Ok(Json(TokenResponse {
        token,
        user: user.into(),
    }))
}

/// `GET /api/auth/me`
#[instrument(skip_all)]
pub async fn me(RequireAuth(user): RequireAuth) -> Json<UserResponse> {
    Json(UserResponse {
        id: user.id.into_inner(),
        email: user.email.into_inner(),
        role: user.role.as_str().to_owned(),
        name: user.name,
    })
}
