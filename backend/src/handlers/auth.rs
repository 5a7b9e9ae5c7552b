//! Authentication handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use crate::error::AppError;
use crate::middleware::{require_warehouse_keeper, CurrentUser};
use crate::services::auth::{AuthTokens, RegisterResponse, RegisterUserInput};
use crate::services::AuthService;
use crate::AppState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Login endpoint handler
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AuthTokens>, AppError> {
    let auth_service = AuthService::new(state.db.clone(), &state.config);
    let tokens = auth_service.login(&body.email, &body.password).await?;

    Ok(Json(tokens))
}

/// Register user endpoint handler
///
/// Account creation is reserved for the warehouse keeper; there is no
/// open self-registration.
pub async fn register(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(body): Json<RegisterUserInput>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    require_warehouse_keeper(&current_user.0)?;

    let auth_service = AuthService::new(state.db.clone(), &state.config);
    let response = auth_service.register_user(body).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Token refresh endpoint handler
pub async fn refresh(
    State(state): State<AppState>,
    Json(body): Json<RefreshRequest>,
) -> Result<Json<AuthTokens>, AppError> {
    let auth_service = AuthService::new(state.db.clone(), &state.config);
    let tokens = auth_service.refresh(&body.refresh_token).await?;

    Ok(Json(tokens))
}
