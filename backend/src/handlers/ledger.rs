//! Stock movement handlers
//!
//! Registration is warehouse keeper only. The per-product history is
//! readable by any authenticated user.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::AppError;
use crate::middleware::{require_warehouse_keeper, CurrentUser};
use crate::services::ledger::{
    MovementView, RegisterEntryInput, RegisterExitInput, RegisteredMovement,
};
use crate::services::LedgerService;
use crate::AppState;

/// Register a stock entry from a supplier
pub async fn register_entry(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(body): Json<RegisterEntryInput>,
) -> Result<(StatusCode, Json<RegisteredMovement>), AppError> {
    require_warehouse_keeper(&current_user.0)?;

    let service = LedgerService::new(state.db.clone());
    let registered = service.register_entry(current_user.0.user_id, body).await?;

    Ok((StatusCode::CREATED, Json(registered)))
}

/// Register a stock exit to a sector
pub async fn register_exit(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(body): Json<RegisterExitInput>,
) -> Result<(StatusCode, Json<RegisteredMovement>), AppError> {
    require_warehouse_keeper(&current_user.0)?;

    let service = LedgerService::new(state.db.clone());
    let registered = service.register_exit(current_user.0.user_id, body).await?;

    Ok((StatusCode::CREATED, Json(registered)))
}

/// Movement history for one product, newest first
pub async fn product_movements(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> Result<Json<Vec<MovementView>>, AppError> {
    let service = LedgerService::new(state.db.clone());
    let movements = service.product_movements(product_id).await?;

    Ok(Json(movements))
}
