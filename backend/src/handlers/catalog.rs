//! Catalog handlers for categories, suppliers and sectors
//!
//! Listing and lookup are open to any authenticated user; mutations are
//! restricted to the warehouse keeper.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::AppError;
use crate::middleware::{require_warehouse_keeper, CurrentUser};
use crate::models::{Category, Sector, Supplier};
use crate::services::catalog::{CategoryInput, SectorInput, SupplierInput};
use crate::services::CatalogService;
use crate::AppState;

// ----------------------------------------------------------------------
// Categories
// ----------------------------------------------------------------------

pub async fn create_category(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(body): Json<CategoryInput>,
) -> Result<(StatusCode, Json<Category>), AppError> {
    require_warehouse_keeper(&current_user.0)?;

    let service = CatalogService::new(state.db.clone());
    let category = service.create_category(body).await?;

    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, AppError> {
    let service = CatalogService::new(state.db.clone());
    let categories = service.list_categories().await?;

    Ok(Json(categories))
}

pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Category>, AppError> {
    let service = CatalogService::new(state.db.clone());
    let category = service.get_category(id).await?;

    Ok(Json(category))
}

pub async fn update_category(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(body): Json<CategoryInput>,
) -> Result<Json<Category>, AppError> {
    require_warehouse_keeper(&current_user.0)?;

    let service = CatalogService::new(state.db.clone());
    let category = service.update_category(id, body).await?;

    Ok(Json(category))
}

pub async fn delete_category(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    require_warehouse_keeper(&current_user.0)?;

    let service = CatalogService::new(state.db.clone());
    service.delete_category(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// ----------------------------------------------------------------------
// Suppliers
// ----------------------------------------------------------------------

pub async fn create_supplier(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(body): Json<SupplierInput>,
) -> Result<(StatusCode, Json<Supplier>), AppError> {
    require_warehouse_keeper(&current_user.0)?;

    let service = CatalogService::new(state.db.clone());
    let supplier = service.create_supplier(body).await?;

    Ok((StatusCode::CREATED, Json(supplier)))
}

pub async fn list_suppliers(
    State(state): State<AppState>,
) -> Result<Json<Vec<Supplier>>, AppError> {
    let service = CatalogService::new(state.db.clone());
    let suppliers = service.list_suppliers().await?;

    Ok(Json(suppliers))
}

pub async fn get_supplier(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Supplier>, AppError> {
    let service = CatalogService::new(state.db.clone());
    let supplier = service.get_supplier(id).await?;

    Ok(Json(supplier))
}

pub async fn update_supplier(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(body): Json<SupplierInput>,
) -> Result<Json<Supplier>, AppError> {
    require_warehouse_keeper(&current_user.0)?;

    let service = CatalogService::new(state.db.clone());
    let supplier = service.update_supplier(id, body).await?;

    Ok(Json(supplier))
}

pub async fn delete_supplier(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    require_warehouse_keeper(&current_user.0)?;

    let service = CatalogService::new(state.db.clone());
    service.delete_supplier(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// ----------------------------------------------------------------------
// Sectors
// ----------------------------------------------------------------------

pub async fn create_sector(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(body): Json<SectorInput>,
) -> Result<(StatusCode, Json<Sector>), AppError> {
    require_warehouse_keeper(&current_user.0)?;

    let service = CatalogService::new(state.db.clone());
    let sector = service.create_sector(body).await?;

    Ok((StatusCode::CREATED, Json(sector)))
}

pub async fn list_sectors(State(state): State<AppState>) -> Result<Json<Vec<Sector>>, AppError> {
    let service = CatalogService::new(state.db.clone());
    let sectors = service.list_sectors().await?;

    Ok(Json(sectors))
}

pub async fn get_sector(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Sector>, AppError> {
    let service = CatalogService::new(state.db.clone());
    let sector = service.get_sector(id).await?;

    Ok(Json(sector))
}

pub async fn update_sector(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(body): Json<SectorInput>,
) -> Result<Json<Sector>, AppError> {
    require_warehouse_keeper(&current_user.0)?;

    let service = CatalogService::new(state.db.clone());
    let sector = service.update_sector(id, body).await?;

    Ok(Json(sector))
}

pub async fn delete_sector(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    require_warehouse_keeper(&current_user.0)?;

    let service = CatalogService::new(state.db.clone());
    service.delete_sector(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
