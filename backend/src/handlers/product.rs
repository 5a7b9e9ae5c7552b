//! Product handlers
//!
//! The listing is public so anyone can browse the catalog; everything
//! else requires authentication, and mutations require the warehouse
//! keeper role. Stock quantities are read-only here, the ledger routes
//! are the only way to change them.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::middleware::{require_warehouse_keeper, CurrentUser};
use crate::models::Product;
use crate::services::product::{CreateProductInput, ProductFilter, UpdateProductInput};
use crate::services::{ProductService, StorageService};
use crate::AppState;
use shared::types::PaginatedResponse;

#[derive(Serialize)]
pub struct ImageUploadResponse {
    pub product_id: Uuid,
    pub image_path: String,
}

pub async fn create_product(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(body): Json<CreateProductInput>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    require_warehouse_keeper(&current_user.0)?;

    let service = ProductService::new(state.db.clone());
    let product = service.create_product(body).await?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// Public product listing with optional search and pagination
pub async fn list_products(
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> Result<Json<PaginatedResponse<Product>>, AppError> {
    let service = ProductService::new(state.db.clone());
    let page = service.list_products(filter).await?;

    Ok(Json(page))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Product>, AppError> {
    let service = ProductService::new(state.db.clone());
    let product = service.get_product(id).await?;

    Ok(Json(product))
}

pub async fn update_product(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateProductInput>,
) -> Result<Json<Product>, AppError> {
    require_warehouse_keeper(&current_user.0)?;

    let service = ProductService::new(state.db.clone());
    let product = service.update_product(id, body).await?;

    Ok(Json(product))
}

pub async fn delete_product(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    require_warehouse_keeper(&current_user.0)?;

    let service = ProductService::new(state.db.clone());
    let image_path = service.delete_product(id).await?;

    if let Some(path) = image_path {
        let storage = StorageService::new(&state.config.media);
        storage.delete_image(&path).await?;
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Upload or replace a product's image.
///
/// Accepts a multipart form with a single `image` field. The new file is
/// written before the database row is updated; if a previous image
/// existed its file is removed afterwards.
pub async fn upload_product_image(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<ImageUploadResponse>, AppError> {
    require_warehouse_keeper(&current_user.0)?;

    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::ValidationError(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let filename = field
            .file_name()
            .ok_or_else(|| AppError::Validation {
                field: "image".to_string(),
                message: "Image field is missing a filename".to_string(),
            })?
            .to_string();

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::ValidationError(format!("Failed to read upload: {}", e)))?;

        upload = Some((filename, data.to_vec()));
        break;
    }

    let (filename, data) = upload.ok_or_else(|| AppError::Validation {
        field: "image".to_string(),
        message: "Multipart body must contain an 'image' field".to_string(),
    })?;

    let storage = StorageService::new(&state.config.media);
    let products = ProductService::new(state.db.clone());

    // Confirm the product exists before writing anything to disk
    products.get_product(id).await?;

    let image_path = storage.save_image(&filename, &data).await?;

    let previous = match products.set_image_path(id, &image_path).await {
        Ok(previous) => previous,
        Err(e) => {
            // The row update failed; do not leave the new file orphaned
            storage.delete_image(&image_path).await.ok();
            return Err(e);
        }
    };

    if let Some(old_path) = previous {
        storage.delete_image(&old_path).await?;
    }

    Ok(Json(ImageUploadResponse {
        product_id: id,
        image_path,
    }))
}
