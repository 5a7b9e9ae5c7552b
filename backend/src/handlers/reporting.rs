//! Reporting handlers: JSON aggregates and CSV downloads
//!
//! Every report has a JSON endpoint and a `/csv` sibling that streams the
//! same rows as an attachment.

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, HeaderValue},
    Json,
};

use crate::error::AppError;
use crate::middleware::{require_warehouse_keeper, CurrentUser};
use crate::services::ledger::MovementView;
use crate::services::reporting::{
    CategoryStockValue, GroupedTotal, ProductExitAverage, SectorCategoryPivot,
};
use crate::services::{ExportService, ReportingService};
use crate::AppState;
use shared::types::DateRange;

fn csv_headers(filename: &str) -> Result<HeaderMap, AppError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/csv; charset=utf-8"),
    );
    let disposition = format!("attachment; filename=\"{}\"", filename);
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition)
            .map_err(|e| AppError::Internal(format!("Invalid disposition header: {}", e)))?,
    );
    Ok(headers)
}

/// Total consumption per sector
pub async fn consumption_by_sector(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> Result<Json<Vec<GroupedTotal>>, AppError> {
    require_warehouse_keeper(&current_user.0)?;

    let service = ReportingService::new(state.db.clone());
    let rows = service.consumption_by_sector().await?;

    Ok(Json(rows))
}

pub async fn consumption_by_sector_csv(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> Result<(HeaderMap, Vec<u8>), AppError> {
    require_warehouse_keeper(&current_user.0)?;

    let rows = ReportingService::new(state.db.clone())
        .consumption_by_sector()
        .await?;
    let body = ExportService::new().consumption_csv(&rows)?;

    Ok((csv_headers("consumption-by-sector.csv")?, body))
}

/// Consumption pivoted by sector and product category
pub async fn consumption_pivot(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> Result<Json<Vec<SectorCategoryPivot>>, AppError> {
    require_warehouse_keeper(&current_user.0)?;

    let service = ReportingService::new(state.db.clone());
    let rows = service.consumption_pivot().await?;

    Ok(Json(rows))
}

pub async fn consumption_pivot_csv(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> Result<(HeaderMap, Vec<u8>), AppError> {
    require_warehouse_keeper(&current_user.0)?;

    let rows = ReportingService::new(state.db.clone())
        .consumption_pivot()
        .await?;
    let body = ExportService::new().pivot_csv(&rows)?;

    Ok((csv_headers("consumption-pivot.csv")?, body))
}

/// Average exit quantity per product
pub async fn average_exit_by_product(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> Result<Json<Vec<ProductExitAverage>>, AppError> {
    require_warehouse_keeper(&current_user.0)?;

    let service = ReportingService::new(state.db.clone());
    let rows = service.average_exit_by_product().await?;

    Ok(Json(rows))
}

pub async fn average_exit_by_product_csv(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> Result<(HeaderMap, Vec<u8>), AppError> {
    require_warehouse_keeper(&current_user.0)?;

    let rows = ReportingService::new(state.db.clone())
        .average_exit_by_product()
        .await?;
    let body = ExportService::new().averages_csv(&rows)?;

    Ok((csv_headers("average-exit-by-product.csv")?, body))
}

/// Movements inside an inclusive date range
pub async fn movements_in_range(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(range): Query<DateRange>,
) -> Result<Json<Vec<MovementView>>, AppError> {
    require_warehouse_keeper(&current_user.0)?;

    let service = ReportingService::new(state.db.clone());
    let rows = service.movements_in_range(range).await?;

    Ok(Json(rows))
}

pub async fn movements_in_range_csv(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(range): Query<DateRange>,
) -> Result<(HeaderMap, Vec<u8>), AppError> {
    require_warehouse_keeper(&current_user.0)?;

    let rows = ReportingService::new(state.db.clone())
        .movements_in_range(range)
        .await?;
    let body = ExportService::new().movements_csv(&rows)?;

    Ok((csv_headers("movements.csv")?, body))
}

/// Stock value per category for products currently in stock
pub async fn valued_stock_by_category(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> Result<Json<Vec<CategoryStockValue>>, AppError> {
    require_warehouse_keeper(&current_user.0)?;

    let service = ReportingService::new(state.db.clone());
    let rows = service.valued_stock_by_category().await?;

    Ok(Json(rows))
}

pub async fn valued_stock_by_category_csv(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> Result<(HeaderMap, Vec<u8>), AppError> {
    require_warehouse_keeper(&current_user.0)?;

    let rows = ReportingService::new(state.db.clone())
        .valued_stock_by_category()
        .await?;
    let body = ExportService::new().valued_stock_csv(&rows)?;

    Ok((csv_headers("valued-stock-by-category.csv")?, body))
}
