//! Route definitions for the Warehouse Stock Management Platform

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Auth routes (login and refresh are public)
        .nest("/auth", auth_routes())
        // Catalog reference data
        .nest("/categories", category_routes())
        .nest("/suppliers", supplier_routes())
        .nest("/sectors", sector_routes())
        // Products (listing and lookup are public)
        .nest("/products", product_routes())
        // Stock movement ledger
        .nest("/movements", movement_routes())
        // Reports and CSV exports
        .nest("/reports", report_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::login))
        .route("/refresh", post(handlers::refresh))
        // Account creation is keeper-only, so it sits behind the middleware
        .merge(
            Router::new()
                .route("/register", post(handlers::register))
                .route_layer(middleware::from_fn(auth_middleware)),
        )
}

/// Category routes (protected)
fn category_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route(
            "/:category_id",
            get(handlers::get_category)
                .put(handlers::update_category)
                .delete(handlers::delete_category),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Supplier routes (protected)
fn supplier_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_suppliers).post(handlers::create_supplier),
        )
        .route(
            "/:supplier_id",
            get(handlers::get_supplier)
                .put(handlers::update_supplier)
                .delete(handlers::delete_supplier),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Sector routes (protected)
fn sector_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_sectors).post(handlers::create_sector),
        )
        .route(
            "/:sector_id",
            get(handlers::get_sector)
                .put(handlers::update_sector)
                .delete(handlers::delete_sector),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Product routes. Browsing is public; mutations, image upload and the
/// movement history require authentication.
fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_products))
        .route("/:product_id", get(handlers::get_product))
        .merge(protected_product_routes())
}

fn protected_product_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::create_product))
        .route(
            "/:product_id",
            axum::routing::put(handlers::update_product).delete(handlers::delete_product),
        )
        .route("/:product_id/image", post(handlers::upload_product_image))
        .route("/:product_id/movements", get(handlers::product_movements))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Movement ledger routes (protected)
fn movement_routes() -> Router<AppState> {
    Router::new()
        .route("/entries", post(handlers::register_entry))
        .route("/exits", post(handlers::register_exit))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Reporting routes (protected)
fn report_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/consumption-by-sector",
            get(handlers::consumption_by_sector),
        )
        .route(
            "/consumption-by-sector/csv",
            get(handlers::consumption_by_sector_csv),
        )
        .route("/consumption-pivot", get(handlers::consumption_pivot))
        .route(
            "/consumption-pivot/csv",
            get(handlers::consumption_pivot_csv),
        )
        .route(
            "/average-exit-by-product",
            get(handlers::average_exit_by_product),
        )
        .route(
            "/average-exit-by-product/csv",
            get(handlers::average_exit_by_product_csv),
        )
        .route("/movements", get(handlers::movements_in_range))
        .route("/movements/csv", get(handlers::movements_in_range_csv))
        .route(
            "/valued-stock-by-category",
            get(handlers::valued_stock_by_category),
        )
        .route(
            "/valued-stock-by-category/csv",
            get(handlers::valued_stock_by_category_csv),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}
