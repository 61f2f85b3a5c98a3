use axum::{http::Method, middleware, routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::controllers::{
    directory::DirectoryController, health, listing::ListingController, search::SearchController,
};
use crate::infrastructure::config::Config;

pub mod request_id;

pub use request_id::{request_id_middleware, X_REQUEST_ID};

/// Build the application router with every route and middleware layer
pub fn create_router(
    config: &Config,
    directory_controller: Arc<DirectoryController>,
    listing_controller: Arc<ListingController>,
    search_controller: Arc<SearchController>,
) -> Router {
    let directory_routes = Router::new()
        .route("/api/categories", get(DirectoryController::list_categories))
        .route(
            "/api/categories/:category_id/subcategories",
            get(DirectoryController::list_subcategories),
        )
        .route(
            "/api/businesses/:business_id",
            get(DirectoryController::get_business),
        )
        .with_state(directory_controller);

    let listing_routes = Router::new()
        .route(
            "/api/categories/:category_id/subcategories/:subcategory_id/businesses",
            get(ListingController::list_businesses),
        )
        .with_state(listing_controller);

    let search_routes = Router::new()
        .route(
            "/api/search/suggestions",
            get(SearchController::suggestions),
        )
        .with_state(search_controller);

    Router::new()
        .route("/health", get(health::health))
        .merge(directory_routes)
        .merge(listing_routes)
        .merge(search_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(config))
                .layer(middleware::from_fn(request_id_middleware)),
        )
}

/// Anything goes in development; elsewhere the read-only API only answers GET
fn cors_layer(config: &Config) -> CorsLayer {
    if config.is_development() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers(Any)
    }
}

/// Start the HTTP server and serve until the process stops
pub async fn start_http_server(
    config: Arc<Config>,
    app: Router,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
