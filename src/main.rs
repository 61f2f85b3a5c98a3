use aqaba_directory::controllers::{
    directory::DirectoryController, listing::ListingController, search::SearchController,
};
use aqaba_directory::domain::directory::{DirectoryRepository, DirectoryService};
use aqaba_directory::domain::listing::ListingService;
use aqaba_directory::domain::search::{SearchIndexCache, SearchService};
use aqaba_directory::infrastructure::config::Config;
use aqaba_directory::infrastructure::http::{create_router, start_http_server};
use aqaba_directory::infrastructure::logging::init_logging;
use aqaba_directory::infrastructure::repositories::AirtableRepository;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    init_logging(&config.log_format);

    tracing::info!(
        "Starting Aqaba Directory API on {}:{}",
        config.host,
        config.port
    );

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Repositories
    tracing::info!(
        base_id = %config.airtable_base_id,
        page_size = config.listing_page_size,
        "Instantiating Airtable repository..."
    );
    let directory_repo: Arc<dyn DirectoryRepository> = Arc::new(AirtableRepository::new(
        config.airtable_api_url.clone(),
        config.airtable_base_id.clone(),
        config.airtable_api_key.clone(),
        config.listing_page_size,
    ));

    // 2. Services
    tracing::info!("Instantiating services...");
    let directory_service = Arc::new(DirectoryService::new(directory_repo.clone()));
    let listing_service = Arc::new(ListingService::new(directory_repo.clone()));
    let search_cache = Arc::new(SearchIndexCache::new(directory_repo));
    let search_service = Arc::new(SearchService::new(search_cache));

    // 3. Controllers
    tracing::info!("Instantiating controllers...");
    let directory_controller = Arc::new(DirectoryController::new(directory_service));
    let listing_controller = Arc::new(ListingController::new(listing_service));
    let search_controller = Arc::new(SearchController::new(search_service));

    let app = create_router(
        &config,
        directory_controller,
        listing_controller,
        search_controller,
    );

    start_http_server(Arc::new(config), app).await?;

    Ok(())
}
