use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use skillswap_match::config::Settings;
use skillswap_match::core::Matcher;
use skillswap_match::routes::{self, AppState};
use skillswap_match::services::{RecordCache, SupabaseClient};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    // Initialize logging, RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if settings.logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }

    info!("Starting SkillSwap matching service...");

    // Initialize Supabase client
    let timeout = Duration::from_secs(settings.supabase.timeout_secs.unwrap_or(30));
    let supabase = match SupabaseClient::new(
        settings.supabase.url.clone(),
        settings.supabase.service_role_key.clone(),
        timeout,
    ) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!("Failed to create Supabase client: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
        }
    };

    info!("Supabase client initialized");

    // Initialize record cache (optional)
    let cache = if settings.cache.enabled {
        let capacity = settings.cache.capacity.unwrap_or(10_000);
        let ttl = settings.cache.ttl_secs.unwrap_or(300);
        info!("Record cache initialized ({} entries, TTL: {}s)", capacity, ttl);
        Some(Arc::new(RecordCache::new(capacity, ttl)))
    } else {
        info!("Record cache disabled");
        None
    };

    // Initialize matcher with configured weights and limits
    let weights = settings.scoring_weights();
    let limits = settings.ranking_limits();
    let matcher = Matcher::new(weights, limits);

    info!("Matcher initialized with weights: {:?}, limits: {:?}", weights, limits);

    let app_state = AppState {
        supabase,
        cache,
        matcher,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
            .default_service(web::route().to(routes::not_found))
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
