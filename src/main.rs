use axum::Router;
use runcourse::cache::CachedGeocoder;
use runcourse::config::Config;
use runcourse::constants::DEFAULT_GEOCODE_CACHE_MAX_ENTRIES;
use runcourse::services::nominatim::NominatimClient;
use runcourse::services::osrm::OsrmClient;
use runcourse::services::overpass::OverpassClient;
use runcourse::services::providers::PoiProvider;
use runcourse::services::route_generator::RouteGenerator;
use runcourse::AppState;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "runcourse=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| format!("Failed to load configuration: {}", e))?;

    tracing::info!("Starting RunCourse API server");
    tracing::info!(
        osrm = %config.osrm_base_url,
        nominatim = %config.nominatim_base_url,
        overpass = %config.overpass_url,
        "Configuration loaded successfully"
    );

    // Initialize providers
    let timeout = config.http_timeout();
    let routing = Arc::new(OsrmClient::with_config(config.osrm_base_url.clone(), timeout));
    let nominatim = Arc::new(NominatimClient::with_config(
        config.nominatim_base_url.clone(),
        config.user_agent.clone(),
        timeout,
    ));
    let geocoder = Arc::new(CachedGeocoder::new(
        nominatim,
        config.geocode_cache_ttl,
        DEFAULT_GEOCODE_CACHE_MAX_ENTRIES,
    ));

    let pois: Option<Arc<dyn PoiProvider>> = if config.route_generator.park_enrichment {
        Some(Arc::new(OverpassClient::with_config(
            config.overpass_url.clone(),
            timeout,
        )))
    } else {
        tracing::info!("Park enrichment disabled");
        None
    };

    if let Some(seed) = config.route_generator.random_seed {
        tracing::info!(seed, "Route randomness is seeded");
    }

    let route_generator = RouteGenerator::new(routing, pois, config.route_generator.clone());

    // Create application state
    let state = Arc::new(AppState {
        route_generator,
        geocoder,
    });

    // Build router with CORS and tracing
    let app = Router::new()
        .nest("/api/v1", runcourse::routes::create_router(state))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = config.server_address();
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
