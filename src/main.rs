//! Flexspace Pricing Server
//!
//! Serves booking price calculation and booking creation for coworking
//! units over a flat-file JSON store of units, room types, rate records and
//! bookings.

use actix_cors::Cors;
use actix_web::{http::header, middleware, web, App, HttpResponse, HttpServer};
use anyhow::Context;
use flexspace_api::AppState;
use flexspace_core::AppConfig;
use flexspace_db::{
    seed_if_empty, JsonBookingRepository, JsonRateRepository, JsonRoomTypeRepository, JsonStore,
    JsonUnitRepository,
};
use flexspace_pricing::{BookingServiceImpl, EngineSettings, PricingEngine, PricingServiceImpl};
use std::env;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging
///
/// `RUST_LOG` wins over `LOG_LEVEL`; `LOG_FORMAT=json` emits JSON lines.
fn init_tracing() {
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "flexspace={lvl},flexspace_api={lvl},flexspace_pricing={lvl},flexspace_db={lvl},actix_web=info",
            lvl = log_level
        ))
    });

    let json = env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry.with(fmt::layer().json().with_target(true)).init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .init();
    }
}

async fn open_store(config: &AppConfig) -> anyhow::Result<Arc<JsonStore>> {
    let store = match &config.storage.data_dir {
        Some(dir) => JsonStore::open(dir)
            .await
            .with_context(|| format!("failed to open data directory {}", dir))?,
        None => {
            warn!("No storage.data_dir configured, data will not survive a restart");
            JsonStore::in_memory()
        }
    };

    if config.storage.seed_on_start {
        let report = seed_if_empty(&store).await.context("failed to seed store")?;
        info!(
            room_types = report.room_types,
            units = report.units,
            rates = report.rates,
            bookings = report.bookings,
            "Seed data applied"
        );
    }

    Ok(Arc::new(store))
}

fn cors(origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .max_age(3600);

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return cors.allow_any_origin();
    }

    let allowed: Vec<String> = origins.iter().map(|o| o.trim().to_string()).collect();
    cors.allowed_origin_fn(move |origin, _req_head| {
        origin
            .to_str()
            .map(|origin| allowed.iter().any(|o| o == origin))
            .unwrap_or(false)
    })
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    info!(
        "Starting Flexspace pricing server v{}",
        env!("CARGO_PKG_VERSION")
    );

    let config = AppConfig::load().context("failed to load configuration")?;

    let store = open_store(&config).await?;
    let engine = PricingEngine::new(EngineSettings::from(&config.pricing));
    info!(
        max_booking_nights = config.pricing.max_booking_nights,
        monthly_proration_days = config.pricing.monthly_proration_days,
        default_strategy = %config.pricing.default_strategy,
        "Pricing engine configured"
    );

    let units = Arc::new(JsonUnitRepository::new(store.clone()));
    let pricing = Arc::new(PricingServiceImpl::new(
        units.clone(),
        Arc::new(JsonRoomTypeRepository::new(store.clone())),
        Arc::new(JsonRateRepository::new(store.clone())),
        engine,
    ));
    let bookings = BookingServiceImpl::new(
        units,
        Arc::new(JsonBookingRepository::new(store)),
        pricing.clone(),
    );
    let state = web::Data::new(AppState::new(pricing, Arc::new(bookings)));

    let bind_addr = config.server_addr();
    let workers = config.server.workers;
    let cors_origins = config.server.cors_origins.clone();
    info!(
        "Starting HTTP server on {} with {} workers",
        bind_addr, workers
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(cors(&cors_origins))
            .wrap(TracingLogger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(flexspace_api::configure)
            // Root redirect to health
            .route(
                "/",
                web::get().to(|| async {
                    HttpResponse::Found()
                        .append_header(("Location", "/api/v1/health"))
                        .finish()
                }),
            )
    })
    .workers(workers)
    .bind(&bind_addr)
    .with_context(|| format!("failed to bind {}", bind_addr))?
    .run()
    .await
    .context("HTTP server failed")?;

    Ok(())
}
