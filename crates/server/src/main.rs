//! Pedika server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Router, middleware};
use pedika_api::{AppState, auth_middleware, router as api_router};
use pedika_common::{AppResult, Config, LocalStorage, StorageBackend, StorageConfig};
use pedika_core::{
    AppointmentService, CategoryService, ContentService, EmergencyContactService, EventService,
    RegistrationAllocator, ReportService, UserService,
};
use pedika_db::repositories::{
    AppointmentRepository, CategoryRepository, ContentRepository, EmergencyContactRepository,
    EventRepository, ReportRepository, UserRepository,
};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

/// Initialize the tracing subscriber from configuration.
fn init_tracing(config: &Config) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "pedika=debug,tower_http=debug".into());

    if config.server.log_format == "json" {
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer())
            .with(env_filter)
            .init();
    }
}

/// Build the storage backend selected by configuration.
fn build_storage(config: &Config) -> AppResult<Arc<dyn StorageBackend>> {
    match StorageConfig::from_settings(&config.storage)? {
        StorageConfig::Local {
            base_path,
            base_url,
        } => Ok(Arc::new(LocalStorage::new(base_path, base_url))),
        #[cfg(feature = "s3")]
        StorageConfig::S3 {
            endpoint,
            bucket,
            region,
            access_key_id,
            secret_access_key,
            public_url,
        } => Ok(Arc::new(pedika_common::storage::S3Storage::new(
            &endpoint,
            bucket,
            &region,
            &access_key_id,
            &secret_access_key,
            public_url,
        ))),
        #[cfg(not(feature = "s3"))]
        StorageConfig::S3 { .. } => Err(pedika_common::AppError::Config(
            "Storage backend s3 requires building with the `s3` feature".to_string(),
        )),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Load configuration before tracing so the log format can honor it
    let config = Config::load()?;
    init_tracing(&config);

    info!("Starting pedika server...");

    // Connect to database
    let db = pedika_db::init(&config).await?;
    info!("Connected to database");

    // Run migrations
    info!("Running database migrations...");
    pedika_db::migrate(&db).await?;
    info!("Migrations completed");

    let storage = build_storage(&config)?;

    // Initialize repositories
    let db = Arc::new(db);
    let user_repo = UserRepository::new(Arc::clone(&db));
    let report_repo = ReportRepository::new(Arc::clone(&db));
    let category_repo = CategoryRepository::new(Arc::clone(&db));
    let appointment_repo = AppointmentRepository::new(Arc::clone(&db));
    let content_repo = ContentRepository::new(Arc::clone(&db));
    let event_repo = EventRepository::new(Arc::clone(&db));
    let contact_repo = EmergencyContactRepository::new(Arc::clone(&db));

    // Initialize services
    let allocator = RegistrationAllocator::new(Arc::new(report_repo.clone()));
    let user_service = UserService::new(user_repo, &config);
    let report_service = ReportService::new(report_repo, category_repo.clone(), allocator);
    let appointment_service = AppointmentService::new(appointment_repo);
    let category_service = CategoryService::new(category_repo);
    let content_service = ContentService::new(content_repo);
    let event_service = EventService::new(event_repo);
    let emergency_contact_service = EmergencyContactService::new(contact_repo);

    let state = AppState {
        user_service,
        report_service,
        appointment_service,
        category_service,
        content_service,
        event_service,
        emergency_contact_service,
        storage,
    };

    // Build router
    let app = Router::new()
        .nest("/api", api_router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server with graceful shutdown
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
