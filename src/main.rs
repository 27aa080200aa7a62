// src/main.rs
use mind_assessment::{config, db, logging, services::user_service, web, AppState};
use axum::serve;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, fmt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = config::Config::from_env()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

    // --- Logging (tracing): stdout plus the request access log file ---
    let access_log = logging::open_access_log(&config.log_dir).map_err(|e| {
        anyhow::anyhow!("Could not open access log in {}: {}", config.log_dir.display(), e)
    })?;
    // Keep the guard alive until main returns so buffered lines get flushed.
    let (access_writer, _access_guard) = tracing_appender::non_blocking(access_log);

    tracing_subscriber::registry()
        .with(
            fmt::layer().with_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| config::DEFAULT_LOG_FILTER.into()),
            ),
        )
        .with(logging::access_log_layer(access_writer))
        .init();

    tracing::info!("🚀 Starting mind assessment server...");
    tracing::info!(
        "📝 Access log: {}",
        config.log_dir.join(logging::ACCESS_LOG_FILE).display()
    );

    // --- Database ---
    let db_pool = match db::create_db_pool(&config.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("❌ Could not initialise the database: {}", e);
            return Err(anyhow::anyhow!("Failed to connect/migrate DB: {}", e));
        }
    };

    if config.seed_demo_users {
        user_service::seed_demo_users(&db_pool, config.bcrypt_cost)
            .await
            .map_err(|e| anyhow::anyhow!("Demo seeding failed: {}", e))?;
    }

    // --- Application state (session registry starts empty) ---
    let addr = config.addr;
    let app_state = AppState::new(db_pool.clone(), config);
    let sessions = app_state.sessions.clone();

    // --- Listener ---
    let listener = match TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("❌ Could not bind {}: {}", addr, e);
            return Err(e.into());
        }
    };
    tracing::info!("📡 Listening on http://{}", addr);

    // --- Router and middleware ---
    let app = web::routes::create_router(app_state).layer(
        ServiceBuilder::new()
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            )
            .layer(CorsLayer::permissive()),
    );

    tracing::info!("👂 Server ready to accept connections...");
    let served = serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await;

    // --- Shutdown: sessions never outlive the process ---
    sessions.clear().await;
    db_pool.close().await;

    if let Err(e) = served {
        tracing::error!("❌ Fatal server error: {}", e);
        return Err(e.into());
    }
    tracing::info!("👋 Server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("🛑 Shutdown signal received.");
}
