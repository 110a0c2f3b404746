use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tomato_api::config::{ServerConfig, StoreBackend};
use tomato_api::router::build_app_router;
use tomato_api::state::AppState;
use tomato_core::memory_store::MemoryTomatoStore;
use tomato_core::service::TomatoService;
use tomato_core::store::TomatoStore;
use tomato_db::store::PgTomatoStore;
use tomato_db::DbPool;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tomato_api=debug,tomato_db=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, store = ?config.store, "Loaded server configuration");

    // --- Record store ---
    let (store, pool): (Arc<dyn TomatoStore>, Option<DbPool>) = match config.store {
        StoreBackend::Postgres => {
            let pool = connect_database(&config).await;
            (Arc::new(PgTomatoStore::new(pool.clone())), Some(pool))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory tomato store; records are lost on restart");
            (Arc::new(MemoryTomatoStore::new()), None)
        }
    };

    // --- App state ---
    let state = AppState::new(TomatoService::new(store), config.clone());

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    if let Some(pool) = pool {
        pool.close().await;
        tracing::info!("Database connection pool closed");
    }

    tracing::info!("Graceful shutdown complete");
}

/// Connect, check, and migrate the PostgreSQL store.
async fn connect_database(config: &ServerConfig) -> DbPool {
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = tomato_db::create_pool(&database_url, config.database_max_connections)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    tomato_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    tomato_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    pool
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
