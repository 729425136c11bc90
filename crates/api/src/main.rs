use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use atelier_api::config::ServerConfig;
use atelier_api::router::build_app_router;
use atelier_api::{notifications, state, ws};
use atelier_service::storage::FileStorage;

use state::AppState;

/// How long shutdown waits for the notification fanout to drain.
const SHUTDOWN_DRAIN: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Configuration loaded");

    let pool = prepare_database().await;

    // Created up front so the /uploads file route serves a real directory
    // from the first request on.
    let storage = FileStorage::new(&config.upload_dir);
    tokio::fs::create_dir_all(storage.root())
        .await
        .expect("Could not create the upload directory");
    tracing::info!(root = %storage.root().display(), "Upload storage ready");

    let ws_manager = Arc::new(ws::WsManager::new());
    let heartbeat_handle = ws::start_heartbeat(Arc::clone(&ws_manager));

    let event_bus = Arc::new(atelier_events::EventBus::default());
    let fanout = notifications::NotificationFanout::new(pool.clone(), Arc::clone(&ws_manager));
    let fanout_handle = tokio::spawn(fanout.run(event_bus.subscribe()));
    tracing::info!("Notification fanout started");

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        ws_manager: Arc::clone(&ws_manager),
        event_bus: Arc::clone(&event_bus),
        storage,
    };
    let app = build_app_router(state, &config);

    let addr = SocketAddr::new(
        config.host.parse().expect("HOST is not a valid IP address"),
        config.port,
    );
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Could not bind the listen address");
    tracing::info!(%addr, "Serving the API");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server exited with an error");

    tracing::info!("Listener closed, draining background tasks");

    // With the server gone this is the last bus handle; dropping it closes
    // the broadcast channel, which the fanout observes as its exit signal.
    drop(event_bus);
    let _ = tokio::time::timeout(SHUTDOWN_DRAIN, fanout_handle).await;
    tracing::info!("Notification fanout drained");

    let ws_count = ws_manager.connection_count().await;
    tracing::info!(ws_count, "Closing lingering sockets");
    ws_manager.shutdown_all().await;

    heartbeat_handle.abort();
    tracing::info!("Shutdown complete");
}

/// `RUST_LOG`-style filtering with a sensible default when unset.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "atelier_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Connect, ping, migrate. Any failure here aborts startup.
async fn prepare_database() -> atelier_db::DbPool {
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = atelier_db::create_pool(&database_url)
        .await
        .expect("Could not connect to Postgres");

    atelier_db::health_check(&pool)
        .await
        .expect("Database ping failed");

    atelier_db::run_migrations(&pool)
        .await
        .expect("Migrations failed");
    tracing::info!("Database ready, migrations applied");

    pool
}

/// Resolve when the process receives SIGINT (Ctrl-C) or, on Unix, SIGTERM,
/// so the server drains cleanly both interactively and under a process
/// manager.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Could not install the Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Could not install the SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown"),
        () = terminate => tracing::info!("Received SIGTERM, starting graceful shutdown"),
    }
}
