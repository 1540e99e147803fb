use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hostwatch_api::config::ServerConfig;
use hostwatch_api::router::build_app_router;
use hostwatch_api::state::AppState;
use hostwatch_core::plugins::PluginRegistry;
use hostwatch_db::repositories::PluginRepo;
use hostwatch_events::{AlertNotifier, DispatchScheduler, Dispatcher, EventBus};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    "hostwatch_api=debug,hostwatch_events=debug,tower_http=debug"
                        .into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = hostwatch_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    hostwatch_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    hostwatch_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Plugins ---
    let plugins = Arc::new(PluginRegistry::builtin());
    PluginRepo::ensure(&pool, &plugins.names())
        .await
        .expect("Failed to register plugins");
    tracing::info!(plugins = ?plugins.names(), "Plugins registered");

    // --- Event bus ---
    let event_bus = Arc::new(EventBus::default());

    // Spawn the alert notifier (queues notifications for notify-enabled types).
    let notifier_handle = tokio::spawn(AlertNotifier::run(pool.clone(), event_bus.subscribe()));

    // --- Notification delivery ---
    let transport = hostwatch_events::transport_from_env().expect("Invalid SMTP configuration");
    let dispatcher = Dispatcher::new(pool.clone(), transport);

    let dispatch_cancel = CancellationToken::new();
    let dispatch_handle = config.dispatch_interval_secs.map(|secs| {
        let scheduler = DispatchScheduler::new(dispatcher.clone(), Duration::from_secs(secs));
        let cancel = dispatch_cancel.clone();
        tokio::spawn(async move {
            scheduler.run(cancel).await;
        })
    });

    tracing::info!(
        in_process_dispatch = dispatch_handle.is_some(),
        "Event services started"
    );

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus: Arc::clone(&event_bus),
        plugins,
        dispatcher,
    };

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

    dispatch_cancel.cancel();
    if let Some(handle) = dispatch_handle {
        let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
        tracing::info!("Dispatch scheduler stopped");
    }

    // Dropping the last sender closes the bus and ends the notifier loop.
    drop(event_bus);
    let _ = tokio::time::timeout(Duration::from_secs(5), notifier_handle).await;
    tracing::info!("Alert notifier stopped");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT or SIGTERM to initiate graceful shutdown.
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
