use actix_web::{web, App, HttpServer};
use forum_service::app::{self, AppState};
use forum_service::handlers;
use forum_service::middleware::{ClientRateLimiter, RateLimitMiddleware};
use forum_service::{Config, ForumStore, PgForumStore};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// How often refilled rate-limit buckets are dropped
const LIMITER_PURGE_INTERVAL: Duration = Duration::from_secs(60);

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = terminate.recv() => {},
                }
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

/// Probe the local health endpoint; used as the container healthcheck
async fn run_healthcheck() -> io::Result<()> {
    let port = std::env::var("FORUM_SERVICE_PORT")
        .or_else(|_| std::env::var("PORT"))
        .unwrap_or_else(|_| "3001".to_string());
    let url = format!("http://127.0.0.1:{}/api/health", port);

    match reqwest::Client::new().get(&url).send().await {
        Ok(resp) if resp.status().is_success() => Ok(()),
        Ok(resp) => {
            eprintln!("healthcheck HTTP status: {}", resp.status());
            Err(io::Error::new(io::ErrorKind::Other, "healthcheck failed"))
        }
        Err(e) => {
            eprintln!("healthcheck HTTP error: {}", e);
            Err(io::Error::new(io::ErrorKind::Other, "healthcheck error"))
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,actix_web=info,sqlx=warn".into());
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Forum Service
///
/// REST backend for the peer-support forum.
///
/// # Routes
///
/// - `/api/health` - Service and database status
/// - `/api/forum/posts/*` - List, create, delete and like posts
/// - `/api/forum/comments/*` - Create and like comments
/// - `/api/forum/categories` - Fixed category list
#[actix_web::main]
async fn main() -> io::Result<()> {
    if std::env::args().nth(1).as_deref() == Some("healthcheck") {
        return run_healthcheck().await;
    }

    let _ = dotenvy::dotenv();
    init_tracing();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {:#}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!(
        env = %config.app.env,
        database = ?config.database,
        "Starting forum-service"
    );

    let pool = match forum_service::db::connect(&config).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Database initialization failed: {:#}", e);
            eprintln!("ERROR: Failed to initialize database: {:#}", e);
            std::process::exit(1);
        }
    };

    let store: Arc<dyn ForumStore> = Arc::new(PgForumStore::new(pool.clone()));

    let limiter = Arc::new(ClientRateLimiter::new(&config.rate_limit));
    let janitor = {
        let limiter = limiter.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(LIMITER_PURGE_INTERVAL);
            loop {
                interval.tick().await;
                limiter.retain_recent();
                tracing::debug!(
                    clients = limiter.tracked_clients(),
                    "Pruned rate-limit buckets"
                );
            }
        })
    };

    let state = AppState {
        store,
        environment: config.app.env.clone(),
        limiter: RateLimitMiddleware::new(limiter),
        max_body_bytes: config.http.max_body_bytes,
        expose_error_details: config.app.is_development(),
    };

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server on {}", bind_address);

    let cors_config = config.cors.clone();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(app::build_cors(&cors_config))
            .wrap(app::security_headers())
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(app::configure(state.clone()))
            .default_service(web::to(handlers::route_not_found))
    })
    .bind(&bind_address)?
    .disable_signals()
    .run();

    let server_handle = server.handle();
    let mut server_task = tokio::spawn(server);

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    let finished = tokio::select! {
        joined = &mut server_task => Some(joined),
        _ = &mut shutdown => None,
    };

    let joined = match finished {
        Some(joined) => joined,
        None => {
            tracing::info!("Shutdown signal received");
            server_handle.stop(true).await;
            server_task.await
        }
    };
    janitor.abort();

    let result = match joined {
        Ok(result) => result,
        Err(e) => Err(io::Error::new(io::ErrorKind::Other, e.to_string())),
    };

    pool.close().await;
    tracing::info!("Forum-service shut down");

    result
}
