use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use blog_service::db::{create_pool, BlogStore, PgStore};
use blog_service::handlers::{self, AppState};
use blog_service::middleware;
use std::io;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut terminate =
            signal(SignalKind::terminate()).expect("Failed to install SIGTERM handler");

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = terminate.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
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
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Blog Service
///
/// Serves posts, categories, comments and author profiles.
///
/// # Routes
///
/// - `/` - visible posts, newest first
/// - `/posts/*` - post detail, create, edit, delete, comments
/// - `/category/{slug}/` - posts of a published category
/// - `/profile/{username}/*` - author page, profile edit
/// - `/health*`, `/metrics` - health checks and Prometheus metrics
///
/// Runs on port 8080 (configurable via BLOG_SERVICE_PORT).
#[actix_web::main]
async fn main() -> io::Result<()> {
    // Support container healthchecks via CLI subcommand: `healthcheck`
    if std::env::args().nth(1).as_deref() == Some("healthcheck") {
        let port = std::env::var("BLOG_SERVICE_PORT").unwrap_or_else(|_| "8080".to_string());
        let url = format!("http://127.0.0.1:{}/health", port);
        return match reqwest::Client::new().get(&url).send().await {
            Ok(resp) if resp.status().is_success() => Ok(()),
            Ok(resp) => {
                eprintln!("healthcheck HTTP status: {}", resp.status());
                Err(io::Error::new(io::ErrorKind::Other, "healthcheck failed"))
            }
            Err(e) => {
                eprintln!("healthcheck HTTP error: {}", e);
                Err(io::Error::new(io::ErrorKind::Other, "healthcheck error"))
            }
        };
    }

    dotenvy::dotenv().ok();
    init_tracing();

    let config = match blog_service::Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting blog-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    let db_pool = match create_pool(&config.database).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Database pool creation failed: {}", e);
            eprintln!("ERROR: Failed to create database pool: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!("Connected to database");

    let store: Arc<dyn BlogStore> = Arc::new(PgStore::new(db_pool));
    let state = web::Data::new(AppState::new(
        store,
        config.blog.page_size,
        config.auth.login_url.clone(),
    ));
    let identity = middleware::ViewerIdentity::new(&config.auth.jwt_secret);

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", bind_address);

    let allowed_origins = config.cors.allowed_origins.clone();
    let server = HttpServer::new(move || {
        let mut cors = Cors::default();
        for origin in allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else if !origin.is_empty() {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        App::new()
            .app_data(state.clone())
            .wrap(identity.clone())
            .wrap(middleware::MetricsMiddleware)
            .wrap(cors)
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(handlers::configure)
    })
    .bind(&bind_address)?
    .disable_signals()
    .run();

    blog_service::server::run_until_shutdown(server, shutdown_signal()).await?;

    tracing::info!("Blog-service shutting down");
    Ok(())
}
