use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

use usuarios_server::backend::database::DatabaseBackendConfig;
use usuarios_server::backend::{BackendFactory, DatabaseType, UserStore};
use usuarios_server::config::AppConfig;
use usuarios_server::error::{AppError, AppResult};
use usuarios_server::resource::app_router;

#[derive(Parser, Debug)]
#[command(name = "usuarios-server")]
#[command(about = "Authentication and user CRUD API over PostgreSQL or SQLite")]
struct Args {
    /// Configuration file path (default: config.yaml)
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Port to listen on (overrides config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Host to bind to (overrides config file)
    #[arg(long)]
    host: Option<String>,
}

async fn setup_store(app_config: &AppConfig) -> AppResult<Arc<dyn UserStore>> {
    if app_config.backend.backend_type != "database" {
        return Err(AppError::Configuration(format!(
            "unsupported backend type: {}",
            app_config.backend.backend_type
        )));
    }

    let database_config = app_config.backend.database.as_ref().ok_or_else(|| {
        AppError::Configuration(
            "database configuration is required when backend type is 'database'".to_string(),
        )
    })?;

    let backend_config = DatabaseBackendConfig {
        database_type: match database_config.db_type.as_str() {
            "postgresql" => DatabaseType::PostgreSQL,
            "sqlite" => DatabaseType::SQLite,
            other => {
                return Err(AppError::Configuration(format!(
                    "unsupported database type: {}",
                    other
                )))
            }
        },
        connection_url: database_config.url.clone(),
        max_connections: database_config.max_connections,
        connection_timeout: 30,
    };

    info!("setting up {} backend", database_config.db_type);

    let store = BackendFactory::create(&backend_config).await?;
    store.init_schema().await?;
    // Probe the store now so a dead database fails startup instead of the
    // first request.
    store.health_check().await?;

    Ok(store)
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt::init();

    let mut app_config = if args.config == "config.yaml" && !std::path::Path::new("config.yaml").exists()
    {
        info!("no config.yaml found, using in-memory SQLite defaults");
        AppConfig::default_config()
    } else {
        match AppConfig::load_from_file(&args.config) {
            Ok(config) => config,
            Err(e) => {
                error!("failed to load configuration: {}", e);
                std::process::exit(1);
            }
        }
    };

    // Override with command line arguments if provided
    if let Some(port) = args.port {
        app_config.server.port = port;
    }
    if let Some(host) = args.host {
        app_config.server.host = host;
    }

    // Fail fast: no store, no server.
    let store = match setup_store(&app_config).await {
        Ok(store) => store,
        Err(e) => {
            error!("failed to initialize database backend: {}", e);
            std::process::exit(1);
        }
    };
    info!(
        "connected (email uniqueness enforced: {})",
        store.supports_unique_constraint()
    );

    let app = match app_router(store, &app_config.cors) {
        Ok(app) => app,
        Err(e) => {
            error!("failed to build router: {}", e);
            std::process::exit(1);
        }
    };

    let host: std::net::IpAddr = app_config.server.host.parse().unwrap_or_else(|_| {
        error!("invalid host address: {}, using 127.0.0.1", app_config.server.host);
        [127, 0, 0, 1].into()
    });
    let addr = SocketAddr::from((host, app_config.server.port));
    info!(
        "usuarios-server listening on {} (allowed origin: {})",
        addr, app_config.cors.allowed_origin
    );

    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        error!("server error: {}", e);
        std::process::exit(1);
    }
}
