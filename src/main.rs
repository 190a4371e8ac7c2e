use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

use medibook::api::{app_router, ApiContext};
use medibook::{config, db};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let data_dir = config::app_data_dir();
    std::fs::create_dir_all(&data_dir)?;

    let db_path = config::database_path();
    // Open once at startup so migrations run before the first request.
    let conn = db::open_database(&db_path)?;
    tracing::info!(
        path = %db_path.display(),
        tables = db::count_tables(&conn)?,
        "Database ready"
    );
    drop(conn);

    let app = app_router(ApiContext::new(db_path)).layer(CorsLayer::permissive());

    let addr = config::bind_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "{} v{} listening", config::APP_NAME, config::APP_VERSION);
    axum::serve(listener, app).await?;
    Ok(())
}
