//! Backend entry-point: runs migrations, builds the pool, and serves the
//! REST endpoints plus the OpenAPI document.

use std::env;
use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use diesel::pg::PgConnection;
use diesel::Connection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use utoipa::OpenApi;

use backend::ApiDoc;
use backend::inbound::http::{HttpState, configure_routes};
use backend::outbound::persistence::{
    DbPool, DieselAccountRepository, DieselPostRepository, PoolConfig,
};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let database_url = env::var("DATABASE_URL")
        .map_err(|_| std::io::Error::other("DATABASE_URL must be set"))?;
    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_owned());

    run_migrations(&database_url)?;

    let pool = DbPool::new(PoolConfig::new(database_url))
        .await
        .map_err(|e| std::io::Error::other(format!("failed to build database pool: {e}")))?;

    let state = web::Data::new(HttpState::new(
        Arc::new(DieselAccountRepository::new(pool.clone())),
        Arc::new(DieselPostRepository::new(pool)),
    ));

    info!(addr = %bind_addr, "server starting");
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(configure_routes)
            .route("/api-docs/openapi.json", web::get().to(openapi_json))
    })
    .bind(&bind_addr)?
    .run()
    .await
}

/// Apply pending schema migrations over a blocking connection before the
/// async pool exists.
fn run_migrations(database_url: &str) -> std::io::Result<()> {
    let mut connection = PgConnection::establish(database_url)
        .map_err(|e| std::io::Error::other(format!("failed to connect for migrations: {e}")))?;

    let applied = connection
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| std::io::Error::other(format!("failed to run migrations: {e}")))?;

    if applied.is_empty() {
        info!("schema is up to date");
    } else {
        info!(count = applied.len(), "migrations applied");
    }
    Ok(())
}

async fn openapi_json() -> web::Json<utoipa::openapi::OpenApi> {
    web::Json(ApiDoc::openapi())
}
