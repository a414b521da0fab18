//! Backend entry-point: loads settings, prepares persistence and serves the
//! student records API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use student_records::inbound::http::health::HealthState;
use student_records::inbound::http::session_config::{BuildProfile, session_settings_from_env};
use student_records::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use student_records::settings::AppSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|e| eyre!("failed to load settings: {e}"))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildProfile::current())
        .wrap_err("invalid session configuration")?;

    let deadline = settings.deadline();
    info!(
        timeout_ms = deadline.timeout().as_millis(),
        exposure = ?deadline.exposure(),
        "persistence deadline configured"
    );
    let mut config = ServerConfig::new(session, settings.bind_addr()).with_deadline(deadline);
    if let Some(database_url) = settings.database_url() {
        config = config.with_db_pool(prepare_database(database_url, settings.pool_size()).await?);
    }

    let health_state = web::Data::new(HealthState::new());
    info!(addr = %settings.bind_addr(), "starting student records server");
    let server = create_server(health_state.clone(), config).wrap_err("failed to bind server")?;
    let result = server.await;
    health_state.mark_unhealthy();
    result.wrap_err("server terminated with an error")
}

/// Apply pending migrations, then open the connection pool.
async fn prepare_database(database_url: &str, pool_size: u32) -> Result<DbPool> {
    let url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || run_migrations(&url))
        .await
        .wrap_err("migration task panicked")??;
    info!(applied, "database schema is up to date");

    DbPool::new(PoolConfig::new(database_url).with_max_size(pool_size))
        .await
        .wrap_err("failed to build database pool")
}
