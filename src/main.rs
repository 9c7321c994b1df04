use std::sync::Arc;

use color_eyre::eyre::Result;
use dotenv::dotenv;
use mentorbook_api::config::ApiConfig;
use mentorbook_core::service::MentorshipService;
use mentorbook_db::{PgStore, create_pool, schema::initialize_database};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;
    mentorbook_api::init_tracing(config.log_level)?;
    info!(timezone = %config.timezone, "Starting mentorbook");

    // Create database connection pool
    let db_pool = create_pool(&config.database_url, config.database_max_connections).await?;

    // Initialize database schema
    initialize_database(&db_pool).await?;

    // Wire every port to PostgreSQL
    let service = MentorshipService::from_store(Arc::new(PgStore::new(db_pool)), config.scheduling_settings());

    // Start API server
    mentorbook_api::start_server(config, service).await?;

    Ok(())
}
