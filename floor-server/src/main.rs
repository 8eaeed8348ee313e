use floor_server::utils::logger;
use floor_server::{Config, Restaurant};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    std::fs::create_dir_all(config.log_dir())?;
    let log_dir = config.log_dir();
    logger::init_logger_with_file(&config.log_level, Some(&log_dir));

    tracing::info!(environment = %config.environment, "Floor server starting...");

    let restaurant = Restaurant::open(&config)?;

    tracing::info!("Floor state ready; Ctrl-C flushes and exits");
    tokio::signal::ctrl_c().await?;

    restaurant.dump_to_file()?;
    tracing::info!("Floor snapshot flushed, shutting down");
    Ok(())
}
