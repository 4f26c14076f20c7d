mod bot;
mod config;
mod data;
mod error;
mod model;
mod service;
mod startup;

use crate::{config::Config, error::AppError};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    tracing::info!("Connected to database");

    let client = bot::start::init_bot(config, db).await?;
    bot::start::start_bot(client).await
}
