use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{config::Config, error::AppError};

/// Installs the global tracing subscriber.
///
/// Honours `RUST_LOG` and falls back to `info` for this crate.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "staff_logbot=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Connects to the database, running migrations only when enabled.
///
/// The counting table belongs to the counting game. Migrations exist for local
/// SQLite setups and stay off against the shared database.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database
/// - `Err(AppError)` - Failed to connect to database or run migrations
pub async fn connect_to_database(
    config: &Config,
) -> Result<sea_orm::DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    if config.run_migrations {
        Migrator::up(&db, None).await?;
        tracing::info!("Applied pending migrations");
    }

    Ok(db)
}
