use anyhow::Context;
use sea_orm_migration::MigratorTrait;
use tracing::info;

use opsboard_api::{config, db, migrator::Migrator};

/// Schema maintenance: `migration [up|down|status|fresh]`, defaults to `up`.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = config::load_config().context("failed to load configuration")?;
    config::init_tracing(cfg.log_level(), cfg.log_json);

    let command = std::env::args().nth(1).unwrap_or_else(|| "up".to_string());
    let pool = db::establish_connection_from_app_config(&cfg).await?;

    match command.as_str() {
        "up" => {
            db::run_migrations(&pool).await?;
        }
        "down" => {
            info!("Rolling back last migration");
            Migrator::down(&pool, Some(1)).await?;
        }
        "fresh" => {
            info!("Dropping all tables and re-applying migrations");
            Migrator::fresh(&pool).await?;
        }
        "status" => {
            Migrator::status(&pool).await?;
        }
        other => anyhow::bail!("unknown command '{}', expected up|down|status|fresh", other),
    }

    db::close_pool(pool).await?;
    info!("Migration command '{}' finished", command);
    Ok(())
}
