//! Migrate command - Schema management for the users table.

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::Database;

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    // Manual control: nothing runs on connect
    let db = Database::connect_without_migrations(&config).await?;

    match args.action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            tracing::info!("Schema is up to date");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            tracing::info!("Rolled back the last applied migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            let pending = status.iter().filter(|(_, applied)| !applied).count();

            for (name, applied) in &status {
                println!("{:<8} {}", if *applied { "applied" } else { "pending" }, name);
            }
            tracing::info!(total = status.len(), pending, "Migration status listed");
        }
        MigrateAction::Fresh => {
            tracing::warn!("Dropping all tables before re-running migrations");
            db.fresh_migrations().await?;
            tracing::info!("Schema recreated from scratch");
        }
    }

    Ok(())
}
