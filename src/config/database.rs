//! Database configuration module.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! It provides functions for establishing database connections and creating all necessary
//! tables based on the entity definitions. Table creation uses `SeaORM`'s
//! `Schema::create_table_from_entity` method to generate SQL statements from the entity
//! models, so the schema always matches the Rust struct definitions without manual SQL.
//! The composite unique indexes that back the quota and seller invariants are created
//! alongside the tables.

use crate::entities::{Campaign, Quota, Seller};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from environment variable or returns default `SQLite` path.
///
/// This function looks for `DATABASE_URL` in the environment and falls back to
/// a default local `SQLite` file if not found.
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/quotas.sqlite".to_string())
}

/// Establishes a connection to the database using the `DATABASE_URL` environment variable.
///
/// Falls back to a default local `SQLite` file if no environment variable is set.
/// This function handles connection errors and provides a clean interface for database
/// access throughout the application.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url()).await.map_err(Into::into)
}

/// Creates all necessary database tables using `SeaORM`'s schema generation from
/// entity definitions, plus the composite unique indexes.
///
/// The unique index on `(campaign_id, number)` is what makes quota generation
/// idempotent and guarantees at most one row per quota number; the index on
/// `(campaign_id, name)` keeps the seller roster free of duplicates.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut campaign_table = schema.create_table_from_entity(Campaign);
    let mut seller_table = schema.create_table_from_entity(Seller);
    let mut quota_table = schema.create_table_from_entity(Quota);

    db.execute(builder.build(campaign_table.if_not_exists()))
        .await?;
    db.execute(builder.build(seller_table.if_not_exists())).await?;
    db.execute(builder.build(quota_table.if_not_exists())).await?;

    // Composite unique indexes are not expressible on the entities themselves.
    db.execute_unprepared(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_campaign_quotas_campaign_number \
         ON campaign_quotas (campaign_id, number)",
    )
    .await?;
    db.execute_unprepared(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_campaign_sellers_campaign_name \
         ON campaign_sellers (campaign_id, name)",
    )
    .await?;

    Ok(())
}
