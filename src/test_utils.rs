//! Shared test utilities for the quota service.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{campaign, quota},
    entities,
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test campaign with sensible defaults.
///
/// # Defaults
/// * `price_cents`: 1000
/// * `total_quotas`: 5
/// * `numbering`: sequential
/// * `hold_minutes`: None (reservations never expire)
pub async fn create_test_campaign(
    db: &DatabaseConnection,
    title: &str,
) -> Result<entities::campaign::Model> {
    campaign::create_campaign(
        db,
        campaign::CreateCampaignArgs {
            title: title.to_string(),
            description: "Test campaign".to_string(),
            price_cents: 1000,
            total_quotas: 5,
            numbering: quota::NumberingScheme::Sequential,
            hold_minutes: None,
            created_by: None,
        },
    )
    .await
}

/// Creates a test campaign with a reservation hold, for sweeper tests.
pub async fn create_held_campaign(
    db: &DatabaseConnection,
    title: &str,
    hold_minutes: i32,
) -> Result<entities::campaign::Model> {
    campaign::create_campaign(
        db,
        campaign::CreateCampaignArgs {
            title: title.to_string(),
            description: "Test campaign".to_string(),
            price_cents: 1000,
            total_quotas: 5,
            numbering: quota::NumberingScheme::Sequential,
            hold_minutes: Some(hold_minutes),
            created_by: None,
        },
    )
    .await
}

/// Registers a test seller on a campaign.
pub async fn add_test_seller(
    db: &DatabaseConnection,
    campaign_id: i64,
    name: &str,
) -> Result<entities::seller::Model> {
    campaign::add_seller(db, campaign_id, name.to_string(), None).await
}

/// Sets up a complete test environment: a 5-quota campaign with generated
/// quotas and one registered seller. Returns (db, campaign, seller).
pub async fn setup_with_campaign() -> Result<(
    DatabaseConnection,
    entities::campaign::Model,
    entities::seller::Model,
)> {
    let db = setup_test_db().await?;
    let campaign_model = create_test_campaign(&db, "Test Campaign").await?;
    let seller = add_test_seller(&db, campaign_model.id, "Test Seller").await?;
    quota::generate_quotas(&db, campaign_model.id).await?;
    Ok((db, campaign_model, seller))
}

/// Like [`setup_with_campaign`], but the campaign carries a reservation hold.
pub async fn setup_with_held_campaign(
    hold_minutes: i32,
) -> Result<(
    DatabaseConnection,
    entities::campaign::Model,
    entities::seller::Model,
)> {
    let db = setup_test_db().await?;
    let campaign_model = create_held_campaign(&db, "Held Campaign", hold_minutes).await?;
    let seller = add_test_seller(&db, campaign_model.id, "Test Seller").await?;
    quota::generate_quotas(&db, campaign_model.id).await?;
    Ok((db, campaign_model, seller))
}
