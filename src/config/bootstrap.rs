//! Bootstrap configuration loading from bootstrap.toml.
//!
//! First-run seeding is an explicit step: the operator describes the initial
//! campaign in a TOML file and `main` calls [`seed_initial_campaign`] once
//! after the schema is ready. Nothing is seeded implicitly at startup and no
//! default credentials are involved. Seeding is skipped entirely when any
//! campaign already exists, so restarts are safe.

use crate::{
    core::{
        campaign::{CreateCampaignArgs, add_seller, create_campaign},
        quota::{NumberingScheme, generate_quotas},
    },
    entities::{Campaign, campaign},
    errors::{Error, Result},
};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Configuration structure representing the entire bootstrap.toml file
#[derive(Debug, Deserialize)]
pub struct BootstrapConfig {
    /// The initial campaign to create on an empty database, if any
    pub campaign: Option<CampaignSeed>,
}

/// Seed data for the initial campaign
#[derive(Debug, Deserialize, Clone)]
pub struct CampaignSeed {
    /// Campaign title
    pub title: String,
    /// Description shown to buyers
    #[serde(default)]
    pub description: String,
    /// Price per quota in minor currency units
    pub price_cents: i64,
    /// Number of quotas to generate
    pub total_quotas: i32,
    /// Numbering scheme column value (`"SEQUENTIAL"` or `"PREFIX:<prefix>"`);
    /// sequential when omitted
    pub numbering: Option<String>,
    /// Reservation hold duration in minutes
    pub hold_minutes: Option<i32>,
    /// Initial seller roster
    #[serde(default)]
    pub sellers: Vec<SellerSeed>,
}

/// Seed data for one seller on the initial roster
#[derive(Debug, Deserialize, Clone)]
pub struct SellerSeed {
    /// Seller display name
    pub name: String,
    /// Optional contact (WhatsApp number)
    pub whatsapp: Option<String>,
}

/// Loads bootstrap configuration from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read, the TOML syntax is invalid,
/// or required fields are missing.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<BootstrapConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read bootstrap file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse bootstrap.toml: {e}"),
    })
}

/// Creates the configured initial campaign with its sellers and quotas.
///
/// No-op returning `None` when the database already has at least one campaign
/// (including soft-deleted ones) or when the config has no campaign block.
pub async fn seed_initial_campaign(
    db: &DatabaseConnection,
    config: &BootstrapConfig,
) -> Result<Option<campaign::Model>> {
    let Some(seed) = &config.campaign else {
        return Ok(None);
    };

    if Campaign::find().count(db).await? > 0 {
        info!("campaigns already exist, skipping bootstrap seeding");
        return Ok(None);
    }

    let numbering = match &seed.numbering {
        Some(value) => NumberingScheme::parse(value)?,
        None => NumberingScheme::Sequential,
    };

    let created = create_campaign(
        db,
        CreateCampaignArgs {
            title: seed.title.clone(),
            description: seed.description.clone(),
            price_cents: seed.price_cents,
            total_quotas: seed.total_quotas,
            numbering,
            hold_minutes: seed.hold_minutes,
            created_by: None,
        },
    )
    .await?;

    for seller in &seed.sellers {
        add_seller(db, created.id, seller.name.clone(), seller.whatsapp.clone()).await?;
    }

    let generated = generate_quotas(db, created.id).await?;
    info!(
        campaign_id = created.id,
        sellers = seed.sellers.len(),
        quotas = generated,
        "seeded initial campaign"
    );

    Ok(Some(created))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::campaign::list_sellers;
    use crate::core::quota::list_quotas;
    use crate::test_utils::*;

    fn sample_config() -> BootstrapConfig {
        let toml_str = r#"
            [campaign]
            title = "Community Raffle"
            description = "First drive of the year"
            price_cents = 1000
            total_quotas = 10
            numbering = "PREFIX:RF-"
            hold_minutes = 30

            [[campaign.sellers]]
            name = "Seller 1"
            whatsapp = "+559890000001"

            [[campaign.sellers]]
            name = "Seller 2"
        "#;
        toml::from_str(toml_str).unwrap()
    }

    #[test]
    fn test_parse_bootstrap_config() {
        let config = sample_config();
        let seed = config.campaign.unwrap();
        assert_eq!(seed.title, "Community Raffle");
        assert_eq!(seed.price_cents, 1000);
        assert_eq!(seed.total_quotas, 10);
        assert_eq!(seed.numbering.as_deref(), Some("PREFIX:RF-"));
        assert_eq!(seed.hold_minutes, Some(30));
        assert_eq!(seed.sellers.len(), 2);
        assert!(seed.sellers[1].whatsapp.is_none());
    }

    #[test]
    fn test_parse_empty_config() {
        let config: BootstrapConfig = toml::from_str("").unwrap();
        assert!(config.campaign.is_none());
    }

    #[tokio::test]
    async fn test_seed_creates_campaign_sellers_and_quotas() -> Result<()> {
        let db = setup_test_db().await?;

        let created = seed_initial_campaign(&db, &sample_config())
            .await?
            .unwrap();
        assert_eq!(created.title, "Community Raffle");
        assert_eq!(created.hold_minutes, Some(30));

        assert_eq!(list_sellers(&db, created.id).await?.len(), 2);
        assert_eq!(list_quotas(&db, created.id).await?.len(), 10);

        Ok(())
    }

    #[tokio::test]
    async fn test_seed_skips_when_campaigns_exist() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_campaign(&db, "Existing").await?;

        let result = seed_initial_campaign(&db, &sample_config()).await?;
        assert!(result.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_seed_noop_without_campaign_block() -> Result<()> {
        let db = setup_test_db().await?;

        let config: BootstrapConfig = toml::from_str("").unwrap();
        let result = seed_initial_campaign(&db, &config).await?;
        assert!(result.is_none());

        Ok(())
    }
}
