//! Quota store - bulk generation and read-only listing of campaign quotas.
//!
//! Generation is idempotent: rows are inserted with `ON CONFLICT DO NOTHING`
//! on `(campaign_id, number)`, so repeated generation calls never duplicate
//! numbers and never touch rows that were already reserved or paid.

use crate::{
    core::campaign::get_campaign,
    entities::{Quota, QuotaStatus, quota},
    errors::{Error, Result},
};
use sea_orm::sea_query::OnConflict;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::debug;

/// How many quota rows to insert per statement during generation.
const GENERATION_CHUNK_SIZE: usize = 500;

/// How quota numbers are rendered for display.
///
/// The numbers themselves are always the integers `1..=total_quotas`; the
/// scheme only affects the label shown on tickets and listings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NumberingScheme {
    /// Plain sequential numbers: `1`, `2`, `3`, ...
    Sequential,
    /// Prefixed, zero-padded labels: `RF-001`, `RF-002`, ...
    Prefixed(String),
}

impl NumberingScheme {
    /// Parses the scheme from its campaign-column representation
    /// (`"SEQUENTIAL"` or `"PREFIX:<prefix>"`).
    pub fn parse(value: &str) -> Result<Self> {
        if value == "SEQUENTIAL" {
            return Ok(Self::Sequential);
        }
        if let Some(prefix) = value.strip_prefix("PREFIX:") {
            if prefix.is_empty() {
                return Err(Error::InvalidInput {
                    message: "numbering prefix cannot be empty".to_string(),
                });
            }
            return Ok(Self::Prefixed(prefix.to_string()));
        }
        Err(Error::InvalidInput {
            message: format!("unknown numbering scheme: {value}"),
        })
    }

    /// The campaign-column representation of this scheme.
    #[must_use]
    pub fn as_column_value(&self) -> String {
        match self {
            Self::Sequential => "SEQUENTIAL".to_string(),
            Self::Prefixed(prefix) => format!("PREFIX:{prefix}"),
        }
    }

    /// Renders the display label for a quota number.
    #[must_use]
    pub fn label(&self, number: i32) -> String {
        match self {
            Self::Sequential => number.to_string(),
            Self::Prefixed(prefix) => format!("{prefix}{number:03}"),
        }
    }
}

/// Inserts one AVAILABLE quota row per number `1..=total_quotas` for the
/// campaign, returning how many rows were actually inserted.
///
/// Safe to call repeatedly: numbers that already exist are skipped, so a
/// partially failed generation can simply be re-run. The campaign's quota
/// count is fixed once generation has happened; there is deliberately no way
/// to regenerate with a different total.
pub async fn generate_quotas(db: &DatabaseConnection, campaign_id: i64) -> Result<u64> {
    let campaign = get_campaign(db, campaign_id)
        .await?
        .ok_or(Error::CampaignNotFound { id: campaign_id })?;

    let mut inserted = 0;
    let numbers: Vec<i32> = (1..=campaign.total_quotas).collect();
    for chunk in numbers.chunks(GENERATION_CHUNK_SIZE) {
        let rows = chunk.iter().map(|&number| quota::ActiveModel {
            campaign_id: Set(campaign_id),
            number: Set(number),
            status: Set(QuotaStatus::Available),
            ..Default::default()
        });

        inserted += Quota::insert_many(rows)
            .on_conflict(
                OnConflict::columns([quota::Column::CampaignId, quota::Column::Number])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;
    }

    debug!(
        campaign_id,
        total = campaign.total_quotas,
        inserted,
        "generated quotas"
    );
    Ok(inserted)
}

/// Retrieves every quota of a campaign in ascending number order.
///
/// Read-only; this is the board buyers browse to pick a number, so the
/// ordering is part of the contract.
pub async fn list_quotas(db: &DatabaseConnection, campaign_id: i64) -> Result<Vec<quota::Model>> {
    Quota::find()
        .filter(quota::Column::CampaignId.eq(campaign_id))
        .order_by_asc(quota::Column::Number)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Counts the quotas of a campaign currently in the given status.
pub async fn count_quotas_by_status(
    db: &DatabaseConnection,
    campaign_id: i64,
    status: QuotaStatus,
) -> Result<u64> {
    Quota::find()
        .filter(quota::Column::CampaignId.eq(campaign_id))
        .filter(quota::Column::Status.eq(status))
        .count(db)
        .await
        .map_err(Into::into)
}
