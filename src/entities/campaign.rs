//! Campaign entity - Represents a raffle/fundraising drive.
//!
//! Each campaign has a title, a price per quota in minor currency units, a
//! fixed total quota count, a numbering scheme, an optional reservation-hold
//! duration, and a lifecycle status. Campaigns are soft-deleted so historical
//! quota data is preserved.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a campaign, stored as a string column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum CampaignStatus {
    /// Campaign is visible and accepting reservations
    #[sea_orm(string_value = "ACTIVE")]
    Active,
    /// Campaign was soft-deleted and is hidden from all listings
    #[sea_orm(string_value = "DELETED")]
    Deleted,
}

/// Campaign database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "campaigns")]
pub struct Model {
    /// Unique identifier for the campaign
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable title (e.g., "Christmas Raffle 2026")
    pub title: String,
    /// Longer description shown to buyers
    pub description: String,
    /// Price of a single quota in minor currency units (cents)
    pub price_cents: i64,
    /// Total number of quotas; immutable once quotas have been generated
    pub total_quotas: i32,
    /// Numbering scheme: `"SEQUENTIAL"` or `"PREFIX:<prefix>"`
    pub numbering: String,
    /// Reservation hold duration in minutes; `None` means holds never expire
    pub hold_minutes: Option<i32>,
    /// Lifecycle status (active or soft-deleted)
    pub status: CampaignStatus,
    /// Identifier of the administrator who created the campaign
    pub created_by: Option<String>,
    /// When the campaign was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Campaign and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One campaign has many numbered quotas
    #[sea_orm(has_many = "super::quota::Entity")]
    Quotas,
    /// One campaign has many registered sellers
    #[sea_orm(has_many = "super::seller::Entity")]
    Sellers,
}

impl Related<super::quota::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Quotas.def()
    }
}

impl Related<super::seller::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sellers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
