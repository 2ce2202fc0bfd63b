//! Quota entity - One numbered, purchasable unit of a raffle campaign.
//!
//! Quotas are created in bulk when an administrator triggers generation for a
//! campaign, one row per number. The `(campaign_id, number)` pair is unique
//! and rows are never deleted individually. Status moves monotonically
//! AVAILABLE -> RESERVED -> PAID; the only backward transition is the hold
//! sweeper releasing a stale RESERVED row.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sale status of a single quota, stored as a string column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum QuotaStatus {
    /// Open for reservation
    #[sea_orm(string_value = "AVAILABLE")]
    Available,
    /// Claimed for a buyer, awaiting payment confirmation
    #[sea_orm(string_value = "RESERVED")]
    Reserved,
    /// Payment confirmed; terminal state
    #[sea_orm(string_value = "PAID")]
    Paid,
}

impl std::fmt::Display for QuotaStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Available => "AVAILABLE",
            Self::Reserved => "RESERVED",
            Self::Paid => "PAID",
        };
        f.write_str(s)
    }
}

/// Quota database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "campaign_quotas")]
pub struct Model {
    /// Unique identifier for the quota row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the campaign this quota belongs to
    pub campaign_id: i64,
    /// Quota number, unique within the campaign (1..=total_quotas)
    pub number: i32,
    /// Current sale status
    pub status: QuotaStatus,
    /// Buyer name recorded at reservation time
    pub buyer_name: Option<String>,
    /// Buyer contact (phone/WhatsApp) recorded at reservation time
    pub buyer_contact: Option<String>,
    /// Seller who brokered the reservation
    pub seller_id: Option<i64>,
    /// When the quota was reserved
    pub reserved_at: Option<DateTimeUtc>,
    /// When payment was confirmed
    pub paid_at: Option<DateTimeUtc>,
}

/// Defines relationships between Quota and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each quota belongs to exactly one campaign
    #[sea_orm(
        belongs_to = "super::campaign::Entity",
        from = "Column::CampaignId",
        to = "super::campaign::Column::Id"
    )]
    Campaign,
    /// Optional seller who brokered the current reservation
    #[sea_orm(
        belongs_to = "super::seller::Entity",
        from = "Column::SellerId",
        to = "super::seller::Column::Id"
    )]
    Seller,
}

impl Related<super::campaign::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Campaign.def()
    }
}

impl Related<super::seller::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Seller.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
