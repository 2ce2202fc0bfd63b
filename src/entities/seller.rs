//! Seller entity - A user authorized to broker reservations for one campaign.
//!
//! The roster is a per-campaign link table: the same person appears once per
//! campaign they sell for. Seller names are unique within a campaign.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Seller database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "campaign_sellers")]
pub struct Model {
    /// Unique identifier for the seller entry
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the campaign this seller is registered for
    pub campaign_id: i64,
    /// Seller display name, unique within the campaign
    pub name: String,
    /// Optional contact (WhatsApp number)
    pub whatsapp: Option<String>,
}

/// Defines relationships between Seller and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each seller entry belongs to exactly one campaign
    #[sea_orm(
        belongs_to = "super::campaign::Entity",
        from = "Column::CampaignId",
        to = "super::campaign::Column::Id"
    )]
    Campaign,
    /// Quotas this seller has reserved
    #[sea_orm(has_many = "super::quota::Entity")]
    Quotas,
}

impl Related<super::campaign::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Campaign.def()
    }
}

impl Related<super::quota::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Quotas.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
