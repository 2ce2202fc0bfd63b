//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod campaign;
pub mod quota;
pub mod seller;

// Re-export specific types to avoid conflicts
pub use campaign::{
    CampaignStatus, Column as CampaignColumn, Entity as Campaign, Model as CampaignModel,
};
pub use quota::{Column as QuotaColumn, Entity as Quota, Model as QuotaModel, QuotaStatus};
pub use seller::{Column as SellerColumn, Entity as Seller, Model as SellerModel};
