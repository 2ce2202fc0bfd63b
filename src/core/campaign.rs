//! Campaign registry - campaign metadata and the seller roster.
//!
//! This is the read-side authority consulted by the reservation service: it
//! answers "does this campaign exist and is it active" and "is this seller on
//! the roster". It also owns campaign creation, soft deletion, and progress
//! counts. Quota generation lives in [`crate::core::quota`] and is an explicit
//! administrator step, not a side effect of creation.

use crate::{
    core::quota::{NumberingScheme, count_quotas_by_status},
    entities::{Campaign, CampaignStatus, QuotaStatus, Seller, campaign, seller},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, SqlErr, prelude::*};

/// Arguments for creating a campaign.
#[derive(Clone, Debug)]
pub struct CreateCampaignArgs {
    /// Campaign title, must be non-empty
    pub title: String,
    /// Longer description shown to buyers
    pub description: String,
    /// Price per quota in minor currency units, must be positive
    pub price_cents: i64,
    /// Number of quotas, must be positive; fixed once quotas are generated
    pub total_quotas: i32,
    /// Numbering scheme for displayed quota labels
    pub numbering: NumberingScheme,
    /// Reservation hold duration in minutes; `None` disables expiry
    pub hold_minutes: Option<i32>,
    /// Identifier of the creating administrator
    pub created_by: Option<String>,
}

/// Per-status quota counts for a campaign, used in campaign listings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CampaignProgress {
    /// Quotas still open for reservation
    pub available: u64,
    /// Quotas reserved and awaiting payment
    pub reserved: u64,
    /// Quotas with confirmed payment
    pub paid: u64,
}

/// Creates a new campaign after validating its parameters.
///
/// Quotas are not generated here; call
/// [`crate::core::quota::generate_quotas`] once the campaign is set up.
pub async fn create_campaign(
    db: &DatabaseConnection,
    args: CreateCampaignArgs,
) -> Result<campaign::Model> {
    if args.title.trim().is_empty() {
        return Err(Error::InvalidInput {
            message: "campaign title cannot be empty".to_string(),
        });
    }
    if args.price_cents <= 0 {
        return Err(Error::InvalidInput {
            message: format!("price must be positive, got {} cents", args.price_cents),
        });
    }
    if args.total_quotas <= 0 {
        return Err(Error::InvalidInput {
            message: format!("total quotas must be positive, got {}", args.total_quotas),
        });
    }
    if args.hold_minutes.is_some_and(|m| m <= 0) {
        return Err(Error::InvalidInput {
            message: "hold duration must be positive when set".to_string(),
        });
    }

    let model = campaign::ActiveModel {
        title: Set(args.title.trim().to_string()),
        description: Set(args.description),
        price_cents: Set(args.price_cents),
        total_quotas: Set(args.total_quotas),
        numbering: Set(args.numbering.as_column_value()),
        hold_minutes: Set(args.hold_minutes),
        status: Set(CampaignStatus::Active),
        created_by: Set(args.created_by),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let result = model.insert(db).await?;
    Ok(result)
}

/// Finds an active campaign by ID, returning None if absent or soft-deleted.
///
/// Generic over the connection so the reservation service can call it inside
/// its transaction.
pub async fn get_campaign<C>(db: &C, campaign_id: i64) -> Result<Option<campaign::Model>>
where
    C: ConnectionTrait,
{
    Campaign::find_by_id(campaign_id)
        .filter(campaign::Column::Status.ne(CampaignStatus::Deleted))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all active campaigns, newest first.
pub async fn list_active_campaigns(db: &DatabaseConnection) -> Result<Vec<campaign::Model>> {
    Campaign::find()
        .filter(campaign::Column::Status.ne(CampaignStatus::Deleted))
        .order_by_desc(campaign::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Returns the per-status quota counts for a campaign.
pub async fn get_campaign_progress(
    db: &DatabaseConnection,
    campaign_id: i64,
) -> Result<CampaignProgress> {
    let campaign = get_campaign(db, campaign_id)
        .await?
        .ok_or(Error::CampaignNotFound { id: campaign_id })?;

    Ok(CampaignProgress {
        available: count_quotas_by_status(db, campaign.id, QuotaStatus::Available).await?,
        reserved: count_quotas_by_status(db, campaign.id, QuotaStatus::Reserved).await?,
        paid: count_quotas_by_status(db, campaign.id, QuotaStatus::Paid).await?,
    })
}

/// Soft-deletes a campaign. Quota rows are kept for the records.
pub async fn soft_delete_campaign(db: &DatabaseConnection, campaign_id: i64) -> Result<()> {
    let campaign = get_campaign(db, campaign_id)
        .await?
        .ok_or(Error::CampaignNotFound { id: campaign_id })?;

    let mut model: campaign::ActiveModel = campaign.into();
    model.status = Set(CampaignStatus::Deleted);
    model.update(db).await?;
    Ok(())
}

/// Registers a seller on a campaign's roster.
///
/// Names are unique within a campaign; a duplicate surfaces as `InvalidInput`.
pub async fn add_seller(
    db: &DatabaseConnection,
    campaign_id: i64,
    name: String,
    whatsapp: Option<String>,
) -> Result<seller::Model> {
    if name.trim().is_empty() {
        return Err(Error::InvalidInput {
            message: "seller name cannot be empty".to_string(),
        });
    }

    get_campaign(db, campaign_id)
        .await?
        .ok_or(Error::CampaignNotFound { id: campaign_id })?;

    let model = seller::ActiveModel {
        campaign_id: Set(campaign_id),
        name: Set(name.trim().to_string()),
        whatsapp: Set(whatsapp),
        ..Default::default()
    };

    model.insert(db).await.map_err(|e| {
        if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
            Error::InvalidInput {
                message: format!("seller '{}' is already registered", name.trim()),
            }
        } else {
            e.into()
        }
    })
}

/// Retrieves the seller roster of a campaign, ordered by name.
pub async fn list_sellers(db: &DatabaseConnection, campaign_id: i64) -> Result<Vec<seller::Model>> {
    Seller::find()
        .filter(seller::Column::CampaignId.eq(campaign_id))
        .order_by_asc(seller::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Checks whether a seller is registered for a campaign.
///
/// Consulted by the reservation service before any quota mutation; works
/// against any connection type so it can run inside the reservation
/// transaction.
pub async fn is_seller_of_campaign<C>(db: &C, campaign_id: i64, seller_id: i64) -> Result<bool>
where
    C: ConnectionTrait,
{
    let found = Seller::find_by_id(seller_id)
        .filter(seller::Column::CampaignId.eq(campaign_id))
        .one(db)
        .await?;
    Ok(found.is_some())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::quota::generate_quotas;
    use crate::core::reservation::{confirm_payment, reserve_quota};
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_campaign_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let base = CreateCampaignArgs {
            title: "Raffle".to_string(),
            description: String::new(),
            price_cents: 1000,
            total_quotas: 10,
            numbering: NumberingScheme::Sequential,
            hold_minutes: None,
            created_by: None,
        };

        let empty_title = CreateCampaignArgs {
            title: "   ".to_string(),
            ..base.clone()
        };
        assert!(matches!(
            create_campaign(&db, empty_title).await.unwrap_err(),
            Error::InvalidInput { .. }
        ));

        let zero_price = CreateCampaignArgs {
            price_cents: 0,
            ..base.clone()
        };
        assert!(matches!(
            create_campaign(&db, zero_price).await.unwrap_err(),
            Error::InvalidInput { .. }
        ));

        let zero_total = CreateCampaignArgs {
            total_quotas: 0,
            ..base.clone()
        };
        assert!(matches!(
            create_campaign(&db, zero_total).await.unwrap_err(),
            Error::InvalidInput { .. }
        ));

        let bad_hold = CreateCampaignArgs {
            hold_minutes: Some(0),
            ..base.clone()
        };
        assert!(matches!(
            create_campaign(&db, bad_hold).await.unwrap_err(),
            Error::InvalidInput { .. }
        ));

        let created = create_campaign(&db, base).await?;
        assert_eq!(created.title, "Raffle");
        assert_eq!(created.status, CampaignStatus::Active);

        Ok(())
    }

    #[tokio::test]
    async fn test_soft_delete_hides_campaign() -> Result<()> {
        let db = setup_test_db().await?;
        let campaign = create_test_campaign(&db, "Doomed").await?;

        soft_delete_campaign(&db, campaign.id).await?;

        assert!(get_campaign(&db, campaign.id).await?.is_none());
        assert!(list_active_campaigns(&db).await?.is_empty());

        // Deleting again reports not found
        assert!(matches!(
            soft_delete_campaign(&db, campaign.id).await.unwrap_err(),
            Error::CampaignNotFound { .. }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_list_active_campaigns_newest_first() -> Result<()> {
        let db = setup_test_db().await?;
        let first = create_test_campaign(&db, "First").await?;
        let second = create_test_campaign(&db, "Second").await?;

        let campaigns = list_active_campaigns(&db).await?;
        assert_eq!(campaigns.len(), 2);
        assert_eq!(campaigns[0].id, second.id);
        assert_eq!(campaigns[1].id, first.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_add_seller_and_roster_order() -> Result<()> {
        let db = setup_test_db().await?;
        let campaign = create_test_campaign(&db, "Raffle").await?;

        add_seller(&db, campaign.id, "Zeca".to_string(), None).await?;
        add_seller(
            &db,
            campaign.id,
            "Ana".to_string(),
            Some("+5511999990000".to_string()),
        )
        .await?;

        let roster = list_sellers(&db, campaign.id).await?;
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].name, "Ana");
        assert_eq!(roster[1].name, "Zeca");

        Ok(())
    }

    #[tokio::test]
    async fn test_add_seller_duplicate_name_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        let campaign = create_test_campaign(&db, "Raffle").await?;

        add_seller(&db, campaign.id, "Ana".to_string(), None).await?;
        let result = add_seller(&db, campaign.id, "Ana".to_string(), None).await;
        assert!(matches!(result.unwrap_err(), Error::InvalidInput { .. }));

        // Same name on another campaign is fine
        let other = create_test_campaign(&db, "Other Raffle").await?;
        add_seller(&db, other.id, "Ana".to_string(), None).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_is_seller_of_campaign() -> Result<()> {
        let db = setup_test_db().await?;
        let campaign = create_test_campaign(&db, "Raffle").await?;
        let other = create_test_campaign(&db, "Other").await?;
        let seller = add_test_seller(&db, campaign.id, "Ana").await?;

        assert!(is_seller_of_campaign(&db, campaign.id, seller.id).await?);
        assert!(!is_seller_of_campaign(&db, other.id, seller.id).await?);
        assert!(!is_seller_of_campaign(&db, campaign.id, 999).await?);

        Ok(())
    }

    #[tokio::test]
    async fn test_campaign_progress_counts() -> Result<()> {
        let (db, campaign, seller) = setup_with_campaign().await?;

        let progress = get_campaign_progress(&db, campaign.id).await?;
        assert_eq!(
            progress,
            CampaignProgress {
                available: 5,
                reserved: 0,
                paid: 0
            }
        );

        reserve_quota(&db, campaign.id, 1, seller.id, "Maria", "+559890000001").await?;
        reserve_quota(&db, campaign.id, 2, seller.id, "Joana", "+559890000002").await?;
        confirm_payment(&db, campaign.id, &[1]).await?;

        let progress = get_campaign_progress(&db, campaign.id).await?;
        assert_eq!(
            progress,
            CampaignProgress {
                available: 3,
                reserved: 1,
                paid: 1
            }
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_generate_quotas_for_deleted_campaign_fails() -> Result<()> {
        let db = setup_test_db().await?;
        let campaign = create_test_campaign(&db, "Doomed").await?;
        soft_delete_campaign(&db, campaign.id).await?;

        let result = generate_quotas(&db, campaign.id).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::CampaignNotFound { .. }
        ));

        Ok(())
    }
}
