//! Reservation service - the only mutator of quota status at reservation time.
//!
//! Every claim runs inside a database transaction and transitions the target
//! row with a single conditional UPDATE (`... WHERE status = AVAILABLE`), so
//! the store serializes concurrent attempts on the same number: exactly one
//! statement matches the row and wins, every other attempt matches nothing,
//! observes the committed status on re-read, and fails with a conflict. No
//! multi-row locks are taken for a single reservation; batch reservations
//! claim their rows in ascending number order.

use crate::{
    core::campaign::{get_campaign, is_seller_of_campaign},
    entities::{Quota, QuotaStatus, quota},
    errors::{Error, Result},
};
use sea_orm::sea_query::Expr;
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait, prelude::*};
use tracing::debug;

/// Reserves a single quota for a buyer.
///
/// Preconditions: the campaign is active, the seller is on its roster, and
/// buyer name and contact are non-empty. On success the quota is RESERVED
/// with buyer, seller and timestamp recorded, and no other buyer can hold the
/// same number. A quota that is already reserved or paid yields
/// [`Error::QuotaUnavailable`]; the caller should offer another number.
pub async fn reserve_quota(
    db: &DatabaseConnection,
    campaign_id: i64,
    number: i32,
    seller_id: i64,
    buyer_name: &str,
    buyer_contact: &str,
) -> Result<quota::Model> {
    let reserved = reserve_quotas(
        db,
        campaign_id,
        &[number],
        seller_id,
        buyer_name,
        buyer_contact,
    )
    .await?;
    // reserve_quotas returns exactly one model per requested number
    reserved
        .into_iter()
        .next()
        .ok_or(Error::QuotaNotFound {
            campaign_id,
            number,
        })
}

/// Reserves a batch of quotas atomically for one buyer.
///
/// Numbers are deduplicated and claimed in ascending order, which gives every
/// competing batch the same lock order and rules out deadlocks. The batch is
/// all-or-nothing: if any number is missing or no longer available, the whole
/// transaction rolls back and no quota is mutated.
pub async fn reserve_quotas(
    db: &DatabaseConnection,
    campaign_id: i64,
    numbers: &[i32],
    seller_id: i64,
    buyer_name: &str,
    buyer_contact: &str,
) -> Result<Vec<quota::Model>> {
    if buyer_name.trim().is_empty() {
        return Err(Error::InvalidInput {
            message: "buyer name cannot be empty".to_string(),
        });
    }
    if buyer_contact.trim().is_empty() {
        return Err(Error::InvalidInput {
            message: "buyer contact cannot be empty".to_string(),
        });
    }
    if numbers.is_empty() {
        return Err(Error::InvalidInput {
            message: "no quota numbers given".to_string(),
        });
    }

    let mut targets = numbers.to_vec();
    targets.sort_unstable();
    targets.dedup();

    let txn = db.begin().await?;

    get_campaign(&txn, campaign_id)
        .await?
        .ok_or(Error::CampaignNotFound { id: campaign_id })?;

    if !is_seller_of_campaign(&txn, campaign_id, seller_id).await? {
        return Err(Error::SellerNotAuthorized {
            campaign_id,
            seller_id,
        });
    }

    let now = chrono::Utc::now();
    let mut reserved = Vec::with_capacity(targets.len());
    for number in targets {
        let model = claim_available_quota(
            &txn,
            campaign_id,
            number,
            seller_id,
            buyer_name.trim(),
            buyer_contact.trim(),
            now,
        )
        .await?;
        reserved.push(model);
    }

    txn.commit().await?;

    debug!(
        campaign_id,
        seller_id,
        count = reserved.len(),
        "reserved quotas"
    );
    Ok(reserved)
}

/// Confirms payment for a batch of RESERVED quotas, moving them to PAID.
///
/// This is the boundary an external payment-confirmation step calls into; no
/// payment provider is contacted here. Only RESERVED quotas qualify: an
/// AVAILABLE or already-PAID quota fails the whole batch, keeping the
/// AVAILABLE -> RESERVED -> PAID progression intact.
pub async fn confirm_payment(
    db: &DatabaseConnection,
    campaign_id: i64,
    numbers: &[i32],
) -> Result<Vec<quota::Model>> {
    if numbers.is_empty() {
        return Err(Error::InvalidInput {
            message: "no quota numbers given".to_string(),
        });
    }

    let mut targets = numbers.to_vec();
    targets.sort_unstable();
    targets.dedup();

    let txn = db.begin().await?;

    get_campaign(&txn, campaign_id)
        .await?
        .ok_or(Error::CampaignNotFound { id: campaign_id })?;

    let now = chrono::Utc::now();
    let mut paid = Vec::with_capacity(targets.len());
    for number in targets {
        let updated = Quota::update_many()
            .col_expr(quota::Column::Status, Expr::value(QuotaStatus::Paid))
            .col_expr(quota::Column::PaidAt, Expr::value(now))
            .filter(quota::Column::CampaignId.eq(campaign_id))
            .filter(quota::Column::Number.eq(number))
            .filter(quota::Column::Status.eq(QuotaStatus::Reserved))
            .exec(&txn)
            .await?;

        if updated.rows_affected == 0 {
            return Err(quota_claim_failure(&txn, campaign_id, number).await?);
        }
        paid.push(fetch_quota(&txn, campaign_id, number).await?);
    }

    txn.commit().await?;

    debug!(campaign_id, count = paid.len(), "confirmed payment");
    Ok(paid)
}

/// Transitions one quota AVAILABLE -> RESERVED with a conditional UPDATE.
///
/// The status filter is the check-and-set: the statement only matches while
/// the row is still AVAILABLE, so under concurrency at most one caller gets
/// `rows_affected == 1`. A miss is diagnosed by re-reading the row inside the
/// same transaction.
async fn claim_available_quota<C>(
    db: &C,
    campaign_id: i64,
    number: i32,
    seller_id: i64,
    buyer_name: &str,
    buyer_contact: &str,
    now: DateTimeUtc,
) -> Result<quota::Model>
where
    C: ConnectionTrait,
{
    let updated = Quota::update_many()
        .col_expr(quota::Column::Status, Expr::value(QuotaStatus::Reserved))
        .col_expr(quota::Column::BuyerName, Expr::value(buyer_name))
        .col_expr(quota::Column::BuyerContact, Expr::value(buyer_contact))
        .col_expr(quota::Column::SellerId, Expr::value(seller_id))
        .col_expr(quota::Column::ReservedAt, Expr::value(now))
        .filter(quota::Column::CampaignId.eq(campaign_id))
        .filter(quota::Column::Number.eq(number))
        .filter(quota::Column::Status.eq(QuotaStatus::Available))
        .exec(db)
        .await?;

    if updated.rows_affected == 0 {
        return Err(quota_claim_failure(db, campaign_id, number).await?);
    }

    fetch_quota(db, campaign_id, number).await
}

/// Diagnoses why a conditional update matched nothing: the row either does
/// not exist, or it has already moved past AVAILABLE/RESERVED.
async fn quota_claim_failure<C>(db: &C, campaign_id: i64, number: i32) -> Result<Error>
where
    C: ConnectionTrait,
{
    let current = Quota::find()
        .filter(quota::Column::CampaignId.eq(campaign_id))
        .filter(quota::Column::Number.eq(number))
        .one(db)
        .await?;

    Ok(match current {
        None => Error::QuotaNotFound {
            campaign_id,
            number,
        },
        Some(q) => Error::QuotaUnavailable {
            number,
            status: q.status,
        },
    })
}

async fn fetch_quota<C>(db: &C, campaign_id: i64, number: i32) -> Result<quota::Model>
where
    C: ConnectionTrait,
{
    Quota::find()
        .filter(quota::Column::CampaignId.eq(campaign_id))
        .filter(quota::Column::Number.eq(number))
        .one(db)
        .await?
        .ok_or(Error::QuotaNotFound {
            campaign_id,
            number,
        })
}
