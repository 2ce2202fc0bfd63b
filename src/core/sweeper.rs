//! Hold sweeper - periodic reconciliation of expired reservation holds.
//!
//! Campaigns may set `hold_minutes`; a RESERVED quota whose `reserved_at` is
//! older than that hold reverts to AVAILABLE so someone else can buy it. This
//! is the one sanctioned backward transition in the quota state machine, and
//! it runs as an explicit background task rather than being checked inline on
//! every read. Campaigns without a hold keep reservations forever; PAID rows
//! are never touched.

use crate::{
    core::campaign::list_active_campaigns,
    entities::{Quota, QuotaStatus, quota},
    errors::Result,
};
use chrono::{Duration, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{DatabaseConnection, prelude::*};
use tracing::{error, info};

/// Releases every RESERVED quota whose hold deadline has passed, clearing the
/// buyer, seller and reservation timestamp. Returns how many rows were
/// released across all campaigns.
pub async fn release_expired_holds(db: &DatabaseConnection, now: DateTimeUtc) -> Result<u64> {
    let mut released = 0;

    for campaign in list_active_campaigns(db).await? {
        let Some(hold_minutes) = campaign.hold_minutes else {
            continue;
        };
        let deadline = now - Duration::minutes(i64::from(hold_minutes));

        let result = Quota::update_many()
            .col_expr(quota::Column::Status, Expr::value(QuotaStatus::Available))
            .col_expr(quota::Column::BuyerName, Expr::value(Option::<String>::None))
            .col_expr(
                quota::Column::BuyerContact,
                Expr::value(Option::<String>::None),
            )
            .col_expr(quota::Column::SellerId, Expr::value(Option::<i64>::None))
            .col_expr(
                quota::Column::ReservedAt,
                Expr::value(Option::<DateTimeUtc>::None),
            )
            .filter(quota::Column::CampaignId.eq(campaign.id))
            .filter(quota::Column::Status.eq(QuotaStatus::Reserved))
            .filter(quota::Column::ReservedAt.lt(deadline))
            .exec(db)
            .await?;

        if result.rows_affected > 0 {
            info!(
                campaign_id = campaign.id,
                released = result.rows_affected,
                "released expired reservation holds"
            );
        }
        released += result.rows_affected;
    }

    Ok(released)
}

/// Runs the sweeper forever on the given period. Errors are logged and the
/// loop continues; a failed sweep is retried on the next tick.
pub async fn run_sweeper(db: DatabaseConnection, period: std::time::Duration) {
    let mut interval = tokio::time::interval(period);
    loop {
        interval.tick().await;
        match release_expired_holds(&db, Utc::now()).await {
            Ok(0) => {}
            Ok(n) => info!(released = n, "hold sweep complete"),
            Err(e) => error!("hold sweep failed: {e}"),
        }
    }
}
