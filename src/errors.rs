//! Unified error types and result handling.
//!
//! The error taxonomy follows how callers are expected to react:
//! not-found and invalid-input errors are terminal for the request,
//! `QuotaUnavailable` is an expected conflict the buyer resolves by picking
//! another number, and `LockTimeout` is transient and safe to retry.

use crate::entities::QuotaStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Campaign {id} not found")]
    CampaignNotFound { id: i64 },

    #[error("Quota {number} not found in campaign {campaign_id}")]
    QuotaNotFound { campaign_id: i64, number: i32 },

    #[error("Quota {number} is not available (current status: {status})")]
    QuotaUnavailable { number: i32, status: QuotaStatus },

    #[error("Seller {seller_id} is not registered for campaign {campaign_id}")]
    SellerNotAuthorized { campaign_id: i64, seller_id: i64 },

    #[error("Timed out waiting for a row lock: {message}")]
    LockTimeout { message: String },

    #[error("Database error: {0}")]
    Database(sea_orm::DbErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

impl From<sea_orm::DbErr> for Error {
    fn from(err: sea_orm::DbErr) -> Self {
        // sqlx surfaces lock contention as a plain database error; classify
        // the known busy/lock messages so callers can retry those.
        let message = err.to_string();
        if message.contains("database is locked")
            || message.contains("lock timeout")
            || message.contains("could not obtain lock")
        {
            Error::LockTimeout { message }
        } else {
            Error::Database(err)
        }
    }
}

impl Error {
    /// True for the expected "quota already taken" outcome; the caller should
    /// pick another number rather than retry the same one.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::QuotaUnavailable { .. })
    }

    /// True for transient failures where retrying the same request may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::LockTimeout { .. })
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
