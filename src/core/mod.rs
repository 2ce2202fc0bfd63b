//! Core business logic - framework-agnostic campaign, quota, and reservation
//! operations. Nothing in here knows about HTTP, authentication, or payment
//! providers; callers hand in already-authenticated seller IDs and the
//! payment-confirmation boundary is a plain function call.

pub mod campaign;
pub mod quota;
pub mod reservation;
pub mod sweeper;

pub use campaign::{
    CampaignProgress, CreateCampaignArgs, add_seller, create_campaign, get_campaign,
    get_campaign_progress, is_seller_of_campaign, list_active_campaigns, list_sellers,
    soft_delete_campaign,
};
pub use quota::{NumberingScheme, count_quotas_by_status, generate_quotas, list_quotas};
pub use reservation::{confirm_payment, reserve_quota, reserve_quotas};
pub use sweeper::{release_expired_holds, run_sweeper};
