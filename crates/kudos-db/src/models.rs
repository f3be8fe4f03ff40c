//! Database row models
//!
//! These types map directly to database rows using SQLx's FromRow derive.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Account row from the database
#[derive(Debug, Clone, FromRow)]
pub struct AccountRow {
    pub id: Uuid,
    pub email: String,
    pub business_name: Option<String>,
    pub tier: String,
    pub onboarding_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AccountRow {
    /// Convert to domain AccountId
    pub fn account_id(&self) -> kudos_types::AccountId {
        kudos_types::AccountId(self.id)
    }

    /// Parse the stored tier key, degrading unknown values to the lowest
    /// tier rather than failing the request.
    pub fn subscription_tier(&self) -> kudos_types::Tier {
        self.tier.parse().unwrap_or(kudos_types::Tier::Free)
    }
}
