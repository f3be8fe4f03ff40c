//! Repository traits
//!
//! Define async repository interfaces for database operations.

use async_trait::async_trait;
use kudos_types::ResourceKind;
use uuid::Uuid;

use crate::error::DbResult;
use crate::models::AccountRow;

/// Account repository trait
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by ID
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<AccountRow>>;

    /// Create a new account
    async fn create(&self, account: CreateAccount) -> DbResult<AccountRow>;

    /// Update the account's subscription tier, returning the updated row
    async fn update_tier(&self, id: Uuid, tier: &str) -> DbResult<AccountRow>;

    /// Mark onboarding as completed
    async fn set_onboarding_completed(&self, id: Uuid) -> DbResult<()>;

    /// Delete an account
    async fn delete(&self, id: Uuid) -> DbResult<()>;
}

/// Create account input
///
/// New accounts always start on the lowest tier; the tier field is set by
/// the repository, not the caller.
#[derive(Debug, Clone)]
pub struct CreateAccount {
    pub id: Uuid,
    pub email: String,
    pub business_name: Option<String>,
}

/// Resource count repository trait
///
/// Counts reflect committed rows at call time, scoped exactly to one
/// account and one resource kind.
#[async_trait]
pub trait ResourceCountRepository: Send + Sync {
    /// Count resources of one kind owned by an account
    async fn count_for_account(&self, account_id: Uuid, kind: ResourceKind) -> DbResult<i64>;
}
