//! Mock repositories for testing

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use kudos_db::{
    AccountRepository, AccountRow, CreateAccount, DbError, DbResult, ResourceCountRepository,
};
use kudos_types::{ResourceKind, Tier};
use uuid::Uuid;

/// In-memory account repository for testing
#[derive(Default, Clone)]
pub struct MockAccountRepository {
    accounts: Arc<DashMap<Uuid, AccountRow>>,
}

impl MockAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a test account directly
    pub fn insert_account(&self, account: AccountRow) {
        self.accounts.insert(account.id, account);
    }

    /// Create a test account on the given tier with onboarding done
    #[allow(dead_code)]
    pub fn test_account(tier: Tier) -> AccountRow {
        AccountRow {
            id: Uuid::new_v4(),
            email: format!("owner-{}@example.com", Uuid::new_v4()),
            business_name: Some("Acme Studio".to_string()),
            tier: tier.as_str().to_string(),
            onboarding_completed: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    /// Create a test account that has not finished onboarding yet
    #[allow(dead_code)]
    pub fn onboarding_account(tier: Tier) -> AccountRow {
        AccountRow {
            onboarding_completed: false,
            ..Self::test_account(tier)
        }
    }
}

#[async_trait]
impl AccountRepository for MockAccountRepository {
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<AccountRow>> {
        Ok(self.accounts.get(&id).map(|r| r.value().clone()))
    }

    async fn create(&self, account: CreateAccount) -> DbResult<AccountRow> {
        let row = AccountRow {
            id: account.id,
            email: account.email,
            business_name: account.business_name,
            tier: Tier::Free.as_str().to_string(),
            onboarding_completed: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.insert_account(row.clone());
        Ok(row)
    }

    async fn update_tier(&self, id: Uuid, tier: &str) -> DbResult<AccountRow> {
        let mut account = self.accounts.get_mut(&id).ok_or(DbError::NotFound)?;
        account.tier = tier.to_string();
        account.updated_at = Utc::now();
        Ok(account.value().clone())
    }

    async fn set_onboarding_completed(&self, id: Uuid) -> DbResult<()> {
        if let Some(mut account) = self.accounts.get_mut(&id) {
            account.onboarding_completed = true;
            account.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> DbResult<()> {
        self.accounts.remove(&id);
        Ok(())
    }
}

/// In-memory resource store that records how many counting queries hit it,
/// so tests can assert when no usage query was made.
#[derive(Default, Clone)]
pub struct MockResourceRepository {
    counts: Arc<DashMap<(Uuid, ResourceKind), i64>>,
    queries: Arc<AtomicU64>,
    fail_next: Arc<AtomicBool>,
}

impl MockResourceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the committed count for an account and kind
    #[allow(dead_code)]
    pub fn set_count(&self, account_id: Uuid, kind: ResourceKind, count: i64) {
        self.counts.insert((account_id, kind), count);
    }

    /// Simulate resource inserts committing
    #[allow(dead_code)]
    pub fn add_resources(&self, account_id: Uuid, kind: ResourceKind, n: i64) {
        *self.counts.entry((account_id, kind)).or_insert(0) += n;
    }

    /// Read the stored count directly, without going through the
    /// repository trait
    #[allow(dead_code)]
    pub fn stored_count(&self, account_id: Uuid, kind: ResourceKind) -> i64 {
        self.counts
            .get(&(account_id, kind))
            .map(|r| *r.value())
            .unwrap_or(0)
    }

    /// How many counting queries have been issued
    #[allow(dead_code)]
    pub fn query_count(&self) -> u64 {
        self.queries.load(Ordering::Relaxed)
    }

    /// Make the next counting query fail like an unavailable store
    #[allow(dead_code)]
    pub fn fail_next_query(&self) {
        self.fail_next.store(true, Ordering::Relaxed);
    }
}

#[async_trait]
impl ResourceCountRepository for MockResourceRepository {
    async fn count_for_account(&self, account_id: Uuid, kind: ResourceKind) -> DbResult<i64> {
        self.queries.fetch_add(1, Ordering::Relaxed);

        if self.fail_next.swap(false, Ordering::Relaxed) {
            return Err(DbError::NotFound);
        }

        Ok(self.stored_count(account_id, kind))
    }
}
