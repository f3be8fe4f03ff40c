//! Entitlement checking service
//!
//! One service answers all per-request policy questions: counted quota
//! checks, boolean feature gates, and usage reporting. Every answer is
//! derived from the tier catalog plus authoritative store reads made at
//! call time.

use std::sync::Arc;

use kudos_db::{AccountRepository, AccountRow, ResourceCountRepository};
use kudos_types::{
    AccountId, Feature, Limit, ResourceKind, SubmissionKind, Tier, UsageSnapshot, UsageStats,
};

use crate::EntitlementError;

/// Entitlement checker backed by the account and resource stores
#[derive(Clone)]
pub struct EntitlementService<A: AccountRepository, R: ResourceCountRepository> {
    accounts: Arc<A>,
    resources: Arc<R>,
}

impl<A: AccountRepository, R: ResourceCountRepository> EntitlementService<A, R> {
    /// Create a new entitlement service
    pub fn new(accounts: Arc<A>, resources: Arc<R>) -> Self {
        Self {
            accounts,
            resources,
        }
    }

    /// Access the account store (used by tier transitions)
    pub(crate) fn accounts(&self) -> &A {
        &self.accounts
    }

    /// Load an account or fail with `AccountNotFound`
    pub(crate) async fn load_account(
        &self,
        account_id: AccountId,
    ) -> Result<AccountRow, EntitlementError> {
        self.accounts
            .find_by_id(account_id.0)
            .await?
            .ok_or(EntitlementError::AccountNotFound)
    }

    /// Get the account's current tier
    pub async fn account_tier(&self, account_id: AccountId) -> Result<Tier, EntitlementError> {
        Ok(self.load_account(account_id).await?.subscription_tier())
    }

    /// Check whether one more resource of `kind` may be created.
    ///
    /// The tier is resolved before usage is read, and the decision uses
    /// both reads from this call only. The check is not atomic with the
    /// caller's subsequent insert: two concurrent requests can both pass
    /// and overshoot the ceiling by one. No lock is taken here.
    pub async fn check_limit(
        &self,
        account_id: AccountId,
        kind: ResourceKind,
    ) -> Result<(), EntitlementError> {
        let account = self.load_account(account_id).await?;
        let tier = account.subscription_tier();

        // Open ceilings skip the counting query entirely.
        let Limit::Limited(limit) = tier.limits().limit_for(kind) else {
            return Ok(());
        };

        let current = self
            .resources
            .count_for_account(account_id.0, kind)
            .await?
            .max(0) as u64;

        let decision = decide_quota(kind, tier, limit, current, account.onboarding_completed);
        if decision.is_err() {
            tracing::debug!(%account_id, %kind, current, limit, "creation denied by quota");
        }
        decision
    }

    /// Get the authoritative per-resource counts for an account.
    ///
    /// Fails with `AccountNotFound` for a missing account; callers must
    /// not read that as zero usage.
    pub async fn usage_snapshot(
        &self,
        account_id: AccountId,
    ) -> Result<UsageSnapshot, EntitlementError> {
        self.load_account(account_id).await?;
        self.snapshot_counts(account_id).await
    }

    /// Get usage statistics for the account's dashboard.
    ///
    /// Read-only: no enforcement side effects.
    pub async fn usage_stats(&self, account_id: AccountId) -> Result<UsageStats, EntitlementError> {
        let account = self.load_account(account_id).await?;
        let snapshot = self.snapshot_counts(account_id).await?;
        Ok(UsageStats::from_snapshot(account.subscription_tier(), snapshot))
    }

    async fn snapshot_counts(
        &self,
        account_id: AccountId,
    ) -> Result<UsageSnapshot, EntitlementError> {
        let testimonials = self
            .resources
            .count_for_account(account_id.0, ResourceKind::Testimonials)
            .await?
            .max(0) as u64;
        let widgets = self
            .resources
            .count_for_account(account_id.0, ResourceKind::Widgets)
            .await?
            .max(0) as u64;
        let collection_links = self
            .resources
            .count_for_account(account_id.0, ResourceKind::CollectionLinks)
            .await?
            .max(0) as u64;

        Ok(UsageSnapshot {
            testimonials,
            widgets,
            collection_links,
        })
    }

    /// Advisory feature check for conditional UI
    pub async fn can_use_feature(
        &self,
        account_id: AccountId,
        feature: Feature,
    ) -> Result<bool, EntitlementError> {
        let tier = self.account_tier(account_id).await?;
        Ok(tier.limits().allows_feature(feature))
    }

    /// Enforcing feature check.
    ///
    /// Reads the same catalog flags as [`can_use_feature`], with the tier
    /// fetched once per call.
    ///
    /// [`can_use_feature`]: Self::can_use_feature
    pub async fn require_feature(
        &self,
        account_id: AccountId,
        feature: Feature,
    ) -> Result<(), EntitlementError> {
        let tier = self.account_tier(account_id).await?;

        if tier.limits().allows_feature(feature) {
            Ok(())
        } else {
            Err(EntitlementError::FeatureNotAvailable {
                feature,
                required_tier: feature.required_tier(),
                current_tier: tier,
            })
        }
    }

    /// Gate a testimonial submission by its media kind.
    ///
    /// Text and image submissions pass on every tier; audio and video are
    /// enforced through their catalog feature flags.
    pub async fn require_submission_kind(
        &self,
        account_id: AccountId,
        kind: SubmissionKind,
    ) -> Result<(), EntitlementError> {
        match kind.required_feature() {
            Some(feature) => self.require_feature(account_id, feature).await,
            None => Ok(()),
        }
    }
}

impl<A: AccountRepository, R: ResourceCountRepository> std::fmt::Debug
    for EntitlementService<A, R>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntitlementService").finish()
    }
}

/// Decide a counted-quota check from values already read from the stores.
///
/// The first collection link of an account that has not completed
/// onboarding is exempt from the ceiling; the exemption holds only while
/// the count is exactly zero. Everything else is the strict `>=`
/// comparison: at-limit means "cannot add one more".
fn decide_quota(
    kind: ResourceKind,
    tier: Tier,
    limit: u64,
    current: u64,
    onboarding_completed: bool,
) -> Result<(), EntitlementError> {
    if kind == ResourceKind::CollectionLinks && !onboarding_completed && current == 0 {
        return Ok(());
    }

    if current >= limit {
        return Err(EntitlementError::LimitExceeded {
            kind,
            current,
            limit,
            suggested_tier: tier.next().unwrap_or(Tier::Pro),
        });
    }

    Ok(())
}
