//! Tier transition planning and application
//!
//! Planning is pure computation over the catalog; applying a transition is
//! the one write this crate performs.

use kudos_db::{AccountRepository, AccountRow, ResourceCountRepository};
use kudos_types::{
    AccountId, Feature, Limit, ResourceKind, Tier, ALL_FEATURES, ALL_RESOURCE_KINDS, ALL_TIERS,
};
use serde::{Deserialize, Serialize};

use crate::{EntitlementError, EntitlementService};

/// Direction of a tier change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionDirection {
    /// Target ranks above the current tier
    Upgrade,
    /// Target ranks below the current tier
    Downgrade,
    /// Target equals the current tier
    Noop,
}

/// One resource ceiling that differs between two tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitChange {
    /// The affected resource kind
    pub kind: ResourceKind,
    /// Ceiling on the current tier
    pub from: Limit,
    /// Ceiling on the target tier
    pub to: Limit,
}

/// One feature flag that differs between two tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureChange {
    /// The affected feature
    pub feature: Feature,
    /// Whether the current tier enables it
    pub from: bool,
    /// Whether the target tier enables it
    pub to: bool,
}

/// What a tier change would mean for an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionPlan {
    /// The current tier
    pub from: Tier,
    /// The target tier
    pub to: Tier,
    /// Upgrade, downgrade, or no-op
    pub direction: TransitionDirection,
    /// Every resource ceiling that would change
    pub limit_changes: Vec<LimitChange>,
    /// Every feature flag that would change
    pub feature_changes: Vec<FeatureChange>,
}

/// Compare two tiers and diff every limit and flag that would change.
///
/// Pure computation, no side effects.
pub fn plan_transition(current: Tier, target: Tier) -> TransitionPlan {
    let direction = match target.cmp(&current) {
        std::cmp::Ordering::Greater => TransitionDirection::Upgrade,
        std::cmp::Ordering::Less => TransitionDirection::Downgrade,
        std::cmp::Ordering::Equal => TransitionDirection::Noop,
    };

    let from = current.limits();
    let to = target.limits();

    let limit_changes = ALL_RESOURCE_KINDS
        .into_iter()
        .filter_map(|kind| {
            let (a, b) = (from.limit_for(kind), to.limit_for(kind));
            (a != b).then_some(LimitChange { kind, from: a, to: b })
        })
        .collect();

    let feature_changes = ALL_FEATURES
        .into_iter()
        .filter_map(|feature| {
            let (a, b) = (from.allows_feature(feature), to.allows_feature(feature));
            (a != b).then_some(FeatureChange {
                feature,
                from: a,
                to: b,
            })
        })
        .collect();

    TransitionPlan {
        from: current,
        to: target,
        direction,
        limit_changes,
        feature_changes,
    }
}

/// Tiers ranked above the current one, for upgrade pickers
pub fn upgrade_options(current: Tier) -> Vec<Tier> {
    ALL_TIERS.into_iter().filter(|t| *t > current).collect()
}

impl<A: AccountRepository, R: ResourceCountRepository> EntitlementService<A, R> {
    /// Apply a tier change to an account.
    ///
    /// Transitioning to the current tier is rejected with `AlreadyOnTier`.
    /// Downgrades are permitted even when usage exceeds the target tier's
    /// limits: existing resources are never deleted or deactivated, only
    /// future creations are blocked. The write is a single update with
    /// last-write-wins semantics.
    pub async fn apply_transition(
        &self,
        account_id: AccountId,
        target: Tier,
    ) -> Result<AccountRow, EntitlementError> {
        let account = self.load_account(account_id).await?;
        let current = account.subscription_tier();

        if current == target {
            return Err(EntitlementError::AlreadyOnTier(target));
        }

        let plan = plan_transition(current, target);
        let updated = self.accounts().update_tier(account.id, target.as_str()).await?;

        tracing::info!(
            %account_id,
            from = %current,
            to = %target,
            direction = ?plan.direction,
            "subscription tier changed"
        );

        Ok(updated)
    }
}
