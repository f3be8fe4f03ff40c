//! Property-based tests for limit arithmetic and transition planning
//!
//! These pin the policy invariants:
//! - creation succeeds iff used < limit, with unlimited above every ceiling
//! - the warning band never overlaps at-limit
//! - transition direction always follows tier rank

use kudos_entitlements::{plan_transition, TransitionDirection};
use kudos_types::{Limit, ResourceUsage, Tier};
use proptest::prelude::*;

/// Generate an arbitrary tier
fn arb_tier() -> impl Strategy<Value = Tier> {
    prop_oneof![Just(Tier::Free), Just(Tier::Basic), Just(Tier::Pro)]
}

// ============================================================================
// Limit Properties
// ============================================================================

proptest! {
    /// Property: a finite ceiling admits one more iff strictly below it
    #[test]
    fn prop_finite_limit_allows_iff_strictly_below(
        limit in 0u64..10_000,
        used in 0u64..20_000,
    ) {
        prop_assert_eq!(Limit::Limited(limit).allows(used), used < limit);
    }

    /// Property: unlimited admits any count
    #[test]
    fn prop_unlimited_allows_everything(used in any::<u64>()) {
        prop_assert!(Limit::Unlimited.allows(used));
    }

    /// Property: unlimited compares at or above every finite ceiling
    #[test]
    fn prop_unlimited_is_greatest(limit in any::<u64>()) {
        prop_assert!(Limit::Unlimited >= Limit::Limited(limit));
    }
}

// ============================================================================
// Usage Statistics Properties
// ============================================================================

proptest! {
    /// Property: at-limit tracks the strict comparison and the warning
    /// band never overlaps it
    #[test]
    fn prop_usage_stats_invariants(
        limit in 1u64..10_000,
        used in 0u64..20_000,
    ) {
        let usage = ResourceUsage::compute(used, Limit::Limited(limit));

        prop_assert_eq!(usage.is_at_limit, used >= limit);
        prop_assert_eq!(usage.remaining, Some(limit.saturating_sub(used)));

        if usage.is_near_limit {
            prop_assert!(!usage.is_at_limit);
            prop_assert!(usage.percentage >= 80 && usage.percentage < 100);
        }
        if used >= limit {
            prop_assert!(!usage.is_near_limit);
        }
    }

    /// Property: unlimited resources never report pressure
    #[test]
    fn prop_unlimited_usage_reports_zero_pressure(used in any::<u64>()) {
        let usage = ResourceUsage::compute(used, Limit::Unlimited);
        prop_assert_eq!(usage.percentage, 0);
        prop_assert_eq!(usage.remaining, None);
        prop_assert!(!usage.is_at_limit);
        prop_assert!(!usage.is_near_limit);
    }
}

// ============================================================================
// Transition Planning Properties
// ============================================================================

proptest! {
    /// Property: direction always follows tier rank
    #[test]
    fn prop_transition_direction_matches_rank(a in arb_tier(), b in arb_tier()) {
        let plan = plan_transition(a, b);
        let expected = match b.rank().cmp(&a.rank()) {
            std::cmp::Ordering::Greater => TransitionDirection::Upgrade,
            std::cmp::Ordering::Less => TransitionDirection::Downgrade,
            std::cmp::Ordering::Equal => TransitionDirection::Noop,
        };
        prop_assert_eq!(plan.direction, expected);
    }

    /// Property: a no-op plan has an empty diff, a real transition a
    /// non-empty one
    #[test]
    fn prop_diff_is_empty_iff_noop(a in arb_tier(), b in arb_tier()) {
        let plan = plan_transition(a, b);
        let empty = plan.limit_changes.is_empty() && plan.feature_changes.is_empty();
        prop_assert_eq!(empty, a == b);
    }

    /// Property: planning is symmetric - reversing the transition flips
    /// every change
    #[test]
    fn prop_reverse_plan_mirrors_changes(a in arb_tier(), b in arb_tier()) {
        let forward = plan_transition(a, b);
        let reverse = plan_transition(b, a);
        prop_assert_eq!(forward.limit_changes.len(), reverse.limit_changes.len());
        prop_assert_eq!(forward.feature_changes.len(), reverse.feature_changes.len());
    }
}
