//! Usage snapshots and dashboard statistics

use serde::{Deserialize, Serialize};

use crate::{Limit, ResourceKind, Tier};

/// Percentage at which a resource counts as "near" its limit.
const NEAR_LIMIT_THRESHOLD: u32 = 80;

/// Authoritative per-resource counts for one account at one point in time.
///
/// Snapshots are computed from committed row counts on every call and never
/// cached: quota checks are safety checks, not UX hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageSnapshot {
    /// Testimonials owned by the account
    pub testimonials: u64,
    /// Widgets owned by the account
    pub widgets: u64,
    /// Collection links owned by the account
    pub collection_links: u64,
}

impl UsageSnapshot {
    /// Get the count for a resource kind
    pub const fn get(&self, kind: ResourceKind) -> u64 {
        match kind {
            ResourceKind::Testimonials => self.testimonials,
            ResourceKind::Widgets => self.widgets,
            ResourceKind::CollectionLinks => self.collection_links,
        }
    }
}

/// Consumption statistics for one resource kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceUsage {
    /// Current count
    pub used: u64,
    /// The tier's ceiling
    pub limit: Limit,
    /// Creations left before the ceiling; `None` when unlimited
    pub remaining: Option<u64>,
    /// Rounded percentage of the ceiling consumed; 0 when unlimited
    pub percentage: u32,
    /// Whether one more creation would be denied
    pub is_at_limit: bool,
    /// Whether consumption is in the 80-99% warning band
    pub is_near_limit: bool,
}

impl ResourceUsage {
    /// Compute statistics for a count against a ceiling
    pub fn compute(used: u64, limit: Limit) -> Self {
        match limit {
            Limit::Unlimited => Self {
                used,
                limit,
                remaining: None,
                percentage: 0,
                is_at_limit: false,
                is_near_limit: false,
            },
            Limit::Limited(max) => {
                let percentage = if max > 0 {
                    ((used as f64 / max as f64) * 100.0).round() as u32
                } else {
                    0
                };

                Self {
                    used,
                    limit,
                    remaining: Some(max.saturating_sub(used)),
                    percentage,
                    is_at_limit: used >= max,
                    is_near_limit: percentage >= NEAR_LIMIT_THRESHOLD && percentage < 100,
                }
            }
        }
    }
}

/// Full usage report for an account's dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageStats {
    /// The account's current tier
    pub tier: Tier,
    /// Testimonial consumption
    pub testimonials: ResourceUsage,
    /// Widget consumption
    pub widgets: ResourceUsage,
    /// Collection link consumption
    pub collection_links: ResourceUsage,
}

impl UsageStats {
    /// Build stats from a snapshot and the account's tier
    pub fn from_snapshot(tier: Tier, snapshot: UsageSnapshot) -> Self {
        let limits = tier.limits();
        Self {
            tier,
            testimonials: ResourceUsage::compute(snapshot.testimonials, limits.max_testimonials),
            widgets: ResourceUsage::compute(snapshot.widgets, limits.max_widgets),
            collection_links: ResourceUsage::compute(
                snapshot.collection_links,
                limits.max_collection_links,
            ),
        }
    }

    /// Get the statistics for a resource kind
    pub const fn get(&self, kind: ResourceKind) -> &ResourceUsage {
        match kind {
            ResourceKind::Testimonials => &self.testimonials,
            ResourceKind::Widgets => &self.widgets,
            ResourceKind::CollectionLinks => &self.collection_links,
        }
    }

    /// Decide whether the dashboard should surface an upgrade prompt
    pub fn upgrade_prompt(&self) -> Option<UpgradePrompt> {
        match self.tier {
            Tier::Free => {
                if self.testimonials.is_at_limit {
                    Some(UpgradePrompt {
                        reason: "You've reached your testimonial limit".to_string(),
                        suggested_tier: Tier::Basic,
                    })
                } else if self.widgets.is_at_limit {
                    Some(UpgradePrompt {
                        reason: "You've reached your widget limit".to_string(),
                        suggested_tier: Tier::Basic,
                    })
                } else if self.testimonials.is_near_limit || self.widgets.is_near_limit {
                    Some(UpgradePrompt {
                        reason: "You're approaching your usage limits".to_string(),
                        suggested_tier: Tier::Basic,
                    })
                } else {
                    None
                }
            }
            Tier::Basic => {
                if self.widgets.is_at_limit {
                    Some(UpgradePrompt {
                        reason: "You've reached your widget limit".to_string(),
                        suggested_tier: Tier::Pro,
                    })
                } else {
                    None
                }
            }
            Tier::Pro => None,
        }
    }
}

/// Suggestion to surface on the dashboard when limits are close
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradePrompt {
    /// Why the prompt is shown
    pub reason: String,
    /// The tier that would relieve the pressure
    pub suggested_tier: Tier,
}
