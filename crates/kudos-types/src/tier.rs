//! Subscription tier catalog
//!
//! The compiled-in registry of tiers, their per-resource limits, and their
//! feature flags. Every enforcement site derives tier ordering, limits, and
//! flags from this one table instead of re-deriving them locally.

use serde::{Deserialize, Serialize};

use crate::Feature;

/// Subscription tier levels, declared lowest to highest.
///
/// The derived `Ord` is the tier rank used for upgrade/downgrade
/// comparisons.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tier {
    /// Free tier - $0/mo, 3 testimonials, 1 widget
    Free,
    /// Basic tier - $9/mo, unlimited testimonials, audio uploads
    Basic,
    /// Pro tier - $19/mo, everything unlimited
    Pro,
}

/// All tiers in rank order.
pub const ALL_TIERS: [Tier; 3] = [Tier::Free, Tier::Basic, Tier::Pro];

impl Tier {
    /// Get the numeric rank for this tier (higher = more entitled)
    pub const fn rank(&self) -> u8 {
        match self {
            Self::Free => 0,
            Self::Basic => 1,
            Self::Pro => 2,
        }
    }

    /// Get the tier immediately above this one, if any
    pub const fn next(&self) -> Option<Tier> {
        match self {
            Self::Free => Some(Tier::Basic),
            Self::Basic => Some(Tier::Pro),
            Self::Pro => None,
        }
    }

    /// Get the entitlement record for this tier
    pub const fn limits(&self) -> &'static TierLimits {
        match self {
            Self::Free => &FREE_LIMITS,
            Self::Basic => &BASIC_LIMITS,
            Self::Pro => &PRO_LIMITS,
        }
    }

    /// Get the stored key for this tier
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "FREE",
            Self::Basic => "BASIC",
            Self::Pro => "PRO",
        }
    }

    /// Get the human-readable display name
    pub const fn display_name(&self) -> &'static str {
        self.limits().name
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Tier {
    type Err = TierParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "FREE" => Ok(Self::Free),
            "BASIC" => Ok(Self::Basic),
            "PRO" => Ok(Self::Pro),
            _ => Err(TierParseError(s.to_string())),
        }
    }
}

/// Error parsing a tier string
#[derive(Debug, Clone)]
pub struct TierParseError(pub String);

impl std::fmt::Display for TierParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid tier: {}", self.0)
    }
}

impl std::error::Error for TierParseError {}

/// A per-resource ceiling: a finite count or unlimited.
///
/// `Unlimited` sorts above every finite limit, so the derived `Ord` answers
/// "does the target tier raise this ceiling" directly. The wire format is
/// the conventional `null` = unlimited.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(into = "Option<u64>", from = "Option<u64>")]
pub enum Limit {
    /// At most this many resources
    Limited(u64),
    /// No ceiling
    Unlimited,
}

impl Limit {
    /// Whether this limit is unlimited
    pub const fn is_unlimited(&self) -> bool {
        matches!(self, Self::Unlimited)
    }

    /// Whether one more resource may be created at the given current count.
    ///
    /// At-limit means "cannot add one more": the comparison is strict.
    pub const fn allows(&self, current: u64) -> bool {
        match self {
            Self::Limited(limit) => current < *limit,
            Self::Unlimited => true,
        }
    }
}

impl From<Limit> for Option<u64> {
    fn from(limit: Limit) -> Self {
        match limit {
            Limit::Limited(n) => Some(n),
            Limit::Unlimited => None,
        }
    }
}

impl From<Option<u64>> for Limit {
    fn from(value: Option<u64>) -> Self {
        match value {
            Some(n) => Limit::Limited(n),
            None => Limit::Unlimited,
        }
    }
}

impl std::fmt::Display for Limit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Limited(n) => write!(f, "{n}"),
            Self::Unlimited => write!(f, "unlimited"),
        }
    }
}

/// Countable resource kinds subject to per-tier quotas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Customer testimonials
    Testimonials,
    /// Embeddable display widgets
    Widgets,
    /// Shareable collection links
    CollectionLinks,
}

/// All countable resource kinds.
pub const ALL_RESOURCE_KINDS: [ResourceKind; 3] = [
    ResourceKind::Testimonials,
    ResourceKind::Widgets,
    ResourceKind::CollectionLinks,
];

impl ResourceKind {
    /// Get the stable string name for this kind
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Testimonials => "testimonials",
            Self::Widgets => "widgets",
            Self::CollectionLinks => "collection_links",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Compiled-in entitlement record for one tier
#[derive(Debug, Clone, Serialize)]
pub struct TierLimits {
    /// Display name
    pub name: &'static str,
    /// Monthly price in whole dollars
    pub monthly_price: u32,
    /// Testimonial ceiling
    pub max_testimonials: Limit,
    /// Widget ceiling
    pub max_widgets: Limit,
    /// Collection link ceiling
    pub max_collection_links: Limit,
    /// Video testimonial uploads
    pub allows_video: bool,
    /// Audio testimonial uploads
    pub allows_audio: bool,
    /// Removing platform branding from widgets
    pub allows_branding_removal: bool,
    /// Analytics dashboard
    pub allows_analytics: bool,
    /// Priority support channel
    pub allows_priority_support: bool,
    /// Serving widgets from a custom domain
    pub allows_custom_domain: bool,
    /// Automatic testimonial cleanup and formatting
    pub allows_auto_cleanup: bool,
    /// Marketing bullet points for pricing pages
    pub features: &'static [&'static str],
}

impl TierLimits {
    /// Get the ceiling for a resource kind
    pub const fn limit_for(&self, kind: ResourceKind) -> Limit {
        match kind {
            ResourceKind::Testimonials => self.max_testimonials,
            ResourceKind::Widgets => self.max_widgets,
            ResourceKind::CollectionLinks => self.max_collection_links,
        }
    }

    /// Whether this tier's flags enable a feature
    pub const fn allows_feature(&self, feature: Feature) -> bool {
        match feature {
            Feature::Video => self.allows_video,
            Feature::Audio => self.allows_audio,
            Feature::BrandingRemoval => self.allows_branding_removal,
            Feature::Analytics => self.allows_analytics,
            Feature::PrioritySupport => self.allows_priority_support,
            Feature::CustomDomain => self.allows_custom_domain,
            Feature::AutoCleanup => self.allows_auto_cleanup,
        }
    }
}

const FREE_LIMITS: TierLimits = TierLimits {
    name: "Free",
    monthly_price: 0,
    max_testimonials: Limit::Limited(3),
    max_widgets: Limit::Limited(1),
    max_collection_links: Limit::Limited(2),
    allows_video: false,
    allows_audio: false,
    allows_branding_removal: false,
    allows_analytics: false,
    allows_priority_support: false,
    allows_custom_domain: false,
    allows_auto_cleanup: false,
    features: &[
        "Up to 3 testimonials",
        "1 embeddable widget",
        "2 collection links",
        "Text testimonials only",
        "Basic testimonial display",
        "Platform branding included",
    ],
};

const BASIC_LIMITS: TierLimits = TierLimits {
    name: "Basic",
    monthly_price: 9,
    max_testimonials: Limit::Unlimited,
    max_widgets: Limit::Limited(5),
    max_collection_links: Limit::Limited(10),
    allows_video: false,
    allows_audio: true,
    allows_branding_removal: false,
    allows_analytics: true,
    allows_priority_support: false,
    allows_custom_domain: false,
    allows_auto_cleanup: true,
    features: &[
        "Unlimited text testimonials",
        "Audio testimonials",
        "Up to 5 widgets",
        "10 collection links",
        "Auto cleanup & formatting",
        "Basic analytics",
        "Email support",
    ],
};

const PRO_LIMITS: TierLimits = TierLimits {
    name: "Pro",
    monthly_price: 19,
    max_testimonials: Limit::Unlimited,
    max_widgets: Limit::Unlimited,
    max_collection_links: Limit::Unlimited,
    allows_video: true,
    allows_audio: true,
    allows_branding_removal: true,
    allows_analytics: true,
    allows_priority_support: true,
    allows_custom_domain: true,
    allows_auto_cleanup: true,
    features: &[
        "Unlimited testimonials",
        "Video & audio testimonials",
        "Unlimited widgets",
        "Unlimited collection links",
        "Remove platform branding",
        "Advanced analytics",
        "Priority support",
        "Custom domain support",
        "API access",
    ],
};

/// Format a monthly price for display
pub fn format_price(price: u32) -> String {
    if price == 0 {
        "Free".to_string()
    } else {
        format!("${price}/mo")
    }
}
