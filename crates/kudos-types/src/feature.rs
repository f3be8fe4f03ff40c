//! Feature and submission-kind vocabularies

use serde::{Deserialize, Serialize};

use crate::{Tier, ALL_TIERS};

/// Gated features in the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// Video testimonial uploads
    Video,
    /// Audio testimonial uploads
    Audio,
    /// Removing platform branding from widgets
    BrandingRemoval,
    /// Analytics dashboard
    Analytics,
    /// Priority support channel
    PrioritySupport,
    /// Serving widgets from a custom domain
    CustomDomain,
    /// Automatic testimonial cleanup and formatting
    AutoCleanup,
}

/// All gated features.
pub const ALL_FEATURES: [Feature; 7] = [
    Feature::Video,
    Feature::Audio,
    Feature::BrandingRemoval,
    Feature::Analytics,
    Feature::PrioritySupport,
    Feature::CustomDomain,
    Feature::AutoCleanup,
];

impl Feature {
    /// Get the feature ID string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Audio => "audio",
            Self::BrandingRemoval => "branding_removal",
            Self::Analytics => "analytics",
            Self::PrioritySupport => "priority_support",
            Self::CustomDomain => "custom_domain",
            Self::AutoCleanup => "auto_cleanup",
        }
    }

    /// Get the human-readable feature name for upgrade prompts
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Video => "Video testimonials",
            Self::Audio => "Audio testimonials",
            Self::BrandingRemoval => "Branding removal",
            Self::Analytics => "Analytics",
            Self::PrioritySupport => "Priority support",
            Self::CustomDomain => "Custom domain",
            Self::AutoCleanup => "Auto cleanup",
        }
    }

    /// Get the minimum tier whose catalog flags enable this feature.
    ///
    /// Derived by scanning the catalog in rank order so the gate and the
    /// upgrade suggestion can never disagree with the flag table.
    pub fn required_tier(&self) -> Tier {
        ALL_TIERS
            .into_iter()
            .find(|tier| tier.limits().allows_feature(*self))
            .unwrap_or(Tier::Pro)
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Testimonial submission kinds accepted from public collection forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SubmissionKind {
    /// Plain text testimonial
    Text,
    /// Image attachment
    Image,
    /// Audio recording
    Audio,
    /// Video recording
    Video,
}

impl SubmissionKind {
    /// Get the feature gating this submission kind, if any.
    ///
    /// Text and image submissions are allowed on every tier.
    pub const fn required_feature(&self) -> Option<Feature> {
        match self {
            Self::Text | Self::Image => None,
            Self::Audio => Some(Feature::Audio),
            Self::Video => Some(Feature::Video),
        }
    }

    /// Whether a tier may accept this submission kind
    pub fn allowed_for(&self, tier: Tier) -> bool {
        match self.required_feature() {
            Some(feature) => tier.limits().allows_feature(feature),
            None => true,
        }
    }
}
