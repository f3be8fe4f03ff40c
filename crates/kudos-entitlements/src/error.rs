//! Entitlement errors

use kudos_types::{Feature, ResourceKind, Tier, TierParseError};
use thiserror::Error;

/// Errors from quota enforcement, feature gating, and tier transitions
#[derive(Error, Debug)]
pub enum EntitlementError {
    /// Account does not exist. Never substitute a default tier or zero
    /// usage for this case: a deleted account must not read as unlimited.
    #[error("account not found")]
    AccountNotFound,

    /// A counted quota is exhausted. Carries everything the caller needs
    /// to render an upgrade prompt without a second lookup.
    #[error("{kind} limit reached: {current} of {limit} used, upgrade to {suggested_tier} for more")]
    LimitExceeded {
        /// Resource kind that hit its ceiling
        kind: ResourceKind,
        /// Current committed count
        current: u64,
        /// The tier's ceiling
        limit: u64,
        /// Tier that would raise or remove the ceiling
        suggested_tier: Tier,
    },

    /// A feature is not enabled for the account's tier
    #[error("{feature} requires the {required_tier} plan, current plan is {current_tier}")]
    FeatureNotAvailable {
        /// The gated feature
        feature: Feature,
        /// Lowest tier whose flags enable the feature
        required_tier: Tier,
        /// The account's tier at check time
        current_tier: Tier,
    },

    /// Unknown tier key supplied by the caller
    #[error("invalid tier: {0}")]
    InvalidTier(String),

    /// Transition to the tier the account is already on
    #[error("already on the {0} plan")]
    AlreadyOnTier(Tier),

    /// Database error, propagated unchanged so callers can tell a business
    /// denial from an infrastructure fault
    #[error("database error: {0}")]
    Database(#[from] kudos_db::DbError),
}

impl EntitlementError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::AccountNotFound => 404,
            Self::LimitExceeded { .. } | Self::FeatureNotAvailable { .. } => 403,
            Self::InvalidTier(_) | Self::AlreadyOnTier(_) => 400,
            Self::Database(_) => 500,
        }
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::AccountNotFound => "ACCOUNT_NOT_FOUND",
            Self::LimitExceeded { .. } => "LIMIT_EXCEEDED",
            Self::FeatureNotAvailable { .. } => "FEATURE_NOT_AVAILABLE",
            Self::InvalidTier(_) => "INVALID_TIER",
            Self::AlreadyOnTier(_) => "ALREADY_ON_TIER",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

impl From<TierParseError> for EntitlementError {
    fn from(err: TierParseError) -> Self {
        Self::InvalidTier(err.0)
    }
}
