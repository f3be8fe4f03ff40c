//! Kudos Entitlements - Tier policy engine
//!
//! Answers "may this account perform action X right now" across counted
//! quotas (testimonials, widgets, collection links), boolean feature gates
//! (media uploads, branding removal, analytics), and explicit tier
//! transitions.
//!
//! # Example
//!
//! ```rust,ignore
//! use kudos_entitlements::EntitlementService;
//! use kudos_types::{AccountId, Feature, ResourceKind, Tier};
//!
//! let service = EntitlementService::new(accounts, resources);
//!
//! // Before creating a widget
//! service.check_limit(account_id, ResourceKind::Widgets).await?;
//!
//! // Before accepting a video upload
//! service.require_feature(account_id, Feature::Video).await?;
//!
//! // Explicit upgrade action
//! service.apply_transition(account_id, Tier::Basic).await?;
//! ```

pub mod error;
pub mod service;
pub mod transition;

pub use error::EntitlementError;
pub use service::EntitlementService;
pub use transition::{
    plan_transition, upgrade_options, FeatureChange, LimitChange, TransitionDirection,
    TransitionPlan,
};
