//! Integration tests for boolean feature gating

mod common;

use std::sync::Arc;

use common::{MockAccountRepository, MockResourceRepository};
use kudos_entitlements::{EntitlementError, EntitlementService};
use kudos_types::{AccountId, Feature, SubmissionKind, Tier, ALL_FEATURES, ALL_TIERS};

fn service_with_account(
    tier: Tier,
) -> (
    EntitlementService<MockAccountRepository, MockResourceRepository>,
    AccountId,
) {
    let accounts = MockAccountRepository::new();
    let resources = MockResourceRepository::new();
    let account = MockAccountRepository::test_account(tier);
    let account_id = AccountId(account.id);
    accounts.insert_account(account);
    let service = EntitlementService::new(Arc::new(accounts), Arc::new(resources));
    (service, account_id)
}

#[tokio::test]
async fn test_audio_requires_basic() {
    let (service, free_account) = service_with_account(Tier::Free);
    assert!(!service
        .can_use_feature(free_account, Feature::Audio)
        .await
        .unwrap());

    let (service, basic_account) = service_with_account(Tier::Basic);
    assert!(service
        .can_use_feature(basic_account, Feature::Audio)
        .await
        .unwrap());
}

#[tokio::test]
async fn test_require_feature_denial_names_both_tiers() {
    let (service, free_account) = service_with_account(Tier::Free);

    let err = service
        .require_feature(free_account, Feature::Audio)
        .await
        .unwrap_err();

    match err {
        EntitlementError::FeatureNotAvailable {
            feature,
            required_tier,
            current_tier,
        } => {
            assert_eq!(feature, Feature::Audio);
            assert_eq!(required_tier, Tier::Basic);
            assert_eq!(current_tier, Tier::Free);
        }
        other => panic!("expected FeatureNotAvailable, got {other:?}"),
    }
}

#[tokio::test]
async fn test_video_requires_pro() {
    let (service, basic_account) = service_with_account(Tier::Basic);
    let err = service
        .require_feature(basic_account, Feature::Video)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EntitlementError::FeatureNotAvailable {
            required_tier: Tier::Pro,
            ..
        }
    ));

    let (service, pro_account) = service_with_account(Tier::Pro);
    assert!(service
        .require_feature(pro_account, Feature::Video)
        .await
        .is_ok());
}

#[tokio::test]
async fn test_advisory_and_enforcing_variants_agree() {
    // Both answers come from the same catalog flags; they can never
    // diverge for any tier/feature pair.
    for tier in ALL_TIERS {
        let (service, account_id) = service_with_account(tier);
        for feature in ALL_FEATURES {
            let advisory = service.can_use_feature(account_id, feature).await.unwrap();
            let enforced = service.require_feature(account_id, feature).await.is_ok();
            assert_eq!(
                advisory, enforced,
                "advisory and enforcing disagree for {tier} / {feature}"
            );
        }
    }
}

#[tokio::test]
async fn test_text_and_image_submissions_pass_on_free() {
    let (service, free_account) = service_with_account(Tier::Free);
    assert!(service
        .require_submission_kind(free_account, SubmissionKind::Text)
        .await
        .is_ok());
    assert!(service
        .require_submission_kind(free_account, SubmissionKind::Image)
        .await
        .is_ok());
}

#[tokio::test]
async fn test_media_submissions_follow_feature_gates() {
    let (service, free_account) = service_with_account(Tier::Free);
    assert!(service
        .require_submission_kind(free_account, SubmissionKind::Audio)
        .await
        .is_err());

    let (service, basic_account) = service_with_account(Tier::Basic);
    assert!(service
        .require_submission_kind(basic_account, SubmissionKind::Audio)
        .await
        .is_ok());
    assert!(service
        .require_submission_kind(basic_account, SubmissionKind::Video)
        .await
        .is_err());

    let (service, pro_account) = service_with_account(Tier::Pro);
    assert!(service
        .require_submission_kind(pro_account, SubmissionKind::Video)
        .await
        .is_ok());
}

#[tokio::test]
async fn test_gating_missing_account_fails() {
    let accounts = MockAccountRepository::new();
    let resources = MockResourceRepository::new();
    let service = EntitlementService::new(Arc::new(accounts), Arc::new(resources));

    let err = service
        .require_feature(AccountId::new(), Feature::Analytics)
        .await
        .unwrap_err();
    assert!(matches!(err, EntitlementError::AccountNotFound));
}
