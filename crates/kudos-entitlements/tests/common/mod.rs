//! Common test utilities for kudos-entitlements integration tests

pub mod mock_repos;

#[allow(unused_imports)]
pub use mock_repos::{MockAccountRepository, MockResourceRepository};
