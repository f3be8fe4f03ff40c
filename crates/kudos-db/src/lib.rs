//! Kudos DB - Database abstractions
//!
//! SQLx-based database layer for Kudos services.
//!
//! # Example
//!
//! ```rust,ignore
//! use kudos_db::{create_pool, Repositories};
//!
//! let pool = create_pool("postgres://localhost/kudos").await?;
//! let repos = Repositories::new(pool);
//!
//! let account = repos.accounts.find_by_id(account_id).await?;
//! ```

pub mod error;
pub mod models;
pub mod pg;
pub mod pool;
pub mod repo;

pub use error::{DbError, DbResult};
pub use models::*;
pub use pg::Repositories;
pub use pool::{create_pool, create_pool_with_options, DbPool, PoolOptions};
pub use repo::*;
