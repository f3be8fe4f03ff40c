//! PostgreSQL repository implementations

mod account;
mod resource;

pub use account::PgAccountRepository;
pub use resource::PgResourceCountRepository;

use crate::DbPool;

/// All repositories bundled together
#[derive(Clone)]
pub struct Repositories {
    pub accounts: PgAccountRepository,
    pub resources: PgResourceCountRepository,
}

impl Repositories {
    /// Create all repositories from a database pool
    pub fn new(pool: DbPool) -> Self {
        Self {
            accounts: PgAccountRepository::new(pool.clone()),
            resources: PgResourceCountRepository::new(pool),
        }
    }
}
