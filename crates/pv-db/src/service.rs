//! `PvService`: the store layer handed to request handlers.
//!
//! Repository methods live in `repos/*.rs` as `impl PvService` blocks.

use pv_config::DatabaseConfig;

use crate::PvDb;
use crate::error::DatabaseError;

pub struct PvService {
    db: PvDb,
}

impl PvService {
    /// Open the configured database and wrap it.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or migrated.
    pub async fn open(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        Ok(Self::from_db(PvDb::open(config).await?))
    }

    #[must_use]
    pub const fn from_db(db: PvDb) -> Self {
        Self { db }
    }

    #[must_use]
    pub const fn db(&self) -> &PvDb {
        &self.db
    }
}
