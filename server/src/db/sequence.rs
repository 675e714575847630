//! Unique Sequence Generator
//!
//! Produces the collision-free human-facing numeric IDs (order IDs, ticket
//! IDs) that are distinct from internal record identifiers. Each draw is
//! uniform over the configured range and pre-checked against the entity's own
//! human-id field; the storage-level unique index remains the actual
//! correctness guarantee under concurrent writers, so creation paths treat a
//! constrained-write failure as "draw again", not as a fatal error.

use std::ops::RangeInclusive;

use rand::Rng;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::repository::{RepoError, RepoResult};

/// Default human-ID space: 6-digit integers
const DEFAULT_RANGE: RangeInclusive<i64> = 100_000..=999_999;

#[derive(Debug, serde::Deserialize)]
struct Occupied {
    count: i64,
}

/// Generator for human-facing numeric IDs
#[derive(Clone)]
pub struct HumanIdGenerator {
    db: Surreal<Db>,
    range: RangeInclusive<i64>,
}

impl HumanIdGenerator {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            db,
            range: DEFAULT_RANGE,
        }
    }

    /// Generator over a custom ID space. Tests use a narrow range to force
    /// collisions and exercise the retry path.
    pub fn with_range(db: Surreal<Db>, range: RangeInclusive<i64>) -> Self {
        Self { db, range }
    }

    /// Draw a candidate ID unoccupied on `table.field` at the time of the
    /// check. Retries on collision without an upper bound; a storage failure
    /// surfaces as an error rather than an unchecked ID.
    ///
    /// `table` and `field` come from repository constants, never from request
    /// input.
    pub async fn generate(&self, table: &str, field: &str) -> RepoResult<i64> {
        loop {
            let candidate = rand::thread_rng().gen_range(self.range.clone());

            let mut result = self
                .db
                .query(format!(
                    "SELECT count() AS count FROM {table} WHERE {field} = $candidate GROUP ALL"
                ))
                .bind(("candidate", candidate))
                .await
                .map_err(RepoError::from)?;
            let occupied: Vec<Occupied> = result.take(0).map_err(RepoError::from)?;

            // GROUP ALL yields one row even for zero matches; the count
            // decides occupancy, not row presence
            if occupied.first().map(|o| o.count).unwrap_or(0) == 0 {
                return Ok(candidate);
            }

            tracing::debug!(table, field, candidate, "Human ID collision, retrying");
        }
    }
}
