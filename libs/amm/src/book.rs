//! In-memory pool book with versioned compare-and-swap commits
//!
//! Stands in for the external ledger: one pool per canonical pair, each
//! stored with a version that every successful commit bumps. A commit made
//! against a stale snapshot is refused, and the caller re-reads and retries.

use crate::engine::PricingEngine;
use crate::error::AmmError;
use crate::operation::{Operation, Outcome};
use crate::pair::PairId;
use crate::pool::Pool;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Pool book errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BookError {
    #[error("Pool already exists for pair {pair}")]
    PoolExists { pair: PairId },

    #[error("No pool for pair {pair}")]
    UnknownPool { pair: PairId },

    #[error("Stale snapshot for pair {pair}: expected version {expected}, stored {actual}")]
    VersionConflict {
        pair: PairId,
        expected: u64,
        actual: u64,
    },

    #[error("Pool for pair {pair} still has {share_supply} shares outstanding")]
    PoolNotEmpty { pair: PairId, share_supply: u64 },

    #[error(transparent)]
    Engine(#[from] AmmError),
}

/// Pool snapshot tagged with the version it was read at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionedPool {
    pub pool: Pool,
    pub version: u64,
}

/// Concurrent map of pools keyed by pair
#[derive(Debug, Default)]
pub struct PoolBook {
    pools: DashMap<PairId, VersionedPool>,
}

impl PoolBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the single empty pool for `pair`
    pub fn create(&self, pair: PairId) -> Result<VersionedPool, BookError> {
        match self.pools.entry(pair) {
            Entry::Occupied(_) => Err(BookError::PoolExists { pair }),
            Entry::Vacant(slot) => {
                let created = VersionedPool {
                    pool: crate::engine::initialize_pool(pair),
                    version: 0,
                };
                slot.insert(created);
                info!(%pair, "pool created");
                Ok(created)
            }
        }
    }

    pub fn snapshot(&self, pair: &PairId) -> Result<VersionedPool, BookError> {
        self.pools
            .get(pair)
            .map(|entry| *entry)
            .ok_or(BookError::UnknownPool { pair: *pair })
    }

    /// Store `pool` if the stored version still equals `expected_version`
    pub fn commit(&self, expected_version: u64, pool: Pool) -> Result<u64, BookError> {
        let pair = pool.pair();
        let mut entry = self
            .pools
            .get_mut(&pair)
            .ok_or(BookError::UnknownPool { pair })?;

        if entry.version != expected_version {
            warn!(
                %pair,
                expected = expected_version,
                actual = entry.version,
                "rejected commit against stale snapshot"
            );
            return Err(BookError::VersionConflict {
                pair,
                expected: expected_version,
                actual: entry.version,
            });
        }

        entry.pool = pool;
        entry.version += 1;
        debug!(%pair, version = entry.version, "pool committed");
        Ok(entry.version)
    }

    /// Snapshot, price and commit one operation. Conflicts are returned, not retried.
    pub fn execute(
        &self,
        engine: &PricingEngine,
        pair: &PairId,
        operation: Operation,
    ) -> Result<Outcome, BookError> {
        let snapshot = self.snapshot(pair)?;
        let outcome = engine.execute(&snapshot.pool, operation)?;
        self.commit(snapshot.version, *outcome.pool())?;
        Ok(outcome)
    }

    /// Drop a pool that has no shares outstanding
    pub fn remove(&self, pair: &PairId) -> Result<Pool, BookError> {
        let removed = self
            .pools
            .remove_if(pair, |_, stored| stored.pool.is_empty())
            .map(|(_, stored)| stored.pool);

        match removed {
            Some(pool) => Ok(pool),
            None => {
                let stored = self.snapshot(pair)?;
                Err(BookError::PoolNotEmpty {
                    pair: *pair,
                    share_supply: stored.pool.share_supply(),
                })
            }
        }
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }
}
