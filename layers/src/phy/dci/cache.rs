//! Shared DCI size cache
//!
//! The aligned sizes are a function of the BWP configuration alone, so the
//! scheduler reuses one snapshot for every DCI packed within a slot. The
//! cache has single-writer semantics on the RRC/reconfiguration path and
//! multi-reader semantics on the scheduling path; readers keep an `Arc` to
//! the snapshot they observed, so a concurrent update never mutates sizes
//! under a reader's feet.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use tracing::debug;

use super::sizing::{DciConfig, DciSizes};
use crate::LayerError;

/// Immutable view of one size-alignment result
#[derive(Debug, Clone)]
pub struct SizeSnapshot {
    /// BWP configuration the sizes were computed from
    pub config: DciConfig,
    /// Aligned payload sizes
    pub sizes: DciSizes,
    /// Reconfiguration generation that produced this snapshot
    pub generation: u64,
}

/// Cached size-alignment result with a reconfiguration generation counter
pub struct DciSizeCache {
    generation: AtomicU64,
    snapshot: RwLock<Arc<SizeSnapshot>>,
}

impl DciSizeCache {
    /// Build the cache from the initial BWP configuration
    pub fn new(config: DciConfig) -> Result<Self, LayerError> {
        config.validate()?;
        let snapshot = Arc::new(SizeSnapshot {
            config,
            sizes: config.compute_sizes(),
            generation: 0,
        });
        Ok(Self {
            generation: AtomicU64::new(0),
            snapshot: RwLock::new(snapshot),
        })
    }

    /// Recompute the sizes for a new BWP configuration
    ///
    /// Returns the new generation. A rejected configuration leaves the
    /// current snapshot in place.
    pub fn update(&self, config: DciConfig) -> Result<u64, LayerError> {
        config.validate()?;
        let sizes = config.compute_sizes();
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        let snapshot = Arc::new(SizeSnapshot {
            config,
            sizes,
            generation,
        });
        *self
            .snapshot
            .write()
            .expect("DCI size cache lock poisoned") = snapshot;
        debug!("DCI size cache updated to generation {}", generation);
        Ok(generation)
    }

    /// Current snapshot, cheap to clone and safe to hold across an update
    pub fn snapshot(&self) -> Arc<SizeSnapshot> {
        self.snapshot
            .read()
            .expect("DCI size cache lock poisoned")
            .clone()
    }

    /// Generation of the most recent accepted reconfiguration
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }
}
