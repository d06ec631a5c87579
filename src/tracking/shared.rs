// SPDX-License-Identifier: GPL-3.0-only

//! Latest centroid shared between the tracking thread and readers

use super::types::Centroid;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Packed value meaning "no centroid yet"
const EMPTY: u64 = u64::MAX;

fn pack(c: Centroid) -> u64 {
    (u64::from(c.x) << 32) | u64::from(c.y)
}

fn unpack(bits: u64) -> Option<Centroid> {
    if bits == EMPTY {
        return None;
    }
    Some(Centroid::new((bits >> 32) as u32, bits as u32))
}

/// Lock-free cell holding the most recent centroid
///
/// Both coordinates live in one atomic word, so a reader always sees an
/// (x, y) pair that was stored together. Clones share the same cell.
#[derive(Debug, Clone)]
pub struct SharedCentroid {
    bits: Arc<AtomicU64>,
}

impl Default for SharedCentroid {
    fn default() -> Self {
        Self {
            bits: Arc::new(AtomicU64::new(EMPTY)),
        }
    }
}

impl SharedCentroid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current centroid, if one has been published
    pub fn load(&self) -> Option<Centroid> {
        unpack(self.bits.load(Ordering::Acquire))
    }

    pub fn store(&self, centroid: Centroid) {
        // (u32::MAX, u32::MAX) is not a reachable pixel
        self.bits.store(pack(centroid), Ordering::Release);
    }

    pub fn clear(&self) {
        self.bits.store(EMPTY, Ordering::Release);
    }
}
