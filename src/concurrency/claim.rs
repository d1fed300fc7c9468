//! Per-vertex claim flags arbitrating first discovery.
//!
//! A vertex is claimed by exactly one successful compare-and-swap from `false` to
//! `true`. The winner owns every write associated with discovering that vertex.

use core::sync::atomic::{AtomicBool, Ordering};

/// The CAS site of a BFS run.
///
/// [`ClaimArray`] is the production implementation; the trait exists so the claim
/// site can be wrapped (e.g. to count transitions) without touching the engine.
pub trait ClaimSet: Send + Sync {
    /// Number of vertices covered.
    fn len(&self) -> usize;

    /// Returns `true` if no vertices are covered.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Atomically claims `node`; returns `true` iff this call performed the claim.
    fn try_claim(&self, node: usize) -> bool;

    /// Returns `true` if `node` has been claimed.
    fn is_claimed(&self, node: usize) -> bool;

    /// Clears the claim on `node`.
    ///
    /// Only called between runs, never while a traversal is in flight.
    fn release(&self, node: usize);
}

/// One atomic flag per vertex.
pub struct ClaimArray {
    flags: Vec<AtomicBool>,
}

impl ClaimArray {
    /// Creates `len` cleared flags.
    pub fn new(len: usize) -> Self {
        let flags = (0..len).map(|_| AtomicBool::new(false)).collect();
        Self { flags }
    }

    /// Clears every flag.
    pub fn clear(&self) {
        for f in &self.flags {
            f.store(false, Ordering::Relaxed);
        }
    }

    /// Number of claimed vertices.
    pub fn claimed_count(&self) -> usize {
        self.flags
            .iter()
            .filter(|f| f.load(Ordering::Relaxed))
            .count()
    }
}

impl ClaimSet for ClaimArray {
    #[inline(always)]
    fn len(&self) -> usize {
        self.flags.len()
    }

    #[inline(always)]
    fn try_claim(&self, node: usize) -> bool {
        // Relaxed is enough: the CAS only arbitrates ownership. Writes made by the
        // winner are published to the next level by the fork-join barrier.
        self.flags[node]
            .compare_exchange(false, true, Ordering::Relaxed, Ordering::Relaxed)
            .is_ok()
    }

    #[inline(always)]
    fn is_claimed(&self, node: usize) -> bool {
        self.flags[node].load(Ordering::Relaxed)
    }

    #[inline]
    fn release(&self, node: usize) {
        self.flags[node].store(false, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_is_exclusive() {
        let claims = ClaimArray::new(4);
        assert!(claims.try_claim(2));
        assert!(!claims.try_claim(2));
        assert!(claims.is_claimed(2));
        assert!(!claims.is_claimed(1));
        assert_eq!(claims.claimed_count(), 1);

        claims.release(2);
        assert!(claims.try_claim(2));

        claims.clear();
        assert_eq!(claims.claimed_count(), 0);
    }

    #[test]
    fn test_concurrent_claims_have_one_winner() {
        let claims = ClaimArray::new(64);
        let wins: Vec<usize> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    s.spawn(|| (0..64).filter(|&v| claims.try_claim(v)).count())
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(wins.iter().sum::<usize>(), 64);
        assert_eq!(claims.claimed_count(), 64);
    }
}
