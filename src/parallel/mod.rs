//! Divide-and-conquer parallel primitives.
//!
//! Every primitive recursively bisects its index range at the midpoint while the
//! range is longer than `block`, runs ranges of at most `block` elements
//! sequentially, and otherwise forks both halves with `rayon::join` and waits for
//! both. A panic in either half surfaces from the join once the other half has
//! finished.
//!
//! The free functions run on whichever rayon pool is current. Wrap calls in
//! [`ForkJoinPool::install`](crate::ForkJoinPool::install), or use the
//! [`ForkJoinPool`](crate::ForkJoinPool) methods, to pin them to a sized pool.
//!
//! `block` is fixed for a whole top-level call; recursive calls never recompute it.
//! A `block` of 0 is treated as 1.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::BfsError;

pub mod filter;
pub mod for_each;
pub mod map;
pub mod reduce;
pub mod scan;

pub use filter::{parallel_filter, parallel_filter_into};
pub use for_each::{parallel_for, parallel_for_each_mut};
pub use map::{parallel_map, parallel_map_into};
pub use reduce::{parallel_reduce, parallel_sum};
pub use scan::{parallel_scan, parallel_scan_sum};

/// Sequential cutoff for the recursive primitives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockSize {
    /// `floor(sqrt(n))` of the top-level input length, at least 1.
    #[default]
    Sqrt,
    /// A fixed cutoff.
    Fixed(usize),
}

impl BlockSize {
    /// Resolves the cutoff for a top-level call over `n` elements.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn resolve(self, n: usize) -> usize {
        match self {
            BlockSize::Sqrt => ((n as f64).sqrt() as usize).max(1),
            BlockSize::Fixed(block) => block.max(1),
        }
    }

    /// Rejects `Fixed(0)`.
    pub fn validate(self) -> Result<(), BfsError> {
        match self {
            BlockSize::Fixed(0) => Err(BfsError::ZeroBlockSize),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for BlockSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockSize::Sqrt => f.write_str("sqrt"),
            BlockSize::Fixed(k) => write!(f, "{k}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_size_resolve() {
        assert_eq!(BlockSize::Sqrt.resolve(0), 1);
        assert_eq!(BlockSize::Sqrt.resolve(3), 1);
        assert_eq!(BlockSize::Sqrt.resolve(100), 10);
        assert_eq!(BlockSize::Sqrt.resolve(99), 9);
        assert_eq!(BlockSize::Fixed(7).resolve(3), 7);
        assert_eq!(BlockSize::Fixed(0).resolve(3), 1);
        assert!(BlockSize::Fixed(0).validate().is_err());
        assert!(BlockSize::Sqrt.validate().is_ok());
    }

    #[test]
    fn test_block_size_serde() {
        assert_eq!(serde_json::to_string(&BlockSize::Sqrt).unwrap(), "\"sqrt\"");
        let fixed: BlockSize = serde_json::from_str(r#"{"fixed": 8}"#).unwrap();
        assert_eq!(fixed, BlockSize::Fixed(8));
    }
}
