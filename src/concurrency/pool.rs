//! A fixed-size work-stealing pool exposing the fork-join primitives as methods.
//!
//! Each method resolves the pool's [`BlockSize`] once against the length of the
//! top-level input and runs the recursive primitive inside the pool, so every fork
//! lands on this pool's workers rather than on rayon's global pool.
//!
//! Dropping the pool releases it and signals its workers to shut down; they exit
//! asynchronously once idle. Because the pool is an owned value the release
//! happens on every exit path, including a panic unwinding out of a primitive.

use core::ops::Add;

use num_traits::Zero;

use crate::error::BfsError;
use crate::parallel::{self, BlockSize};

/// A worker pool running recursively forked tasks.
pub struct ForkJoinPool {
    pool: rayon::ThreadPool,
    block_size: BlockSize,
}

impl ForkJoinPool {
    /// Creates a pool with `parallelism` workers and the default `sqrt(n)` cutoff.
    pub fn new(parallelism: usize) -> Result<Self, BfsError> {
        Self::with_block_size(parallelism, BlockSize::default())
    }

    /// Creates a pool with `parallelism` workers and an explicit sequential cutoff.
    pub fn with_block_size(parallelism: usize, block_size: BlockSize) -> Result<Self, BfsError> {
        if parallelism == 0 {
            return Err(BfsError::ZeroParallelism);
        }
        block_size.validate()?;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(parallelism)
            .thread_name(|i| format!("forkjoin-worker-{i}"))
            .build()?;

        #[cfg(feature = "tracing")]
        tracing::debug!(parallelism, ?block_size, "fork-join pool started");

        Ok(Self { pool, block_size })
    }

    /// Number of worker threads.
    pub fn parallelism(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Configured sequential cutoff.
    pub fn block_size(&self) -> BlockSize {
        self.block_size
    }

    /// Cutoff for a top-level call over `n` elements.
    #[inline]
    pub fn block_for(&self, n: usize) -> usize {
        self.block_size.resolve(n)
    }

    /// Runs `op` on one of the pool's workers and blocks until it returns.
    ///
    /// Calls from inside the pool run `op` directly.
    pub fn install<R, OP>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        self.pool.install(op)
    }

    /// See [`parallel::parallel_for`].
    pub fn parallel_for<F>(&self, n: usize, f: F)
    where
        F: Fn(usize) + Sync + Send,
    {
        let block = self.block_for(n);
        self.install(|| parallel::parallel_for(n, block, f));
    }

    /// See [`parallel::parallel_for_each_mut`].
    pub fn parallel_for_each_mut<T, F>(&self, data: &mut [T], f: F)
    where
        T: Send,
        F: Fn(usize, &mut T) + Sync + Send,
    {
        let block = self.block_for(data.len());
        self.install(|| parallel::parallel_for_each_mut(data, block, f));
    }

    /// See [`parallel::parallel_reduce`].
    pub fn parallel_reduce<T, F>(&self, data: &[T], combine: F) -> T
    where
        T: Clone + Send + Sync,
        F: Fn(T, T) -> T + Sync + Send,
    {
        let block = self.block_for(data.len());
        self.install(|| parallel::parallel_reduce(data, block, combine))
    }

    /// See [`parallel::parallel_map`].
    pub fn parallel_map<T, U, F>(&self, data: &[T], f: F) -> Vec<U>
    where
        T: Sync,
        U: Send,
        F: Fn(&T) -> U + Sync + Send,
    {
        let block = self.block_for(data.len());
        self.install(|| parallel::parallel_map(data, block, f))
    }

    /// See [`parallel::parallel_scan`].
    pub fn parallel_scan<T, F>(&self, data: &mut [T], identity: T, combine: F) -> T
    where
        T: Copy + Send + Sync,
        F: Fn(T, T) -> T + Sync + Send,
    {
        let block = self.block_for(data.len());
        self.install(|| parallel::parallel_scan(data, block, identity, combine))
    }

    /// See [`parallel::parallel_scan_sum`].
    pub fn parallel_scan_sum<T>(&self, data: &mut [T]) -> T
    where
        T: Copy + Send + Sync + Zero + Add<Output = T>,
    {
        let block = self.block_for(data.len());
        self.install(|| parallel::parallel_scan_sum(data, block))
    }

    /// See [`parallel::parallel_filter`].
    pub fn parallel_filter<T, P>(&self, data: &[T], predicate: P) -> Vec<T>
    where
        T: Copy + Send + Sync,
        P: Fn(&T) -> bool + Sync + Send,
    {
        let block = self.block_for(data.len());
        self.install(|| parallel::parallel_filter(data, block, predicate))
    }

    /// See [`parallel::parallel_filter_into`].
    pub fn parallel_filter_into<T, P>(
        &self,
        data: &[T],
        flags: &mut [usize],
        dst: &mut [T],
        predicate: P,
    ) -> usize
    where
        T: Copy + Send + Sync,
        P: Fn(&T) -> bool + Sync + Send,
    {
        let block = self.block_for(data.len());
        self.install(|| parallel::parallel_filter_into(data, flags, dst, block, predicate))
    }
}
