//! Parallel reduction with an associative combine.

use core::ops::Add;

use num_traits::Zero;

/// Folds `data` with `combine`.
///
/// Split results are combined as `combine(left, right)`, so `combine` must be
/// associative but need not be commutative.
///
/// # Panics
/// Panics if `data` is empty.
pub fn parallel_reduce<T, F>(data: &[T], block: usize, combine: F) -> T
where
    T: Clone + Send + Sync,
    F: Fn(T, T) -> T + Sync,
{
    assert!(!data.is_empty(), "parallel_reduce on an empty sequence");
    reduce_range(data, block.max(1), &combine)
}

fn reduce_range<T, F>(data: &[T], block: usize, combine: &F) -> T
where
    T: Clone + Send + Sync,
    F: Fn(T, T) -> T + Sync,
{
    if data.len() <= block {
        let Some((first, rest)) = data.split_first() else {
            unreachable!("bisection never produces an empty range");
        };
        return rest
            .iter()
            .fold(first.clone(), |acc, x| combine(acc, x.clone()));
    }
    let (left, right) = data.split_at(data.len() / 2);
    let (a, b) = rayon::join(
        || reduce_range(left, block, combine),
        || reduce_range(right, block, combine),
    );
    combine(a, b)
}

/// Sum of `data`; zero for an empty slice.
pub fn parallel_sum<T>(data: &[T], block: usize) -> T
where
    T: Copy + Send + Sync + Zero + Add<Output = T>,
{
    if data.is_empty() {
        return T::zero();
    }
    parallel_reduce(data, block, |a, b| a + b)
}
