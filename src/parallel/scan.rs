//! Work-efficient exclusive prefix scan (Blelloch up-sweep / down-sweep).
//!
//! Up-sweep: each subrange is reduced recursively and its combined value is written
//! into the subrange's last slot, so afterwards the last slot of the whole array
//! holds the total.
//!
//! Down-sweep: with the last slot reset to the identity, each subrange swaps its
//! running prefix into the left half's last slot and writes
//! `combine(prefix, left_total)` into the right half's last slot, recursing down to
//! single elements.
//!
//! Both sweeps bisect at the same midpoint, so the tree of partial sums written by
//! the up-sweep is exactly the tree the down-sweep consumes. Lengths need not be
//! powers of two.

use core::ops::Add;

use num_traits::Zero;

/// Replaces `data` with its exclusive prefix under `combine` and returns the total.
///
/// Afterwards `data[0] == identity` and `data[i] == combine(data[i-1], old[i-1])`.
/// An empty slice is left untouched and `identity` is returned. `combine` must be
/// associative and `identity` its neutral element.
pub fn parallel_scan<T, F>(data: &mut [T], block: usize, identity: T, combine: F) -> T
where
    T: Copy + Send + Sync,
    F: Fn(T, T) -> T + Sync,
{
    let Some(last) = data.len().checked_sub(1) else {
        return identity;
    };
    let block = block.max(1);
    up_sweep(data, block, &combine);
    let total = core::mem::replace(&mut data[last], identity);
    down_sweep(data, block, &combine);
    total
}

/// [`parallel_scan`] with `+` and zero.
pub fn parallel_scan_sum<T>(data: &mut [T], block: usize) -> T
where
    T: Copy + Send + Sync + Zero + Add<Output = T>,
{
    parallel_scan(data, block, T::zero(), |a, b| a + b)
}

fn up_sweep<T, F>(data: &mut [T], block: usize, combine: &F) -> T
where
    T: Copy + Send + Sync,
    F: Fn(T, T) -> T + Sync,
{
    let n = data.len();
    if n == 1 {
        return data[0];
    }
    let (left, right) = data.split_at_mut(n / 2);
    let (a, b) = if n <= block {
        (up_sweep(left, block, combine), up_sweep(right, block, combine))
    } else {
        rayon::join(
            || up_sweep(left, block, combine),
            || up_sweep(right, block, combine),
        )
    };
    let total = combine(a, b);
    data[n - 1] = total;
    total
}

fn down_sweep<T, F>(data: &mut [T], block: usize, combine: &F)
where
    T: Copy + Send + Sync,
    F: Fn(T, T) -> T + Sync,
{
    let n = data.len();
    if n == 1 {
        return;
    }
    let m = n / 2;
    let left_total = data[m - 1];
    let prefix = data[n - 1];
    data[m - 1] = prefix;
    data[n - 1] = combine(prefix, left_total);

    let (left, right) = data.split_at_mut(m);
    if n <= block {
        down_sweep(left, block, combine);
        down_sweep(right, block, combine);
    } else {
        rayon::join(
            || down_sweep(left, block, combine),
            || down_sweep(right, block, combine),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exclusive_scan(data: &[u64]) -> (Vec<u64>, u64) {
        let mut out = Vec::with_capacity(data.len());
        let mut acc = 0;
        for &x in data {
            out.push(acc);
            acc += x;
        }
        (out, acc)
    }

    #[test]
    fn test_scan_matches_sequential_all_lengths() {
        for n in 0..70u64 {
            let data: Vec<u64> = (0..n).map(|i| (i * 7 + 3) % 11).collect();
            let (expected, total) = exclusive_scan(&data);
            for block in [1, 2, 5, 100] {
                let mut got = data.clone();
                assert_eq!(parallel_scan_sum(&mut got, block), total, "n={n} block={block}");
                assert_eq!(got, expected, "n={n} block={block}");
            }
        }
    }

    #[test]
    fn test_empty_and_singleton() {
        let mut empty: Vec<u32> = Vec::new();
        assert_eq!(parallel_scan_sum(&mut empty, 1), 0);

        let mut one = vec![42u32];
        assert_eq!(parallel_scan_sum(&mut one, 1), 42);
        assert_eq!(one, vec![0]);
    }

    #[test]
    fn test_non_commutative_combine() {
        // 2x2 matrix product is associative but not commutative.
        type M = [i64; 4];
        fn mul(a: M, b: M) -> M {
            [
                a[0] * b[0] + a[1] * b[2],
                a[0] * b[1] + a[1] * b[3],
                a[2] * b[0] + a[3] * b[2],
                a[2] * b[1] + a[3] * b[3],
            ]
        }
        let id: M = [1, 0, 0, 1];
        let data: Vec<M> = (0..23).map(|i| [1, i % 3, (i % 2) - 1, 1]).collect();

        let mut expected = Vec::with_capacity(data.len());
        let mut acc = id;
        for &m in &data {
            expected.push(acc);
            acc = mul(acc, m);
        }

        let mut got = data.clone();
        assert_eq!(parallel_scan(&mut got, 2, id, mul), acc);
        assert_eq!(got, expected);
    }
}
