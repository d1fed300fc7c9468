//! Parallel for-each over an index range or a mutable slice.

/// Calls `f(i)` for every `i` in `0..n`, in no particular order.
///
/// `f` only receives an index, so any writes it makes must be to locations no
/// other index touches.
pub fn parallel_for<F>(n: usize, block: usize, f: F)
where
    F: Fn(usize) + Sync,
{
    for_range(0, n, block.max(1), &f);
}

fn for_range<F>(l: usize, r: usize, block: usize, f: &F)
where
    F: Fn(usize) + Sync,
{
    if r - l <= block {
        for i in l..r {
            f(i);
        }
        return;
    }
    let m = l + (r - l) / 2;
    rayon::join(|| for_range(l, m, block, f), || for_range(m, r, block, f));
}

/// Calls `f(i, &mut data[i])` for every element.
///
/// Each forked subtask owns its half of `data` exclusively, so `f` needs no
/// synchronization for the element it is given.
pub fn parallel_for_each_mut<T, F>(data: &mut [T], block: usize, f: F)
where
    T: Send,
    F: Fn(usize, &mut T) + Sync,
{
    for_each_mut_range(data, 0, block.max(1), &f);
}

fn for_each_mut_range<T, F>(data: &mut [T], offset: usize, block: usize, f: &F)
where
    T: Send,
    F: Fn(usize, &mut T) + Sync,
{
    if data.len() <= block {
        for (i, x) in data.iter_mut().enumerate() {
            f(offset + i, x);
        }
        return;
    }
    let m = data.len() / 2;
    let (left, right) = data.split_at_mut(m);
    rayon::join(
        || for_each_mut_range(left, offset, block, f),
        || for_each_mut_range(right, offset + m, block, f),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_visits_every_index_once() {
        for block in [1, 2, 7, 1000] {
            let hits: Vec<AtomicUsize> = (0..513).map(|_| AtomicUsize::new(0)).collect();
            parallel_for(hits.len(), block, |i| {
                hits[i].fetch_add(1, Ordering::Relaxed);
            });
            assert!(hits.iter().all(|h| h.load(Ordering::Relaxed) == 1));
        }
    }

    #[test]
    fn test_empty_range() {
        parallel_for(0, 1, |_| panic!("no indices"));
        let mut empty: [u8; 0] = [];
        parallel_for_each_mut(&mut empty, 1, |_, _| panic!("no elements"));
    }

    #[test]
    fn test_for_each_mut_passes_global_index() {
        let mut data = vec![0usize; 300];
        parallel_for_each_mut(&mut data, 3, |i, x| *x = i * i);
        assert!(data.iter().enumerate().all(|(i, &x)| x == i * i));
    }
}
