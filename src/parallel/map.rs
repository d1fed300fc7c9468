//! Parallel elementwise map.

use core::mem::MaybeUninit;

/// Returns `f` applied to every element of `data`, in order.
pub fn parallel_map<T, U, F>(data: &[T], block: usize, f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync,
{
    let n = data.len();
    let mut out: Vec<U> = Vec::with_capacity(n);
    map_uninit(data, &mut out.spare_capacity_mut()[..n], block.max(1), &f);
    // SAFETY: `map_uninit` returned normally, so every slot in `0..n` was written.
    unsafe { out.set_len(n) };
    out
}

/// Writes `f(&data[i])` into `dst[i]` for every `i < data.len()`.
///
/// # Panics
/// Panics if `dst` is shorter than `data`.
pub fn parallel_map_into<T, U, F>(data: &[T], dst: &mut [U], block: usize, f: F)
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync,
{
    assert!(
        dst.len() >= data.len(),
        "destination of length {} is shorter than input of length {}",
        dst.len(),
        data.len()
    );
    map_range(data, &mut dst[..data.len()], block.max(1), &f);
}

fn map_range<T, U, F>(src: &[T], dst: &mut [U], block: usize, f: &F)
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync,
{
    if src.len() <= block {
        for (s, d) in src.iter().zip(dst.iter_mut()) {
            *d = f(s);
        }
        return;
    }
    let m = src.len() / 2;
    let (sl, sr) = src.split_at(m);
    let (dl, dr) = dst.split_at_mut(m);
    rayon::join(|| map_range(sl, dl, block, f), || map_range(sr, dr, block, f));
}

fn map_uninit<T, U, F>(src: &[T], dst: &mut [MaybeUninit<U>], block: usize, f: &F)
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync,
{
    if src.len() <= block {
        for (s, d) in src.iter().zip(dst.iter_mut()) {
            d.write(f(s));
        }
        return;
    }
    let m = src.len() / 2;
    let (sl, sr) = src.split_at(m);
    let (dl, dr) = dst.split_at_mut(m);
    rayon::join(|| map_uninit(sl, dl, block, f), || map_uninit(sr, dr, block, f));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_preserves_order() {
        let data: Vec<u32> = (0..777).collect();
        for block in [1, 4, 27, 10_000] {
            let squared = parallel_map(&data, block, |&x| u64::from(x) * u64::from(x));
            assert_eq!(squared.len(), data.len());
            assert!(squared
                .iter()
                .zip(&data)
                .all(|(&s, &x)| s == u64::from(x) * u64::from(x)));
        }
    }

    #[test]
    fn test_map_owned_outputs() {
        let data = [1, 2, 3];
        let out = parallel_map(&data, 1, |x| format!("v{x}"));
        assert_eq!(out, vec!["v1", "v2", "v3"]);
        assert!(parallel_map(&[] as &[u8], 1, |&x| x).is_empty());
    }

    #[test]
    fn test_map_into_prefix_of_longer_buffer() {
        let data = [3usize, 1, 4, 1, 5];
        let mut dst = vec![9usize; 8];
        parallel_map_into(&data, &mut dst, 2, |&x| usize::from(x > 2));
        assert_eq!(dst, vec![1, 0, 1, 0, 1, 9, 9, 9]);
    }
}
