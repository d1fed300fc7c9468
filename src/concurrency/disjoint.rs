//! Shared write access to a slice whose indices are written by at most one task.
//!
//! The BFS expansion scatters into `result[u]` and `raw[degs[i] + k]`, and the filter
//! scatters survivors into `dst[offset[i]]`. Neither pattern splits into contiguous
//! per-task ranges, but both write every index from at most one task: the claim CAS
//! or the exclusive scan offsets guarantee it. `DisjointSlice` encodes that contract
//! as an `unsafe` write with a bounds check.

use core::marker::PhantomData;

/// A `Sync` view of `&mut [T]` that allows unsynchronized writes to distinct indices.
pub struct DisjointSlice<'a, T> {
    ptr: *mut T,
    len: usize,
    _marker: PhantomData<&'a mut [T]>,
}

// SAFETY: writers must target distinct indices (see `write`), so sharing the view
// across threads is equivalent to handing each thread its own `&mut T`.
unsafe impl<T: Send> Send for DisjointSlice<'_, T> {}
unsafe impl<T: Send> Sync for DisjointSlice<'_, T> {}

impl<'a, T> DisjointSlice<'a, T> {
    /// Wraps `slice` for the duration of the borrow.
    #[inline]
    pub fn new(slice: &'a mut [T]) -> Self {
        Self {
            ptr: slice.as_mut_ptr(),
            len: slice.len(),
            _marker: PhantomData,
        }
    }

    /// Length of the underlying slice.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the underlying slice is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Writes `value` at `index`, dropping the previous value.
    ///
    /// # Panics
    /// Panics if `index >= len()`: an undersized buffer is reported, never written past.
    ///
    /// # Safety
    /// No other thread may read or write `index` while this view is alive.
    #[inline]
    pub unsafe fn write(&self, index: usize, value: T) {
        assert!(
            index < self.len,
            "index {index} out of bounds for buffer of length {}",
            self.len
        );
        // SAFETY: in bounds (checked above); exclusivity is the caller's contract.
        unsafe { *self.ptr.add(index) = value };
    }
}
