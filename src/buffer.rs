//! Growable element buffer backing segment ingestion.
//!
//! Capacity doubles to the next power of two on demand, so repeated pushes
//! are amortized O(1) even when the final record count is unknown until
//! end-of-input. `remove_if` compacts in place without reordering the
//! retained elements, and `finalize` shrinks the allocation to exactly the
//! element count before handing it off.

/// Amortized-doubling buffer with stable in-place filtering.
///
/// The logical capacity is always zero or a power of two no smaller than the
/// current length, and only grows until [`finalize`](GrowBuffer::finalize)
/// consumes the buffer. The backing allocation is requested with
/// `reserve_exact`; the allocator may still round up, so capacity here
/// reports the logical value the growth policy guarantees.
#[derive(Debug)]
pub struct GrowBuffer<T> {
    data: Vec<T>,
    cap: usize,
}

impl<T> GrowBuffer<T> {
    /// Create an empty buffer. No allocation happens until the first push.
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            cap: 0,
        }
    }

    /// Number of elements stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if no elements are stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Logical capacity: zero before the first push, afterwards the smallest
    /// power of two holding every element.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// View the stored elements.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Append an element, doubling capacity when full.
    ///
    /// Panics if the required capacity overflows `usize`. This is a batch
    /// tool: a run that exhausts the address space has no useful
    /// continuation, and a partial count would be silently wrong.
    pub fn push(&mut self, value: T) {
        let needed = self
            .data
            .len()
            .checked_add(1)
            .expect("buffer length overflow");
        if needed > self.cap {
            let new_cap = needed
                .checked_next_power_of_two()
                .expect("buffer capacity overflow");
            self.data.reserve_exact(new_cap - self.data.len());
            self.cap = new_cap;
        }
        self.data.push(value);
    }

    /// Stable in-place filter: drops every element for which `predicate`
    /// returns true, preserving the relative order of the survivors.
    ///
    /// Single pass with a read cursor and a write cursor; O(n) time, O(1)
    /// extra space. Capacity is untouched.
    pub fn remove_if<F>(&mut self, mut predicate: F)
    where
        F: FnMut(&T) -> bool,
    {
        let len = self.data.len();
        let mut write = 0;
        for read in 0..len {
            if !predicate(&self.data[read]) {
                self.data.swap(write, read);
                write += 1;
            }
        }
        self.data.truncate(write);
    }

    /// Consume the buffer, reallocating the backing storage to exactly the
    /// element count.
    pub fn finalize(self) -> Box<[T]> {
        self.data.into_boxed_slice()
    }
}

impl<T> Default for GrowBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<T> for GrowBuffer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}
