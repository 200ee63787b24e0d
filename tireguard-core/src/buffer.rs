//! Fixed-Size Circular Buffer for Per-Sensor History
//!
//! ## Overview
//!
//! Every stateful stage keeps a sliding window per sensor: the preprocessor
//! averages the last few compensated readings, the detector looks at the
//! last few normalized values and their first differences. All of these are
//! ring buffers with the same semantics: push appends, and once the buffer
//! holds `capacity` values the oldest one is dropped.
//!
//! ## Capacity Model
//!
//! Storage is a fixed array sized by the const generic `N`, so a buffer
//! never touches the heap. The *logical* capacity is chosen at runtime
//! (the configured window size or history length) and must lie in `1..=N`.
//! Configuration validation rejects anything larger before a buffer is
//! ever built.
//!
//! ```text
//! CircularBuffer<f32, 8> with capacity 3, after pushing 1..=5:
//! ┌─────┬─────┬─────┬─────┬─────┬─────┬─────┬─────┐
//! │  4  │  5  │  3  │  -  │  -  │  -  │  -  │  -  │  ← physical slots
//! └─────┴─────┴─────┴─────┴─────┴─────┴─────┴─────┘
//!                ↑
//!                └── oldest (write_pos = 2)
//! Logical view: [3, 4, 5]
//! ```
//!
//! ## Usage Example
//!
//! ```rust
//! use tireguard_core::buffer::CircularBuffer;
//!
//! let mut window: CircularBuffer<f32, 16> = CircularBuffer::with_capacity(3);
//! for v in [1.0, 2.0, 3.0, 4.0] {
//!     window.push(v);
//! }
//!
//! assert_eq!(window.len(), 3);
//! assert_eq!(window.last(), Some(&4.0));
//! assert_eq!(window.mean(), Some(3.0));
//! ```

/// Fixed-storage ring buffer with a runtime capacity
///
/// ## Internal Invariants
///
/// - `1 <= capacity <= N`
/// - `write_pos < capacity`
/// - `len <= capacity`
/// - Iteration yields items oldest first
#[derive(Debug, Clone)]
pub struct CircularBuffer<T: Copy, const N: usize> {
    /// Storage array using Option for unwritten slots
    data: [Option<T>; N],

    /// Logical capacity, evicts beyond this
    capacity: usize,

    /// Index where the next write will occur, wraps at `capacity`
    write_pos: usize,

    /// Current number of stored values
    len: usize,
}

impl<T: Copy, const N: usize> CircularBuffer<T, N> {
    /// Creates an empty buffer using the full storage as capacity
    pub const fn new() -> Self {
        Self {
            data: [None; N],
            capacity: N,
            write_pos: 0,
            len: 0,
        }
    }

    /// Creates an empty buffer that holds at most `capacity` values
    ///
    /// The capacity is clamped to `1..=N`. Callers validate configuration
    /// before reaching this point, so clamping only guards the invariant.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: [None; N],
            capacity: capacity.clamp(1, N),
            write_pos: 0,
            len: 0,
        }
    }

    /// Appends a value, evicting the oldest one when full
    pub fn push(&mut self, value: T) {
        self.data[self.write_pos] = Some(value);
        self.write_pos = (self.write_pos + 1) % self.capacity;

        if self.len < self.capacity {
            self.len += 1;
        }
    }

    /// Number of stored values
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check if buffer is full
    pub fn is_full(&self) -> bool {
        self.len == self.capacity
    }

    /// Logical capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recent value
    pub fn last(&self) -> Option<&T> {
        self.nth_back(0)
    }

    /// Value `n` steps back from the newest (`0` = newest)
    pub fn nth_back(&self, n: usize) -> Option<&T> {
        if n >= self.len {
            return None;
        }
        self.get(self.len - 1 - n)
    }

    /// Iterate over values from oldest to newest
    pub fn iter(&self) -> CircularBufferIter<'_, T, N> {
        CircularBufferIter {
            buffer: self,
            index: 0,
        }
    }

    /// Drop all values, keeping the capacity
    pub fn clear(&mut self) {
        self.data = [None; N];
        self.write_pos = 0;
        self.len = 0;
    }

    /// Gets a value by logical index (0 = oldest, len-1 = newest)
    ///
    /// Until the buffer fills, logical and physical indices match. Once
    /// full, the oldest value sits at `write_pos`.
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }

        let physical = if self.len < self.capacity {
            index
        } else {
            (self.write_pos + index) % self.capacity
        };

        self.data[physical].as_ref()
    }
}

impl<const N: usize> CircularBuffer<f32, N> {
    /// Arithmetic mean of the held values, `None` when empty
    pub fn mean(&self) -> Option<f32> {
        if self.is_empty() {
            return None;
        }
        let sum: f32 = self.iter().sum();
        Some(sum / self.len as f32)
    }

    /// Mean of the newest `n` values, `None` unless at least `n` are held
    pub fn tail_mean(&self, n: usize) -> Option<f32> {
        if n == 0 || self.len < n {
            return None;
        }
        let sum: f32 = (0..n).filter_map(|i| self.nth_back(i)).sum();
        Some(sum / n as f32)
    }
}

impl<T: Copy, const N: usize> Default for CircularBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over circular buffer contents, oldest first
pub struct CircularBufferIter<'a, T: Copy, const N: usize> {
    buffer: &'a CircularBuffer<T, N>,
    index: usize,
}

impl<'a, T: Copy, const N: usize> Iterator for CircularBufferIter<'a, T, N> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.buffer.get(self.index)?;
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.buffer.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<'a, T: Copy, const N: usize> ExactSizeIterator for CircularBufferIter<'a, T, N> {}

impl<'a, T: Copy, const N: usize> IntoIterator for &'a CircularBuffer<T, N> {
    type Item = &'a T;
    type IntoIter = CircularBufferIter<'a, T, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn empty_buffer() {
        let buffer: CircularBuffer<f32, 5> = CircularBuffer::new();
        assert!(buffer.is_empty());
        assert_eq!(buffer.len(), 0);
        assert!(buffer.last().is_none());
        assert!(buffer.mean().is_none());
    }

    #[test]
    fn push_and_retrieve() {
        let mut buffer = CircularBuffer::<f32, 5>::new();
        buffer.push(25.0);

        assert_eq!(buffer.len(), 1);
        assert!(!buffer.is_empty());
        assert_eq!(buffer.last(), Some(&25.0));
        assert_eq!(buffer.mean(), Some(25.0));
    }

    #[test]
    fn runtime_capacity_evicts_oldest() {
        let mut buffer = CircularBuffer::<f32, 16>::with_capacity(3);

        for i in 0..5 {
            buffer.push(i as f32);
        }

        assert_eq!(buffer.len(), 3);
        assert!(buffer.is_full());

        let values: Vec<f32> = buffer.iter().copied().collect();
        assert_eq!(values, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn capacity_is_clamped_to_storage() {
        let zero = CircularBuffer::<f32, 4>::with_capacity(0);
        assert_eq!(zero.capacity(), 1);

        let huge = CircularBuffer::<f32, 4>::with_capacity(100);
        assert_eq!(huge.capacity(), 4);
    }

    #[test]
    fn nth_back_walks_from_newest() {
        let mut buffer = CircularBuffer::<u32, 4>::new();
        for i in 0..6 {
            buffer.push(i);
        }

        assert_eq!(buffer.nth_back(0), Some(&5));
        assert_eq!(buffer.nth_back(1), Some(&4));
        assert_eq!(buffer.nth_back(3), Some(&2));
        assert_eq!(buffer.nth_back(4), None);
    }

    #[test]
    fn tail_mean_needs_enough_samples() {
        let mut buffer = CircularBuffer::<f32, 8>::new();
        for v in [1.0, 2.0, 3.0, 4.0] {
            buffer.push(v);
        }

        assert_eq!(buffer.tail_mean(5), None);
        assert_eq!(buffer.tail_mean(2), Some(3.5));
        assert_eq!(buffer.tail_mean(0), None);
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut buffer = CircularBuffer::<f32, 8>::with_capacity(2);
        buffer.push(1.0);
        buffer.push(2.0);
        buffer.clear();

        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), 2);

        buffer.push(7.0);
        assert_eq!(buffer.iter().copied().collect::<Vec<_>>(), vec![7.0]);
    }
}
