//! Ring Buffer Implementation

use crate::RingBufferError;

/// Single-owner ring buffer with a fixed number of slots
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    /// Pre-allocated storage
    storage: Box<[Option<T>]>,
    /// Index of the slot the next push writes to
    head: usize,
    /// Number of occupied slots
    len: usize,
}

impl<T> RingBuffer<T> {
    /// Create a new ring buffer with given capacity
    pub fn new(capacity: usize) -> Result<Self, RingBufferError> {
        if capacity == 0 {
            return Err(RingBufferError::ZeroCapacity);
        }
        let storage: Vec<Option<T>> = (0..capacity).map(|_| None).collect();
        Ok(Self {
            storage: storage.into_boxed_slice(),
            head: 0,
            len: 0,
        })
    }

    /// Push an item into the buffer, returning the evicted oldest item if full
    pub fn push(&mut self, item: T) -> Option<T> {
        let evicted = self.storage[self.head].replace(item);
        self.head = (self.head + 1) % self.capacity();

        if evicted.is_none() {
            self.len += 1;
        }
        evicted
    }

    /// Get the number of items currently in the buffer
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the buffer capacity
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Iterate from oldest to newest
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            buffer: self,
            offset: 0,
        }
    }

    /// Clear the buffer
    pub fn clear(&mut self) {
        for slot in self.storage.iter_mut() {
            *slot = None;
        }
        self.head = 0;
        self.len = 0;
    }

    fn oldest_index(&self) -> usize {
        (self.head + self.capacity() - self.len) % self.capacity()
    }
}

/// Oldest-to-newest iterator over a [`RingBuffer`]
pub struct Iter<'a, T> {
    buffer: &'a RingBuffer<T>,
    offset: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.buffer.len {
            return None;
        }
        let idx = (self.buffer.oldest_index() + self.offset) % self.buffer.capacity();
        self.offset += 1;
        self.buffer.storage[idx].as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.buffer.len - self.offset;
        (remaining, Some(remaining))
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> IntoIterator for &'a RingBuffer<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero_capacity_rejected() {
        assert_eq!(
            RingBuffer::<u8>::new(0).unwrap_err(),
            RingBufferError::ZeroCapacity
        );
    }

    #[test]
    fn test_push_and_read() {
        let mut buffer = RingBuffer::new(10).unwrap();

        for i in 0..5u32 {
            buffer.push(i * 100);
        }

        assert_eq!(buffer.len(), 5);

        let items: Vec<u32> = buffer.iter().copied().collect();
        assert_eq!(items, vec![0, 100, 200, 300, 400]); // Oldest first
        assert_eq!(buffer.iter().len(), 5);
    }

    #[test]
    fn test_overwrite_oldest() {
        let mut buffer = RingBuffer::new(5).unwrap();

        // Fill beyond capacity
        for i in 0..7u32 {
            let evicted = buffer.push(i);
            if i < 5 {
                assert_eq!(evicted, None);
            } else {
                assert_eq!(evicted, Some(i - 5));
            }
        }

        // Holds exactly `capacity` items
        assert_eq!(buffer.len(), buffer.capacity());
        assert_eq!(buffer.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_clear() {
        let mut buffer = RingBuffer::new(3).unwrap();
        buffer.push('a');
        buffer.push('b');
        buffer.clear();

        assert!(buffer.is_empty());
        assert_eq!(buffer.iter().count(), 0);

        buffer.push('c');
        assert_eq!(buffer.iter().copied().collect::<Vec<_>>(), vec!['c']);
    }

    proptest! {
        #[test]
        fn prop_holds_trailing_window(
            capacity in 1usize..16,
            items in proptest::collection::vec(any::<u16>(), 0..64),
        ) {
            let mut buffer = RingBuffer::new(capacity).unwrap();
            for &item in &items {
                buffer.push(item);
            }

            let start = items.len().saturating_sub(capacity);
            let expected: Vec<u16> = items[start..].to_vec();
            let actual: Vec<u16> = buffer.iter().copied().collect();

            prop_assert!(buffer.len() <= capacity);
            prop_assert_eq!(actual, expected);
        }
    }
}
