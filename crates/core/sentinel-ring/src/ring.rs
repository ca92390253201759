//! Circular buffer with a runtime capacity and one reserved sentinel slot.
//!
//! This module provides [`RingBuffer`], a FIFO queue whose backing array is
//! allocated once, at construction, and is never grown, shrunk or reallocated
//! afterwards.
//!
//! # Capacity
//!
//! A buffer created with `RingBuffer::new(n)` can hold `n` elements, but its
//! backing array has `n + 1` slots. The extra slot is never live: the buffer
//! refuses to append once `n` elements are stored, so `head` can never catch
//! up with `tail` from behind. That leaves `head == tail` with exactly one
//! meaning, empty, and the length can be computed from the indices alone.
//!
//! A capacity of zero is accepted. Such a buffer is permanently empty and
//! permanently full at the same time; every append fails.
//!
//! # Stale slots
//!
//! Popping and clearing only move `tail`. Whatever was stored in a vacated slot
//! stays there until it is overwritten by a later append. The iteration and
//! `contains_live` APIs never look at those slots; [`RingBuffer::contains`]
//! and [`RingBuffer::as_raw_slice`] do.
//!
//! # Performance
//!
//! - Append: O(1), no allocation
//! - Pop: O(1)
//! - Clear: O(1), storage is not touched
//! - `contains`: O(capacity)
//!
//! # Examples
//!
//! ```
//! use sentinel_ring::ring::{RingBuffer, RingState};
//!
//! let mut ring = RingBuffer::<u8>::new(4);
//! for b in *b"ABCD" {
//!     ring.append(b).unwrap();
//! }
//! assert_eq!(ring.state(), RingState::Full);
//!
//! assert_eq!(ring.pop_front(), Ok(b'A'));
//! assert_eq!(ring.pop_front(), Ok(b'B'));
//!
//! // Indices wrap around the end of the backing array.
//! ring.append(b'E').unwrap();
//! ring.append(b'F').unwrap();
//!
//! let rest: Vec<u8> = ring.iter().copied().collect();
//! assert_eq!(rest, *b"CDEF");
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::iter::FusedIterator;

use crate::error::{CapacityError, RingError};

/// A ring buffer of bytes.
pub type ByteRing = RingBuffer<u8>;

/// Occupancy of a [`RingBuffer`], derived from its length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingState {
    /// No live elements.
    Empty,
    /// At least one live element, and room for at least one more.
    Partial,
    /// `capacity` live elements; the next append fails.
    Full,
}

/// A fixed-capacity FIFO ring buffer.
///
/// Elements are appended at `head` and popped from `tail`. Both indices wrap
/// modulo the backing array length, which is `capacity + 1`.
///
/// # Type Parameters
///
/// - `T`: element type, a small `Copy` value (`u8` by default)
///
/// # Examples
///
/// ```
/// use sentinel_ring::{ByteRing, RingError};
///
/// let mut ring = ByteRing::new(2);
/// assert_eq!(ring.pop_front(), Err(RingError::Empty));
///
/// ring.append(10).unwrap();
/// ring.append(20).unwrap();
/// assert_eq!(ring.append(30), Err(RingError::Full));
///
/// assert_eq!(ring.pop_front(), Ok(10));
/// assert_eq!(ring.len(), 1);
/// ```
#[derive(Clone)]
pub struct RingBuffer<T: Copy = u8> {
    /// Backing array of `capacity + 1` slots.
    buf: Box<[T]>,
    capacity: usize,
    /// Next write position.
    head: usize,
    /// Next read position.
    tail: usize,
}

impl<T> RingBuffer<T>
where
    T: Copy + Default,
{
    /// Creates an empty ring buffer that can hold `capacity` elements.
    ///
    /// The backing array (`capacity + 1` slots, filled with `T::default()`) is
    /// allocated here and never again.
    ///
    /// # Panics
    ///
    /// Panics if `capacity + 1` overflows `usize` or the allocation fails. See
    /// [`RingBuffer::try_new`] for a fallible version.
    ///
    /// # Example
    /// ```
    /// use sentinel_ring::ByteRing;
    ///
    /// let ring = ByteRing::new(16);
    /// assert!(ring.is_empty());
    /// assert_eq!(ring.capacity(), 16);
    /// assert_eq!(ring.allocated_len(), 17);
    /// ```
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(ring) => ring,
            Err(err) => panic!("{err}"),
        }
    }

    /// Creates an empty ring buffer, reporting allocation problems instead of
    /// panicking.
    ///
    /// # Errors
    /// Returns [`CapacityError`] if `capacity + 1` overflows `usize` or the
    /// allocator cannot provide the backing array.
    pub fn try_new(capacity: usize) -> Result<Self, CapacityError> {
        let allocated = capacity.checked_add(1).ok_or(CapacityError)?;

        let mut storage = Vec::new();
        storage
            .try_reserve_exact(allocated)
            .map_err(|_| CapacityError)?;
        storage.resize(allocated, T::default());

        Ok(Self {
            buf: storage.into_boxed_slice(),
            capacity,
            head: 0,
            tail: 0,
        })
    }
}

impl<T> RingBuffer<T>
where
    T: Copy,
{
    /// Returns the number of elements the buffer can hold.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the length of the backing array, always `capacity() + 1`.
    #[must_use]
    pub fn allocated_len(&self) -> usize {
        self.buf.len()
    }

    /// Returns the number of live elements.
    ///
    /// Computed from the indices; there is no separate counter. The result
    /// is always in `0..=capacity()`.
    ///
    /// # Example
    /// ```
    /// use sentinel_ring::ByteRing;
    ///
    /// let mut ring = ByteRing::new(8);
    /// assert_eq!(ring.len(), 0);
    /// ring.append(1).unwrap();
    /// ring.append(2).unwrap();
    /// ring.append(3).unwrap();
    /// assert_eq!(ring.len(), 3);
    /// # let popped =
    /// ring.pop_front();
    /// # assert_eq!(popped, Ok(1));
    /// assert_eq!(ring.len(), 2);
    /// ```
    #[must_use]
    pub fn len(&self) -> usize {
        let allocated = self.buf.len();
        (allocated + self.head - self.tail) % allocated
    }

    /// Returns true if the buffer holds no live elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        // The sentinel slot keeps head from reaching tail on a full buffer,
        // so equal indices can only mean empty.
        self.head == self.tail
    }

    /// Returns true if the next [`append`](Self::append) would fail.
    ///
    /// A zero-capacity buffer is always full (and always empty).
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity
    }

    /// Returns the current occupancy class.
    ///
    /// Emptiness is checked first, so a zero-capacity buffer reports
    /// [`RingState::Empty`].
    #[must_use]
    pub fn state(&self) -> RingState {
        if self.is_empty() {
            RingState::Empty
        } else if self.is_full() {
            RingState::Full
        } else {
            RingState::Partial
        }
    }

    /// Raw index of the slot the next append writes to.
    #[must_use]
    pub const fn head(&self) -> usize {
        self.head
    }

    /// Raw index of the slot the next pop reads from.
    #[must_use]
    pub const fn tail(&self) -> usize {
        self.tail
    }

    /// Appends (or enqueues) an element at the back of the buffer.
    ///
    /// # Errors
    /// Returns [`RingError::Full`] if the buffer already holds `capacity`
    /// elements. Nothing is written and no index moves in that case.
    ///
    /// # Example
    /// ```
    /// use sentinel_ring::{ByteRing, RingError};
    ///
    /// let mut ring = ByteRing::new(1);
    /// assert_eq!(ring.append(42), Ok(()));
    /// assert_eq!(ring.append(43), Err(RingError::Full));
    /// assert!(ring.contains(&42));
    /// ```
    pub fn append(&mut self, item: T) -> Result<(), RingError> {
        if self.is_full() {
            return Err(RingError::Full);
        }

        self.buf[self.head] = item;
        self.head = (self.head + 1) % self.buf.len();
        Ok(())
    }

    /// Pops (or dequeues) the oldest element.
    ///
    /// The vacated slot keeps its value until a later append overwrites it.
    ///
    /// # Errors
    /// Returns [`RingError::Empty`] if there is nothing to pop. No index
    /// moves in that case.
    pub fn pop_front(&mut self) -> Result<T, RingError> {
        if self.is_empty() {
            return Err(RingError::Empty);
        }

        let item = self.buf[self.tail];
        self.tail = (self.tail + 1) % self.buf.len();
        Ok(item)
    }

    /// Returns the oldest element without removing it.
    #[must_use]
    pub fn peek_front(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        Some(&self.buf[self.tail])
    }

    /// Discards every live element in O(1).
    ///
    /// Only `tail` moves (to `head`). The backing array is neither zeroed
    /// nor released.
    pub fn clear(&mut self) {
        self.tail = self.head;
    }

    /// Iterates over the live elements, oldest first.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            buf: &self.buf,
            pos: self.tail,
            remaining: self.len(),
        }
    }

    /// Returns the whole backing array, stale slots and sentinel included.
    ///
    /// Intended for diagnostics. The live elements are not contiguous in
    /// general; use [`iter`](Self::iter) to read them in order.
    #[must_use]
    pub fn as_raw_slice(&self) -> &[T] {
        &self.buf
    }
}

impl<T> RingBuffer<T>
where
    T: Copy + PartialEq,
{
    /// Returns true if `item` is stored anywhere in the backing array.
    ///
    /// This scans every physical slot, not only the live window. Values that
    /// were popped or cleared but not yet overwritten still match, and so does
    /// `T::default()` in a slot that has never been written. Use
    /// [`contains_live`](Self::contains_live) for membership among the live
    /// elements.
    ///
    /// # Example
    /// ```
    /// use sentinel_ring::ByteRing;
    ///
    /// let mut ring = ByteRing::new(4);
    /// ring.append(7).unwrap();
    /// ring.pop_front().unwrap();
    ///
    /// assert!(ring.contains(&7));
    /// assert!(!ring.contains_live(&7));
    /// ```
    #[must_use]
    pub fn contains(&self, item: &T) -> bool {
        self.buf.contains(item)
    }

    /// Returns true if `item` is one of the live elements.
    #[must_use]
    pub fn contains_live(&self, item: &T) -> bool {
        self.iter().any(|x| x == item)
    }
}

impl<T> fmt::Debug for RingBuffer<T>
where
    T: Copy + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingBuffer")
            .field("capacity", &self.capacity)
            .field("items", &LiveItems(self))
            .finish()
    }
}

/// Formats only the live window of a ring.
struct LiveItems<'a, T: Copy>(&'a RingBuffer<T>);

impl<T> fmt::Debug for LiveItems<'_, T>
where
    T: Copy + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

/// Iterator over the live elements of a [`RingBuffer`], oldest first.
///
/// Created by [`RingBuffer::iter`].
#[derive(Clone)]
pub struct Iter<'a, T: Copy> {
    buf: &'a [T],
    pos: usize,
    remaining: usize,
}

impl<'a, T: Copy> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let item = &self.buf[self.pos];
        self.pos = (self.pos + 1) % self.buf.len();
        self.remaining -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T: Copy> ExactSizeIterator for Iter<'_, T> {}

impl<T: Copy> FusedIterator for Iter<'_, T> {}

impl<'a, T: Copy> IntoIterator for &'a RingBuffer<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
