//! Error types for ring buffer operations.

/// Errors returned by [`RingBuffer`](crate::RingBuffer) operations.
///
/// Both variants describe a precondition that did not hold. The buffer is
/// left exactly as it was when either is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingError {
    /// `append` was called while the buffer held `capacity` elements.
    Full,
    /// `pop_front` was called while the buffer held no elements.
    Empty,
}

impl core::fmt::Display for RingError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Full => f.write_str("ring buffer is full"),
            Self::Empty => f.write_str("ring buffer is empty"),
        }
    }
}

impl core::error::Error for RingError {}

/// The requested capacity cannot be allocated.
///
/// Returned by [`RingBuffer::try_new`](crate::RingBuffer::try_new) when
/// `capacity + 1` overflows `usize` or the allocator refuses the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityError;

impl core::fmt::Display for CapacityError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("ring capacity overflow")
    }
}

impl core::error::Error for CapacityError {}
