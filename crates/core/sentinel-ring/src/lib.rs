//! Fixed-capacity FIFO ring buffer with a sentinel slot.
//!
//! This crate provides [`RingBuffer`], a bounded first-in-first-out queue over
//! a backing array that is allocated once at construction and never resized.
//! It is byte-oriented by default ([`ByteRing`]), but any small `Copy` value
//! can be stored.
//!
//! # Overview
//!
//! The buffer tracks two raw indices into its storage:
//!
//! - `head`: where the next appended element is written
//! - `tail`: where the next popped element is read from
//!
//! The number of live elements is never stored. It is derived from the two
//! indices as `(allocated + head - tail) % allocated`. To keep "full" and
//! "empty" distinguishable without a counter, the backing array holds one slot
//! more than the requested capacity. That slot never holds a live element, so
//! `head == tail` always means empty.
//!
//! # Examples
//!
//! ```
//! use sentinel_ring::{ByteRing, RingError};
//!
//! let mut ring = ByteRing::new(3);
//! ring.append(1).unwrap();
//! ring.append(2).unwrap();
//! ring.append(3).unwrap();
//!
//! // Full and Empty are ordinary outcomes, not panics.
//! assert_eq!(ring.append(4), Err(RingError::Full));
//!
//! assert_eq!(ring.pop_front(), Ok(1));
//! ring.append(4).unwrap();
//!
//! let drained: Vec<u8> = ring.iter().copied().collect();
//! assert_eq!(drained, [2, 3, 4]);
//! ```
//!
//! # Threading
//!
//! The buffer is not synchronized. Every mutating operation takes `&mut self`,
//! so sharing it between a producer and a consumer requires an external lock.
//!
//! # Features
//!
//! - `std` (default): currently only affects which tests are built; the crate
//!   itself needs nothing beyond `core` and `alloc`

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod error;
pub mod ring;

pub use error::{CapacityError, RingError};
pub use ring::{ByteRing, Iter, RingBuffer, RingState};
