//! Randomized model check of [`ByteRing`] against a bounded `VecDeque`.
//!
//! ## Design
//!
//! - **PRNG**: xorshift64, seeded from the CLI (or the clock). Seed 0 is
//!   replaced by a fixed constant since 0 is a fixed point of xorshift.
//! - **Mix**: ~55% appends of a random byte, ~40% pops, ~5% clears. Appends
//!   outweigh pops so the ring spends time both full and empty.
//! - **Check**: after every operation the outcome, the length and the full
//!   live contents must match the model. The first divergence ends the run.

use std::collections::VecDeque;

use anyhow::{Context, Result, ensure};
use sentinel_ring::{ByteRing, RingError};
use serde::Serialize;

use crate::scenario::MAX_CAPACITY;

/// Replacement for a zero seed.
const FALLBACK_SEED: u64 = 0xDEAD_BEEF_CAFE_BABE;

/// Parameters of a fuzz run.
#[derive(Debug, Clone, Copy)]
pub struct FuzzConfig {
    pub capacity: usize,
    pub ops: usize,
    pub seed: u64,
}

/// Counters and verdict of a fuzz run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FuzzReport {
    pub capacity: usize,
    pub seed: u64,
    pub ops_run: usize,
    pub appends: usize,
    pub pops: usize,
    pub clears: usize,
    pub rejected_full: usize,
    pub rejected_empty: usize,
    pub divergence: Option<Divergence>,
}

/// The first point at which ring and model disagreed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Divergence {
    pub op_index: usize,
    pub op: String,
    pub detail: String,
}

/// xorshift64 generator.
struct XorShift64(u64);

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self(if seed == 0 { FALLBACK_SEED } else { seed })
    }

    fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
}

/// Ring and reference model driven in lockstep.
struct Harness {
    ring: ByteRing,
    model: VecDeque<u8>,
    capacity: usize,
}

impl Harness {
    fn append(&mut self, value: u8) -> (Result<(), RingError>, Result<(), RingError>) {
        let got = self.ring.append(value);
        let want = if self.model.len() < self.capacity {
            self.model.push_back(value);
            Ok(())
        } else {
            Err(RingError::Full)
        };
        (got, want)
    }

    fn pop(&mut self) -> (Result<u8, RingError>, Result<u8, RingError>) {
        let got = self.ring.pop_front();
        let want = self.model.pop_front().ok_or(RingError::Empty);
        (got, want)
    }

    fn clear(&mut self) {
        self.ring.clear();
        self.model.clear();
    }

    /// Compare everything observable about the ring with the model.
    fn check_state(&self) -> Option<String> {
        if self.ring.len() != self.model.len() {
            return Some(format!(
                "len {} != model len {}",
                self.ring.len(),
                self.model.len()
            ));
        }
        if self.ring.is_empty() != self.model.is_empty() {
            return Some(format!("is_empty {} disagrees with model", self.ring.is_empty()));
        }
        if self.ring.is_full() != (self.model.len() == self.capacity) {
            return Some(format!("is_full {} disagrees with model", self.ring.is_full()));
        }
        if !self.ring.iter().eq(self.model.iter()) {
            let live: Vec<u8> = self.ring.iter().copied().collect();
            return Some(format!("contents {live:?} != model {:?}", self.model));
        }
        None
    }
}

/// Run `config.ops` random operations and report the first divergence, if any.
///
/// Capacities above [`MAX_CAPACITY`] are rejected, as in scenario files.
pub fn run(config: &FuzzConfig) -> Result<FuzzReport> {
    ensure!(
        config.capacity <= MAX_CAPACITY,
        "ring capacity {} exceeds the limit of {MAX_CAPACITY}",
        config.capacity
    );
    let ring = ByteRing::try_new(config.capacity)
        .with_context(|| format!("allocating ring of capacity {}", config.capacity))?;
    let mut harness = Harness {
        ring,
        model: VecDeque::with_capacity(config.capacity),
        capacity: config.capacity,
    };
    let mut rng = XorShift64::new(config.seed);
    let mut report = FuzzReport {
        capacity: config.capacity,
        seed: config.seed,
        ..FuzzReport::default()
    };

    for op_index in 0..config.ops {
        let roll = rng.next() % 100;
        let (op, mismatch) = if roll < 55 {
            let value = (rng.next() >> 56) as u8;
            report.appends += 1;
            let (got, want) = harness.append(value);
            if got == Err(RingError::Full) {
                report.rejected_full += 1;
            }
            (
                format!("append {value}"),
                (got != want).then(|| format!("ring returned {got:?}, model {want:?}")),
            )
        } else if roll < 95 {
            report.pops += 1;
            let (got, want) = harness.pop();
            if got == Err(RingError::Empty) {
                report.rejected_empty += 1;
            }
            (
                "pop".to_owned(),
                (got != want).then(|| format!("ring returned {got:?}, model {want:?}")),
            )
        } else {
            report.clears += 1;
            harness.clear();
            ("clear".to_owned(), None)
        };

        report.ops_run = op_index + 1;
        if let Some(detail) = mismatch.or_else(|| harness.check_state()) {
            report.divergence = Some(Divergence {
                op_index,
                op,
                detail,
            });
            break;
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xorshift_never_sticks_at_zero() {
        let mut rng = XorShift64::new(0);
        for _ in 0..1000 {
            assert_ne!(rng.next(), 0);
        }
    }

    #[test]
    fn xorshift_is_deterministic() {
        let mut a = XorShift64::new(42);
        let mut b = XorShift64::new(42);
        for _ in 0..100 {
            assert_eq!(a.next(), b.next());
        }
    }

    #[test]
    fn no_divergence_across_capacities() {
        for capacity in [0, 1, 2, 3, 7, 15, 64] {
            let report = run(&FuzzConfig {
                capacity,
                ops: 20_000,
                seed: 0x5EED + capacity as u64,
            })
            .unwrap();
            assert_eq!(report.divergence, None, "capacity {capacity}");
            assert_eq!(report.ops_run, 20_000);
            assert_eq!(report.appends + report.pops + report.clears, 20_000);
        }
    }

    #[test]
    fn small_rings_hit_both_limits() {
        let report = run(&FuzzConfig {
            capacity: 3,
            ops: 10_000,
            seed: 7,
        })
        .unwrap();
        assert!(report.rejected_full > 0);
        assert!(report.rejected_empty > 0);
    }

    #[test]
    fn zero_capacity_rejects_every_append() {
        let report = run(&FuzzConfig {
            capacity: 0,
            ops: 1_000,
            seed: 1,
        })
        .unwrap();
        assert_eq!(report.rejected_full, report.appends);
        assert_eq!(report.rejected_empty, report.pops);
    }

    #[test]
    fn rejects_oversized_capacity() {
        for capacity in [MAX_CAPACITY + 1, usize::MAX] {
            let err = run(&FuzzConfig {
                capacity,
                ops: 1,
                seed: 1,
            })
            .unwrap_err();
            assert!(err.to_string().contains("exceeds the limit"), "{err:#}");
        }
    }

    #[test]
    fn accepts_capacity_at_the_limit() {
        let report = run(&FuzzConfig {
            capacity: MAX_CAPACITY,
            ops: 100,
            seed: 1,
        })
        .unwrap();
        assert_eq!(report.divergence, None);
        assert_eq!(report.rejected_full, 0);
    }

    #[test]
    fn same_seed_same_run() {
        let config = FuzzConfig {
            capacity: 5,
            ops: 5_000,
            seed: 99,
        };
        let a = run(&config).unwrap();
        let b = run(&config).unwrap();
        assert_eq!(
            (a.appends, a.pops, a.clears, a.rejected_full, a.rejected_empty),
            (b.appends, b.pops, b.clears, b.rejected_full, b.rejected_empty)
        );
    }
}
