//! Console output gated by `-q` / `-v`.
//!
//! `-q` leaves only the final summary and errors, `-v` adds file loads, the
//! fuzz seed and per-run timings. Everything goes to stdout; errors reach
//! stderr through `main`'s `Result`.

use std::sync::atomic::{AtomicU8, Ordering};
use std::time::{Duration, Instant};

const QUIET: u8 = 0;
const NORMAL: u8 = 1;
const VERBOSE: u8 = 2;

static LEVEL: AtomicU8 = AtomicU8::new(NORMAL);

/// Set the output level from the global CLI flags. `-q` wins over `-v`.
pub fn init(quiet: bool, verbose: bool) {
    let level = match (quiet, verbose) {
        (true, _) => QUIET,
        (false, true) => VERBOSE,
        (false, false) => NORMAL,
    };
    LEVEL.store(level, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
    LEVEL.load(Ordering::Relaxed) == VERBOSE
}

pub fn is_quiet() -> bool {
    LEVEL.load(Ordering::Relaxed) == QUIET
}

/// `println!` that only fires under `-v`.
macro_rules! vprintln {
    ($($arg:tt)*) => {
        if $crate::verbose::is_verbose() {
            println!($($arg)*);
        }
    };
}

pub(crate) use vprintln;

/// `println!` that `-q` silences.
macro_rules! dprintln {
    ($($arg:tt)*) => {
        if !$crate::verbose::is_quiet() {
            println!($($arg)*);
        }
    };
}

pub(crate) use dprintln;

/// Times one scenario replay or fuzz run and reports it on drop under `-v`.
///
/// ```text
///   replay wraparound: 9 ops in 3.1µs
/// ```
pub struct Stopwatch {
    what: String,
    ops: Option<usize>,
    start: Instant,
}

impl Stopwatch {
    pub fn start(what: impl Into<String>) -> Self {
        Self {
            what: what.into(),
            ops: None,
            start: Instant::now(),
        }
    }

    /// Attach the number of ring operations performed in the timed span.
    #[must_use]
    pub fn ops(mut self, ops: usize) -> Self {
        self.ops = Some(ops);
        self
    }

    fn line(&self, elapsed: Duration) -> String {
        match self.ops {
            Some(ops) => format!("  {}: {ops} ops in {elapsed:.1?}", self.what),
            None => format!("  {}: {elapsed:.1?}", self.what),
        }
    }
}

impl Drop for Stopwatch {
    fn drop(&mut self) {
        if is_verbose() {
            println!("{}", self.line(self.start.elapsed()));
        }
    }
}
