//! Scenario replay against a live [`ByteRing`].
//!
//! Every step is applied in order and compared with its expectation. A
//! mismatch does not stop the replay: it is recorded, and the remaining steps
//! keep running against whatever state the ring is actually in.

use std::fmt;

use anyhow::{Context, Result};
use sentinel_ring::{ByteRing, RingError, RingState};
use serde::Serialize;

use crate::scenario::{AppendExpect, Membership, PopExpect, PopOutcome, Scenario, Step};

/// What a step produced, or was expected to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    /// The operation succeeded without a value (append, clear).
    Ok,
    /// Append was rejected.
    Full,
    /// Pop was rejected.
    Empty,
    /// Pop returned this byte.
    Value(u8),
    /// Current length.
    Len(usize),
    /// Membership test result.
    Member(bool),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => f.write_str("ok"),
            Self::Full => f.write_str("full"),
            Self::Empty => f.write_str("empty"),
            Self::Value(v) => write!(f, "{v}"),
            Self::Len(n) => write!(f, "len={n}"),
            Self::Member(b) => write!(f, "{b}"),
        }
    }
}

impl From<RingError> for Outcome {
    fn from(err: RingError) -> Self {
        match err {
            RingError::Full => Self::Full,
            RingError::Empty => Self::Empty,
        }
    }
}

/// Result of one replayed step, with the ring state it left behind.
#[derive(Debug, Clone, Serialize)]
pub struct StepRecord {
    pub index: usize,
    pub op: String,
    pub observed: Outcome,
    pub expected: Option<Outcome>,
    pub passed: bool,
    pub head: usize,
    pub tail: usize,
    pub len: usize,
    pub state: &'static str,
}

/// Result of replaying a whole scenario.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub name: String,
    pub capacity: usize,
    pub membership: Membership,
    pub passed: bool,
    pub steps: Vec<StepRecord>,
}

impl ScenarioReport {
    /// Steps whose observed outcome differed from the expectation.
    pub fn failures(&self) -> impl Iterator<Item = &StepRecord> {
        self.steps.iter().filter(|s| !s.passed)
    }
}

/// Lowercase name of a ring state, as shown in traces and reports.
pub fn state_name(state: RingState) -> &'static str {
    match state {
        RingState::Empty => "empty",
        RingState::Partial => "partial",
        RingState::Full => "full",
    }
}

/// Replay `scenario` on a fresh ring.
pub fn replay(scenario: &Scenario) -> Result<ScenarioReport> {
    let capacity = scenario.ring.capacity;
    let membership = scenario.ring.membership;
    let mut ring = ByteRing::try_new(capacity)
        .with_context(|| format!("allocating ring of capacity {capacity}"))?;

    let mut steps = Vec::with_capacity(scenario.steps.len());
    for (index, step) in scenario.steps.iter().enumerate() {
        let observed = apply(&mut ring, step, membership);
        let expected = expectation(step);
        steps.push(StepRecord {
            index,
            op: step.to_string(),
            observed,
            expected,
            passed: expected.is_none_or(|e| e == observed),
            head: ring.head(),
            tail: ring.tail(),
            len: ring.len(),
            state: state_name(ring.state()),
        });
    }

    Ok(ScenarioReport {
        name: scenario.name().to_owned(),
        capacity,
        membership,
        passed: steps.iter().all(|s| s.passed),
        steps,
    })
}

/// Apply a single step and report what the ring did.
fn apply(ring: &mut ByteRing, step: &Step, membership: Membership) -> Outcome {
    match *step {
        Step::Append { value, .. } => ring
            .append(value)
            .map_or_else(Outcome::from, |()| Outcome::Ok),
        Step::Pop { .. } => ring.pop_front().map_or_else(Outcome::from, Outcome::Value),
        Step::Clear {} => {
            ring.clear();
            Outcome::Ok
        }
        Step::Len { .. } => Outcome::Len(ring.len()),
        Step::Contains { value, .. } => Outcome::Member(match membership {
            Membership::Physical => ring.contains(&value),
            Membership::Live => ring.contains_live(&value),
        }),
    }
}

fn expectation(step: &Step) -> Option<Outcome> {
    match *step {
        Step::Append { expect, .. } => Some(match expect {
            AppendExpect::Ok => Outcome::Ok,
            AppendExpect::Full => Outcome::Full,
        }),
        Step::Pop { expect } => expect.map(|e| match e {
            PopExpect::Value(v) => Outcome::Value(v),
            PopExpect::Outcome(PopOutcome::Empty) => Outcome::Empty,
        }),
        Step::Clear {} => None,
        Step::Len { expect } => Some(Outcome::Len(expect)),
        Step::Contains { expect, .. } => Some(Outcome::Member(expect)),
    }
}
