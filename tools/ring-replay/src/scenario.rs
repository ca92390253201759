//! Scenario files.
//!
//! A scenario is a TOML file holding a ring configuration and an ordered list
//! of operations, each optionally paired with the outcome it must produce:
//!
//! ```toml
//! [ring]
//! capacity = 3
//! membership = "physical"   # or "live"
//!
//! [[step]]
//! op = "append"
//! value = 1
//! expect = "full"           # "ok" when omitted
//!
//! [[step]]
//! op = "pop"
//! expect = 1                # a byte, or "empty"; unchecked when omitted
//! ```

use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

/// Largest capacity a scenario may request.
pub const MAX_CAPACITY: usize = 1 << 20;

/// A parsed and validated scenario.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Display name; defaults to the file stem when loaded from disk.
    #[serde(default)]
    pub name: Option<String>,
    /// `[ring]` section.
    pub ring: RingConfig,
    /// `[[step]]` entries, in execution order.
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

/// `[ring]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RingConfig {
    pub capacity: usize,
    #[serde(default)]
    pub membership: Membership,
}

/// Which membership test `contains` steps use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Membership {
    /// Scan the whole backing array, stale slots included.
    #[default]
    Physical,
    /// Scan only the live window.
    Live,
}

/// One operation in a scenario.
///
/// Keys other than `op` and the variant's own fields are rejected. `Clear` is
/// braced because serde skips that check for unit variants of a tagged enum.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case", deny_unknown_fields)]
pub enum Step {
    Append {
        value: u8,
        #[serde(default)]
        expect: AppendExpect,
    },
    Pop {
        #[serde(default)]
        expect: Option<PopExpect>,
    },
    Clear {},
    Len {
        expect: usize,
    },
    Contains {
        value: u8,
        expect: bool,
    },
}

/// Expected result of an `append` step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppendExpect {
    #[default]
    Ok,
    Full,
}

/// Expected result of a `pop` step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PopExpect {
    Value(u8),
    Outcome(PopOutcome),
}

/// The only non-value outcome a pop can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PopOutcome {
    Empty,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Append { value, .. } => write!(f, "append {value}"),
            Self::Pop { .. } => f.write_str("pop"),
            Self::Clear {} => f.write_str("clear"),
            Self::Len { .. } => f.write_str("len"),
            Self::Contains { value, .. } => write!(f, "contains {value}"),
        }
    }
}

impl Scenario {
    /// Returns the scenario name, or a placeholder for unnamed scenarios.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }

    fn validate(&self) -> Result<()> {
        ensure!(!self.steps.is_empty(), "scenario has no [[step]] entries");
        ensure!(
            self.ring.capacity <= MAX_CAPACITY,
            "ring capacity {} exceeds the limit of {MAX_CAPACITY}",
            self.ring.capacity
        );
        Ok(())
    }
}

/// Parse and validate a scenario from TOML text.
pub fn parse(text: &str) -> Result<Scenario> {
    let scenario: Scenario = toml::from_str(text).context("invalid scenario TOML")?;
    scenario.validate()?;
    Ok(scenario)
}

/// Load a scenario file, naming it after the file stem if it has no `name`.
pub fn load(path: &Path) -> Result<Scenario> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading scenario {}", path.display()))?;
    let mut scenario =
        parse(&text).with_context(|| format!("loading scenario {}", path.display()))?;

    if scenario.name.is_none() {
        scenario.name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned());
    }
    Ok(scenario)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_step_kind() {
        let scenario = parse(
            r#"
            name = "all-ops"

            [ring]
            capacity = 2
            membership = "live"

            [[step]]
            op = "append"
            value = 1

            [[step]]
            op = "append"
            value = 9
            expect = "full"

            [[step]]
            op = "pop"
            expect = 1

            [[step]]
            op = "pop"
            expect = "empty"

            [[step]]
            op = "pop"

            [[step]]
            op = "clear"

            [[step]]
            op = "len"
            expect = 0

            [[step]]
            op = "contains"
            value = 1
            expect = false
            "#,
        )
        .unwrap();

        assert_eq!(scenario.name(), "all-ops");
        assert_eq!(scenario.ring.capacity, 2);
        assert_eq!(scenario.ring.membership, Membership::Live);
        assert_eq!(
            scenario.steps,
            vec![
                Step::Append {
                    value: 1,
                    expect: AppendExpect::Ok
                },
                Step::Append {
                    value: 9,
                    expect: AppendExpect::Full
                },
                Step::Pop {
                    expect: Some(PopExpect::Value(1))
                },
                Step::Pop {
                    expect: Some(PopExpect::Outcome(PopOutcome::Empty))
                },
                Step::Pop { expect: None },
                Step::Clear {},
                Step::Len { expect: 0 },
                Step::Contains {
                    value: 1,
                    expect: false
                },
            ]
        );
    }

    #[test]
    fn membership_defaults_to_physical() {
        let scenario = parse(
            r#"
            [ring]
            capacity = 1

            [[step]]
            op = "clear"
            "#,
        )
        .unwrap();
        assert_eq!(scenario.ring.membership, Membership::Physical);
        assert_eq!(scenario.name(), "<unnamed>");
    }

    #[test]
    fn rejects_empty_scenario() {
        let err = parse("[ring]\ncapacity = 4\n").unwrap_err();
        assert!(err.to_string().contains("no [[step]] entries"), "{err:#}");
    }

    #[test]
    fn rejects_oversized_capacity() {
        let text = format!(
            "[ring]\ncapacity = {}\n[[step]]\nop = \"clear\"\n",
            MAX_CAPACITY + 1
        );
        let err = parse(&text).unwrap_err();
        assert!(err.to_string().contains("exceeds the limit"), "{err:#}");
    }

    #[test]
    fn rejects_out_of_range_byte() {
        let err = parse(
            r#"
            [ring]
            capacity = 1

            [[step]]
            op = "append"
            value = 256
            "#,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("invalid scenario TOML"));
    }

    #[test]
    fn rejects_unknown_op() {
        assert!(
            parse(
                r#"
                [ring]
                capacity = 1

                [[step]]
                op = "rotate"
                "#,
            )
            .is_err()
        );
    }

    #[test]
    fn rejects_misspelled_step_keys() {
        for step in [
            "op = \"pop\"\nexpected = 5",
            "op = \"append\"\nvalue = 1\nexpct = \"full\"",
            "op = \"clear\"\nvalue = 9",
            "op = \"len\"\nexpect = 0\nvalue = 1",
        ] {
            let text = format!("[ring]\ncapacity = 2\n\n[[step]]\n{step}\n");
            let err = parse(&text).unwrap_err();
            assert!(
                format!("{err:#}").contains("unknown field"),
                "accepted {step:?}: {err:#}"
            );
        }
    }

    #[test]
    fn step_display() {
        assert_eq!(
            Step::Append {
                value: 7,
                expect: AppendExpect::Ok
            }
            .to_string(),
            "append 7"
        );
        assert_eq!(Step::Pop { expect: None }.to_string(), "pop");
        assert_eq!(Step::Clear {}.to_string(), "clear");
        assert_eq!(
            Step::Contains {
                value: 3,
                expect: true
            }
            .to_string(),
            "contains 3"
        );
    }

    #[test]
    fn load_names_scenario_after_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/wraparound.toml");
        let scenario = load(&path).unwrap();
        assert_eq!(scenario.name(), "wraparound");
    }

    #[test]
    fn load_reports_missing_file() {
        let err = load(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(err.to_string().contains("reading scenario"));
    }
}
