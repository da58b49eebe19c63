//! Domain wrapper types for the branch analysis BDD tests.

use std::fmt;
use std::str::FromStr;

/// Count of commits in a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CommitCount(u32);

impl CommitCount {
    pub(crate) const fn value(self) -> u32 {
        self.0
    }
}

impl FromStr for CommitCount {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u32>().map(Self)
    }
}

impl fmt::Display for CommitCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Position of a commit in the branch history (1 is the tip).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CommitNumber(u32);

impl CommitNumber {
    pub(crate) const fn value(self) -> u32 {
        self.0
    }
}

impl FromStr for CommitNumber {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.parse::<u32>().map_err(|error| error.to_string())?;
        if value == 0 {
            return Err("CommitNumber must be >= 1".to_owned());
        }

        Ok(Self(value))
    }
}

impl fmt::Display for CommitNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
