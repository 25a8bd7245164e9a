use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Numeric identifier used for horses and owners alike.
pub type Id = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sex {
    Female,
    Male,
}

impl Sex {
    /// Wire representation, also used as the `sex` search parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Female => "FEMALE",
            Sex::Male => "MALE",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Sex::Female => "Female",
            Sex::Male => "Male",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FEMALE" => Ok(Sex::Female),
            "MALE" => Ok(Sex::Male),
            other => Err(format!("Invalid horse sex '{}': must be MALE or FEMALE", other)),
        }
    }
}
