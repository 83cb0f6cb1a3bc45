//! Scheduled report domain types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How often a vehicle report is sent.
///
/// Wire and storage format: `"Daily"`, `"Weekly"`, `"Monthly"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportFrequency {
    Daily,
    Weekly,
    Monthly,
}

impl ReportFrequency {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
        }
    }
}

impl fmt::Display for ReportFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown report frequency: {0}")]
pub struct UnknownFrequency(pub String);

impl FromStr for ReportFrequency {
    type Err = UnknownFrequency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Daily" => Ok(Self::Daily),
            "Weekly" => Ok(Self::Weekly),
            "Monthly" => Ok(Self::Monthly),
            other => Err(UnknownFrequency(other.to_owned())),
        }
    }
}
