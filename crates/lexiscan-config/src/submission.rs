use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What happens when a file is submitted while another upload is in flight
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionPolicy {
    /// Refuse the new submission until the current one settles
    #[default]
    Reject,
    /// Cancel the current upload; only the newest response is rendered
    Latest,
}

impl FromStr for SubmissionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reject" => Ok(SubmissionPolicy::Reject),
            "latest" => Ok(SubmissionPolicy::Latest),
            other => Err(format!("unknown submission policy '{other}' (expected reject or latest)")),
        }
    }
}

impl fmt::Display for SubmissionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionPolicy::Reject => f.write_str("reject"),
            SubmissionPolicy::Latest => f.write_str("latest"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionConfig {
    pub policy: SubmissionPolicy,
}
