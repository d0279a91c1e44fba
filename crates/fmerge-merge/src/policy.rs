use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::outcome::Side;

/// How a merge session settles a field both sides changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeConflictPolicy {
    /// The destination takes the source's value.
    #[default]
    PreferSource,
    /// The destination keeps its own value.
    PreferDestination,
}

impl MergeConflictPolicy {
    /// The side whose value survives a conflict.
    pub fn winner(self) -> Side {
        match self {
            MergeConflictPolicy::PreferSource => Side::Source,
            MergeConflictPolicy::PreferDestination => Side::Destination,
        }
    }
}

impl fmt::Display for MergeConflictPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeConflictPolicy::PreferSource => f.write_str("prefer_source"),
            MergeConflictPolicy::PreferDestination => f.write_str("prefer_destination"),
        }
    }
}

impl FromStr for MergeConflictPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prefer_source" | "source" | "src" => Ok(MergeConflictPolicy::PreferSource),
            "prefer_destination" | "destination" | "dst" => {
                Ok(MergeConflictPolicy::PreferDestination)
            }
            other => Err(format!("unknown merge conflict policy: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_prefers_source() {
        assert_eq!(
            MergeConflictPolicy::default(),
            MergeConflictPolicy::PreferSource
        );
        assert_eq!(MergeConflictPolicy::default().winner(), Side::Source);
        assert_eq!(
            MergeConflictPolicy::PreferDestination.winner(),
            Side::Destination
        );
    }

    #[test]
    fn parse_and_display_agree() {
        let policies = [
            MergeConflictPolicy::PreferSource,
            MergeConflictPolicy::PreferDestination,
        ];
        for policy in policies {
            let parsed: MergeConflictPolicy = policy.to_string().parse().unwrap();
            assert_eq!(parsed, policy);
        }
        let parsed: MergeConflictPolicy = "DST".parse().unwrap();
        assert_eq!(parsed, MergeConflictPolicy::PreferDestination);
        assert!("newest".parse::<MergeConflictPolicy>().is_err());
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&MergeConflictPolicy::PreferDestination).unwrap();
        assert_eq!(json, "\"prefer_destination\"");
    }
}
