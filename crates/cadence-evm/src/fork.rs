//! Protocol forks

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Protocol upgrade selecting the gas schedule, instruction set and
/// precompile set. Ordered by activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Fork {
    /// alt_bn128 precompiles, RETURNDATA and STATICCALL
    Byzantium,
    /// Bitwise shifts
    Constantinople,
    /// Cheaper alt_bn128 precompiles
    Istanbul,
    /// Warm/cold access costs
    Berlin,
    /// Fee market
    London,
    /// PUSH0
    #[default]
    Shanghai,
}

impl Fork {
    /// Every fork, oldest first
    pub const ALL: [Fork; 6] = [
        Fork::Byzantium,
        Fork::Constantinople,
        Fork::Istanbul,
        Fork::Berlin,
        Fork::London,
        Fork::Shanghai,
    ];

    /// Lowercase name
    pub fn name(self) -> &'static str {
        match self {
            Fork::Byzantium => "byzantium",
            Fork::Constantinople => "constantinople",
            Fork::Istanbul => "istanbul",
            Fork::Berlin => "berlin",
            Fork::London => "london",
            Fork::Shanghai => "shanghai",
        }
    }

    /// Whether this fork includes the rules of `other`
    pub fn is_enabled(self, other: Fork) -> bool {
        self >= other
    }
}

impl FromStr for Fork {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Fork::ALL
            .into_iter()
            .find(|fork| fork.name() == lower)
            .ok_or_else(|| EngineError::UnknownFork(s.to_string()))
    }
}

impl TryFrom<String> for Fork {
    type Error = EngineError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for Fork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fork_ordering() {
        assert!(Fork::Byzantium < Fork::Constantinople);
        assert!(Fork::Istanbul < Fork::Berlin);
        assert!(Fork::Shanghai.is_enabled(Fork::Constantinople));
        assert!(!Fork::Byzantium.is_enabled(Fork::Istanbul));
    }

    #[test]
    fn test_fork_from_str_case_insensitive() {
        assert_eq!("Istanbul".parse::<Fork>().unwrap(), Fork::Istanbul);
        assert_eq!("SHANGHAI".parse::<Fork>().unwrap(), Fork::Shanghai);
        assert!(matches!(
            "frontier".parse::<Fork>(),
            Err(EngineError::UnknownFork(name)) if name == "frontier"
        ));
    }

    #[test]
    fn test_fork_display_roundtrip() {
        for fork in Fork::ALL {
            assert_eq!(fork.to_string().parse::<Fork>().unwrap(), fork);
        }
    }

    #[test]
    fn test_default_fork() {
        assert_eq!(Fork::default(), Fork::Shanghai);
    }
}
