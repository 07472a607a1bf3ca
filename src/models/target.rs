//! Deployment targets addressed by the first segment of a gateway resource.

use std::collections::HashMap;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Target {
    Pandora,
    Ares,
    Profile,
    Production,
}

impl Target {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pandora => "PANDORA",
            Self::Ares => "ARES",
            Self::Profile => "PROFILE",
            Self::Production => "PRODUCTION",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps upper-cased path tokens to targets, with a fallback for anything unmapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetTable {
    tokens: HashMap<String, Target>,
    fallback: Target,
}

impl TargetTable {
    #[must_use]
    pub fn new(tokens: HashMap<String, Target>, fallback: Target) -> Self {
        let tokens = tokens
            .into_iter()
            .map(|(token, target)| (token.to_ascii_uppercase(), target))
            .collect();
        Self { tokens, fallback }
    }

    /// Resolves a path segment. Lookup is case-insensitive; `None` yields the fallback.
    #[must_use]
    pub fn resolve(&self, segment: Option<&str>) -> Target {
        segment
            .and_then(|token| self.tokens.get(&token.to_ascii_uppercase()))
            .copied()
            .unwrap_or(self.fallback)
    }
}

impl Default for TargetTable {
    fn default() -> Self {
        let tokens = [
            ("V1", Target::Production),
            ("V2", Target::Production),
            ("PANDORA", Target::Pandora),
            ("PANDORA2", Target::Pandora),
            ("ARES", Target::Ares),
            ("PROFILE", Target::Profile),
        ]
        .into_iter()
        .map(|(token, target)| (token.to_string(), target))
        .collect();

        Self::new(tokens, Target::Production)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_aliases() {
        let table = TargetTable::default();
        assert_eq!(table.resolve(Some("v1")), Target::Production);
        assert_eq!(table.resolve(Some("pandora2")), Target::Pandora);
        assert_eq!(table.resolve(Some("Ares")), Target::Ares);
        assert_eq!(table.resolve(Some("PROFILE")), Target::Profile);
    }

    #[test]
    fn test_unmapped_and_missing_fall_back() {
        let table = TargetTable::default();
        assert_eq!(table.resolve(Some("staging")), Target::Production);
        assert_eq!(table.resolve(Some("")), Target::Production);
        assert_eq!(table.resolve(None), Target::Production);
    }

    #[test]
    fn test_serializes_upper_case() {
        assert_eq!(
            serde_json::to_value(Target::Pandora).ok(),
            Some(serde_json::json!("PANDORA"))
        );
    }
}
