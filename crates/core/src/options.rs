//! Parser policies that the notation leaves open.

use serde::{Deserialize, Serialize};

/// What to do when a TORNEO block, or a phase inside ELIMINACION, is
/// declared more than once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RedeclarationPolicy {
    /// The later declaration replaces the earlier one.
    #[default]
    LastWins,
    /// The later declaration is parsed and then dropped.
    KeepFirst,
    /// Metadata maps are unioned (later keys win); match lists are appended.
    Merge,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strictness {
    /// Unknown attributes are consumed silently.
    #[default]
    Lenient,
    /// Unknown attributes and redeclared blocks are reported.
    Strict,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ParseOptions {
    pub redeclaration: RedeclarationPolicy,
    pub strictness: Strictness,
}

impl ParseOptions {
    pub fn strict() -> Self {
        ParseOptions {
            strictness: Strictness::Strict,
            ..ParseOptions::default()
        }
    }

    pub fn is_strict(&self) -> bool {
        self.strictness == Strictness::Strict
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_lenient_last_wins() {
        let o = ParseOptions::default();
        assert_eq!(o.redeclaration, RedeclarationPolicy::LastWins);
        assert!(!o.is_strict());
    }

    #[test]
    fn deserializes_kebab_case_names() {
        let o: ParseOptions =
            serde_json::from_str(r#"{"redeclaration": "keep-first", "strictness": "strict"}"#)
                .unwrap();
        assert_eq!(o.redeclaration, RedeclarationPolicy::KeepFirst);
        assert!(o.is_strict());

        let partial: ParseOptions = serde_json::from_str(r#"{"redeclaration": "merge"}"#).unwrap();
        assert_eq!(partial.redeclaration, RedeclarationPolicy::Merge);
        assert_eq!(partial.strictness, Strictness::Lenient);
    }
}
