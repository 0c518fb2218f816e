//! Binder configuration
//!
//! The two knobs settle behavior the argument grammar alone leaves open: how parsed
//! identifiers are compared with declared aliases, and what happens to a call's earlier
//! assignments when a later one fails. Both default to the strict choice.

use serde::{Deserialize, Serialize};

/// How parsed identifiers are compared with declared aliases
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AliasMatching {
    /// `--TestParam` does not resolve against `testParam`
    #[default]
    Exact,

    /// Aliases and identifiers are compared after lowercasing. Aliases that differ only in
    /// case then collide when the schema table is built.
    CaseInsensitive,
}

impl AliasMatching {
    /// Key under which `alias` is stored and looked up.
    pub fn fold(&self, alias: &str) -> String {
        match self {
            AliasMatching::Exact => alias.to_string(),
            AliasMatching::CaseInsensitive => alias.to_lowercase(),
        }
    }
}

/// What a failing pair does to the pairs before it in the same call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApplyMode {
    /// Convert every pair first; write slots only if all of them succeed
    #[default]
    Atomic,

    /// Write each pair as soon as it converts; stop at the first failure and keep earlier writes
    BestEffort,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct BinderOptions {
    pub alias_matching: AliasMatching,
    pub apply_mode: ApplyMode,
}

impl BinderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_alias_matching(mut self, alias_matching: AliasMatching) -> Self {
        self.alias_matching = alias_matching;
        self
    }

    pub fn with_apply_mode(mut self, apply_mode: ApplyMode) -> Self {
        self.apply_mode = apply_mode;
        self
    }
}
