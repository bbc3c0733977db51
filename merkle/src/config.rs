// Copyright 2024. The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

use serde::{Deserialize, Serialize};

use crate::sparse_merkle_tree::{validate_depth, SMTError, MAX_DEPTH};

/// Configuration for both tree types. Every section and field is optional and falls back to its default.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HashTreeConfig {
    #[serde(default)]
    pub smt: SmtConfig,
    #[serde(default)]
    pub accumulator: AccumulatorConfig,
}

impl HashTreeConfig {
    pub fn validate(&self) -> Result<(), SMTError> {
        self.smt.validate()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SmtConfig {
    /// Number of levels below the root, between 1 and 256. Keys are placed by their first `depth` bits.
    pub depth: u32,
}

impl SmtConfig {
    pub fn validate(&self) -> Result<(), SMTError> {
        validate_depth(self.depth)
    }
}

impl Default for SmtConfig {
    fn default() -> Self {
        Self { depth: MAX_DEPTH }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AccumulatorConfig {
    /// Appends beyond this many leaves are rejected
    pub max_leaf_count: u64,
}

impl Default for AccumulatorConfig {
    fn default() -> Self {
        Self {
            max_leaf_count: u64::MAX,
        }
    }
}
