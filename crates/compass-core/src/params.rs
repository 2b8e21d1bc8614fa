//! Parameter key to row label mapping.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::keys;
use crate::CoreError;

/// A tracked parameter: the CoMPASS key and the label shown for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterKey {
    pub key: String,
    pub label: String,
}

/// Ordered, immutable set of tracked parameters. Row order follows entry order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterTable {
    entries: Vec<ParameterKey>,
}

impl ParameterTable {
    /// Build a table, rejecting empty tables, blank keys and duplicate keys.
    pub fn new(entries: Vec<ParameterKey>) -> Result<Self, CoreError> {
        if entries.is_empty() {
            return Err(CoreError::Config("parameter table is empty".into()));
        }
        let mut seen = HashSet::new();
        for entry in &entries {
            if entry.key.trim().is_empty() {
                return Err(CoreError::Config(format!(
                    "blank key for label '{}'",
                    entry.label
                )));
            }
            if !seen.insert(entry.key.as_str()) {
                return Err(CoreError::Config(format!(
                    "duplicate parameter key '{}'",
                    entry.key
                )));
            }
        }
        Ok(ParameterTable { entries })
    }

    /// Parse a JSON array of `{"key": ..., "label": ...}` objects.
    pub fn from_json(text: &str) -> Result<Self, CoreError> {
        let entries: Vec<ParameterKey> = serde_json::from_str(text)
            .map_err(|err| CoreError::Config(format!("parameter table: {err}")))?;
        Self::new(entries)
    }

    /// Rows reported for boards selected by connection and activity flags.
    pub fn full_telemetry() -> Self {
        Self::from_static(keys::FULL_TELEMETRY_ROWS)
    }

    /// Rows reported for boards selected by enabled channels.
    pub fn enabled_channels() -> Self {
        Self::from_static(keys::ENABLED_CHANNELS_ROWS)
    }

    fn from_static(rows: &[(&str, &str)]) -> Self {
        ParameterTable {
            entries: rows
                .iter()
                .map(|(key, label)| ParameterKey {
                    key: (*key).to_string(),
                    label: (*label).to_string(),
                })
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParameterKey> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
