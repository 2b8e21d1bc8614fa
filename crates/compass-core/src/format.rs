//! Cosmetic value transforms keyed by parameter.

use std::collections::HashMap;
use std::fmt;

use crate::keys;

const COARSE_GAIN_PREFIX: &str = "COARSE_GAIN_X";
const CHARGESENS_PREFIX: &str = "CHARGESENS_";
const CHARGESENS_MARKER: &str = "FC_LSB_VPP";

/// Text transform applied to every value of one parameter key.
pub trait ValueFormatter: fmt::Debug + Send + Sync {
    fn format(&self, value: &str) -> String;
}

/// `COARSE_GAIN_X4` -> `4x`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoarseGain;

impl ValueFormatter for CoarseGain {
    fn format(&self, value: &str) -> String {
        format_coarse_gain(value)
    }
}

/// `CHARGESENS_2p5_FC_LSB_VPP` -> `2p5`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnergyCoarseGain;

impl ValueFormatter for EnergyCoarseGain {
    fn format(&self, value: &str) -> String {
        format_energy_coarse_gain(value)
    }
}

/// Render a coarse gain enumeration as a multiplier. Other values pass through.
pub fn format_coarse_gain(value: &str) -> String {
    match value.strip_prefix(COARSE_GAIN_PREFIX) {
        Some(multiplier) if !multiplier.is_empty() => format!("{multiplier}x"),
        _ => value.to_string(),
    }
}

/// Reduce a charge sensitivity enumeration to its numeric part, the second
/// `_` field with any `FC` unit suffix removed. Other values pass through.
pub fn format_energy_coarse_gain(value: &str) -> String {
    if !value.starts_with(CHARGESENS_PREFIX) || !value.contains(CHARGESENS_MARKER) {
        return value.to_string();
    }
    let Some(segment) = value.split('_').nth(1) else {
        return value.to_string();
    };
    segment
        .strip_suffix("FC")
        .filter(|number| !number.is_empty())
        .unwrap_or(segment)
        .to_string()
}

/// Formatters looked up by parameter key. Keys without a formatter are
/// reported verbatim.
#[derive(Debug, Default)]
pub struct FormatterRegistry {
    formatters: HashMap<String, Box<dyn ValueFormatter>>,
}

impl FormatterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the gain formatters for both built-in reports.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(keys::CH_COARSE_GAIN, CoarseGain);
        registry.register(keys::CH_ENERGY_COARSE_GAIN, EnergyCoarseGain);
        registry
    }

    /// Register `formatter` for `key`, replacing any previous one.
    pub fn register(&mut self, key: impl Into<String>, formatter: impl ValueFormatter + 'static) {
        self.formatters.insert(key.into(), Box::new(formatter));
    }

    pub fn get(&self, key: &str) -> Option<&dyn ValueFormatter> {
        self.formatters.get(key).map(|formatter| formatter.as_ref())
    }

    /// Format `value` as a value of `key`.
    pub fn apply(&self, key: &str, value: &str) -> String {
        match self.get(key) {
            Some(formatter) => formatter.format(value),
            None => value.to_string(),
        }
    }
}
