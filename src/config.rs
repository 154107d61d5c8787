//! Layout configuration
//!
//! Thresholds that steer section grouping and the narrow reflow form, plus a
//! few rendering switches. Every field has a default so partial documents load.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for prototype layout and rendering
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct LayoutConfig {
    /// Longest pre-parameter span (in characters) that still lets a section
    /// join the group before it
    pub max_grouped_before_len: usize,

    /// Longest post-parameter span (in characters) that still lets a section
    /// join the group before it
    pub max_grouped_after_len: usize,

    /// Pre-parameter spans up to this length fold into an indent column in the
    /// narrow form instead of taking their own row
    pub narrow_indent_max_before_len: usize,

    /// Post-parameter spans up to this length stay on the last parameter row in
    /// the narrow form
    pub narrow_indent_max_after_len: usize,

    /// Drop the `partial` type modifier from plain and pre-parameter text
    pub exclude_partial_keyword: bool,

    /// Prefix of the outer element id
    pub id_prefix: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_grouped_before_len: 3,
            max_grouped_after_len: 8,
            narrow_indent_max_before_len: 3,
            narrow_indent_max_after_len: 8,
            exclude_partial_keyword: true,
            id_prefix: "NDPrototype".to_string(),
        }
    }
}

impl LayoutConfig {
    /// Load a configuration from a JSON document
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Load a configuration from a YAML document
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(source)?)
    }
}
