use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How strongly a mod depends on another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyType {
    Required,
    Optional,
    Embedded,
    Incompatible,
}

impl Default for DependencyType {
    fn default() -> Self {
        Self::Required
    }
}

impl DependencyType {
    /// Parse a manifest `type` string.
    ///
    /// Unrecognized or missing values fall back to `Required`.
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "optional" => Self::Optional,
            "embedded" => Self::Embedded,
            "incompatible" => Self::Incompatible,
            _ => Self::Required,
        }
    }
}

/// A single dependency declaration attached to a mod.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModDependency {
    pub mod_id: String,
    pub mod_name: String,
    #[serde(default)]
    pub version_range: Option<String>,
    #[serde(default)]
    pub dependency_type: DependencyType,
    #[serde(default)]
    pub source: String,
}

/// A normalized mod as seen by the dependency analyzer.
///
/// Built once per analysis run from a raw record; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModInfo {
    pub mod_id: String,
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub file_id: Option<String>,
    #[serde(default)]
    pub dependencies: Vec<ModDependency>,
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
}
