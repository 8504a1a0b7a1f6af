use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of incompatibility a conflict describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictType {
    ApiConflict,
    NamespaceCollision,
    AssetConflict,
    VersionConflict,
    DependencyConflict,
    LoadOrderConflict,
}

impl fmt::Display for ConflictType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ApiConflict => "api_conflict",
            Self::NamespaceCollision => "namespace_collision",
            Self::AssetConflict => "asset_conflict",
            Self::VersionConflict => "version_conflict",
            Self::DependencyConflict => "dependency_conflict",
            Self::LoadOrderConflict => "load_order_conflict",
        };
        f.write_str(name)
    }
}

/// Conflict severity, from most to least blocking.
///
/// `Critical` and `Error` block conversion; `Warning` and `Info` do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn is_blocking(self) -> bool {
        matches!(self, Self::Critical | Self::Error)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Critical => "critical",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        };
        f.write_str(name)
    }
}

/// A single detected conflict between mods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    pub conflict_type: ConflictType,
    pub severity: Severity,
    pub mods_involved: Vec<String>,
    pub description: String,
    pub suggestion: String,
    #[serde(default)]
    pub resolution: Option<String>,
}

/// One slot in the conflict detector's heuristic load order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadOrderEntry {
    pub mod_id: String,
    pub mod_name: String,
    /// 1-based position in the final ordering.
    pub position: usize,
    pub reason: String,
    /// Mod names the ordering reasoning references (load_before/load_after).
    #[serde(default)]
    pub dependencies: Vec<String>,
}
