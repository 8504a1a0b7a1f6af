use std::fmt;

use serde::{Deserialize, Serialize};

/// The mod-loading runtime a mod targets.
///
/// Loader families (Forge/NeoForge vs Fabric/Quilt) are mutually
/// incompatible within one modpack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Loader {
    Forge,
    Fabric,
    Quilt,
    NeoForge,
    Rift,
    Unknown,
}

impl Default for Loader {
    fn default() -> Self {
        Self::Unknown
    }
}

impl Loader {
    pub fn is_forge_family(self) -> bool {
        matches!(self, Self::Forge | Self::NeoForge)
    }

    pub fn is_fabric_family(self) -> bool {
        matches!(self, Self::Fabric | Self::Quilt)
    }
}

impl fmt::Display for Loader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Forge => "forge",
            Self::Fabric => "fabric",
            Self::Quilt => "quilt",
            Self::NeoForge => "neoforge",
            Self::Rift => "rift",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// The conflict detector's normalized view of a mod.
///
/// `name` is stored lower-cased; all name matching in the detector is
/// case-insensitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModMetadata {
    pub mod_id: String,
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub loader: Loader,
    #[serde(default)]
    pub minecraft_version: Option<String>,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub provides: Vec<String>,
    #[serde(default)]
    pub conflicts_with: Vec<String>,
    #[serde(default)]
    pub load_before: Vec<String>,
    #[serde(default)]
    pub load_after: Vec<String>,
}
