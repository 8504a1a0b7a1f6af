//! Injected lookup tables for conflict detection.

use serde::{Deserialize, Serialize};

/// Read-only configuration data for the conflict detector.
///
/// Injected at construction rather than held as global state so tests can
/// substitute alternate tables. Nothing here is mutated at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorTables {
    /// Known mutually incompatible mod families: a lower-cased name
    /// substring mapped to the substrings it cannot coexist with. Entries
    /// are directional; listing both directions produces duplicate pair
    /// reports.
    pub incompatible: Vec<(String, Vec<String>)>,
    /// Lower-cased names of mods that only ship for Fabric.
    pub fabric_mods: Vec<String>,
    /// Lower-cased names of mods that only ship for Quilt.
    pub quilt_mods: Vec<String>,
}

impl Default for DetectorTables {
    fn default() -> Self {
        Self {
            incompatible: vec![
                entry("jei", &["rei", "emi", "roughlyenoughitems"]),
                entry("optifine", &["sodium", "rubidium", "embeddium"]),
                entry("ic2", &["thermalexpansion", "immersiveengineering"]),
                entry("refinedstorage", &["ae2", "storagevault"]),
            ],
            fabric_mods: strings(&[
                "fabric api",
                "fabric-api",
                "fabricapi",
                "sodium",
                "lithium",
                "phosphor",
                "iris",
                "modmenu",
                "mod menu",
            ]),
            quilt_mods: strings(&[
                "quilt standard libraries",
                "quilted fabric api",
                "qsl",
                "ok zoomer",
            ]),
        }
    }
}

fn entry(key: &str, rivals: &[&str]) -> (String, Vec<String>) {
    (key.to_string(), strings(rivals))
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
