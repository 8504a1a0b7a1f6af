//! Raw mod records as they arrive from the manifest layer.
//!
//! Two shapes are accepted: the generic form (`id`/`modId`, dependencies as
//! objects or bare ids) and the CurseForge form (`projectID`/`fileID`,
//! dependencies keyed by `projectID`). Missing fields default rather than
//! fail; an absent id becomes the empty string, which downstream analysis
//! reports as a data-quality warning.

use std::collections::BTreeMap;
use std::fmt;

use modplan_util::errors::ModplanError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::mods::{DependencyType, ModDependency, ModInfo};

/// A record identifier that may arrive as a string or a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Text(String),
    Number(i64),
}

impl RecordId {
    pub fn as_string(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => n.to_string(),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

/// A dependency entry on a raw record: either a bare id or an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordDependency {
    Bare(RecordId),
    Detailed(DetailedRecordDependency),
}

/// A dependency object with explicit fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailedRecordDependency {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default, alias = "modId")]
    pub mod_id: Option<RecordId>,
    #[serde(default, alias = "projectID")]
    pub project_id: Option<RecordId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "versionRange")]
    pub version_range: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

impl DetailedRecordDependency {
    /// Dependency key: `id`, then `modId`, then `projectID`, stringified.
    pub fn key(&self) -> String {
        self.id
            .as_ref()
            .or(self.mod_id.as_ref())
            .or(self.project_id.as_ref())
            .map(RecordId::as_string)
            .unwrap_or_default()
    }
}

impl RecordDependency {
    /// Normalize into a `ModDependency`, inheriting `default_source` when the
    /// entry does not name its own source.
    pub fn to_mod_dependency(&self, default_source: &str) -> ModDependency {
        match self {
            Self::Bare(id) => ModDependency {
                mod_id: id.as_string(),
                mod_name: id.as_string(),
                version_range: None,
                dependency_type: DependencyType::default(),
                source: default_source.to_string(),
            },
            Self::Detailed(dep) => {
                let mod_id = dep.key();
                ModDependency {
                    mod_name: dep.name.clone().unwrap_or_else(|| mod_id.clone()),
                    mod_id,
                    version_range: dep.version_range.clone().or_else(|| dep.version.clone()),
                    dependency_type: dep
                        .kind
                        .as_deref()
                        .map(DependencyType::parse)
                        .unwrap_or_default(),
                    source: dep
                        .source
                        .clone()
                        .unwrap_or_else(|| default_source.to_string()),
                }
            }
        }
    }
}

/// A raw mod record. Every optional field has a documented default; nothing
/// here ever fails on a missing field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModRecord {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default, alias = "modId")]
    pub mod_id: Option<RecordId>,
    #[serde(default, alias = "projectID")]
    pub project_id: Option<RecordId>,
    #[serde(default, alias = "fileID")]
    pub file_id: Option<RecordId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub loader: Option<String>,
    #[serde(default, alias = "minecraftVersion")]
    pub minecraft_version: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub provides: Vec<String>,
    #[serde(default, alias = "conflictsWith")]
    pub conflicts_with: Vec<String>,
    #[serde(default, alias = "loadBefore")]
    pub load_before: Vec<String>,
    #[serde(default, alias = "loadAfter")]
    pub load_after: Vec<String>,
    #[serde(default)]
    pub dependencies: Vec<RecordDependency>,
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
}

impl ModRecord {
    /// Node key: `id`, then `modId`, then `projectID`, stringified.
    ///
    /// Returns the empty string when none is present.
    pub fn key(&self) -> String {
        self.id
            .as_ref()
            .or(self.mod_id.as_ref())
            .or(self.project_id.as_ref())
            .map(RecordId::as_string)
            .unwrap_or_default()
    }

    /// Display name; empty when the record carries none.
    pub fn display_name(&self) -> String {
        self.name.clone().unwrap_or_default()
    }

    /// Source label: explicit `source`, else `curseforge` for
    /// `projectID`-shaped records, else `unknown`.
    pub fn source_label(&self) -> String {
        if let Some(ref source) = self.source {
            return source.clone();
        }
        if self.project_id.is_some() {
            "curseforge".to_string()
        } else {
            "unknown".to_string()
        }
    }

    /// Normalize into the analyzer's `ModInfo` view.
    pub fn to_mod_info(&self) -> ModInfo {
        let source = self.source_label();
        ModInfo {
            mod_id: self.key(),
            name: self.display_name(),
            version: self.version.clone(),
            file_id: self.file_id.as_ref().map(RecordId::as_string),
            dependencies: self
                .dependencies
                .iter()
                .map(|dep| dep.to_mod_dependency(&source))
                .collect(),
            source,
            metadata: self.metadata.clone(),
        }
    }
}

/// Extract a record list from a manifest-shaped JSON value.
///
/// Accepts a bare array, a CurseForge-style `files` array, or a generic
/// `mods` array.
pub fn records_from_value(value: &Value) -> Result<Vec<ModRecord>, ModplanError> {
    let list = if let Some(arr) = value.as_array() {
        arr
    } else if let Some(arr) = value.get("files").and_then(Value::as_array) {
        arr
    } else if let Some(arr) = value.get("mods").and_then(Value::as_array) {
        arr
    } else {
        return Err(ModplanError::Manifest {
            message: "expected a mod list, a `files` array, or a `mods` array".to_string(),
        });
    };

    list.iter()
        .map(|entry| {
            serde_json::from_value(entry.clone()).map_err(|err| ModplanError::Manifest {
                message: format!("invalid mod record: {err}"),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn key_priority() {
        let record: ModRecord = serde_json::from_value(json!({
            "id": "alpha", "modId": "beta", "projectID": 42
        }))
        .unwrap();
        assert_eq!(record.key(), "alpha");

        let record: ModRecord =
            serde_json::from_value(json!({ "modId": "beta", "projectID": 42 })).unwrap();
        assert_eq!(record.key(), "beta");

        let record: ModRecord = serde_json::from_value(json!({ "projectID": 42 })).unwrap();
        assert_eq!(record.key(), "42");

        let record: ModRecord = serde_json::from_value(json!({ "name": "Nameless" })).unwrap();
        assert_eq!(record.key(), "");
    }

    #[test]
    fn curseforge_shape() {
        let record: ModRecord = serde_json::from_value(json!({
            "projectID": 238222,
            "fileID": 4712866,
            "name": "JEI",
            "dependencies": [{ "projectID": 250398, "type": "required" }]
        }))
        .unwrap();
        let info = record.to_mod_info();
        assert_eq!(info.mod_id, "238222");
        assert_eq!(info.file_id.as_deref(), Some("4712866"));
        assert_eq!(info.source, "curseforge");
        assert_eq!(info.dependencies.len(), 1);
        assert_eq!(info.dependencies[0].mod_id, "250398");
        assert_eq!(
            info.dependencies[0].dependency_type,
            DependencyType::Required
        );
    }

    #[test]
    fn bare_dependency_ids() {
        let record: ModRecord = serde_json::from_value(json!({
            "id": "waystones",
            "dependencies": ["balm", 12345]
        }))
        .unwrap();
        let info = record.to_mod_info();
        assert_eq!(info.dependencies[0].mod_id, "balm");
        assert_eq!(info.dependencies[1].mod_id, "12345");
        assert_eq!(
            info.dependencies[0].dependency_type,
            DependencyType::Required
        );
    }

    #[test]
    fn unrecognized_dependency_type_defaults_to_required() {
        let record: ModRecord = serde_json::from_value(json!({
            "id": "a",
            "dependencies": [
                { "id": "b", "type": "suggested" },
                { "id": "c", "type": "optional" },
                { "id": "d" }
            ]
        }))
        .unwrap();
        let info = record.to_mod_info();
        assert_eq!(
            info.dependencies[0].dependency_type,
            DependencyType::Required
        );
        assert_eq!(
            info.dependencies[1].dependency_type,
            DependencyType::Optional
        );
        assert_eq!(
            info.dependencies[2].dependency_type,
            DependencyType::Required
        );
    }

    #[test]
    fn dependency_name_falls_back_to_id() {
        let record: ModRecord = serde_json::from_value(json!({
            "id": "a",
            "dependencies": [{ "id": "b" }, { "id": "c", "name": "Cloth Config" }]
        }))
        .unwrap();
        let info = record.to_mod_info();
        assert_eq!(info.dependencies[0].mod_name, "b");
        assert_eq!(info.dependencies[1].mod_name, "Cloth Config");
    }

    #[test]
    fn records_from_manifest_shapes() {
        let bare = json!([{ "id": "a" }, { "id": "b" }]);
        assert_eq!(records_from_value(&bare).unwrap().len(), 2);

        let curseforge = json!({ "files": [{ "projectID": 1 }] });
        assert_eq!(records_from_value(&curseforge).unwrap().len(), 1);

        let generic = json!({ "mods": [{ "id": "a" }] });
        assert_eq!(records_from_value(&generic).unwrap().len(), 1);

        assert!(records_from_value(&json!({ "minecraft": {} })).is_err());
        assert!(records_from_value(&json!(["not-an-object"])).is_err());
    }
}
