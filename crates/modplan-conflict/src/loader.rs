//! Loader classification for raw mod records.

use modplan_core::loader::{Loader, ModMetadata};
use modplan_core::record::ModRecord;

use crate::tables::DetectorTables;

/// Classify which loader a record targets.
///
/// Priority: an explicit `loader` field wins, substring-matched in the
/// order fabric, quilt, neoforge, forge, rift — `neoforge` must be tested
/// before `forge` because the latter is a substring of the former. Failing
/// that, the record's name/id is checked against the curated
/// loader-specific mod lists, then the `tags` list ("fabric" without
/// "forge" means Fabric, "quilt" means Quilt).
pub fn classify(record: &ModRecord, tables: &DetectorTables) -> Loader {
    if let Some(ref field) = record.loader {
        let field = field.to_lowercase();
        if field.contains("fabric") {
            return Loader::Fabric;
        }
        if field.contains("quilt") {
            return Loader::Quilt;
        }
        if field.contains("neoforge") {
            return Loader::NeoForge;
        }
        if field.contains("forge") {
            return Loader::Forge;
        }
        if field.contains("rift") {
            return Loader::Rift;
        }
    }

    let name = record.display_name().to_lowercase();
    let id = record.key().to_lowercase();
    let matches = |known: &str| name.contains(known) || id.contains(known);
    if tables.fabric_mods.iter().any(|known| matches(known)) {
        return Loader::Fabric;
    }
    if tables.quilt_mods.iter().any(|known| matches(known)) {
        return Loader::Quilt;
    }

    let tags: Vec<String> = record.tags.iter().map(|tag| tag.to_lowercase()).collect();
    if tags.iter().any(|tag| tag == "fabric") && !tags.iter().any(|tag| tag == "forge") {
        return Loader::Fabric;
    }
    if tags.iter().any(|tag| tag == "quilt") {
        return Loader::Quilt;
    }

    Loader::Unknown
}

/// Build the detector's normalized view of each record. Names are
/// lower-cased here; every downstream match in the detector relies on that.
pub fn metadata_from_records(records: &[ModRecord], tables: &DetectorTables) -> Vec<ModMetadata> {
    records
        .iter()
        .map(|record| ModMetadata {
            mod_id: record.key(),
            name: record.display_name().to_lowercase(),
            version: record.version.clone(),
            loader: classify(record, tables),
            minecraft_version: record.minecraft_version.clone(),
            source: record.source_label(),
            provides: record.provides.clone(),
            conflicts_with: record.conflicts_with.clone(),
            load_before: record.load_before.clone(),
            load_after: record.load_after.clone(),
        })
        .collect()
}
