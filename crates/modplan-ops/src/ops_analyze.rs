//! Operation: full modpack analysis.
//!
//! Runs the dependency analyzer and the conflict detector independently,
//! merges their two load orders into one plan, and partitions the mod list
//! into convert/exclude sets based on blocking conflicts.

use std::collections::HashSet;

use modplan_conflict::detector::{ConflictDetectionResult, ConflictDetector};
use modplan_conflict::tables::DetectorTables;
use modplan_core::conflict::Conflict;
use modplan_core::record::ModRecord;
use modplan_resolver::analyzer::{self, DependencyAnalysisResult};
use serde::Serialize;
use tracing::debug;

/// Headline facts about the analyzed pack.
#[derive(Debug, Clone, Serialize)]
pub struct ModpackSummary {
    pub name: String,
    pub total_mods: usize,
    /// Distinct source labels, in first-seen order.
    pub sources: Vec<String>,
}

/// One entry of the merged recommended load order.
#[derive(Debug, Clone, Serialize)]
pub struct PlannedMod {
    pub id: String,
    pub name: String,
    pub version: Option<String>,
    pub reason: String,
}

/// The orchestrator's combined output.
#[derive(Debug, Serialize)]
pub struct ModpackAnalysisResult {
    pub summary: ModpackSummary,
    pub dependency_analysis: DependencyAnalysisResult,
    pub conflict_analysis: ConflictDetectionResult,
    pub recommended_load_order: Vec<PlannedMod>,
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
    pub mods_to_convert: Vec<ModRecord>,
    pub mods_to_exclude: Vec<ModRecord>,
}

/// Analyze a modpack with the built-in conflict tables.
pub fn analyze_modpack(name: &str, records: &[ModRecord]) -> ModpackAnalysisResult {
    analyze_modpack_with(name, records, DetectorTables::default())
}

/// Analyze a modpack with caller-supplied conflict tables.
pub fn analyze_modpack_with(
    name: &str,
    records: &[ModRecord],
    tables: DetectorTables,
) -> ModpackAnalysisResult {
    debug!(modpack = name, mods = records.len(), "modpack analysis started");
    let dependency_analysis = analyzer::analyze(records);
    let conflict_analysis = ConflictDetector::new(tables).detect(records);

    let recommended_load_order = merge_load_orders(&dependency_analysis, &conflict_analysis);
    let (mods_to_convert, mods_to_exclude) =
        partition_records(records, &conflict_analysis.conflicts);

    let warnings = dependency_analysis.warnings.clone();
    let recommendations = conflict_analysis.recommendations.clone();

    ModpackAnalysisResult {
        summary: ModpackSummary {
            name: name.to_string(),
            total_mods: records.len(),
            sources: distinct_sources(records),
        },
        dependency_analysis,
        conflict_analysis,
        recommended_load_order,
        warnings,
        recommendations,
        mods_to_convert,
        mods_to_exclude,
    }
}

/// Merge the two independently computed orders: the dependency order wins,
/// then conflict-order entries not yet seen follow with their own reasons.
fn merge_load_orders(
    dependency: &DependencyAnalysisResult,
    conflicts: &ConflictDetectionResult,
) -> Vec<PlannedMod> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut merged = Vec::new();

    for mod_id in &dependency.load_order {
        if !seen.insert(mod_id.clone()) {
            continue;
        }
        let info = dependency.graph.mod_info(mod_id);
        merged.push(PlannedMod {
            id: mod_id.clone(),
            name: info.map(|i| i.name.clone()).unwrap_or_default(),
            version: info.and_then(|i| i.version.clone()),
            reason: "Dependency requirement".to_string(),
        });
    }

    for entry in &conflicts.load_order {
        if !seen.insert(entry.mod_id.clone()) {
            continue;
        }
        merged.push(PlannedMod {
            id: entry.mod_id.clone(),
            name: entry.mod_name.clone(),
            version: dependency
                .graph
                .mod_info(&entry.mod_id)
                .and_then(|i| i.version.clone()),
            reason: entry.reason.clone(),
        });
    }

    merged
}

/// For every blocking conflict, every involved mod except the first is
/// excluded. Matching is by display name, case-insensitively, since the
/// detector reports lower-cased names.
fn partition_records(
    records: &[ModRecord],
    conflicts: &[Conflict],
) -> (Vec<ModRecord>, Vec<ModRecord>) {
    let mut excluded: HashSet<String> = HashSet::new();
    for conflict in conflicts.iter().filter(|c| c.severity.is_blocking()) {
        for name in conflict.mods_involved.iter().skip(1) {
            excluded.insert(name.to_lowercase());
        }
    }
    records
        .iter()
        .cloned()
        .partition(|record| !excluded.contains(&record.display_name().to_lowercase()))
}

fn distinct_sources(records: &[ModRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut sources = Vec::new();
    for record in records {
        let source = record.source_label();
        if seen.insert(source.clone()) {
            sources.push(source);
        }
    }
    sources
}
