//! Stable JSON report flattening.
//!
//! The key set emitted here (`success`, `total_mods`, `load_order`,
//! `warnings`, `circular_dependencies`, `version_conflicts`,
//! `missing_dependencies`, `conflicts`, `recommendations`) is a
//! compatibility contract with downstream consumers; do not rename or
//! remove keys.

use serde_json::{json, Value};

use crate::ops_analyze::ModpackAnalysisResult;

/// Flatten an analysis result into the report shape downstream consumers
/// expect.
pub fn generate_report(result: &ModpackAnalysisResult) -> Value {
    json!({
        "success": result.dependency_analysis.success,
        "total_mods": result.summary.total_mods,
        "load_order": result
            .recommended_load_order
            .iter()
            .map(|entry| json!({
                "id": entry.id,
                "name": entry.name,
                "version": entry.version,
                "reason": entry.reason,
            }))
            .collect::<Vec<_>>(),
        "warnings": result.warnings,
        "circular_dependencies": result.dependency_analysis.circular_dependencies,
        "version_conflicts": result.dependency_analysis.version_conflicts,
        "missing_dependencies": result.dependency_analysis.missing_dependencies,
        "conflicts": result
            .conflict_analysis
            .conflicts
            .iter()
            .map(|conflict| json!({
                "type": conflict.conflict_type.to_string(),
                "severity": conflict.severity.to_string(),
                "mods": conflict.mods_involved,
                "description": conflict.description,
                "suggestion": conflict.suggestion,
            }))
            .collect::<Vec<_>>(),
        "recommendations": result.recommendations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops_analyze;
    use modplan_core::record::ModRecord;
    use serde_json::json;

    #[test]
    fn report_carries_the_contract_keys() {
        let records: Vec<ModRecord> = serde_json::from_value(json!([
            { "id": "a", "name": "Alpha", "dependencies": ["b"] },
            { "id": "b", "name": "Beta" }
        ]))
        .unwrap();
        let result = ops_analyze::analyze_modpack("pack", &records);
        let report = generate_report(&result);

        for key in [
            "success",
            "total_mods",
            "load_order",
            "warnings",
            "circular_dependencies",
            "version_conflicts",
            "missing_dependencies",
            "conflicts",
            "recommendations",
        ] {
            assert!(report.get(key).is_some(), "missing report key: {key}");
        }
        assert_eq!(report["success"], json!(true));
        assert_eq!(report["total_mods"], json!(2));
        assert_eq!(report["load_order"][0]["id"], json!("b"));
    }
}
