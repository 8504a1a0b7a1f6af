use modplan_util::errors::ModplanError;

#[test]
fn test_manifest_error_display() {
    let err = ModplanError::Manifest {
        message: "not a mod list".to_string(),
    };
    assert_eq!(err.to_string(), "Manifest error: not a mod list");
}

#[test]
fn test_analysis_error_display() {
    let err = ModplanError::Analysis {
        message: "graph build failed".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Dependency analysis failed: graph build failed"
    );
}

#[test]
fn test_conflict_error_display() {
    let err = ModplanError::Conflict {
        message: "no metadata".to_string(),
    };
    assert_eq!(err.to_string(), "Conflict detection failed: no metadata");
}

#[test]
fn test_generic_error_display() {
    let err = ModplanError::Generic {
        message: "something else".to_string(),
    };
    assert_eq!(err.to_string(), "something else");
}
