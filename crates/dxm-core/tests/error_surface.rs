use dxm_core::{DxmError, ErrorInfo};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("index", "7")
        .with_context("len", "3")
}

#[test]
fn index_error_surface() {
    let err = DxmError::Index(sample_info("index-out-of-range", "position outside collection"));
    assert_eq!(err.info().code, "index-out-of-range");
    assert!(err.info().context.contains_key("index"));
}

#[test]
fn kind_error_surface() {
    let err = DxmError::Kind(
        ErrorInfo::new("kind-mismatch", "substitution kinds differ")
            .with_context("old", "beam")
            .with_context("new", "scan"),
    );
    assert_eq!(err.info().code, "kind-mismatch");
    assert_eq!(err.info().context.get("new").map(String::as_str), Some("scan"));
}

#[test]
fn serde_error_surface() {
    let err = DxmError::Serde(sample_info("unknown-component", "dangling token"));
    assert_eq!(err.info().code, "unknown-component");
}

#[test]
fn display_includes_context_and_hint() {
    let err = DxmError::Serde(
        ErrorInfo::new("file-read", "failed to read experiment list")
            .with_context("path", "/tmp/sweep.json")
            .with_hint("No such file or directory"),
    );
    let rendered = err.to_string();
    assert!(rendered.contains("file-read"));
    assert!(rendered.contains("path=/tmp/sweep.json"));
    assert!(rendered.contains("hint: No such file"));
}

#[test]
fn errors_round_trip_as_json() {
    let err = DxmError::Index(sample_info("index-out-of-range", "position outside collection"));
    let json = serde_json::to_string(&err).expect("serialize");
    let decoded: DxmError = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(decoded, err);
}
