// ═══════════════════════════════════════════════════════════════════
// Error Tests — display formats and conversions
// ═══════════════════════════════════════════════════════════════════

use student_dashboard_core::errors::CoreError;

// ── Display formats ─────────────────────────────────────────────────

#[test]
fn unauthenticated_display() {
    let err = CoreError::Unauthenticated;
    assert_eq!(err.to_string(), "Not authenticated — sign in first");
}

#[test]
fn authentication_display() {
    let err = CoreError::Authentication("endpoint returned status 401".to_string());
    assert_eq!(
        err.to_string(),
        "Sign-in failed: endpoint returned status 401"
    );
}

#[test]
fn transport_display() {
    let err = CoreError::Transport("connection refused".to_string());
    assert_eq!(err.to_string(), "Transport error: connection refused");
}

#[test]
fn query_display() {
    let err = CoreError::Query("field not found".to_string());
    assert_eq!(err.to_string(), "Query failed: field not found");
}

#[test]
fn deserialization_display() {
    let err = CoreError::Deserialization("missing field `id`".to_string());
    assert_eq!(err.to_string(), "Deserialization error: missing field `id`");
}

// ── Conversions ─────────────────────────────────────────────────────

#[test]
fn serde_json_errors_become_deserialization_errors() {
    let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let err: CoreError = parse_err.into();

    assert!(matches!(err, CoreError::Deserialization(_)));
    assert!(err.to_string().starts_with("Deserialization error:"));
}

#[test]
fn errors_are_std_errors() {
    fn assert_error<E: std::error::Error>(_: &E) {}
    assert_error(&CoreError::Unauthenticated);
}
