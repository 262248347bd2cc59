use thiserror::Error;

/// Unified error type for the entire student-dashboard-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
///
/// An empty chart input is NOT an error — chart builders return
/// `Chart::Empty` for that case so the frontend can render a
/// placeholder panel instead.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Authentication ──────────────────────────────────────────────
    #[error("Not authenticated — sign in first")]
    Unauthenticated,

    #[error("Sign-in failed: {0}")]
    Authentication(String),

    // ── Network / Transport ─────────────────────────────────────────
    #[error("Transport error: {0}")]
    Transport(String),

    // ── GraphQL endpoint ────────────────────────────────────────────
    #[error("Query failed: {0}")]
    Query(String),

    // ── Row decoding ────────────────────────────────────────────────
    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Sanitize error message: strip query parameters from URLs so a
        // credential passed in a URL can never leak into an error string.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Transport(sanitized)
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}
