use crate::client::transport::{GraphqlTransport, QueryBody};
use crate::errors::CoreError;

/// Query client over the platform's single graph endpoint.
///
/// Holds the bearer token in one explicit slot — nothing in this
/// library reads ambient storage. A failed call propagates
/// immediately; callers are one-shot renders, so there are no retries.
pub struct GraphqlClient {
    transport: Box<dyn GraphqlTransport>,
    token: Option<String>,
}

impl GraphqlClient {
    pub fn new(transport: Box<dyn GraphqlTransport>) -> Self {
        Self {
            transport,
            token: None,
        }
    }

    /// Exchange basic credentials for a bearer token and hold it for
    /// all subsequent queries.
    pub async fn sign_in(&mut self, username: &str, password: &str) -> Result<(), CoreError> {
        let raw = self.transport.sign_in(username, password).await?;
        let token = normalize_token(&raw);
        if token.is_empty() {
            return Err(CoreError::Authentication(
                "response contained no token".into(),
            ));
        }
        self.token = Some(token.to_string());
        Ok(())
    }

    /// Drop the held token. Subsequent queries fail with `Unauthenticated`.
    pub fn sign_out(&mut self) {
        self.token = None;
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Execute one query against the graph endpoint and return its
    /// `data` object.
    ///
    /// - `Unauthenticated` when no token is held
    /// - `Transport` when the endpoint is unreachable or non-success
    /// - `Query` when the endpoint reports an error list (first
    ///   message is surfaced) or a well-formed response carries no data
    pub async fn execute(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<serde_json::Value, CoreError> {
        let token = self.token.as_deref().ok_or(CoreError::Unauthenticated)?;

        let body = QueryBody {
            query: query.to_string(),
            variables,
        };

        let envelope = self.transport.post_query(token, &body).await?;

        if let Some(errors) = envelope.errors {
            if let Some(first) = errors.first() {
                tracing::warn!(message = %first.message, "graph query reported errors");
                return Err(CoreError::Query(first.message.clone()));
            }
        }

        envelope
            .data
            .ok_or_else(|| CoreError::Query("response contained no data".into()))
    }
}

/// Strip whitespace and one layer of surrounding quotes from a sign-in
/// response body. The endpoint returns the token as a bare string,
/// sometimes JSON-quoted.
#[must_use]
pub fn normalize_token(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed)
}
