use async_trait::async_trait;
use base64::Engine as _;
use reqwest::Client;
use serde::{Deserialize, Serialize};
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;

/// Wire body of an outbound graph query.
#[derive(Debug, Clone, Serialize)]
pub struct QueryBody {
    pub query: String,
    pub variables: serde_json::Value,
}

/// One error entry of a GraphQL error list.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlError {
    pub message: String,
}

/// Wire envelope of a graph response: `{data}` or `{errors: [...]}`.
#[derive(Debug, Deserialize)]
pub struct GraphqlResponse {
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub errors: Option<Vec<GraphqlError>>,
}

/// Trait abstraction over the two platform endpoints (sign-in and the
/// graph endpoint). The client depends only on this seam, so tests run
/// against an in-memory transport and the HTTP implementation can be
/// swapped without touching the rest of the codebase.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait GraphqlTransport: Send + Sync {
    /// Exchange basic credentials for a bearer token.
    /// Returns the raw response body (a bare token string, possibly quoted).
    async fn sign_in(&self, username: &str, password: &str) -> Result<String, CoreError>;

    /// POST one query body with the given bearer token.
    async fn post_query(&self, token: &str, body: &QueryBody)
        -> Result<GraphqlResponse, CoreError>;
}

/// Reqwest-backed transport against the platform's HTTPS endpoints.
pub struct HttpTransport {
    client: Client,
    signin_url: String,
    graphql_url: String,
}

impl HttpTransport {
    pub fn new(signin_url: impl Into<String>, graphql_url: impl Into<String>) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            signin_url: signin_url.into(),
            graphql_url: graphql_url.into(),
        }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl GraphqlTransport for HttpTransport {
    async fn sign_in(&self, username: &str, password: &str) -> Result<String, CoreError> {
        let credentials =
            base64::engine::general_purpose::STANDARD.encode(format!("{username}:{password}"));

        tracing::debug!(url = %self.signin_url, user = %username, "signing in");

        let response = self
            .client
            .post(&self.signin_url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Basic {credentials}"))
            .body("{}")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, "sign-in rejected");
            return Err(CoreError::Authentication(format!(
                "endpoint returned status {status}"
            )));
        }

        Ok(response.text().await?)
    }

    async fn post_query(
        &self,
        token: &str,
        body: &QueryBody,
    ) -> Result<GraphqlResponse, CoreError> {
        tracing::debug!(url = %self.graphql_url, "executing graph query");

        let response = self
            .client
            .post(&self.graphql_url)
            .header("Authorization", format!("Bearer {token}"))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, "graph endpoint returned non-success status");
            return Err(CoreError::Transport(format!(
                "endpoint returned status {status}"
            )));
        }

        let envelope: GraphqlResponse = response.json().await.map_err(|e| {
            CoreError::Deserialization(format!("malformed graph response: {e}"))
        })?;

        Ok(envelope)
    }
}
