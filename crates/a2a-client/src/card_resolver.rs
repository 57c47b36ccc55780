//! Agent card resolution — fetching a remote agent's self-description.
//!
//! Resolves an [`AgentCard`] from an agent's base URL, by default from the
//! well-known path `/.well-known/agent-card.json`.

use crate::agent_card::{AgentCard, AGENT_CARD_WELL_KNOWN_PATH};
use crate::error::{A2AError, A2AResult};
use crate::extensions::HttpOptions;

/// Resolves agent cards over HTTP.
#[derive(Debug, Clone)]
pub struct A2ACardResolver {
    /// Shared HTTP client, owned by the caller.
    http: reqwest::Client,

    /// Base URL of the agent.
    base_url: String,

    /// Path to the card relative to the base URL.
    agent_card_path: String,
}

impl A2ACardResolver {
    /// Create a resolver for an agent at `base_url`, using the well-known
    /// card path.
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            agent_card_path: AGENT_CARD_WELL_KNOWN_PATH.into(),
        }
    }

    /// Override the card path for agents that publish it elsewhere.
    pub fn with_card_path(mut self, path: impl Into<String>) -> Self {
        self.agent_card_path = path.into();
        self
    }

    /// Fetch and parse the agent card.
    ///
    /// `relative_card_path` overrides the resolver's configured path for this
    /// call; extra headers from `http_options` are attached to the request.
    pub async fn get_agent_card(
        &self,
        relative_card_path: Option<&str>,
        http_options: Option<&HttpOptions>,
    ) -> A2AResult<AgentCard> {
        let path = relative_card_path.unwrap_or(&self.agent_card_path);
        let url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );

        tracing::info!(url = %url, "resolving agent card");

        let mut builder = self.http.get(&url);
        if let Some(headers) = http_options.and_then(|o| o.headers.as_ref()) {
            for (name, value) in headers {
                builder = builder.header(name, value);
            }
        }

        let response = builder
            .send()
            .await
            .map_err(|e| A2AError::DiscoveryFailed(format!("failed to fetch agent card: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(A2AError::DiscoveryFailed(format!(
                "agent card endpoint returned {status}"
            )));
        }

        let card: AgentCard = response
            .json()
            .await
            .map_err(|e| A2AError::InvalidAgentCard(format!("failed to parse agent card: {e}")))?;
        card.validate()?;

        tracing::info!(name = %card.name, "resolved agent card");

        Ok(card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn card_body() -> serde_json::Value {
        serde_json::json!({
            "name": "Test Agent",
            "description": "An agent for testing",
            "url": "http://primary-url.com",
            "version": "1.0.0",
        })
    }

    #[tokio::test]
    async fn test_resolves_from_well_known_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/.well-known/agent-card.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(card_body()))
            .expect(1)
            .mount(&server)
            .await;

        let resolver = A2ACardResolver::new(reqwest::Client::new(), server.uri());
        let card = resolver.get_agent_card(None, None).await.unwrap();
        assert_eq!(card.name, "Test Agent");
    }

    #[tokio::test]
    async fn test_relative_path_override_and_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/card"))
            .and(header("X-Test", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(card_body()))
            .expect(1)
            .mount(&server)
            .await;

        let resolver = A2ACardResolver::new(reqwest::Client::new(), server.uri());
        let mut headers = HashMap::new();
        headers.insert("X-Test".to_string(), "true".to_string());
        let options = HttpOptions::with_headers(headers);

        let card = resolver
            .get_agent_card(Some("/card"), Some(&options))
            .await
            .unwrap();
        assert_eq!(card.url, "http://primary-url.com");
    }

    #[tokio::test]
    async fn test_configured_card_path_replaces_well_known() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/internal/agent.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(card_body()))
            .expect(1)
            .mount(&server)
            .await;

        let resolver = A2ACardResolver::new(reqwest::Client::new(), server.uri())
            .with_card_path("/internal/agent.json");
        let card = resolver.get_agent_card(None, None).await.unwrap();
        assert_eq!(card.name, "Test Agent");
    }

    #[tokio::test]
    async fn test_error_status_is_discovery_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let resolver = A2ACardResolver::new(reqwest::Client::new(), server.uri());
        let err = resolver.get_agent_card(None, None).await.unwrap_err();
        assert!(matches!(err, A2AError::DiscoveryFailed(_)));
    }

    #[tokio::test]
    async fn test_malformed_card_is_invalid() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "unexpected": true,
            })))
            .mount(&server)
            .await;

        let resolver = A2ACardResolver::new(reqwest::Client::new(), server.uri());
        let err = resolver.get_agent_card(None, None).await.unwrap_err();
        assert!(matches!(err, A2AError::InvalidAgentCard(_)));
    }
}
