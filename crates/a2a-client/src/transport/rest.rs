//! HTTP+JSON (REST-style) transport binding for A2A.
//!
//! Operations map to resource-style paths under the agent's base URL:
//! `/v1/message:send`, `/v1/message:stream` (SSE), and `/v1/card`.

use async_trait::async_trait;

use crate::agent_card::{AgentCard, AGENT_CARD_WELL_KNOWN_PATH};
use crate::error::{A2AError, A2AResult};
use crate::extensions::update_extension_header;
use crate::task::Task;
use crate::transport::sse::decode_task_stream;
use crate::transport::{ClientTransport, MessageSendParams, TaskStream};

/// HTTP+JSON transport.
pub struct RestTransport {
    /// Shared HTTP client, owned by the caller.
    http: reqwest::Client,

    /// Base endpoint URL this transport is bound to.
    url: String,

    /// The agent card this transport was negotiated against, when known.
    card: Option<AgentCard>,

    /// Default active extension URIs applied to every request.
    extensions: Vec<String>,
}

impl RestTransport {
    /// Create a transport bound to `url`.
    pub fn new(
        http: reqwest::Client,
        url: impl Into<String>,
        card: Option<AgentCard>,
        extensions: Vec<String>,
    ) -> Self {
        Self {
            http,
            url: url.into(),
            card,
            extensions,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.url.trim_end_matches('/'))
    }

    /// Attach extension headers to a request builder. No header is added
    /// when the active set is empty (absent means "none requested").
    fn apply_extensions(
        &self,
        mut builder: reqwest::RequestBuilder,
        overrides: Option<&[String]>,
    ) -> reqwest::RequestBuilder {
        let active = overrides.unwrap_or(&self.extensions);
        if active.is_empty() {
            return builder;
        }
        let options = update_extension_header(None, Some(active));
        if let Some(headers) = options.headers {
            for (name, value) in headers {
                builder = builder.header(name, value);
            }
        }
        builder
    }

    async fn check_status(response: reqwest::Response) -> A2AResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(A2AError::HttpStatus {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl ClientTransport for RestTransport {
    async fn send_message(&self, request: MessageSendParams) -> A2AResult<Task> {
        let endpoint = self.endpoint("/v1/message:send");
        tracing::debug!(url = %endpoint, "sending REST message");

        let builder = self.http.post(&endpoint).json(&request);
        let response = self.apply_extensions(builder, None).send().await?;
        let response = Self::check_status(response).await?;

        Ok(response.json().await?)
    }

    async fn send_message_streaming(
        &self,
        request: MessageSendParams,
        extensions: Option<&[String]>,
    ) -> A2AResult<TaskStream> {
        let endpoint = self.endpoint("/v1/message:stream");
        tracing::debug!(url = %endpoint, "opening REST SSE stream");

        let builder = self
            .http
            .post(&endpoint)
            .header("Accept", "text/event-stream")
            .json(&request);
        let response = self.apply_extensions(builder, extensions).send().await?;
        let response = Self::check_status(response).await?;

        Ok(decode_task_stream(response))
    }

    async fn get_card(&self, extensions: Option<&[String]>) -> A2AResult<AgentCard> {
        let extended = self
            .card
            .as_ref()
            .is_some_and(|c| c.supports_authenticated_extended_card);

        let card_url = if extended {
            self.endpoint("/v1/card")
        } else {
            self.endpoint(AGENT_CARD_WELL_KNOWN_PATH)
        };

        let builder = self.http.get(&card_url);
        let response = self.apply_extensions(builder, extensions).send().await?;

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
        Ok(card)
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn extensions(&self) -> &[String] {
        &self.extensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Message;
    use crate::task::TaskState;
    use wiremock::matchers::{header, headers, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn send_params(text: &str) -> MessageSendParams {
        MessageSendParams {
            message: Message::user_text(text),
            configuration: None,
            metadata: None,
        }
    }

    #[tokio::test]
    async fn test_send_message_with_default_extensions() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/message:send"))
            .and(headers(
                "X-A2A-Extensions",
                vec![
                    "https://example.com/test-ext/v1",
                    "https://example.com/test-ext/v2",
                ],
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "task-1",
                "status": {"state": "completed"},
            })))
            .expect(1)
            .mount(&server)
            .await;

        let transport = RestTransport::new(
            reqwest::Client::new(),
            server.uri(),
            None,
            vec![
                "https://example.com/test-ext/v1".into(),
                "https://example.com/test-ext/v2".into(),
            ],
        );

        let task = transport.send_message(send_params("Hello")).await.unwrap();
        assert_eq!(task.id, "task-1");
    }

    #[tokio::test]
    async fn test_send_message_streaming_with_new_extensions() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/message:stream"))
            .and(header("X-A2A-Extensions", "https://example.com/test-ext/v2"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                "data: {\"id\":\"task-1\",\"status\":{\"state\":\"completed\"}}\n\n",
                "text/event-stream",
            ))
            .expect(1)
            .mount(&server)
            .await;

        let transport = RestTransport::new(
            reqwest::Client::new(),
            server.uri(),
            None,
            vec!["https://example.com/test-ext/v1".into()],
        );

        let overrides = vec!["https://example.com/test-ext/v2".to_string()];
        let stream = transport
            .send_message_streaming(send_params("Hello stream"), Some(&overrides))
            .await
            .unwrap();

        use futures::StreamExt;
        let tasks: Vec<_> = stream.collect().await;
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].as_ref().unwrap().status.state, TaskState::Completed);
    }

    #[tokio::test]
    async fn test_get_card_routes_to_extended_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/card"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "Extended Agent",
                "description": "The richer card",
                "url": "http://test.com",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let known_card: AgentCard = serde_json::from_value(serde_json::json!({
            "name": "Test Agent",
            "description": "An agent for testing",
            "url": server.uri(),
            "supportsAuthenticatedExtendedCard": true,
        }))
        .unwrap();

        let transport =
            RestTransport::new(reqwest::Client::new(), server.uri(), Some(known_card), vec![]);
        let card = transport.get_card(None).await.unwrap();
        assert_eq!(card.name, "Extended Agent");
    }

    #[tokio::test]
    async fn test_get_card_falls_back_to_well_known() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/.well-known/agent-card.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "Test Agent",
                "description": "An agent for testing",
                "url": "http://test.com",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let transport = RestTransport::new(reqwest::Client::new(), server.uri(), None, vec![]);
        let card = transport.get_card(None).await.unwrap();
        assert_eq!(card.name, "Test Agent");
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not here"))
            .mount(&server)
            .await;

        let transport = RestTransport::new(reqwest::Client::new(), server.uri(), None, vec![]);
        let err = transport.send_message(send_params("Hello")).await.unwrap_err();
        assert!(matches!(err, A2AError::HttpStatus { status: 404, .. }));
    }
}
