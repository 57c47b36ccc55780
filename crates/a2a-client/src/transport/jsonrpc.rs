//! JSON-RPC 2.0 transport binding for A2A.
//!
//! The protocol's primary wire binding: operations are encoded as JSON-RPC
//! 2.0 requests over HTTP(S), with streaming responses delivered as SSE.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::agent_card::{AgentCard, AGENT_CARD_WELL_KNOWN_PATH};
use crate::error::{A2AError, A2AResult};
use crate::extensions::update_extension_header;
use crate::task::Task;
use crate::transport::sse::decode_task_stream;
use crate::transport::{ClientTransport, MessageSendParams, TaskStream};

use async_trait::async_trait;

/// JSON-RPC 2.0 protocol version.
pub const JSONRPC_VERSION: &str = "2.0";

/// Standard A2A JSON-RPC method names.
pub mod methods {
    /// Send a message to the agent (creates or continues a task).
    pub const SEND_MESSAGE: &str = "message/send";

    /// Send a streaming message (returns SSE stream).
    pub const SEND_STREAMING_MESSAGE: &str = "message/stream";

    /// Get the extended agent card (post-authentication).
    pub const GET_EXTENDED_AGENT_CARD: &str = "agent/getAuthenticatedExtendedCard";
}

// ── Transport ────────────────────────────────────────────────

/// JSON-RPC 2.0 over HTTP transport.
pub struct JsonRpcTransport {
    /// Shared HTTP client, owned by the caller.
    http: reqwest::Client,

    /// Endpoint URL this transport is bound to.
    url: String,

    /// The agent card this transport was negotiated against, when known.
    card: Option<AgentCard>,

    /// Default active extension URIs applied to every request.
    extensions: Vec<String>,
}

impl JsonRpcTransport {
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

    /// Resolve the active extension set for a call, honoring a per-call override.
    fn active_extensions<'a>(&'a self, overrides: Option<&'a [String]>) -> &'a [String] {
        overrides.unwrap_or(&self.extensions)
    }

    /// Attach extension headers to a request builder. No header is added
    /// when the active set is empty (absent means "none requested").
    fn apply_extensions(
        &self,
        mut builder: reqwest::RequestBuilder,
        overrides: Option<&[String]>,
    ) -> reqwest::RequestBuilder {
        let active = self.active_extensions(overrides);
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

    /// Send one JSON-RPC request and decode the result payload.
    async fn call(&self, request: JsonRpcRequest, overrides: Option<&[String]>) -> A2AResult<Value> {
        tracing::debug!(method = %request.method, url = %self.url, "sending JSON-RPC request");

        let builder = self.http.post(&self.url).json(&request);
        let response = self.apply_extensions(builder, overrides).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(A2AError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let rpc_response: JsonRpcResponse = response.json().await?;
        rpc_response.into_result().map_err(|e| A2AError::JsonRpc {
            code: e.code,
            message: e.message,
            data: e.data,
        })
    }
}

#[async_trait]
impl ClientTransport for JsonRpcTransport {
    async fn send_message(&self, request: MessageSendParams) -> A2AResult<Task> {
        let params = serde_json::to_value(&request)?;
        let result = self
            .call(JsonRpcRequest::new(methods::SEND_MESSAGE, Some(params)), None)
            .await?;
        Ok(serde_json::from_value(result)?)
    }

    async fn send_message_streaming(
        &self,
        request: MessageSendParams,
        extensions: Option<&[String]>,
    ) -> A2AResult<TaskStream> {
        let params = serde_json::to_value(&request)?;
        let rpc_request = JsonRpcRequest::new(methods::SEND_STREAMING_MESSAGE, Some(params));

        tracing::debug!(url = %self.url, "opening JSON-RPC SSE stream");

        let builder = self
            .http
            .post(&self.url)
            .header("Accept", "text/event-stream")
            .json(&rpc_request);
        let response = self.apply_extensions(builder, extensions).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(A2AError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        Ok(decode_task_stream(response))
    }

    async fn get_card(&self, extensions: Option<&[String]>) -> A2AResult<AgentCard> {
        let extended = self
            .card
            .as_ref()
            .is_some_and(|c| c.supports_authenticated_extended_card);

        if extended {
            let result = self
                .call(
                    JsonRpcRequest::new(methods::GET_EXTENDED_AGENT_CARD, None),
                    extensions,
                )
                .await?;
            return Ok(serde_json::from_value(result)?);
        }

        let card_url = format!(
            "{}{AGENT_CARD_WELL_KNOWN_PATH}",
            self.url.trim_end_matches('/')
        );
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

// ── Wire types ───────────────────────────────────────────────

/// A JSON-RPC 2.0 request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// Must be "2.0".
    pub jsonrpc: String,

    /// The method to invoke.
    pub method: String,

    /// Method parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,

    /// Request identifier (used to match response).
    pub id: RequestId,
}

impl JsonRpcRequest {
    /// Create a new JSON-RPC request with a generated id.
    pub fn new(method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.into(),
            method: method.into(),
            params,
            id: RequestId::String(uuid::Uuid::new_v4().to_string()),
        }
    }
}

/// A JSON-RPC 2.0 response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// Must be "2.0".
    pub jsonrpc: String,

    /// The result (mutually exclusive with error).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,

    /// The error (mutually exclusive with result).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,

    /// The request identifier this response corresponds to.
    pub id: RequestId,
}

impl JsonRpcResponse {
    /// Extract the result, returning the error if this is an error response.
    pub fn into_result(self) -> Result<Value, JsonRpcError> {
        if let Some(error) = self.error {
            Err(error)
        } else {
            Ok(self.result.unwrap_or(Value::Null))
        }
    }
}

/// A JSON-RPC 2.0 error object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    /// Error code.
    pub code: i64,

    /// Human-readable error message.
    pub message: String,

    /// Optional additional data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// JSON-RPC request identifier (a number or a string).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RequestId {
    Number(i64),
    String(String),
}
