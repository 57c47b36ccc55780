//! Transport layer — wire-level protocol bindings for A2A.
//!
//! Every transport, built-in or user-supplied, implements [`ClientTransport`]:
//! a single-response send, a streaming send, and card retrieval. The client
//! runtime dispatches through this trait and never touches the wire itself.
//!
//! Built-in bindings:
//! - JSON-RPC 2.0 over HTTP (primary)
//! - HTTP+JSON (REST-style)

pub mod jsonrpc;
pub mod rest;
pub mod sse;

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::agent_card::AgentCard;
use crate::error::A2AResult;
use crate::message::Message;
use crate::task::Task;

/// A lazily-consumed sequence of tasks produced by a streaming send.
pub type TaskStream = Pin<Box<dyn Stream<Item = A2AResult<Task>> + Send>>;

/// The contract every A2A wire transport satisfies.
///
/// Implementations must raise on non-success statuses and must not retry;
/// retry policy, when wanted, belongs to the transport's owner or an
/// interceptor, never to the dispatch layer above this trait.
#[async_trait]
pub trait ClientTransport: Send + Sync {
    /// Send a message and wait for the single resulting task.
    async fn send_message(&self, request: MessageSendParams) -> A2AResult<Task>;

    /// Send a message over a long-lived connection, yielding a task per
    /// progressive update.
    ///
    /// `extensions`, when given, replaces this transport's default active
    /// extension set for this call only.
    async fn send_message_streaming(
        &self,
        request: MessageSendParams,
        extensions: Option<&[String]>,
    ) -> A2AResult<TaskStream>;

    /// Fetch the remote agent card.
    ///
    /// When the currently-known card advertises an authenticated extended
    /// card, the protected endpoint is queried instead of the public one.
    async fn get_card(&self, extensions: Option<&[String]>) -> A2AResult<AgentCard>;

    /// The endpoint URL this transport is bound to.
    fn url(&self) -> &str;

    /// The default active extension URIs applied to every request.
    fn extensions(&self) -> &[String];
}

/// Parameters for a message send, on either path.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MessageSendParams {
    /// The message to deliver.
    pub message: Message,

    /// Send configuration for this call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration: Option<MessageSendConfiguration>,

    /// Request-level metadata, attached verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

/// Send configuration. When supplied at call time it replaces the runtime
/// default wholesale; fields are never merged with a prior default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MessageSendConfiguration {
    /// Output content types the caller accepts.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub accepted_output_modes: Vec<String>,

    /// How many prior messages of the exchange to include in responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_length: Option<u32>,

    /// Whether the server should hold the response until the task settles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocking: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_params_serialization() {
        let params = MessageSendParams {
            message: Message::user_text("Hello"),
            configuration: Some(MessageSendConfiguration {
                accepted_output_modes: vec!["application/json".into()],
                history_length: Some(2),
                blocking: Some(false),
            }),
            metadata: Some(serde_json::json!({"test": 1})),
        };

        let json = serde_json::to_string(&params).unwrap();
        assert!(json.contains(r#""historyLength":2"#));
        assert!(json.contains(r#""blocking":false"#));

        let parsed: MessageSendParams = serde_json::from_str(&json).unwrap();
        assert_eq!(
            parsed.configuration.unwrap().accepted_output_modes,
            vec!["application/json".to_string()]
        );
    }
}
