//! Agent Card — the self-describing metadata document for agent discovery.
//!
//! Every A2A-compatible agent publishes an Agent Card at:
//!   `/.well-known/agent-card.json`
//!
//! The card names the agent, declares its capabilities and protocol
//! extensions, and lists the transport bindings at which it is reachable:
//! a primary binding (`preferred_transport` + `url`) plus any number of
//! additional interfaces.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{A2AError, A2AResult};

/// Well-known path at which agents publish their card.
pub const AGENT_CARD_WELL_KNOWN_PATH: &str = "/.well-known/agent-card.json";

/// An A2A Agent Card — metadata describing a remote agent.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AgentCard {
    /// Human-readable name of the agent.
    pub name: String,

    /// Description of what the agent does.
    pub description: String,

    /// Primary endpoint URL of the agent.
    pub url: String,

    /// Version of the agent. Opaque to the client runtime.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Version of the A2A protocol this agent speaks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol_version: Option<String>,

    /// Transport binding served at the primary `url`.
    #[serde(default)]
    pub preferred_transport: TransportProtocol,

    /// Further bindings at which this agent is reachable, in preference order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_interfaces: Vec<AgentInterface>,

    /// Capabilities declared by this agent.
    #[serde(default)]
    pub capabilities: AgentCapabilities,

    /// Whether an authenticated, richer card is served at a protected endpoint.
    #[serde(default)]
    pub supports_authenticated_extended_card: bool,

    /// Default input content types accepted.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub default_input_modes: Vec<String>,

    /// Default output content types produced.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub default_output_modes: Vec<String>,

    /// Skills (specific abilities) of this agent.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<AgentSkill>,
}

impl AgentCard {
    /// Validate the card has the fields the client runtime relies on.
    pub fn validate(&self) -> A2AResult<()> {
        if self.name.is_empty() {
            return Err(A2AError::InvalidAgentCard("name is required".into()));
        }
        if self.url.is_empty() {
            return Err(A2AError::InvalidAgentCard("url is required".into()));
        }
        Ok(())
    }

    /// Check if this agent supports streaming responses.
    pub fn supports_streaming(&self) -> bool {
        self.capabilities.streaming
    }
}

/// An additional transport binding: a (transport kind, URL) pair.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AgentInterface {
    /// The transport kind served at `url`.
    pub transport: TransportProtocol,

    /// The endpoint URL for this binding.
    pub url: String,
}

/// A transport kind identifier, as declared on agent cards.
///
/// The standard kinds carry their canonical wire labels; unknown labels
/// deserialize into [`TransportProtocol::Custom`] so that agents may declare
/// bindings this crate has no built-in producer for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum TransportProtocol {
    /// JSON-RPC 2.0 over HTTP(S).
    #[serde(rename = "JSONRPC")]
    JsonRpc,
    /// gRPC.
    #[serde(rename = "GRPC")]
    Grpc,
    /// HTTP + JSON (REST-style).
    #[serde(rename = "HTTP+JSON")]
    HttpJson,
    /// A custom binding identified by its label.
    #[serde(untagged)]
    Custom(String),
}

impl TransportProtocol {
    /// The wire label for this transport kind.
    pub fn label(&self) -> &str {
        match self {
            TransportProtocol::JsonRpc => "JSONRPC",
            TransportProtocol::Grpc => "GRPC",
            TransportProtocol::HttpJson => "HTTP+JSON",
            TransportProtocol::Custom(label) => label,
        }
    }
}

impl Default for TransportProtocol {
    fn default() -> Self {
        TransportProtocol::JsonRpc
    }
}

impl std::fmt::Display for TransportProtocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl From<&str> for TransportProtocol {
    fn from(label: &str) -> Self {
        match label {
            "JSONRPC" => TransportProtocol::JsonRpc,
            "GRPC" => TransportProtocol::Grpc,
            "HTTP+JSON" => TransportProtocol::HttpJson,
            other => TransportProtocol::Custom(other.to_string()),
        }
    }
}

/// Capabilities declared by the agent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AgentCapabilities {
    /// Whether the agent supports streaming (SSE) responses.
    #[serde(default)]
    pub streaming: bool,

    /// Whether the agent supports push notifications (webhooks).
    #[serde(default)]
    pub push_notifications: bool,

    /// Protocol extensions declared by the agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Vec<AgentExtension>>,
}

/// A protocol extension declared by the agent, identified by URI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AgentExtension {
    /// URI identifying this extension.
    pub uri: String,

    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether this extension is required for interaction.
    #[serde(default)]
    pub required: bool,

    /// Extension-specific parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
}

/// A specific skill/ability of the agent. Opaque to the client runtime.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AgentSkill {
    /// Unique identifier for this skill.
    pub id: String,

    /// Human-readable name.
    pub name: String,

    /// Description of what this skill does.
    pub description: String,

    /// Tags for categorization and search.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Example prompts that demonstrate this skill.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
}
