//! Message — the communication unit exchanged with a remote agent.
//!
//! A Message carries one or more Parts (text, file, or structured data) and
//! a role indicating whether it came from the client or the remote agent.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A message exchanged with a remote agent.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique identifier for this message.
    pub message_id: String,

    /// Role of the sender.
    pub role: Role,

    /// Content parts of the message.
    pub parts: Vec<Part>,

    /// Task this message belongs to, when continuing an exchange.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,

    /// Context ID grouping related tasks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_id: Option<String>,

    /// Extension URIs this message activates.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<String>,

    /// Optional metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl Message {
    /// Create a message from the client side.
    pub fn user(parts: Vec<Part>) -> Self {
        Self {
            message_id: Uuid::new_v4().to_string(),
            role: Role::User,
            parts,
            task_id: None,
            context_id: None,
            extensions: Vec::new(),
            metadata: None,
        }
    }

    /// Create a message from the remote agent.
    pub fn agent(parts: Vec<Part>) -> Self {
        Self {
            role: Role::Agent,
            ..Self::user(parts)
        }
    }

    /// Convenience: create a user message with a single text part.
    pub fn user_text(text: impl Into<String>) -> Self {
        Self::user(vec![Part::text(text)])
    }

    /// Extract all text content from this message.
    pub fn text_content(&self) -> String {
        self.parts
            .iter()
            .filter_map(|p| match p {
                Part::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// The role of a message sender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The client side of the exchange.
    User,
    /// The remote agent.
    Agent,
}

/// A part of a message — one fully-formed piece of content.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum Part {
    /// Plain text content.
    #[serde(rename = "text")]
    Text {
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        metadata: Option<serde_json::Value>,
    },

    /// File content (inline or by reference).
    #[serde(rename = "file")]
    File { file: FileContent },

    /// Structured data.
    #[serde(rename = "data")]
    Data { data: serde_json::Value },
}

impl Part {
    /// Create a text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            metadata: None,
        }
    }

    /// Create a file part from inline bytes.
    pub fn file_bytes(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        use base64::Engine;
        Self::File {
            file: FileContent {
                name: Some(name.into()),
                mime_type: Some(mime_type.into()),
                bytes: Some(base64::engine::general_purpose::STANDARD.encode(data)),
                uri: None,
            },
        }
    }

    /// Create a file part from a URI reference.
    pub fn file_uri(uri: impl Into<String>, name: Option<String>) -> Self {
        Self::File {
            file: FileContent {
                name,
                mime_type: None,
                bytes: None,
                uri: Some(uri.into()),
            },
        }
    }

    /// Create a structured data part.
    pub fn data(value: serde_json::Value) -> Self {
        Self::Data { data: value }
    }
}

/// File content — either inline (base64) or by URI reference.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileContent {
    /// Optional filename.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// MIME type of the file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,

    /// Base64-encoded inline data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<String>,

    /// URI pointing at the file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}
