//! Protocol extension negotiation — the `X-A2A-Extensions` header codec.
//!
//! Extensions are optional protocol capabilities identified by URI. A caller
//! activates them per request by listing their URIs, comma-separated, in a
//! single HTTP header. This module encodes and decodes that header and
//! applies per-request overrides to a set of HTTP options.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::agent_card::{AgentCard, AgentExtension};

/// The HTTP header used to advertise/activate protocol extensions.
pub const HTTP_EXTENSION_HEADER: &str = "X-A2A-Extensions";

/// Per-request HTTP knobs threaded through transports and the card resolver.
#[derive(Debug, Clone, Default)]
pub struct HttpOptions {
    /// Extra headers to attach to the request.
    pub headers: Option<HashMap<String, String>>,
}

impl HttpOptions {
    /// Options carrying a single set of headers.
    pub fn with_headers(headers: HashMap<String, String>) -> Self {
        Self {
            headers: Some(headers),
        }
    }
}

/// Decode raw header lines into the set of requested extension URIs.
///
/// Each line may itself contain multiple comma-separated URIs; surrounding
/// whitespace is trimmed and empty pieces are dropped. Duplicates collapse.
pub fn get_requested_extensions<I, S>(values: I) -> HashSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .flat_map(|line| {
            line.as_ref()
                .split(',')
                .map(|piece| piece.trim().to_string())
                .collect::<Vec<_>>()
        })
        .filter(|piece| !piece.is_empty())
        .collect()
}

/// Encode a set of extension URIs as a single header value.
///
/// Deduplicated and emitted in lexicographic order so the value is stable.
pub fn encode_extension_header<I, S>(extensions: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    extensions
        .into_iter()
        .map(|e| e.as_ref().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect::<Vec<_>>()
        .join(", ")
}

/// Apply a per-request extension override to a set of HTTP options.
///
/// - `None`: no override requested; any existing header passes through
///   untouched, and none is added.
/// - `Some(&[])`: the header is set to an empty value, explicitly clearing
///   previously active extensions.
/// - `Some(non-empty)`: the header is replaced by the comma-joined set.
///   This is an override, not a union — any prior value is discarded.
///
/// All other headers are preserved. A headers map is created when absent.
pub fn update_extension_header(
    options: Option<HttpOptions>,
    extensions: Option<&[String]>,
) -> HttpOptions {
    let mut options = options.unwrap_or_default();
    let Some(extensions) = extensions else {
        return options;
    };

    let headers = options.headers.get_or_insert_with(HashMap::new);
    if extensions.is_empty() {
        headers.insert(HTTP_EXTENSION_HEADER.to_string(), String::new());
    } else {
        headers.insert(
            HTTP_EXTENSION_HEADER.to_string(),
            encode_extension_header(extensions),
        );
    }
    options
}

/// Find an extension declared on an agent card by its URI.
pub fn find_extension_by_uri<'a>(card: &'a AgentCard, uri: &str) -> Option<&'a AgentExtension> {
    card.capabilities
        .extensions
        .as_ref()?
        .iter()
        .find(|ext| ext.uri == uri)
}
