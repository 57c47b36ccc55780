//! Client construction — transport negotiation and the client factory.
//!
//! Negotiation reconciles the transport bindings an agent card declares
//! against the kinds the caller supports, producing exactly one
//! (kind, URL) pair. The factory then invokes the matching transport
//! producer — built-in or caller-registered — and binds a [`Client`] to
//! the result.

use std::collections::HashMap;
use std::sync::Arc;

use crate::agent_card::{AgentCard, TransportProtocol};
use crate::card_resolver::A2ACardResolver;
use crate::client::{CallInterceptor, Client, ClientConfig, Consumer};
use crate::error::{A2AError, A2AResult};
use crate::extensions::HttpOptions;
use crate::transport::jsonrpc::JsonRpcTransport;
use crate::transport::rest::RestTransport;
use crate::transport::ClientTransport;

/// Builds a transport instance for a negotiated (kind, URL) pair.
pub type TransportProducer =
    Arc<dyn Fn(String, &AgentCard, &ClientConfig) -> A2AResult<Arc<dyn ClientTransport>> + Send + Sync>;

/// Select the transport kind and endpoint URL to use for an agent card.
///
/// The card's primary binding (`preferred_transport` at `url`) is considered
/// first, then each additional interface for a kind not already seen; that
/// declared order doubles as the server's preference order. With
/// `use_client_preference` set, the caller's `supported_transports` order
/// wins instead. Fails when no kind is mutually acceptable.
pub fn negotiate_transport(
    card: &AgentCard,
    config: &ClientConfig,
) -> A2AResult<(TransportProtocol, String)> {
    // Declared-order bindings, first occurrence per kind wins.
    let mut bindings: Vec<(TransportProtocol, &str)> =
        vec![(card.preferred_transport.clone(), card.url.as_str())];
    for interface in &card.additional_interfaces {
        if !bindings.iter().any(|(kind, _)| *kind == interface.transport) {
            bindings.push((interface.transport.clone(), interface.url.as_str()));
        }
    }

    let supported = &config.supported_transports;

    let selected = if config.use_client_preference {
        supported.iter().find_map(|kind| {
            bindings
                .iter()
                .find(|(bound, _)| bound == kind)
                .map(|(kind, url)| (kind.clone(), url.to_string()))
        })
    } else if supported.contains(&card.preferred_transport) {
        Some((card.preferred_transport.clone(), card.url.clone()))
    } else {
        bindings
            .iter()
            .find(|(kind, _)| supported.contains(kind))
            .map(|(kind, url)| (kind.clone(), url.to_string()))
    };

    selected.ok_or_else(|| A2AError::NoCompatibleTransport {
        attempted: bindings
            .iter()
            .map(|(kind, _)| kind.label().to_string())
            .collect(),
    })
}

/// Constructs [`Client`]s bound to negotiated transports.
pub struct ClientFactory {
    config: ClientConfig,
    registry: HashMap<TransportProtocol, TransportProducer>,
    consumers: Vec<Arc<dyn Consumer>>,
    interceptors: Vec<Arc<dyn CallInterceptor>>,
}

impl ClientFactory {
    /// Create a factory seeded with the built-in JSON-RPC and HTTP+JSON
    /// transport producers.
    pub fn new(config: ClientConfig) -> Self {
        let mut registry: HashMap<TransportProtocol, TransportProducer> = HashMap::new();

        registry.insert(
            TransportProtocol::JsonRpc,
            Arc::new(|url, card: &AgentCard, config: &ClientConfig| {
                let http = config.http_client.clone().unwrap_or_default();
                Ok(Arc::new(JsonRpcTransport::new(
                    http,
                    url,
                    Some(card.clone()),
                    config.extensions.clone(),
                )) as Arc<dyn ClientTransport>)
            }),
        );
        registry.insert(
            TransportProtocol::HttpJson,
            Arc::new(|url, card: &AgentCard, config: &ClientConfig| {
                let http = config.http_client.clone().unwrap_or_default();
                Ok(Arc::new(RestTransport::new(
                    http,
                    url,
                    Some(card.clone()),
                    config.extensions.clone(),
                )) as Arc<dyn ClientTransport>)
            }),
        );

        Self {
            config,
            registry,
            consumers: Vec::new(),
            interceptors: Vec::new(),
        }
    }

    /// Register a producer for a transport kind. Shadows any built-in
    /// producer registered under the same kind.
    pub fn register(&mut self, kind: TransportProtocol, producer: TransportProducer) {
        self.registry.insert(kind, producer);
    }

    /// Append a consumer. Consumers observe events in registration order.
    pub fn add_consumer(&mut self, consumer: Arc<dyn Consumer>) {
        self.consumers.push(consumer);
    }

    /// Append an interceptor. Interceptors run in registration order.
    pub fn add_interceptor(&mut self, interceptor: Arc<dyn CallInterceptor>) {
        self.interceptors.push(interceptor);
    }

    /// Negotiate a transport for `card` and bind a client to it.
    pub fn create(&self, card: AgentCard) -> A2AResult<Client> {
        let (kind, url) = negotiate_transport(&card, &self.config)?;
        tracing::debug!(transport = %kind, url = %url, "negotiated transport");

        let producer = self
            .registry
            .get(&kind)
            .ok_or_else(|| A2AError::NoCompatibleTransport {
                attempted: vec![kind.label().to_string()],
            })?;
        let transport = producer(url, &card, &self.config)?;

        Ok(Client::new(
            card,
            self.config.clone(),
            transport,
            self.consumers.clone(),
            self.interceptors.clone(),
        ))
    }
}

/// What [`connect`] starts from: a resolved agent card, or a URL to resolve
/// one from.
pub enum ConnectTarget {
    Card(AgentCard),
    Url(String),
}

impl From<AgentCard> for ConnectTarget {
    fn from(card: AgentCard) -> Self {
        ConnectTarget::Card(card)
    }
}

impl From<&str> for ConnectTarget {
    fn from(url: &str) -> Self {
        ConnectTarget::Url(url.to_string())
    }
}

impl From<String> for ConnectTarget {
    fn from(url: String) -> Self {
        ConnectTarget::Url(url)
    }
}

/// Everything [`connect`] forwards into resolution and construction.
#[derive(Default)]
pub struct ConnectOptions {
    /// Client configuration; defaults apply when absent.
    pub config: Option<ClientConfig>,

    /// Consumers, forwarded in order.
    pub consumers: Vec<Arc<dyn Consumer>>,

    /// Interceptors, forwarded in order.
    pub interceptors: Vec<Arc<dyn CallInterceptor>>,

    /// Extra transport producers; entries shadow built-ins of the same kind.
    pub extra_transports: Vec<(TransportProtocol, TransportProducer)>,

    /// Card path override for the resolver. Only honored when the
    /// configuration carries an HTTP client handle.
    pub relative_card_path: Option<String>,

    /// Extra HTTP options for the resolver. Only honored when the
    /// configuration carries an HTTP client handle.
    pub resolver_http_options: Option<HttpOptions>,
}

/// One-call construction: resolve the agent card if needed, negotiate a
/// transport, and bind a client.
///
/// When `target` is a URL and the configuration supplies an HTTP client
/// handle, the resolver is built from that handle and the resolver knobs in
/// `options` are forwarded to it. Without a handle the resolver is
/// default-constructed and those knobs are silently ignored.
pub async fn connect(
    target: impl Into<ConnectTarget>,
    options: ConnectOptions,
) -> A2AResult<Client> {
    let config = options.config.unwrap_or_default();

    let card = match target.into() {
        ConnectTarget::Card(card) => card,
        ConnectTarget::Url(url) => match config.http_client.clone() {
            Some(http) => {
                let resolver = A2ACardResolver::new(http, &url);
                resolver
                    .get_agent_card(
                        options.relative_card_path.as_deref(),
                        options.resolver_http_options.as_ref(),
                    )
                    .await?
            }
            None => {
                let resolver = A2ACardResolver::new(reqwest::Client::new(), &url);
                resolver.get_agent_card(None, None).await?
            }
        },
    };

    let mut factory = ClientFactory::new(config);
    for (kind, producer) in options.extra_transports {
        factory.register(kind, producer);
    }
    for consumer in options.consumers {
        factory.add_consumer(consumer);
    }
    for interceptor in options.interceptors {
        factory.add_interceptor(interceptor);
    }
    factory.create(card)
}
