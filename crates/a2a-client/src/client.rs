//! Client runtime — unified dispatch over a negotiated transport.
//!
//! [`Client`] owns one transport and exposes a single `send_message`
//! operation that yields a lazy event stream whether the remote agent
//! answers in one shot or via progressive updates. The blocking path is
//! simply a stream of length one.
//!
//! Configuration and the bound agent card are held behind shared handles and
//! re-read at the start of every call, so owners may reconfigure a live
//! client between calls. Concurrent calls that also concurrently mutate
//! those handles race; a client used across concurrent operations needs
//! external synchronization.

use std::pin::Pin;
use std::sync::{Arc, RwLock};
use std::task::{Context, Poll};

use async_trait::async_trait;
use futures::{Stream, StreamExt, TryStreamExt};
use pin_project_lite::pin_project;

use crate::agent_card::{AgentCard, TransportProtocol};
use crate::error::{A2AError, A2AResult};
use crate::message::Message;
use crate::task::{Task, TaskUpdate};
use crate::transport::jsonrpc::methods;
use crate::transport::{ClientTransport, MessageSendConfiguration, MessageSendParams};

/// One unit of result from a send: the task plus an optional incremental
/// update tied to it.
pub type ClientEvent = (Task, Option<TaskUpdate>);

/// Caller-side policy for a client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Whether streaming responses are desired.
    pub streaming: bool,

    /// Transport kinds the caller supports, most preferred first.
    pub supported_transports: Vec<TransportProtocol>,

    /// Whether the caller's transport order overrides the server's declared
    /// preference during negotiation.
    pub use_client_preference: bool,

    /// Extension URIs active by default on every request.
    pub extensions: Vec<String>,

    /// Output content types the caller accepts by default.
    pub accepted_output_modes: Vec<String>,

    /// Shared HTTP client handle. Never mutated by the runtime; shared
    /// read-only across any number of clients.
    pub http_client: Option<reqwest::Client>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            streaming: true,
            supported_transports: vec![TransportProtocol::JsonRpc],
            use_client_preference: false,
            extensions: Vec::new(),
            accepted_output_modes: Vec::new(),
            http_client: None,
        }
    }
}

/// Observes each event before it is handed to the caller.
///
/// Consumers run in registration order. A consumer error aborts iteration:
/// it surfaces as the stream's final item and no further events are yielded.
#[async_trait]
pub trait Consumer: Send + Sync {
    async fn consume(&self, event: &ClientEvent, card: &AgentCard) -> A2AResult<()>;
}

/// Mutates an outgoing request before it reaches the transport.
///
/// Interceptors run in registration order, after the request parameters are
/// built and before dispatch. There is no post-receive hook; response
/// inspection belongs in a [`Consumer`]. An interceptor error aborts the
/// call before anything is sent.
#[async_trait]
pub trait CallInterceptor: Send + Sync {
    async fn before_send(&self, method: &str, params: &mut MessageSendParams) -> A2AResult<()>;
}

pin_project! {
    /// The stream of events produced by [`Client::send_message`].
    pub struct ClientEventStream {
        #[pin]
        inner: Pin<Box<dyn Stream<Item = A2AResult<ClientEvent>> + Send>>,
    }
}

impl ClientEventStream {
    pub fn new(inner: Pin<Box<dyn Stream<Item = A2AResult<ClientEvent>> + Send>>) -> Self {
        Self { inner }
    }
}

impl Stream for ClientEventStream {
    type Item = A2AResult<ClientEvent>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.project().inner.poll_next(cx)
    }
}

/// A client bound to one remote agent over one negotiated transport.
pub struct Client {
    card: Arc<RwLock<AgentCard>>,
    config: Arc<RwLock<ClientConfig>>,
    transport: Arc<dyn ClientTransport>,
    consumers: Vec<Arc<dyn Consumer>>,
    interceptors: Vec<Arc<dyn CallInterceptor>>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("card", &self.card)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Read a shared handle, recovering the data if a writer panicked.
fn read_lock<T: Clone>(lock: &RwLock<T>) -> T {
    lock.read().unwrap_or_else(|e| e.into_inner()).clone()
}

impl Client {
    /// Bind a client to a transport. Normally called by the factory after
    /// negotiation.
    pub fn new(
        card: AgentCard,
        config: ClientConfig,
        transport: Arc<dyn ClientTransport>,
        consumers: Vec<Arc<dyn Consumer>>,
        interceptors: Vec<Arc<dyn CallInterceptor>>,
    ) -> Self {
        Self {
            card: Arc::new(RwLock::new(card)),
            config: Arc::new(RwLock::new(config)),
            transport,
            consumers,
            interceptors,
        }
    }

    /// The bound transport.
    pub fn transport(&self) -> &dyn ClientTransport {
        &*self.transport
    }

    /// Shared handle to the bound agent card. Mutations take effect on the
    /// next call.
    pub fn card_handle(&self) -> Arc<RwLock<AgentCard>> {
        Arc::clone(&self.card)
    }

    /// Shared handle to the client configuration. Mutations take effect on
    /// the next call.
    pub fn config_handle(&self) -> Arc<RwLock<ClientConfig>> {
        Arc::clone(&self.config)
    }

    /// The registered consumers, in the order they observe events.
    pub fn consumers(&self) -> &[Arc<dyn Consumer>] {
        &self.consumers
    }

    /// The registered interceptors, in invocation order.
    pub fn interceptors(&self) -> &[Arc<dyn CallInterceptor>] {
        &self.interceptors
    }

    /// Send a message to the remote agent, yielding one event per response
    /// unit.
    ///
    /// Streaming is used iff the configuration's streaming flag and the
    /// card's streaming capability are both set, decided fresh on every
    /// call. `configuration`, when supplied, replaces the runtime default
    /// verbatim. `request_metadata` is attached to the outgoing parameters
    /// unchanged.
    ///
    /// The returned stream is lazy: nothing is sent until it is polled, and
    /// events become available as they arrive. Dropping the stream cancels
    /// the exchange at the transport boundary. Any error — transport,
    /// interceptor, or consumer — is yielded as the final item.
    pub fn send_message(
        &self,
        message: Message,
        configuration: Option<MessageSendConfiguration>,
        request_metadata: Option<serde_json::Value>,
    ) -> ClientEventStream {
        // Path decision and defaults are snapshotted synchronously from the
        // current shared state.
        let config = read_lock(&self.config);
        let card_streaming = read_lock(&self.card).capabilities.streaming;
        let use_streaming = config.streaming && card_streaming;

        let configuration = configuration.unwrap_or(MessageSendConfiguration {
            accepted_output_modes: config.accepted_output_modes,
            ..Default::default()
        });
        let params = MessageSendParams {
            message,
            configuration: Some(configuration),
            metadata: request_metadata,
        };

        let transport = Arc::clone(&self.transport);
        let interceptors = self.interceptors.clone();
        let consumers = self.consumers.clone();
        let card = Arc::clone(&self.card);

        let outbound = async move {
            let mut params = params;
            let method = if use_streaming {
                methods::SEND_STREAMING_MESSAGE
            } else {
                methods::SEND_MESSAGE
            };
            for interceptor in &interceptors {
                interceptor.before_send(method, &mut params).await?;
            }

            let events: futures::stream::BoxStream<'static, A2AResult<ClientEvent>> =
                if use_streaming {
                    let stream = transport.send_message_streaming(params, None).await?;
                    stream.map_ok(|task| (task, None)).boxed()
                } else {
                    let task = transport.send_message(params).await?;
                    futures::stream::once(async move { Ok((task, None)) }).boxed()
                };
            Ok::<_, A2AError>(events)
        };

        let events = futures::stream::once(outbound)
            .try_flatten()
            .and_then(move |event| {
                let consumers = consumers.clone();
                let card = Arc::clone(&card);
                async move {
                    let card_snapshot = read_lock(&card);
                    for consumer in &consumers {
                        consumer.consume(&event, &card_snapshot).await?;
                    }
                    Ok(event)
                }
            })
            // Abort-and-propagate: the first error ends the stream.
            .scan(false, |errored, item| {
                if *errored {
                    return futures::future::ready(None);
                }
                *errored = item.is_err();
                futures::future::ready(Some(item))
            });

        ClientEventStream::new(Box::pin(events))
    }

    /// Convenience: send a single text message with default configuration.
    pub fn send_text(&self, text: impl Into<String>) -> ClientEventStream {
        self.send_message(Message::user_text(text), None, None)
    }

    /// Refresh the bound agent card from the transport.
    ///
    /// Routes to the authenticated extended endpoint when the current card
    /// advertises one, and replaces the bound card on success.
    pub async fn get_card(&self) -> A2AResult<AgentCard> {
        let card = self.transport.get_card(None).await?;
        *self.card.write().unwrap_or_else(|e| e.into_inner()) = card.clone();
        Ok(card)
    }
}
