//! # a2a-client
//!
//! Client runtime for the Agent-to-Agent (A2A) protocol: given a remote
//! agent's self-described capabilities, it negotiates a compatible wire
//! transport, binds a client to it, and exposes one uniform send operation —
//! whether the agent answers in a single response or streams progressive
//! updates.
//!
//! ## Architecture
//!
//! Three cooperating pieces:
//!
//! 1. **Transport negotiation** — reconciles the agent card's declared
//!    bindings against the caller's supported transports, including
//!    caller-registered custom transports ([`factory`]).
//! 2. **Unified dispatch** — one lazy event stream regardless of whether
//!    the blocking or streaming transport path is taken, with consumer and
//!    interceptor extension points ([`client`]).
//! 3. **Extension negotiation** — the `X-A2A-Extensions` header codec for
//!    activating optional protocol extensions per request ([`extensions`]).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use a2a_client::{connect, ConnectOptions};
//! use futures::StreamExt;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = connect("https://agent.example.com", ConnectOptions::default()).await?;
//!
//!     let mut events = client.send_text("Summarize Q4 report");
//!     while let Some(event) = events.next().await {
//!         let (task, _update) = event?;
//!         println!("task {} is {:?}", task.id, task.status.state);
//!     }
//!     Ok(())
//! }
//! ```

pub mod agent_card;
pub mod card_resolver;
pub mod client;
pub mod error;
pub mod extensions;
pub mod factory;
pub mod message;
pub mod task;
pub mod transport;

// Re-export primary types
pub use agent_card::{
    AgentCapabilities, AgentCard, AgentExtension, AgentInterface, AgentSkill, TransportProtocol,
    AGENT_CARD_WELL_KNOWN_PATH,
};
pub use card_resolver::A2ACardResolver;
pub use client::{
    CallInterceptor, Client, ClientConfig, ClientEvent, ClientEventStream, Consumer,
};
pub use error::{A2AError, A2AResult};
pub use extensions::{
    find_extension_by_uri, get_requested_extensions, update_extension_header, HttpOptions,
    HTTP_EXTENSION_HEADER,
};
pub use factory::{connect, ClientFactory, ConnectOptions, ConnectTarget, TransportProducer};
pub use message::{FileContent, Message, Part, Role};
pub use task::{Task, TaskState, TaskStatus, TaskUpdate};
pub use transport::{ClientTransport, MessageSendConfiguration, MessageSendParams, TaskStream};
