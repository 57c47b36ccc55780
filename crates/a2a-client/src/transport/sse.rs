//! SSE (Server-Sent Events) decoding for streaming transports.
//!
//! Both built-in transports stream progressive task updates as SSE over a
//! single long-lived HTTP response. This module turns such a response into
//! a lazy [`TaskStream`]; the connection closes when the stream is dropped.

use eventsource_stream::Eventsource;
use futures::StreamExt;

use crate::error::{A2AError, A2AResult};
use crate::task::Task;
use crate::transport::TaskStream;

/// Sentinel some servers emit to mark the end of a stream.
const DONE_MARKER: &str = "[DONE]";

/// Decode an SSE response body into a stream of tasks.
///
/// Empty data lines and the `[DONE]` sentinel are skipped; malformed events
/// surface as stream items so the consumer decides whether to continue.
pub fn decode_task_stream(response: reqwest::Response) -> TaskStream {
    let events = response.bytes_stream().eventsource().filter_map(|event| {
        let item = match event {
            Ok(event) => {
                if event.data.is_empty() || event.data == DONE_MARKER {
                    None
                } else {
                    Some(parse_task_event(&event.data))
                }
            }
            Err(e) => Some(Err(A2AError::StreamingError(format!(
                "stream read error: {e}"
            )))),
        };
        async move { item }
    });
    Box::pin(events)
}

/// Parse one SSE data payload into a task.
pub fn parse_task_event(data: &str) -> A2AResult<Task> {
    serde_json::from_str(data)
        .map_err(|e| A2AError::StreamingError(format!("failed to parse SSE event: {e}")))
}
