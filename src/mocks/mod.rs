//! Mock implementations for testing.
//!
//! A scripted HTTP transport, an event source whose connections replay
//! canned events, and a channel marker that records its calls.

use crate::errors::{SlackError, SlackResult};
use crate::rtm::{ChannelMarker, EventSource, UnifiedEvent};
use crate::transport::{check_envelope, FormRequest, HttpTransport, MultipartRequest};
use crate::types::{ChannelId, Timestamp};
use async_trait::async_trait;
use http::StatusCode;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::mpsc;

/// Canned HTTP reply
#[derive(Debug)]
pub struct MockResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: String,
    /// `Retry-After` seconds
    pub retry_after: Option<u64>,
    /// Transport failure returned instead of a reply
    pub error: Option<SlackError>,
}

impl MockResponse {
    /// A 200 reply with a JSON body
    pub fn json(body: serde_json::Value) -> Self {
        Self::ok(body.to_string())
    }

    /// A 200 reply with a raw body
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            retry_after: None,
            error: None,
        }
    }

    /// `{"ok":false,"error":code}`
    pub fn slack_error(code: &str) -> Self {
        Self::json(serde_json::json!({ "ok": false, "error": code }))
    }

    /// A reply with a non-success status
    pub fn status(status: u16) -> Self {
        Self {
            status,
            ..Self::ok("")
        }
    }

    /// A 429 reply
    pub fn rate_limited(retry_after: u64) -> Self {
        Self {
            retry_after: Some(retry_after),
            ..Self::status(429)
        }
    }

    /// A transport failure
    pub fn error(error: SlackError) -> Self {
        Self {
            error: Some(error),
            ..Self::ok("")
        }
    }
}

/// Recorded request for verification
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request URL
    pub url: String,
    /// API method, the last path segment of the URL
    pub method: String,
    /// Form fields, token included
    pub fields: Vec<(String, String)>,
    /// Uploaded file name, for multipart requests
    pub file_name: Option<String>,
}

impl RecordedRequest {
    /// Look up a form field
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Mock HTTP transport replaying queued responses through the real
/// envelope check
#[derive(Default)]
pub struct MockHttpTransport {
    responses: Mutex<VecDeque<MockResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockHttpTransport {
    /// Create a new mock transport
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response
    pub fn add_response(self, response: MockResponse) -> Self {
        self.responses.lock().push_back(response);
        self
    }

    /// Queue a JSON response
    pub fn add_json_response(self, body: serde_json::Value) -> Self {
        self.add_response(MockResponse::json(body))
    }

    /// Get recorded requests
    pub fn recorded_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    /// Get the last recorded request
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().last().cloned()
    }

    /// API methods called so far, in order
    pub fn methods(&self) -> Vec<String> {
        self.requests.lock().iter().map(|r| r.method.clone()).collect()
    }

    fn record(&self, url: &str, fields: &[(String, String)], file_name: Option<String>) {
        let method = url.rsplit('/').next().unwrap_or_default().to_string();
        self.requests.lock().push(RecordedRequest {
            url: url.to_string(),
            method,
            fields: fields.to_vec(),
            file_name,
        });
    }

    fn reply(&self) -> SlackResult<serde_json::Value> {
        let response = self
            .responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| MockResponse::json(serde_json::json!({ "ok": true })));
        if let Some(error) = response.error {
            return Err(error);
        }
        let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::OK);
        check_envelope(status, response.retry_after, &response.body)
    }
}

#[async_trait]
impl HttpTransport for MockHttpTransport {
    async fn send_form(&self, request: FormRequest) -> SlackResult<serde_json::Value> {
        self.record(&request.url, &request.fields, None);
        self.reply()
    }

    async fn send_multipart(&self, request: MultipartRequest) -> SlackResult<serde_json::Value> {
        self.record(&request.url, &request.fields, Some(request.file.file_name.clone()));
        self.reply()
    }
}

impl std::fmt::Debug for MockHttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockHttpTransport")
            .field("pending_responses", &self.responses.lock().len())
            .field("recorded_requests", &self.requests.lock().len())
            .finish()
    }
}

/// What one call to [`ScriptedSource::open`] yields
#[derive(Debug)]
pub enum Connection {
    /// Deliver these events, then end the stream
    Events(Vec<UnifiedEvent>),
    /// Deliver these events and keep the stream open
    Hold(Vec<UnifiedEvent>),
    /// Fail to connect
    Refuse,
}

/// Event source replaying one scripted connection per `open`. Once the
/// script runs out every connection is held open with no events.
#[derive(Default)]
pub struct ScriptedSource {
    script: Mutex<VecDeque<Connection>>,
    held: Mutex<Vec<mpsc::Sender<UnifiedEvent>>>,
    opens: AtomicUsize,
    closes: AtomicUsize,
}

impl ScriptedSource {
    /// Create a source from its connections, in order
    pub fn new(script: impl IntoIterator<Item = Connection>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Calls to `open`, failed ones included
    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    /// Calls to `close`
    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EventSource for ScriptedSource {
    async fn open(&self) -> SlackResult<mpsc::Receiver<UnifiedEvent>> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        let next = self
            .script
            .lock()
            .pop_front()
            .unwrap_or(Connection::Hold(Vec::new()));

        let (events, hold) = match next {
            Connection::Events(events) => (events, false),
            Connection::Hold(events) => (events, true),
            Connection::Refuse => {
                return Err(SlackError::Rtm(crate::errors::RtmError::ConnectionFailed {
                    message: "connection refused".to_string(),
                }))
            }
        };

        let (tx, rx) = mpsc::channel(events.len() + 1);
        for event in events {
            let _ = tx.try_send(event);
        }
        if hold {
            self.held.lock().push(tx);
        }
        Ok(rx)
    }

    async fn close(&self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
        self.held.lock().clear();
    }
}

/// Channel marker recording every call
#[derive(Debug, Default)]
pub struct RecordingMarker {
    calls: Mutex<Vec<(ChannelId, Timestamp)>>,
    failing: Mutex<Vec<ChannelId>>,
}

impl RecordingMarker {
    /// Create a marker that accepts every call
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject marks for `channel`
    pub fn fail_on(self, channel: &str) -> Self {
        self.failing.lock().push(ChannelId::new(channel));
        self
    }

    /// Calls made so far, in order
    pub fn calls(&self) -> Vec<(ChannelId, Timestamp)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl ChannelMarker for RecordingMarker {
    async fn mark(&self, channel: &ChannelId, ts: &Timestamp) -> SlackResult<()> {
        self.calls.lock().push((channel.clone(), ts.clone()));
        if self.failing.lock().contains(channel) {
            return Err(SlackError::from_slack_error("channel_not_found", None));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderMap;

    #[tokio::test]
    async fn test_mock_transport_records_and_checks_envelope() {
        let transport = MockHttpTransport::new()
            .add_json_response(serde_json::json!({ "ok": true, "user": "bob" }))
            .add_response(MockResponse::slack_error("invalid_auth"));

        let request = FormRequest::post("https://slack.com/api/auth.test", HeaderMap::new())
            .fields(vec![("token".to_string(), "xoxb-1".to_string())]);
        let value = transport.send_form(request).await.unwrap();
        assert_eq!(value["user"], "bob");

        let request = FormRequest::post("https://slack.com/api/auth.test", HeaderMap::new());
        let err = transport.send_form(request).await.unwrap_err();
        assert_eq!(err.api_code(), Some("invalid_auth"));

        let recorded = transport.recorded_requests();
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0].method, "auth.test");
        assert_eq!(recorded[0].field("token"), Some("xoxb-1"));
    }

    #[tokio::test]
    async fn test_scripted_source_ends_or_holds() {
        let source = ScriptedSource::new([
            Connection::Events(vec![UnifiedEvent::default()]),
            Connection::Refuse,
        ]);

        let mut rx = source.open().await.unwrap();
        assert!(rx.recv().await.is_some());
        assert!(rx.recv().await.is_none());

        assert!(source.open().await.is_err());

        let mut held = source.open().await.unwrap();
        assert!(held.try_recv().is_err());
        source.close().await;
        assert!(held.recv().await.is_none());
        assert_eq!(source.opens(), 3);
        assert_eq!(source.closes(), 1);
    }
}
