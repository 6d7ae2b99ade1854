//! RTM transport session.
//!
//! One WebSocket connection at a time. The write half and the outbound
//! sequence counter live together behind one async lock; a reader task
//! decodes inbound frames onto an ordered channel.

use super::context::TeamContext;
use super::decoder::decode;
use super::event::{EventContext, UnifiedEvent};
use super::supervisor::EventSource;
use super::types::{OutboundMessage, RtmStartResponse};
use crate::client::{ApiInvoker, Params};
use crate::config::RtmConfig;
use crate::errors::{ResponseError, RtmError, SlackError, SlackResult};
use crate::observability::{frame_excerpt, redact_url, RtmMetrics};
use crate::types::ChannelId;
use async_trait::async_trait;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::{mpsc, Mutex};
use tokio::time::{interval_at, Instant};
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, Message>;
type WsSource = SplitStream<WsStream>;

/// Write half of the open connection and the last sequence id used on it
#[derive(Default)]
struct Outbound {
    sink: Option<WsSink>,
    next_id: u64,
    cancel: Option<CancellationToken>,
}

/// An RTM session. Outlives any number of connections.
pub struct RtmSession {
    invoker: Arc<ApiInvoker>,
    config: RtmConfig,
    outbound: Arc<Mutex<Outbound>>,
    context: Option<EventContext>,
    team: TeamContext,
}

impl RtmSession {
    /// Create a session; nothing is connected until [`start`](Self::start)
    pub fn new(invoker: Arc<ApiInvoker>, config: RtmConfig) -> Self {
        Self {
            invoker,
            config,
            outbound: Arc::new(Mutex::new(Outbound::default())),
            context: None,
            team: TeamContext::new(),
        }
    }

    /// Attach a caller value to every event of this session
    pub fn with_context(mut self, context: Option<EventContext>) -> Self {
        self.context = context;
        self
    }

    /// Team roster, refreshed on every start
    pub fn team(&self) -> &TeamContext {
        &self.team
    }

    /// Whether a connection is open
    pub async fn is_open(&self) -> bool {
        self.outbound.lock().await.sink.is_some()
    }

    /// Call `rtm.start`, dial the returned URL and start reading.
    ///
    /// Any connection still open is closed first. The receiver yields
    /// events until the connection ends or [`stop`](Self::stop) is called.
    #[instrument(skip(self))]
    pub async fn start(&self) -> SlackResult<(RtmStartResponse, mpsc::Receiver<UnifiedEvent>)> {
        let info: RtmStartResponse = self.invoker.call("rtm.start", Params::new()).await?;
        if info.url.is_empty() {
            return Err(RtmError::MissingUrl.into());
        }

        let request = self.handshake_request(&info.url)?;
        let (socket, _) = connect_async(request).await.map_err(|e| RtmError::ConnectionFailed {
            message: e.to_string(),
        })?;
        let (sink, source) = socket.split();
        let cancel = CancellationToken::new();

        {
            let mut outbound = self.outbound.lock().await;
            if let Some(previous) = outbound.cancel.replace(cancel.clone()) {
                previous.cancel();
            }
            if let Some(mut previous) = outbound.sink.replace(sink) {
                let _ = previous.close().await;
            }
            outbound.next_id = 0;
        }

        self.team.replace(&info);

        let (tx, rx) = mpsc::channel(self.config.event_buffer.max(1));
        tokio::spawn(read_frames(
            source,
            tx,
            cancel.clone(),
            self.context.clone(),
            self.team.clone(),
            self.invoker.metrics().clone(),
        ));
        if let Some(period) = self.config.ping_interval {
            tokio::spawn(keepalive(self.outbound.clone(), period, cancel));
        }

        info!(url = %redact_url(&info.url), "RTM connection established");
        Ok((info, rx))
    }

    /// Send a text message. Returns the sequence id assigned to it.
    #[instrument(skip(self, text), fields(channel = %channel))]
    pub async fn send(&self, channel: &ChannelId, text: &str) -> SlackResult<u64> {
        let mut outbound = self.outbound.lock().await;
        let Outbound { sink, next_id, .. } = &mut *outbound;
        let sink = sink.as_mut().ok_or(RtmError::ConnectionNotOpen)?;

        *next_id += 1;
        let id = *next_id;
        let frame = serde_json::to_string(&OutboundMessage {
            id,
            kind: "message",
            channel: channel.as_str(),
            text,
        })
        .map_err(|e| SlackError::Response(ResponseError::from(e)))?;

        sink.send(Message::Text(frame))
            .await
            .map_err(|e| RtmError::WebSocket {
                message: e.to_string(),
            })?;
        self.invoker.metrics().record_message_sent();
        Ok(id)
    }

    /// Close the connection. The event receiver sees end-of-stream.
    pub async fn stop(&self) -> SlackResult<()> {
        let mut outbound = self.outbound.lock().await;
        if let Some(cancel) = outbound.cancel.take() {
            cancel.cancel();
        }
        match outbound.sink.take() {
            Some(mut sink) => {
                debug!("Closing RTM connection");
                sink.close().await.map_err(|e| {
                    SlackError::Rtm(RtmError::WebSocket {
                        message: e.to_string(),
                    })
                })
            }
            None => Ok(()),
        }
    }

    fn handshake_request(
        &self,
        url: &str,
    ) -> SlackResult<tokio_tungstenite::tungstenite::handshake::client::Request> {
        let mut request = url
            .into_client_request()
            .map_err(|e| RtmError::ConnectionFailed {
                message: e.to_string(),
            })?;

        let origin = self.config.origin.as_str();
        if !origin.is_empty() {
            let value = HeaderValue::from_str(origin)
                .map_err(|_| RtmError::InvalidOrigin(origin.to_string()))?;
            request.headers_mut().insert("Origin", value);
        }
        Ok(request)
    }
}

#[async_trait]
impl EventSource for RtmSession {
    async fn open(&self) -> SlackResult<mpsc::Receiver<UnifiedEvent>> {
        self.start().await.map(|(_, events)| events)
    }

    async fn close(&self) {
        if let Err(e) = self.stop().await {
            debug!(error = %e, "Error while closing RTM connection");
        }
    }
}

impl std::fmt::Debug for RtmSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RtmSession")
            .field("config", &self.config)
            .finish()
    }
}

/// Decode frames in arrival order until the connection ends or is cancelled.
/// The end of the connection is reported as one `error` event.
async fn read_frames(
    mut source: WsSource,
    events: mpsc::Sender<UnifiedEvent>,
    cancel: CancellationToken,
    context: Option<EventContext>,
    team: TeamContext,
    metrics: Arc<RtmMetrics>,
) {
    loop {
        let frame = tokio::select! {
            _ = cancel.cancelled() => {
                debug!("RTM reader stopped");
                return;
            }
            frame = source.next() => frame,
        };

        let (event, last) = match frame {
            Some(Ok(Message::Text(text))) => (decode_frame(&text, &metrics), false),
            Some(Ok(Message::Binary(bytes))) => {
                (decode_frame(&String::from_utf8_lossy(&bytes), &metrics), false)
            }
            Some(Ok(Message::Close(close))) => {
                let reason = close
                    .map(|c| c.reason.to_string())
                    .filter(|r| !r.is_empty())
                    .unwrap_or_else(|| "connection closed".to_string());
                warn!(reason = %reason, "RTM connection closed by server");
                (UnifiedEvent::connection_error(reason), true)
            }
            Some(Ok(_)) => continue,
            Some(Err(e)) => {
                warn!(error = %e, "RTM connection failed");
                (UnifiedEvent::connection_error(e.to_string()), true)
            }
            None => {
                warn!("RTM stream ended");
                (UnifiedEvent::connection_error("connection closed"), true)
            }
        };

        team.apply(&event);
        let event = event.with_context(context.clone());

        tokio::select! {
            _ = cancel.cancelled() => return,
            sent = events.send(event) => {
                if sent.is_err() {
                    debug!("RTM event receiver dropped");
                    return;
                }
            }
        }

        if last {
            return;
        }
    }
}

fn decode_frame(text: &str, metrics: &RtmMetrics) -> UnifiedEvent {
    metrics.record_frame();
    let (event, failed) = decode(text);
    if failed {
        metrics.record_parse_failure();
        warn!(
            frame = frame_excerpt(text),
            error = event.error.as_ref().map(|e| e.msg.as_str()).unwrap_or_default(),
            "Failed to decode RTM frame"
        );
    }
    event
}

/// Ping the server through the shared sink every `period`
async fn keepalive(outbound: Arc<Mutex<Outbound>>, period: Duration, cancel: CancellationToken) {
    let mut ticker = interval_at(Instant::now() + period, period);
    loop {
        tokio::select! {
            _ = cancel.cancelled() => return,
            _ = ticker.tick() => {
                let mut outbound = outbound.lock().await;
                let Some(sink) = outbound.sink.as_mut() else {
                    return;
                };
                if let Err(e) = sink.send(Message::Ping(Vec::new())).await {
                    debug!(error = %e, "RTM keepalive ping failed");
                    return;
                }
            }
        }
    }
}
