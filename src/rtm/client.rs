//! Wiring of the RTM pieces: session, supervisor and read-marker batcher.

use super::context::TeamContext;
use super::event::{EventContext, UnifiedEvent};
use super::read_marker::{ChannelMarker, ReadMarkerBatcher};
use super::session::RtmSession;
use super::supervisor::{ConnectionStatus, EventSource, Supervisor};
use super::types::RtmStartResponse;
use crate::client::ApiInvoker;
use crate::config::RtmConfig;
use crate::errors::SlackResult;
use crate::services::ConversationsService;
use crate::types::ChannelId;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Builds RTM connections
#[derive(Clone)]
pub struct RtmClient {
    invoker: Arc<ApiInvoker>,
    config: RtmConfig,
    context: Option<EventContext>,
    marker: Option<Arc<dyn ChannelMarker>>,
}

impl RtmClient {
    /// Create a client using the invoker's RTM configuration
    pub fn new(invoker: Arc<ApiInvoker>) -> Self {
        let config = invoker.config().rtm.clone();
        Self {
            invoker,
            config,
            context: None,
            marker: None,
        }
    }

    /// Override the RTM configuration
    pub fn with_config(mut self, config: RtmConfig) -> Self {
        self.config = config;
        self
    }

    /// Attach a caller value to every event
    pub fn with_context<T: std::any::Any + Send + Sync>(mut self, value: T) -> Self {
        self.context = Some(EventContext::new(value));
        self
    }

    /// Use a custom marker instead of the conversations service
    pub fn with_marker(mut self, marker: Arc<dyn ChannelMarker>) -> Self {
        self.marker = Some(marker);
        self
    }

    /// Connect and start delivering events.
    ///
    /// Fails if the first connection cannot be opened. Later connection
    /// losses are handled by reconnecting.
    pub async fn connect(self) -> SlackResult<RtmHandle> {
        let metrics = self.invoker.metrics().clone();
        let session = Arc::new(
            RtmSession::new(self.invoker.clone(), self.config.clone()).with_context(self.context),
        );
        let (info, inbound) = session.start().await?;

        let root = CancellationToken::new();
        let supervisor_cancel = root.child_token();
        let batcher_cancel = root.child_token();

        let batcher = self.config.mark_read.then(|| {
            let marker: Arc<dyn ChannelMarker> = match self.marker {
                Some(marker) => marker,
                None => Arc::new(ConversationsService::new(self.invoker.clone())),
            };
            Arc::new(ReadMarkerBatcher::new(marker, metrics.clone()))
        });
        let batcher_task = batcher.clone().map(|b| {
            b.spawn(
                self.config.mark_interval,
                self.config.flush_on_stop,
                batcher_cancel.clone(),
            )
        });

        let source: Arc<dyn EventSource> = session.clone();
        let (supervisor, events, status) = Supervisor::new(source, &self.config, metrics);
        let supervisor = match &batcher {
            Some(b) => supervisor.with_batcher(b.clone()),
            None => supervisor,
        };
        let supervisor_task = supervisor.spawn(inbound, supervisor_cancel.clone());

        info!(
            user = %info.self_info.id,
            team = %info.team.name,
            "RTM session started"
        );

        Ok(RtmHandle {
            info,
            session,
            events,
            status,
            batcher,
            root,
            supervisor_cancel,
            batcher_cancel,
            tasks: [Some(supervisor_task), batcher_task],
        })
    }
}

impl std::fmt::Debug for RtmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RtmClient")
            .field("config", &self.config)
            .finish()
    }
}

/// A running RTM connection
pub struct RtmHandle {
    info: RtmStartResponse,
    session: Arc<RtmSession>,
    events: mpsc::Receiver<UnifiedEvent>,
    status: watch::Receiver<ConnectionStatus>,
    batcher: Option<Arc<ReadMarkerBatcher>>,
    root: CancellationToken,
    supervisor_cancel: CancellationToken,
    batcher_cancel: CancellationToken,
    tasks: [Option<JoinHandle<()>>; 2],
}

impl RtmHandle {
    /// Reply of the first `rtm.start`
    pub fn info(&self) -> &RtmStartResponse {
        &self.info
    }

    /// Next event, in arrival order. `None` once the supervisor stopped.
    pub async fn recv(&mut self) -> Option<UnifiedEvent> {
        self.events.recv().await
    }

    /// The event receiver
    pub fn events(&mut self) -> &mut mpsc::Receiver<UnifiedEvent> {
        &mut self.events
    }

    /// Connection status updates. This is the only place disconnects show
    /// when connection errors are not delivered as events.
    pub fn status(&self) -> watch::Receiver<ConnectionStatus> {
        self.status.clone()
    }

    /// Send a text message on the current connection
    pub async fn send(&self, channel: &ChannelId, text: &str) -> SlackResult<u64> {
        self.session.send(channel, text).await
    }

    /// The underlying session
    pub fn session(&self) -> &Arc<RtmSession> {
        &self.session
    }

    /// Team roster
    pub fn team(&self) -> &TeamContext {
        self.session.team()
    }

    /// Read-marker batcher, when read tracking is enabled
    pub fn batcher(&self) -> Option<&Arc<ReadMarkerBatcher>> {
        self.batcher.as_ref()
    }

    /// Stop reconnecting and close the connection. The batcher keeps running.
    pub fn stop_supervisor(&self) {
        self.supervisor_cancel.cancel();
    }

    /// Stop flushing read markers. Events keep flowing.
    pub fn stop_batcher(&self) {
        self.batcher_cancel.cancel();
    }

    /// Stop everything and wait for the tasks to finish
    pub async fn shutdown(mut self) {
        self.root.cancel();
        let tasks = self.tasks.iter_mut().filter_map(Option::take);
        for result in futures::future::join_all(tasks).await {
            if let Err(e) = result {
                warn!(error = %e, "RTM task ended abnormally");
            }
        }
        info!("RTM session shut down");
    }
}

impl Drop for RtmHandle {
    fn drop(&mut self) {
        self.root.cancel();
    }
}

impl std::fmt::Debug for RtmHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RtmHandle")
            .field("status", &*self.status.borrow())
            .field("batcher", &self.batcher)
            .finish()
    }
}
