//! Compose View Controller
//!
//! `ComposeApp` owns the model and the channels to its services. Its
//! methods are grouped by concern:
//! - loader: fetching the map and its layers on entry
//! - layers: active layer switching, reorder, removal, visibility, zoom
//! - style: style activation, persistence, editor history
//! - dialogs: opening dialogs and acting on their responses
//! - navigation: unsaved-change guard, workspace and import routes
//!
//! Remote calls go out over `api_tx`; their results come back through
//! `handlers::handle_api_response`.

pub(crate) mod dialogs;
pub(crate) mod layers;
pub(crate) mod loader;
pub(crate) mod navigation;
pub(crate) mod style;

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::warn;

use crate::messages::Route;
use crate::model::{ComposeParams, Model};
use crate::services::api::ApiRequest;
use crate::services::timers::{TimerEvent, TimerService};

/// Delay before editor undo history is cleared after a style becomes active
pub const DEFAULT_HISTORY_CLEAR_DELAY: Duration = Duration::from_secs(5);

/// How long fading alerts stay on screen
pub const DEFAULT_ALERT_FADE: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComposeSettings {
    pub history_clear_delay: Duration,
    pub alert_fade: Duration,
}

impl Default for ComposeSettings {
    fn default() -> Self {
        Self {
            history_clear_delay: DEFAULT_HISTORY_CLEAR_DELAY,
            alert_fade: DEFAULT_ALERT_FADE,
        }
    }
}

pub struct ComposeApp {
    pub model: Model,
    pub settings: ComposeSettings,

    api_tx: mpsc::UnboundedSender<ApiRequest>,
    timers: TimerService,
    timer_rx: mpsc::UnboundedReceiver<TimerEvent>,

    /// Navigation the view has committed to; taken by the runtime
    route: Option<Route>,
}

impl ComposeApp {
    pub fn new(
        params: ComposeParams,
        settings: ComposeSettings,
        api_tx: mpsc::UnboundedSender<ApiRequest>,
    ) -> Self {
        let (timers, timer_rx) = TimerService::new();
        Self {
            model: Model::new(&params),
            settings,
            api_tx,
            timers,
            timer_rx,
            route: None,
        }
    }

    pub(crate) fn send(&self, request: ApiRequest) {
        if self.api_tx.send(request).is_err() {
            warn!("api worker is gone, request dropped");
        }
    }

    pub(crate) fn schedule(&mut self, delay: Duration, event: TimerEvent) {
        self.timers.schedule(delay, event);
    }

    /// Timers that fired since the last call
    pub fn drain_timer_events(&mut self) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.timer_rx.try_recv() {
            events.push(event);
        }
        events
    }

    /// Wait for the next timer to fire
    pub async fn next_timer_event(&mut self) -> Option<TimerEvent> {
        self.timer_rx.recv().await
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    /// Take the route the view committed to, if any
    pub fn take_route(&mut self) -> Option<Route> {
        self.route.take()
    }

    pub fn has_route(&self) -> bool {
        self.route.is_some()
    }

    /// Periodic housekeeping from the runtime loop
    pub fn tick(&mut self) {
        self.model.ui.expire_alerts(self.settings.alert_fade);
    }

    /// Tear the view down: pending timers are cancelled so nothing acts on it afterwards
    pub fn teardown(&mut self) {
        self.timers.cancel_all();
    }
}
