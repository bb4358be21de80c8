//! Timer Handler

use crate::app::ComposeApp;
use crate::services::timers::TimerEvent;

pub fn handle_timer(app: &mut ComposeApp, event: TimerEvent) {
    match event {
        TimerEvent::ClearHistory { layer } => app.on_clear_history(layer),
    }
}
