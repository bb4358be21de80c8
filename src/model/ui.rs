//! UI Model
//!
//! This sub-model contains all state related to the user interface:
//! alerts, the open dialog, focus and panel visibility.

use std::time::Duration;

use super::types::{AddLayerPicker, Alert, Focus};
use crate::messages::DialogRequest;

#[derive(Clone, Debug)]
pub struct UiModel {
    /// Currently displayed alerts; replaced wholesale when a new alert is raised
    pub alerts: Vec<Alert>,

    /// Modal dialog currently open
    pub dialog: Option<DialogRequest>,

    /// State of the add-layer dialog while it is open
    pub add_layer: Option<AddLayerPicker>,

    pub focus: Focus,

    /// Cursor in the layer list
    pub layer_cursor: Option<usize>,

    /// Whether the layer list panel is shown
    pub show_layers: bool,
}

impl Default for UiModel {
    fn default() -> Self {
        Self::new()
    }
}

impl UiModel {
    pub fn new() -> Self {
        Self {
            alerts: Vec::new(),
            dialog: None,
            add_layer: None,
            focus: Focus::Layers,
            layer_cursor: None,
            show_layers: true,
        }
    }

    pub fn set_alert(&mut self, alert: Alert) {
        self.alerts = vec![alert];
    }

    pub fn dismiss_alerts(&mut self) {
        self.alerts.clear();
    }

    /// Drop fading alerts that have been shown for at least `fade`
    pub fn expire_alerts(&mut self, fade: Duration) {
        let fade_ms = fade.as_millis() as u64;
        self.alerts.retain(|alert| {
            !(alert.fadeout
                && crate::logic::ui::should_fade_alert(
                    alert.raised_at.elapsed().as_millis(),
                    fade_ms,
                ))
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::AlertKind;

    #[test]
    fn test_set_alert_replaces_list() {
        let mut ui = UiModel::new();
        ui.set_alert(Alert::danger("first"));
        ui.set_alert(Alert::success("second"));
        assert_eq!(ui.alerts.len(), 1);
        assert_eq!(ui.alerts[0].kind, AlertKind::Success);
    }

    #[test]
    fn test_expire_alerts_keeps_sticky_alerts() {
        let mut ui = UiModel::new();
        ui.alerts = vec![Alert::danger("sticky"), Alert::success("fades").fading()];
        ui.expire_alerts(Duration::ZERO);
        assert_eq!(ui.alerts.len(), 1);
        assert_eq!(ui.alerts[0].message, "sticky");
    }
}
