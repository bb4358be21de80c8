use tracing::{debug, info, warn};

use crate::api::{ApiError, LayerRef, StyleSaveError};
use crate::logic;
use crate::model::{Alert, LayerState, StyleMarkers, StyleStatus};
use crate::services::api::ApiRequest;
use crate::services::timers::TimerEvent;

use super::ComposeApp;

impl ComposeApp {
    /// Make `layer` the active layer and bring its style into the editor,
    /// from the cache if we have it, otherwise from the server.
    pub(crate) fn set_active_layer(&mut self, layer: Option<LayerRef>) {
        self.model.compose.active_layer = layer.clone();

        let Some(layer) = layer else {
            self.model.compose.style_status = StyleStatus::Empty;
            self.model.editor.load_text("");
            return;
        };

        match self.model.compose.layer_state.get(&layer.name) {
            Some(cached) => {
                debug!(layer = %layer.name, "style taken from layer cache");
                let style = cached.style.clone();
                self.model.editor.load_text(&style);
                self.model.compose.style_status = StyleStatus::Ready;
            }
            None => {
                self.model.editor.load_text("");
                self.model.compose.style_status = StyleStatus::Loading;
                self.send(ApiRequest::LoadStyle {
                    layer: layer.clone(),
                });
            }
        }

        let delay = self.settings.history_clear_delay;
        self.schedule(delay, TimerEvent::ClearHistory { layer });
    }

    /// Remember the active layer's editor text so switching back skips the fetch
    pub(crate) fn cache_active_style(&mut self) {
        if self.model.compose.style_status != StyleStatus::Ready {
            return;
        }
        if let Some(active) = &self.model.compose.active_layer {
            self.model.compose.layer_state.insert(
                active.name.clone(),
                LayerState {
                    style: self.model.editor.text(),
                },
            );
        }
    }

    /// Mark the editor clean at a new generation
    pub(crate) fn bump_generation(&mut self) {
        self.model.compose.generation = self.model.editor.change_generation();
    }

    /// Persist the active layer's style
    pub fn save_style(&mut self) {
        let Some(layer) = self.model.compose.active_layer.clone() else {
            debug!("save requested with no active layer");
            return;
        };
        if self.model.compose.style_status != StyleStatus::Ready {
            debug!(layer = %layer.name, "style not loaded yet, nothing to save");
            return;
        }

        info!(layer = %layer.name, "saving style");
        self.send(ApiRequest::SaveStyle {
            layer,
            style: self.model.editor.text(),
            map: self.model.compose.map.as_ref().map(|m| m.name.clone()),
        });
    }

    pub(crate) fn on_style_loaded(&mut self, layer: LayerRef, style: Result<String, ApiError>) {
        if !self.model.compose.is_active(&layer) {
            debug!(layer = %layer.name, "dropping style for a layer that is no longer active");
            return;
        }

        match style {
            Ok(style) => {
                self.model.editor.load_text(&style);
                self.model.compose.style_status = StyleStatus::Ready;
            }
            Err(err) => {
                warn!(layer = %layer.name, error = %err, "style fetch failed");
                self.model.compose.style_status = StyleStatus::Failed(err.message.clone());
                self.model.ui.set_alert(
                    Alert::danger(format!(
                        "Could not load style for {}: {}",
                        layer.name, err.message
                    ))
                    .with_details(logic::errors::format_error_details(&err)),
                );
            }
        }
    }

    pub(crate) fn on_style_saved(&mut self, layer: LayerRef, result: Result<(), StyleSaveError>) {
        match result {
            Ok(()) => {
                info!(layer = %layer.name, "style saved");
                if self.model.compose.markers.as_ref().is_some_and(|m| m.layer == layer) {
                    self.model.compose.markers = None;
                }
                self.model.ui.set_alert(Alert::success("Style saved.").fading());
                // Edits in the editor may belong to another layer by now
                if self.model.compose.is_active(&layer) {
                    self.bump_generation();
                } else {
                    debug!(layer = %layer.name, "save landed after switching away");
                }
                self.refresh_map();
            }
            Err(StyleSaveError::Validation(markers)) => {
                info!(layer = %layer.name, problems = markers.len(), "style rejected by validation");
                self.model.compose.markers = Some(StyleMarkers { layer, markers });
                self.model
                    .ui
                    .set_alert(Alert::danger("Style not saved due to validation error."));
            }
            Err(StyleSaveError::Failed(err)) => {
                warn!(layer = %layer.name, error = %err, "style save failed");
                let mut alert =
                    Alert::danger(format!("Error occurred saving style: {}", err.message));
                if let Some(trace) = err.trace {
                    alert = alert.with_details(trace);
                }
                self.model.ui.set_alert(alert);
            }
        }
    }

    pub(crate) fn on_clear_history(&mut self, layer: LayerRef) {
        if self.model.compose.is_active(&layer) {
            debug!(layer = %layer.name, "clearing editor history");
            self.model.editor.clear_history();
        }
    }
}
