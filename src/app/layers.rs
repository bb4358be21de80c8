use tracing::{debug, info, warn};

use crate::api::{ApiError, Layer, LayerRef};
use crate::logic;
use crate::messages::{DialogRequest, RenderEvent};
use crate::model::Alert;
use crate::services::api::ApiRequest;

use super::ComposeApp;

impl ComposeApp {
    /// Make the layer at `index` active.
    ///
    /// With unsaved edits the switch waits behind the save/discard dialog;
    /// the target is remembered in `goto_layer` and applied once the dialog
    /// resolves.
    pub fn select_layer(&mut self, index: usize) {
        let Some(target) = self.model.compose.layers().get(index).map(Layer::layer_ref) else {
            return;
        };
        self.model.ui.layer_cursor = Some(index);

        if self.model.compose.is_active(&target) {
            return;
        }

        self.model.compose.goto_layer = Some(target.clone());
        if !self.model.is_editor_clean() {
            debug!(layer = %target.name, "unsaved edits, deferring layer switch");
            self.open_dialog(DialogRequest::EditorSave);
            return;
        }

        self.switch_to(target);
    }

    pub(crate) fn switch_to(&mut self, target: LayerRef) {
        self.cache_active_style();
        self.model.compose.goto_layer = None;
        self.set_active_layer(Some(target));
    }

    /// Continue a layer switch that was waiting on the save/discard dialog
    pub(crate) fn continue_pending_switch(&mut self) {
        if let Some(target) = self.model.compose.goto_layer.take() {
            self.switch_to(target);
        }
    }

    /// Move a layer within the list and persist the new order
    pub fn move_layer(&mut self, from: usize, to: usize) {
        let Some(layers) = self.model.compose.layers_mut() else {
            return;
        };
        if !logic::layers::move_layer(layers, from, to) {
            return;
        }
        self.model.ui.layer_cursor = Some(to);
        self.layers_reordered();
    }

    /// Send the full, reordered layer list to the server
    pub fn layers_reordered(&mut self) {
        let Some(map) = &self.model.compose.map else {
            return;
        };
        self.send(ApiRequest::SaveLayerOrder {
            workspace: self.model.compose.workspace.clone(),
            map: map.name.clone(),
            layers: map.layers.clone(),
        });
    }

    pub(crate) fn on_layer_order_saved(&mut self, result: Result<Vec<Layer>, ApiError>) {
        match result {
            Ok(_) => self.refresh_map(),
            // Known gap: unlike other mutations, a failed reorder is only logged
            Err(err) => warn!(error = ?err, "saving layer order failed"),
        }
    }

    /// Ask for confirmation before removing the layer at `index`
    pub fn request_remove_layer(&mut self, index: usize) {
        let Some(layer) = self.model.compose.layers().get(index).cloned() else {
            return;
        };
        self.open_dialog(DialogRequest::RemoveLayer { layer, index });
    }

    pub(crate) fn on_map_layer_removed(
        &mut self,
        layer: LayerRef,
        index: usize,
        result: Result<(), ApiError>,
    ) {
        if let Err(err) = result {
            self.model.ui.set_alert(
                Alert::danger(format!("Unable to delete layer from map: {}", err.message))
                    .with_details(logic::errors::format_error_details(&err)),
            );
            return;
        }

        let Some(layers) = self.model.compose.layers_mut() else {
            return;
        };
        let Some(removed) = logic::layers::remove_layer_at(layers, index, &layer) else {
            debug!(layer = %layer.name, "removed layer already gone from list");
            return;
        };
        info!(layer = %removed.name, "layer removed from map");

        let count = self.model.compose.layers().len();
        self.model.ui.layer_cursor = self
            .model
            .ui
            .layer_cursor
            .filter(|_| count > 0)
            .map(|idx| idx.min(count - 1));
        self.model.compose.layer_state.remove(&removed.name);

        if self.model.compose.is_active(&removed.layer_ref()) {
            self.set_active_layer(None);
        }
        self.refresh_map();
    }

    pub fn toggle_layer_visibility(&mut self, index: usize) {
        let Some(layer) = self
            .model
            .compose
            .layers_mut()
            .and_then(|layers| layers.get_mut(index))
        else {
            return;
        };
        layer.visible = !layer.visible;
        self.refresh_map();
    }

    /// Comma-joined names of the currently hidden layers
    pub fn hidden_layer_names(&self) -> String {
        logic::layers::hidden_layer_names(self.model.compose.layers())
    }

    pub fn zoom_to_layer(&mut self, index: usize) {
        let Some(layer) = self.model.compose.layers().get(index) else {
            return;
        };
        let Some(bbox) = layer.bbox.clone() else {
            debug!(layer = %layer.name, "layer has no bounds to zoom to");
            return;
        };
        let proj = layer.proj.clone();
        self.model.compose.map_view.bounds = Some((bbox, proj));
    }

    pub fn toggle_layers_panel(&mut self) {
        self.model.ui.show_layers = !self.model.ui.show_layers;
        self.model.ui.focus = logic::ui::cycle_focus(self.model.ui.focus, self.model.ui.show_layers);
    }

    /// Ask the map to redraw
    pub fn refresh_map(&mut self) {
        self.model.compose.map_view.revision += 1;
        debug!(revision = self.model.compose.map_view.revision, "map refresh");
    }

    pub fn set_map_background(&mut self, color: impl Into<String>) {
        self.model.compose.map_view.background = Some(color.into());
    }

    pub fn handle_render_event(&mut self, event: RenderEvent) {
        match event {
            RenderEvent::Started => self.model.compose.map_view.is_rendering = true,
            RenderEvent::Finished => self.model.compose.map_view.is_rendering = false,
            RenderEvent::Failed { exceptions } => {
                self.model.compose.map_view.is_rendering = false;
                let mut alert = Alert::danger("Map rendering error");
                if let Some(first) = exceptions.into_iter().next() {
                    alert = alert.with_details(first);
                }
                self.model.ui.set_alert(alert);
            }
        }
    }
}
