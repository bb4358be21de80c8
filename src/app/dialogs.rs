use tracing::{debug, info, warn};

use crate::api::{ApiError, Layer, LayerRef};
use crate::logic;
use crate::messages::{DialogRequest, DialogResponse};
use crate::model::{AddLayerPicker, Alert};
use crate::services::api::ApiRequest;

use super::ComposeApp;

impl ComposeApp {
    /// Show a modal. Only one dialog is open at a time; a second request
    /// while one is showing is ignored.
    pub fn open_dialog(&mut self, request: DialogRequest) {
        if let Some(open) = &self.model.ui.dialog {
            debug!(open = open.title(), requested = request.title(), "dialog already open");
            return;
        }

        if let DialogRequest::AddLayer { workspace, .. } = &request {
            self.model.ui.add_layer = Some(AddLayerPicker::default());
            self.send(ApiRequest::ListWorkspaceLayers {
                workspace: workspace.clone(),
            });
        }
        self.model.ui.dialog = Some(request);
    }

    /// Close the open dialog with the user's choice and act on it
    pub fn resolve_dialog(&mut self, response: DialogResponse) {
        let Some(request) = self.model.ui.dialog.take() else {
            return;
        };
        debug!(dialog = request.title(), ?response, "dialog resolved");

        match (request, response) {
            (DialogRequest::EditorSave, DialogResponse::Save) => {
                self.save_style();
                self.continue_pending_switch();
            }
            (DialogRequest::EditorSave, DialogResponse::Discard) => {
                self.model.editor.revert_to_clean();
                self.bump_generation();
                self.model
                    .ui
                    .set_alert(Alert::success("Editor changes have been discarded.").fading());
                self.continue_pending_switch();
            }
            (DialogRequest::EditorSave, _) => {
                self.model.compose.goto_layer = None;
            }

            (DialogRequest::RemoveLayer { layer, index }, DialogResponse::Remove) => {
                info!(layer = %layer.name, index, "removing layer from map");
                self.send(ApiRequest::RemoveMapLayer {
                    workspace: self.model.compose.workspace.clone(),
                    map: self.model.compose.map_name.clone(),
                    layer: layer.layer_ref(),
                    index,
                });
            }
            (DialogRequest::RemoveLayer { .. }, _) => {}

            (DialogRequest::AddLayer { .. }, DialogResponse::Import) => {
                self.model.ui.add_layer = None;
                self.import_data();
            }
            (DialogRequest::AddLayer { .. }, DialogResponse::Added) => {
                self.model.ui.add_layer = None;
                self.refresh_map();
                self.reload_layers();
            }
            (DialogRequest::AddLayer { .. }, _) => {
                self.model.ui.add_layer = None;
            }

            (DialogRequest::MapSettings { .. } | DialogRequest::Shortcuts, _) => {}
        }
    }

    pub fn open_add_layer(&mut self) {
        self.open_dialog(DialogRequest::AddLayer {
            workspace: self.model.compose.workspace.clone(),
            map: self.model.compose.map_name.clone(),
        });
    }

    pub fn open_map_settings(&mut self) {
        let Some(map) = self.model.compose.map.clone() else {
            return;
        };
        self.open_dialog(DialogRequest::MapSettings { map });
    }

    pub fn open_shortcuts(&mut self) {
        self.open_dialog(DialogRequest::Shortcuts);
    }

    pub fn add_layer_next(&mut self) {
        if let Some(picker) = self.model.ui.add_layer.as_mut() {
            let len = picker.candidates.as_ref().map_or(0, Vec::len);
            picker.selected = logic::ui::next_selection(picker.selected, len);
        }
    }

    pub fn add_layer_prev(&mut self) {
        if let Some(picker) = self.model.ui.add_layer.as_mut() {
            let len = picker.candidates.as_ref().map_or(0, Vec::len);
            picker.selected = logic::ui::prev_selection(picker.selected, len);
        }
    }

    /// Add the highlighted workspace layer to the map
    pub fn add_selected_candidate(&mut self) {
        let Some(picker) = self.model.ui.add_layer.as_mut() else {
            return;
        };
        if picker.busy {
            return;
        }
        let Some(layer) = picker.selected_layer().map(Layer::layer_ref) else {
            return;
        };
        picker.busy = true;
        picker.error = None;

        info!(layer = %layer.name, "adding layer to map");
        self.send(ApiRequest::AddMapLayer {
            workspace: self.model.compose.workspace.clone(),
            map: self.model.compose.map_name.clone(),
            layer,
        });
    }

    pub(crate) fn on_workspace_layers_listed(&mut self, layers: Result<Vec<Layer>, ApiError>) {
        let in_map: Vec<LayerRef> = self
            .model
            .compose
            .layers()
            .iter()
            .map(Layer::layer_ref)
            .collect();

        let Some(picker) = self.model.ui.add_layer.as_mut() else {
            debug!("workspace layers arrived after add dialog closed");
            return;
        };
        match layers {
            Ok(layers) => {
                let candidates: Vec<Layer> = layers
                    .into_iter()
                    .filter(|l| !in_map.contains(&l.layer_ref()))
                    .collect();
                picker.selected = if candidates.is_empty() { None } else { Some(0) };
                picker.candidates = Some(candidates);
            }
            Err(err) => {
                warn!(error = %err, "listing workspace layers failed");
                picker.candidates = Some(Vec::new());
                picker.error = Some(err.message);
            }
        }
    }

    pub(crate) fn on_map_layer_added(&mut self, layer: LayerRef, result: Result<Vec<Layer>, ApiError>) {
        match result {
            Ok(_) => {
                info!(layer = %layer.name, "layer added to map");
                if matches!(self.model.ui.dialog, Some(DialogRequest::AddLayer { .. })) {
                    self.resolve_dialog(DialogResponse::Added);
                } else {
                    self.refresh_map();
                    self.reload_layers();
                }
            }
            Err(err) => {
                if let Some(picker) = self.model.ui.add_layer.as_mut() {
                    picker.busy = false;
                    picker.error = Some(err.message.clone());
                }
                self.model.ui.set_alert(
                    Alert::danger(format!("Unable to add layer to map: {}", err.message))
                        .with_details(logic::errors::format_error_details(&err)),
                );
            }
        }
    }
}
