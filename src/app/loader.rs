use tracing::{debug, info};

use crate::api::{ApiError, Layer, Map};
use crate::logic;
use crate::model::Alert;
use crate::services::api::ApiRequest;

use super::ComposeApp;

impl ComposeApp {
    /// Start loading the map named in the entry parameters
    pub fn enter(&mut self) {
        info!(
            workspace = %self.model.compose.workspace,
            map = %self.model.compose.map_name,
            "entering compose view"
        );
        self.send(ApiRequest::LoadMap {
            workspace: self.model.compose.workspace.clone(),
            name: self.model.compose.map_name.clone(),
        });
    }

    /// Re-fetch the map's layer list, keeping visibility flags by name
    pub fn reload_layers(&mut self) {
        let Some(map) = &self.model.compose.map else {
            debug!("reload requested before map loaded");
            return;
        };
        self.send(ApiRequest::LoadMapLayers {
            workspace: self.model.compose.workspace.clone(),
            map: map.name.clone(),
        });
    }

    pub(crate) fn on_map_loaded(&mut self, map: Result<Map, ApiError>) {
        match map {
            Ok(map) => {
                debug!(map = %map.name, "map record loaded, fetching detailed layers");
                let name = map.name.clone();
                self.model.compose.map = Some(map);
                self.send(ApiRequest::LoadMapLayers {
                    workspace: self.model.compose.workspace.clone(),
                    map: name,
                });
            }
            Err(err) => self.load_failed(&err),
        }
    }

    pub(crate) fn on_map_layers_loaded(&mut self, layers: Result<Vec<Layer>, ApiError>) {
        let mut layers = match layers {
            Ok(layers) => layers,
            Err(err) => {
                self.load_failed(&err);
                return;
            }
        };

        let first_load = !self.model.compose.layers_loaded;
        if first_load {
            logic::layers::apply_visibility(&mut layers, &self.model.compose.hidden_on_entry);
        } else {
            logic::layers::merge_visibility(self.model.compose.layers(), &mut layers);
        }

        let Some(map) = self.model.compose.map.as_mut() else {
            debug!("layers arrived without a map record, ignoring");
            return;
        };
        info!(map = %map.name, count = layers.len(), "map layers loaded");
        map.layers = layers;
        self.model.compose.layers_loaded = true;

        let count = self.model.compose.layers().len();
        self.model.ui.layer_cursor = match self.model.ui.layer_cursor {
            _ if count == 0 => None,
            Some(idx) => Some(idx.min(count - 1)),
            None => Some(0),
        };

        if first_load {
            let first = self.model.compose.layers().first().map(Layer::layer_ref);
            self.set_active_layer(first);
        } else if self.model.compose.active_layer.is_some() && self.model.compose.active().is_none() {
            // The active layer vanished from the map server-side
            self.set_active_layer(None);
        }
    }

    fn load_failed(&mut self, err: &ApiError) {
        let name = self.model.compose.map_name.clone();
        self.model.ui.set_alert(
            Alert::danger(format!("Could not load {}: {}", name, err.message))
                .with_details(logic::errors::format_error_details(err))
                .fading(),
        );
    }
}
