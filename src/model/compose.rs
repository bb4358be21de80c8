//! Compose Model
//!
//! State of the map being composed: the map record and its ordered
//! layers, the active layer, cached styles for inactive layers, the
//! editor generation and validation markers.

use std::collections::HashMap;

use crate::api::{Layer, LayerRef, Map};

use super::types::{ComposeParams, LayerState, MapView, StyleMarkers, StyleStatus};

#[derive(Clone, Debug)]
pub struct ComposeModel {
    pub workspace: String,
    pub map_name: String,
    /// Names parsed from the entry parameters
    pub hidden_on_entry: Vec<String>,

    /// Set once the map record has loaded; layers are filled in afterwards
    pub map: Option<Map>,

    /// Whether the detailed layer list has arrived at least once
    pub layers_loaded: bool,

    /// Layer shown in the style editor (at most one)
    pub active_layer: Option<LayerRef>,

    /// Layer the user asked to switch to while edits were unsaved
    pub goto_layer: Option<LayerRef>,

    /// Style text cached per layer name
    pub layer_state: HashMap<String, LayerState>,

    pub style_status: StyleStatus,

    /// Generation the editor was last marked clean at
    pub generation: u64,

    pub markers: Option<StyleMarkers>,

    pub map_view: MapView,
}

impl ComposeModel {
    pub fn new(params: &ComposeParams) -> Self {
        Self {
            workspace: params.workspace.clone(),
            map_name: params.map.clone(),
            hidden_on_entry: crate::logic::layers::parse_hidden_layers(
                params.hidden_layers.as_deref(),
            ),
            map: None,
            layers_loaded: false,
            active_layer: None,
            goto_layer: None,
            layer_state: HashMap::new(),
            style_status: StyleStatus::Empty,
            generation: 0,
            markers: None,
            map_view: MapView::default(),
        }
    }

    pub fn layers(&self) -> &[Layer] {
        self.map.as_ref().map(|m| m.layers.as_slice()).unwrap_or(&[])
    }

    pub fn layers_mut(&mut self) -> Option<&mut Vec<Layer>> {
        self.map.as_mut().map(|m| &mut m.layers)
    }

    pub fn active(&self) -> Option<&Layer> {
        let active = self.active_layer.as_ref()?;
        self.layers()
            .iter()
            .find(|l| l.name == active.name && l.workspace == active.workspace)
    }

    pub fn is_active(&self, layer: &LayerRef) -> bool {
        self.active_layer.as_ref() == Some(layer)
    }

    /// Markers for the active layer, if the last failed save was for it
    pub fn active_markers(&self) -> Option<&StyleMarkers> {
        self.markers
            .as_ref()
            .filter(|m| self.active_layer.as_ref() == Some(&m.layer))
    }
}
