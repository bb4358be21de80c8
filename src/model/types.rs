//! Shared types for the Model
//!
//! These types are used across multiple sub-models and represent
//! fundamental view concepts.

use std::time::Instant;

use crate::api::{Bbox, Layer, LayerRef, Proj, StyleMarker};

/// Entry parameters handed over by navigation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComposeParams {
    pub workspace: String,
    pub map: String,
    /// Comma-separated layer names to start hidden
    pub hidden_layers: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Danger,
}

/// Transient user-facing notification
#[derive(Clone, Debug)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
    pub details: Option<String>,
    /// Fading alerts are dropped automatically after a while
    pub fadeout: bool,
    pub raised_at: Instant,
}

impl Alert {
    pub fn new(kind: AlertKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
            fadeout: false,
            raised_at: Instant::now(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(AlertKind::Success, message)
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self::new(AlertKind::Danger, message)
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn fading(mut self) -> Self {
        self.fadeout = true;
        self
    }
}

/// Cached editor text for a layer that is not currently active
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayerState {
    pub style: String,
}

/// Where the active layer's style document is
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StyleStatus {
    /// No active layer
    Empty,
    /// Fetch in flight
    Loading,
    /// Editor holds the layer's style
    Ready,
    Failed(String),
}

/// Validation problems from the last rejected save, tied to the layer they belong to
#[derive(Clone, Debug, PartialEq)]
pub struct StyleMarkers {
    pub layer: LayerRef,
    pub markers: Vec<StyleMarker>,
}

/// What the map pane should show
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MapView {
    /// Bounds set by zoom-to-layer
    pub bounds: Option<(Bbox, Option<Proj>)>,
    pub background: Option<String>,
    pub is_rendering: bool,
    /// Bumped whenever the map should be redrawn
    pub revision: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    Layers,
    Editor,
}

/// Contents of the add-layer dialog
#[derive(Clone, Debug, Default)]
pub struct AddLayerPicker {
    /// None until the workspace listing arrives
    pub candidates: Option<Vec<Layer>>,
    pub selected: Option<usize>,
    /// An add request is in flight
    pub busy: bool,
    pub error: Option<String>,
}

impl AddLayerPicker {
    pub fn selected_layer(&self) -> Option<&Layer> {
        let candidates = self.candidates.as_ref()?;
        self.selected.and_then(|idx| candidates.get(idx))
    }
}
