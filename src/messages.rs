//! Message types exchanged between the compose view and its surroundings
//!
//! - Dialogs: a `DialogRequest` opens a modal, the user's choice comes back
//!   as a `DialogResponse`
//! - Routes: where the view asks to navigate to
//! - Render events: progress and failures reported by the map renderer

use crate::api::{Layer, Map};
use crate::services::handoff::HandoffReceiver;

/// A modal the compose view wants shown
#[derive(Clone, Debug, PartialEq)]
pub enum DialogRequest {
    /// Unsaved style edits: save or discard
    EditorSave,
    /// Confirm removal of the layer at `index`
    RemoveLayer { layer: Layer, index: usize },
    /// Pick a layer from the workspace to add, or go import data
    AddLayer { workspace: String, map: String },
    /// Read-only map properties
    MapSettings { map: Map },
    Shortcuts,
}

impl DialogRequest {
    pub fn title(&self) -> &'static str {
        match self {
            DialogRequest::EditorSave => "Unsaved Changes",
            DialogRequest::RemoveLayer { .. } => "Remove Layer",
            DialogRequest::AddLayer { .. } => "Add Layer",
            DialogRequest::MapSettings { .. } => "Map Settings",
            DialogRequest::Shortcuts => "Keyboard Shortcuts",
        }
    }
}

/// How a dialog was closed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DialogResponse {
    Save,
    Discard,
    Remove,
    /// Add-layer dialog: user wants to import new data instead
    Import,
    /// Add-layer dialog: a layer was added to the map
    Added,
    Cancel,
}

/// Navigation target requested by the compose view
#[derive(Debug)]
pub enum Route {
    Workspace { workspace: String },
    DataImport {
        workspace: String,
        handoff: HandoffReceiver,
    },
    /// Leave the application
    Exit,
}

impl Route {
    pub fn describe(&self) -> String {
        match self {
            Route::Workspace { workspace } => format!("workspace {}", workspace),
            Route::DataImport { workspace, .. } => format!("data import for {}", workspace),
            Route::Exit => "exit".to_string(),
        }
    }
}

/// Progress reported by whatever draws the map
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderEvent {
    Started,
    Finished,
    /// Renderer exceptions, first one is the most relevant
    Failed { exceptions: Vec<String> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialog_titles_are_distinct() {
        assert_ne!(DialogRequest::EditorSave.title(), DialogRequest::Shortcuts.title());
    }

    #[test]
    fn test_route_describe() {
        let route = Route::Workspace {
            workspace: "ws1".to_string(),
        };
        assert_eq!(route.describe(), "workspace ws1");
        assert_eq!(Route::Exit.describe(), "exit");
    }
}
