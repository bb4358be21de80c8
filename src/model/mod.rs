//! Pure Application Model - Elm Architecture
//!
//! This module defines the pure, cloneable state for the compose view.
//! The Model is organized into focused sub-models:
//!
//! - **ComposeModel**: map, layers, active layer, style cache, generation
//! - **EditorState**: style text buffer, undo history, clean tracking
//! - **UiModel**: alerts, dialogs, focus, panel visibility
//!
//! Key principles:
//! - Clone + Debug: Can snapshot state in tests
//! - No services: All I/O lives in `ComposeApp`
//! - Pure accessors: Helper methods are side-effect free

pub mod compose;
pub mod editor;
pub mod types;
pub mod ui;

pub use compose::ComposeModel;
pub use editor::EditorState;
pub use types::*;
pub use ui::UiModel;

/// Root model composed of focused sub-models
#[derive(Clone, Debug)]
pub struct Model {
    pub compose: ComposeModel,
    pub editor: EditorState,
    pub ui: UiModel,
}

impl Model {
    pub fn new(params: &ComposeParams) -> Self {
        Self {
            compose: ComposeModel::new(params),
            editor: EditorState::new(),
            ui: UiModel::new(),
        }
    }

    /// True when the editor holds no edits newer than the last save/discard
    pub fn is_editor_clean(&self) -> bool {
        self.editor.is_clean(self.compose.generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> ComposeParams {
        ComposeParams {
            workspace: "ws1".to_string(),
            map: "map1".to_string(),
            hidden_layers: None,
        }
    }

    #[test]
    fn test_model_creation() {
        let model = Model::new(&params());
        assert!(model.compose.map.is_none());
        assert!(model.is_editor_clean());
        assert!(model.ui.dialog.is_none());
    }

    #[test]
    fn test_model_is_cloneable() {
        let model = Model::new(&params());
        let _cloned = model.clone();
    }

    #[test]
    fn test_editor_dirty_after_edit() {
        let mut model = Model::new(&params());
        model.editor.insert_char('a');
        assert!(!model.is_editor_clean());
        model.compose.generation = model.editor.change_generation();
        assert!(model.is_editor_clean());
    }
}
