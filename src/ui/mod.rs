// UI module - handles all TUI rendering using Ratatui
//
// Architecture:
// - render: Main orchestration function that splits the screen and draws each pane
// - layer_list: Left panel with the map's layers, visibility and active marker
// - editor: Style editor pane with validation markers
// - map_bar: Map status line (render state, bounds, background, revision)
// - dialogs: Modal dialogs (unsaved changes, remove, add layer, settings, shortcuts)
// - toast: Alert notifications

pub mod dialogs;
pub mod editor;
pub mod layer_list;
pub mod map_bar;
pub mod render;
pub mod toast;

pub use render::render;
