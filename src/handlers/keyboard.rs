//! Keyboard Input Handler
//!
//! An open dialog takes every key. Otherwise a few global chords apply,
//! then keys go to whichever pane has focus.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::ComposeApp;
use crate::logic;
use crate::messages::{DialogRequest, DialogResponse};
use crate::model::{Focus, StyleStatus};

/// Handle keyboard input
pub fn handle_key(app: &mut ComposeApp, key: KeyEvent) {
    if app.model.ui.dialog.is_some() {
        handle_dialog_key(app, key);
        return;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('s') if ctrl => {
            app.save_style();
            return;
        }
        KeyCode::Char('q') | KeyCode::Char('c') if ctrl => {
            app.quit();
            return;
        }
        KeyCode::Char('l') if ctrl => {
            app.toggle_layers_panel();
            return;
        }
        KeyCode::Tab => {
            app.model.ui.focus = logic::ui::cycle_focus(app.model.ui.focus, app.model.ui.show_layers);
            return;
        }
        _ => {}
    }

    match app.model.ui.focus {
        Focus::Layers => handle_layers_key(app, key),
        Focus::Editor => handle_editor_key(app, key),
    }
}

fn handle_dialog_key(app: &mut ComposeApp, key: KeyEvent) {
    let Some(dialog) = app.model.ui.dialog.clone() else {
        return;
    };

    let response = match dialog {
        DialogRequest::EditorSave => match key.code {
            KeyCode::Char('s') | KeyCode::Char('y') => Some(DialogResponse::Save),
            KeyCode::Char('d') | KeyCode::Char('n') => Some(DialogResponse::Discard),
            KeyCode::Esc => Some(DialogResponse::Cancel),
            _ => None,
        },
        DialogRequest::RemoveLayer { .. } => match key.code {
            KeyCode::Char('y') | KeyCode::Char('r') | KeyCode::Enter => Some(DialogResponse::Remove),
            KeyCode::Char('n') | KeyCode::Esc => Some(DialogResponse::Cancel),
            _ => None,
        },
        DialogRequest::AddLayer { .. } => match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                app.add_layer_prev();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.add_layer_next();
                None
            }
            KeyCode::Enter => {
                app.add_selected_candidate();
                None
            }
            KeyCode::Char('i') => Some(DialogResponse::Import),
            KeyCode::Esc => Some(DialogResponse::Cancel),
            _ => None,
        },
        DialogRequest::MapSettings { .. } | DialogRequest::Shortcuts => match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Some(DialogResponse::Cancel),
            _ => None,
        },
    };

    if let Some(response) = response {
        app.resolve_dialog(response);
    }
}

fn handle_layers_key(app: &mut ComposeApp, key: KeyEvent) {
    let count = app.model.compose.layers().len();
    let cursor = app.model.ui.layer_cursor;

    match key.code {
        KeyCode::Down | KeyCode::Char('j') => {
            app.model.ui.layer_cursor = logic::ui::next_selection(cursor, count);
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.model.ui.layer_cursor = logic::ui::prev_selection(cursor, count);
        }
        // Shift+J/K move the layer itself
        KeyCode::Char('J') => {
            if let Some(idx) = cursor.filter(|&i| i + 1 < count) {
                app.move_layer(idx, idx + 1);
            }
        }
        KeyCode::Char('K') => {
            if let Some(idx) = cursor.filter(|&i| i > 0 && i < count) {
                app.move_layer(idx, idx - 1);
            }
        }
        KeyCode::Enter => {
            if let Some(idx) = cursor {
                app.select_layer(idx);
            }
        }
        KeyCode::Char(' ') => {
            if let Some(idx) = cursor {
                app.toggle_layer_visibility(idx);
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(idx) = cursor {
                app.request_remove_layer(idx);
            }
        }
        KeyCode::Char('z') => {
            if let Some(idx) = cursor {
                app.zoom_to_layer(idx);
            }
        }
        KeyCode::Char('a') => app.open_add_layer(),
        KeyCode::Char('r') => app.reload_layers(),
        KeyCode::Char('w') => {
            app.view_workspace();
        }
        KeyCode::Char('m') => app.open_map_settings(),
        KeyCode::Char('?') => app.open_shortcuts(),
        KeyCode::Char('q') => {
            app.quit();
        }
        KeyCode::Esc => app.model.ui.dismiss_alerts(),
        _ => {}
    }
}

fn handle_editor_key(app: &mut ComposeApp, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => {
            if app.model.ui.show_layers {
                app.model.ui.focus = Focus::Layers;
            }
            return;
        }
        KeyCode::Left => return app.model.editor.move_left(),
        KeyCode::Right => return app.model.editor.move_right(),
        KeyCode::Up => return app.model.editor.move_up(),
        KeyCode::Down => return app.model.editor.move_down(),
        _ => {}
    }

    // Only a loaded style can be edited
    if app.model.compose.style_status != StyleStatus::Ready {
        return;
    }

    let editor = &mut app.model.editor;
    match key.code {
        KeyCode::Char('z') if ctrl => {
            editor.undo();
        }
        KeyCode::Char(c) if !ctrl => editor.insert_char(c),
        KeyCode::Enter => editor.insert_newline(),
        KeyCode::Backspace => editor.backspace(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ComposeSettings;
    use crate::model::ComposeParams;
    use crate::services::api::ApiRequest;
    use tokio::sync::mpsc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> (ComposeApp, mpsc::UnboundedReceiver<ApiRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let params = ComposeParams {
            workspace: "ws1".to_string(),
            map: "map1".to_string(),
            hidden_layers: None,
        };
        (ComposeApp::new(params, ComposeSettings::default(), tx), rx)
    }

    #[tokio::test]
    async fn test_typing_ignored_until_style_ready() {
        let (mut app, _rx) = app();
        app.model.ui.focus = Focus::Editor;
        handle_key(&mut app, key(KeyCode::Char('x')));
        assert_eq!(app.model.editor.text(), "");

        app.model.compose.style_status = StyleStatus::Ready;
        handle_key(&mut app, key(KeyCode::Char('x')));
        assert_eq!(app.model.editor.text(), "x");
    }

    #[tokio::test]
    async fn test_dialog_swallows_keys() {
        let (mut app, _rx) = app();
        app.open_shortcuts();
        handle_key(&mut app, key(KeyCode::Char('q')));
        assert!(app.model.ui.dialog.is_none());
        assert!(!app.has_route());
    }

    #[tokio::test]
    async fn test_import_is_only_offered_from_add_layer_dialog() {
        let (mut app, _rx) = app();
        app.model.compose.map = Some(
            serde_json::from_value(serde_json::json!({ "name": "map1", "workspace": "ws1" }))
                .unwrap(),
        );
        app.model.ui.focus = Focus::Layers;

        handle_key(&mut app, key(KeyCode::Char('i')));
        assert!(!app.has_route());
        assert!(app.model.compose.map.as_ref().unwrap().hidden_layers.is_none());
    }

    #[tokio::test]
    async fn test_quit_commits_exit_route() {
        let (mut app, _rx) = app();
        handle_key(&mut app, key(KeyCode::Char('q')));
        assert!(app.has_route());
    }
}
