use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use mapcompose::model::Model;

use super::{dialogs, editor, layer_list, map_bar, toast};

/// Draw the whole compose view
pub fn render(f: &mut Frame, model: &Model) {
    let area = f.area();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(area);

    let main = if model.ui.show_layers {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
            .split(rows[0]);
        layer_list::render_layer_list(f, cols[0], model);
        cols[1]
    } else {
        rows[0]
    };

    editor::render_editor(f, main, model);
    map_bar::render_map_bar(f, rows[1], model);

    if let Some(alert) = model.ui.alerts.first() {
        toast::render_alert(f, area, alert);
    }

    if let Some(dialog) = &model.ui.dialog {
        dialogs::render_dialog(f, dialog, model);
    }
}
