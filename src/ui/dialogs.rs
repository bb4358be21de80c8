use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use mapcompose::api::Map;
use mapcompose::messages::DialogRequest;
use mapcompose::model::{AddLayerPicker, Model};

const SHORTCUTS: &[(&str, &str)] = &[
    ("↑/↓ j/k", "Move layer cursor"),
    ("Enter", "Edit style of layer"),
    ("J / K", "Move layer down / up"),
    ("Space", "Toggle layer visibility"),
    ("z", "Zoom to layer"),
    ("d", "Remove layer from map"),
    ("a", "Add layer"),
    ("r", "Reload layers"),
    ("m", "Map settings"),
    ("w", "View workspace"),
    ("Tab", "Switch layers / editor"),
    ("Ctrl+S", "Save style"),
    ("Ctrl+Z", "Undo edit"),
    ("Ctrl+L", "Toggle layers panel"),
    ("Esc", "Dismiss alert / leave editor"),
    ("q", "Quit"),
];

fn centered(f: &Frame, width: u16, height: u16) -> Rect {
    let area = f.area();
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: (area.width.saturating_sub(width)) / 2,
        y: (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

fn dialog_block(title: &str, color: Color) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title))
        .border_style(Style::default().fg(color))
}

/// Render whichever dialog is open
pub fn render_dialog(f: &mut Frame, dialog: &DialogRequest, model: &Model) {
    match dialog {
        DialogRequest::EditorSave => {
            let layer = model
                .compose
                .active()
                .map(|l| l.display_title().to_string())
                .unwrap_or_default();
            let text = format!(
                "The style for {} has unsaved changes.\n\n\
                 (s)ave  (d)iscard  (Esc) stay",
                layer
            );
            render_prompt(f, dialog.title(), &text, Color::Yellow, 54, 7);
        }
        DialogRequest::RemoveLayer { layer, .. } => {
            let text = format!(
                "Remove layer {} from this map?\n\n\
                 The layer itself is not deleted.\n\n\
                 Continue? (y/n)",
                layer.display_title()
            );
            render_prompt(f, dialog.title(), &text, Color::Red, 50, 9);
        }
        DialogRequest::AddLayer { workspace, .. } => match &model.ui.add_layer {
            Some(picker) => render_add_layer(f, dialog.title(), workspace, picker),
            None => render_prompt(f, dialog.title(), "Loading...", Color::Cyan, 40, 3),
        },
        DialogRequest::MapSettings { map } => render_map_settings(f, dialog.title(), map),
        DialogRequest::Shortcuts => render_shortcuts(f, dialog.title()),
    }
}

fn render_prompt(f: &mut Frame, title: &str, text: &str, color: Color, width: u16, height: u16) {
    let area = centered(f, width, height);
    let prompt = Paragraph::new(text.to_string())
        .block(dialog_block(title, color))
        .style(Style::default().fg(Color::White).bg(Color::Black))
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, area);
    f.render_widget(prompt, area);
}

fn render_add_layer(f: &mut Frame, title: &str, workspace: &str, picker: &AddLayerPicker) {
    let area = centered(f, 60, 20);
    f.render_widget(Clear, area);

    let block = dialog_block(title, Color::Cyan);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let footer_height = 2;
    let list_area = Rect {
        height: inner.height.saturating_sub(footer_height),
        ..inner
    };
    let footer_area = Rect {
        y: inner.y + list_area.height,
        height: inner.height.min(footer_height),
        ..inner
    };

    match &picker.candidates {
        None => {
            f.render_widget(
                Paragraph::new(format!("Loading layers in {}...", workspace)),
                list_area,
            );
        }
        Some(candidates) if candidates.is_empty() => {
            f.render_widget(
                Paragraph::new(format!(
                    "No more layers in {} to add. Press i to import data.",
                    workspace
                ))
                .wrap(Wrap { trim: false }),
                list_area,
            );
        }
        Some(candidates) => {
            let items: Vec<ListItem> = candidates
                .iter()
                .map(|layer| {
                    let kind = layer.layer_type.as_deref().unwrap_or("");
                    ListItem::new(Line::from(vec![
                        Span::raw(layer.display_title().to_string()),
                        Span::styled(format!("  {}", kind), Style::default().fg(Color::DarkGray)),
                    ]))
                })
                .collect();
            let list = List::new(items).highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            );
            let mut state = ListState::default();
            state.select(picker.selected);
            f.render_stateful_widget(list, list_area, &mut state);
        }
    }

    let footer = match (&picker.error, picker.busy) {
        (Some(err), _) => Line::from(Span::styled(err.clone(), Style::default().fg(Color::Red))),
        (None, true) => Line::from("Adding..."),
        (None, false) => Line::from(Span::styled(
            "Enter add   i import data   Esc cancel",
            Style::default().fg(Color::DarkGray),
        )),
    };
    f.render_widget(Paragraph::new(footer), footer_area);
}

fn render_map_settings(f: &mut Frame, title: &str, map: &Map) {
    let mut lines = vec![
        format!("Name:        {}", map.name),
        format!("Workspace:   {}", map.workspace),
        format!("Title:       {}", map.title.as_deref().unwrap_or("")),
        format!("Description: {}", map.description.as_deref().unwrap_or("")),
    ];
    if let Some(proj) = &map.proj {
        lines.push(format!("Projection:  {}", proj.srs));
    }
    if let Some(b) = map.bbox.as_ref().and_then(|b| b.native.as_ref()) {
        lines.push(format!(
            "Bounds:      {:.4}, {:.4}, {:.4}, {:.4}",
            b.west, b.south, b.east, b.north
        ));
    }
    lines.push(format!("Layers:      {}", map.layers.len()));
    lines.push(String::new());
    lines.push("Esc to close".to_string());

    let height = lines.len() as u16 + 2;
    render_prompt(f, title, &lines.join("\n"), Color::Cyan, 64, height);
}

fn render_shortcuts(f: &mut Frame, title: &str) {
    let lines: Vec<Line> = SHORTCUTS
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!("{:<10}", key), Style::default().fg(Color::Yellow)),
                Span::raw(*action),
            ])
        })
        .collect();

    let area = centered(f, 46, lines.len() as u16 + 2);
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines).block(dialog_block(title, Color::Cyan)),
        area,
    );
}
