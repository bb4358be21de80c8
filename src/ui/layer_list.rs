use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use mapcompose::model::{Focus, Model};

/// Render the map's layers, top of the list drawn first on the map
pub fn render_layer_list(f: &mut Frame, area: Rect, model: &Model) {
    let focused = model.ui.focus == Focus::Layers;
    let border_color = if focused { Color::Cyan } else { Color::Gray };

    let title = match &model.compose.map {
        Some(map) => format!(" {} ", map.title.as_deref().unwrap_or(&map.name)),
        None => " Loading... ".to_string(),
    };

    let items: Vec<ListItem> = model
        .compose
        .layers()
        .iter()
        .map(|layer| {
            let active = model.compose.is_active(&layer.layer_ref());
            let eye = if layer.visible { "◉ " } else { "○ " };
            let name_style = match (active, layer.visible) {
                (true, _) => Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
                (false, true) => Style::default(),
                (false, false) => Style::default().fg(Color::DarkGray),
            };
            ListItem::new(Line::from(vec![
                Span::styled(eye, Style::default().fg(Color::Green)),
                Span::styled(layer.display_title().to_string(), name_style),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(border_color)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    state.select(model.ui.layer_cursor);
    f.render_stateful_widget(list, area, &mut state);
}
