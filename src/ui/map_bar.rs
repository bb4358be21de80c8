use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use mapcompose::model::Model;

/// Render the map status line at the bottom of the screen
pub fn render_map_bar(f: &mut Frame, area: Rect, model: &Model) {
    let view = &model.compose.map_view;
    let mut spans = vec![];

    let (state, color) = if view.is_rendering {
        ("rendering", Color::Yellow)
    } else {
        ("idle", Color::Green)
    };
    spans.push(Span::styled(format!("Map: {} ", state), Style::default().fg(color)));
    spans.push(Span::raw(format!("| rev {} ", view.revision)));

    let bounds = view
        .bounds
        .as_ref()
        .map(|(bbox, proj)| (bbox.native.as_ref().or(bbox.lonlat.as_ref()), proj));
    if let Some((Some(b), proj)) = bounds {
        let srs = proj.as_ref().map(|p| p.srs.as_str()).unwrap_or("?");
        spans.push(Span::raw(format!(
            "| {:.2},{:.2} {:.2},{:.2} {} ",
            b.west, b.south, b.east, b.north, srs
        )));
    }

    if let Some(bg) = &view.background {
        spans.push(Span::raw(format!("| bg {} ", bg)));
    }

    spans.push(Span::styled(
        "| ? help",
        Style::default().fg(Color::DarkGray),
    ));

    let bar = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Gray)),
    );
    f.render_widget(bar, area);
}
