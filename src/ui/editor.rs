use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use mapcompose::api::StyleMarker;
use mapcompose::logic;
use mapcompose::model::{Focus, Model, StyleStatus};

/// Render the style editor for the active layer
pub fn render_editor(f: &mut Frame, area: Rect, model: &Model) {
    let focused = model.ui.focus == Focus::Editor;
    let dirty = if model.is_editor_clean() { "" } else { " [modified]" };
    let title = match model.compose.active() {
        Some(layer) => format!(" Style: {}{} ", layer.display_title(), dirty),
        None => " Style ".to_string(),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(if focused { Color::Cyan } else { Color::Gray }));

    let placeholder = match &model.compose.style_status {
        StyleStatus::Empty => Some("No layer selected".to_string()),
        StyleStatus::Loading => Some("Loading style...".to_string()),
        StyleStatus::Failed(msg) => Some(format!("Style unavailable: {}", msg)),
        StyleStatus::Ready => None,
    };
    if let Some(text) = placeholder {
        let p = Paragraph::new(text)
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(p, area);
        return;
    }

    let markers: &[StyleMarker] = model
        .compose
        .active_markers()
        .map(|m| m.markers.as_slice())
        .unwrap_or(&[]);

    let inner_height = area.height.saturating_sub(2) as usize;
    let inner_width = area.width.saturating_sub(2) as usize;
    let (cursor_row, cursor_col) = model.editor.cursor();
    let scroll = logic::ui::scroll_offset(cursor_row, inner_height);

    // Display width up to the cursor, so long lines scroll sideways
    let cursor_width = model
        .editor
        .lines()
        .get(cursor_row)
        .map(|line| line.chars().take(cursor_col).collect::<String>().width())
        .unwrap_or(0);
    let hscroll = logic::ui::scroll_offset(cursor_width, inner_width);

    let lines: Vec<Line> = model
        .editor
        .lines()
        .iter()
        .enumerate()
        .skip(scroll)
        .take(inner_height)
        .map(|(row, text)| {
            // Server line numbers are 1-based
            let flagged = markers
                .iter()
                .any(|m| m.line.map(|l| l as usize) == Some(row + 1));
            let style = if flagged {
                Style::default().fg(Color::Red).add_modifier(Modifier::UNDERLINED)
            } else {
                Style::default()
            };
            Line::from(Span::styled(text.clone(), style))
        })
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((0, to_cells(hscroll)));
    f.render_widget(paragraph, area);

    if focused && cursor_row < model.editor.lines().len() {
        let x = (area.x + 1).saturating_add(to_cells(cursor_width - hscroll));
        let y = (area.y + 1).saturating_add(to_cells(cursor_row - scroll));
        if x < area.right() && y < area.bottom() {
            f.set_cursor_position(Position::new(x, y));
        }
    }
}

fn to_cells(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}
