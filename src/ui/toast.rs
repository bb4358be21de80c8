use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use mapcompose::model::{Alert, AlertKind};

/// Render the current alert near the top of the screen
pub fn render_alert(f: &mut Frame, area: Rect, alert: &Alert) {
    let max_width = (area.width as usize).min(80);
    let longest = alert
        .details
        .as_deref()
        .and_then(|d| d.lines().map(str::len).max())
        .unwrap_or(0)
        .max(alert.message.len());
    let width = (longest + 6).min(max_width) as u16;
    let detail_lines = alert.details.as_deref().map_or(0, |d| d.lines().count().min(6));
    let height = 3 + detail_lines as u16;

    let toast_area = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + 2,
        width,
        height: height.min(area.height),
    };

    f.render_widget(Clear, toast_area);

    let (icon, color) = match alert.kind {
        AlertKind::Success => ("✓ ", Color::Green),
        AlertKind::Danger => ("✗ ", Color::Red),
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(icon, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::raw(alert.message.clone()),
    ])];
    if let Some(details) = &alert.details {
        lines.extend(
            details
                .lines()
                .take(6)
                .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(Color::Gray)))),
        );
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color).add_modifier(Modifier::BOLD));
    let p = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false });

    f.render_widget(p, toast_area);
}
