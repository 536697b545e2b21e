//! Layout utilities and common components

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::theme::Theme;

/// Draw a centered status message
pub fn draw_message(frame: &mut Frame, area: Rect, message: &str, theme: &Theme) {
    let style = Style::default().fg(theme.fg_muted);
    let text = vec![Line::from(""), Line::from(""), Line::from(Span::styled(message, style))];
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
}

/// Draw the fatal load error screen
pub fn draw_error(frame: &mut Frame, area: Rect, error: &str, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Could not load questions",
            Style::default().fg(theme.incorrect).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(error, Style::default().fg(theme.fg_secondary))),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "Fix the bank files and restart.    [Esc] Quit",
            Style::default().fg(theme.fg_muted),
        )),
    ];

    let para = Paragraph::new(text).alignment(Alignment::Center).wrap(Wrap { trim: true });
    frame.render_widget(para, centered_rect(80, 60, area));
}

/// Create a centered rectangle with the given percentage of width and height
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_is_inside_parent() {
        let parent = Rect::new(0, 0, 100, 50);
        let inner = centered_rect(70, 60, parent);
        assert_eq!(inner.width, 70);
        assert_eq!(inner.height, 30);
        assert_eq!(inner.x, 15);
        assert_eq!(inner.y, 10);
    }
}
