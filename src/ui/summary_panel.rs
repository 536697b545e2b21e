//! End-of-session topic report

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use super::layout::centered_rect;
use crate::session::{SessionEngine, TopicSummary};
use crate::theme::Theme;

/// Draw the ranked "needs work" table for the finished session
pub fn draw(frame: &mut Frame, area: Rect, engine: &SessionEngine, theme: &Theme) {
    let block = Block::default()
        .title(" Session Summary ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_panel));

    let overlay_area = centered_rect(80, 80, area);
    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    let topics = engine.summary();
    if topics.is_empty() {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "No answers recorded for this session.",
                Style::default().fg(theme.fg_secondary),
            )),
            Line::from(""),
            Line::from(Span::styled("[r] New session", Style::default().fg(theme.fg_muted))),
        ];
        frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), inner);
        return;
    }

    let [table_area, legend_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

    let header = Row::new(["Unit", "Topic", "Answered", "Accuracy", "Hints", "Weakness"])
        .style(Style::default().fg(theme.fg_muted).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = topics.iter().map(|t| topic_row(t, theme)).collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Min(16),
            Constraint::Length(9),
            Constraint::Length(9),
            Constraint::Length(6),
            Constraint::Length(9),
        ],
    )
    .header(header);

    frame.render_widget(table, table_area);

    let legend = Paragraph::new(Line::from(Span::styled(
        "[r] New session    :reset clears history",
        Style::default().fg(theme.fg_muted),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(legend, legend_area);
}

fn topic_row<'a>(topic: &'a TopicSummary, theme: &Theme) -> Row<'a> {
    Row::new(vec![
        Cell::from(topic.unit.as_str()),
        Cell::from(topic.topic.as_str()),
        Cell::from(topic.total.to_string()),
        Cell::from(format_percent(topic.accuracy)),
        Cell::from(topic.hints.to_string()),
        Cell::from(format!("{:.2}", topic.weakness_avg))
            .style(Style::default().fg(theme.weakness_color(topic.weakness_avg))),
    ])
    .style(Style::default().fg(theme.fg_primary))
}

/// Format a ratio in [0, 1] as a whole percentage
pub fn format_percent(ratio: f64) -> String {
    format!("{:.0}%", ratio * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::{Bank, Repository};
    use crate::progress::{FeedbackLog, ProgressStore};
    use ratatui::{Terminal, backend::TestBackend};
    use serde_json::json;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn finished_engine(dir: &TempDir) -> SessionEngine {
        let record = json!({
            "id": "q1",
            "unit": "U1",
            "topic": "Forces",
            "prompt": { "stem": "?", "options": ["a", "b"] },
            "answer": { "mcq_key": "A" }
        });
        let repository =
            Repository::from_banks(vec![Bank { source: PathBuf::from("bank.json"), records: vec![record] }])
                .unwrap();

        let mut engine = SessionEngine::new(ProgressStore::new(dir.path()), FeedbackLog::new(dir.path()))
            .with_session_size(1);
        engine.attach_repository(repository);
        engine.start_session();
        engine.select_option('B');
        engine.submit();
        engine.next_question();
        engine
    }

    fn rendered_rows(terminal: &Terminal<TestBackend>) -> Vec<String> {
        let buffer = terminal.backend().buffer();
        let area = buffer.area;
        (0..area.height)
            .map(|y| (0..area.width).map(|x| buffer[(x, y)].symbol()).collect())
            .collect()
    }

    #[test]
    fn legend_is_drawn_in_full_below_the_table() {
        let dir = TempDir::new().unwrap();
        let engine = finished_engine(&dir);
        assert!(!engine.summary().is_empty());

        let theme = Theme::by_name("Tokyo Night");
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                draw(frame, area, &engine, &theme);
            })
            .unwrap();

        let rows = rendered_rows(&terminal);
        assert!(rows.iter().any(|row| row.contains("[r] New session    :reset clears history")));
        assert!(rows.iter().any(|row| row.contains("Forces")));
    }

    #[test]
    fn percent_rounds_to_whole_numbers() {
        assert_eq!(format_percent(0.0), "0%");
        assert_eq!(format_percent(2.0 / 3.0), "67%");
        assert_eq!(format_percent(1.0), "100%");
    }
}
