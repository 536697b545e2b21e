//! Question screen

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::layout::centered_rect;
use crate::bank::Question;
use crate::session::SessionEngine;
use crate::text::superscript_exponents;
use crate::theme::Theme;

/// Draw the current question with its options, feedback and revealed hints
pub fn draw(frame: &mut Frame, area: Rect, engine: &SessionEngine, highlighted: usize, theme: &Theme) {
    let Some(question) = engine.current_question() else {
        return;
    };

    let title = format!(" {} \u{00B7} {} ", question.unit, question.topic);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_panel));

    let overlay_area = centered_rect(80, 90, area);
    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    let lines = question_lines(question, engine, highlighted, theme);
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn question_lines<'a>(
    question: &'a Question,
    engine: &SessionEngine,
    highlighted: usize,
    theme: &Theme,
) -> Vec<Line<'a>> {
    let mut lines = vec![
        Line::from(Span::styled(
            format!("Question {} of {}", engine.position() + 1, engine.len()),
            Style::default().fg(theme.fg_muted),
        )),
        Line::from(""),
        Line::from(Span::styled(
            superscript_exponents(&question.prompt.stem),
            Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD),
        )),
    ];

    for asset in &question.prompt.assets {
        lines.push(Line::from(Span::styled(
            format!("[figure: {}]", asset),
            Style::default().fg(theme.fg_muted).add_modifier(Modifier::ITALIC),
        )));
    }
    lines.push(Line::from(""));

    let submitted = engine.is_submitted();
    let selection = engine.selection();

    for (i, (letter, text)) in question.lettered_options().enumerate() {
        let is_selected = selection == Some(letter) || (selection.is_none() && i == highlighted);
        let prefix = if is_selected { "\u{25CF}" } else { "\u{25CB}" }; // ● or ○

        let style = if submitted && question.is_correct(letter) {
            Style::default().fg(theme.correct).add_modifier(Modifier::BOLD)
        } else if submitted && is_selected {
            Style::default().fg(theme.incorrect).add_modifier(Modifier::BOLD)
        } else if is_selected {
            Style::default().fg(theme.option_selected).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.fg_secondary)
        };

        lines.push(Line::from(Span::styled(
            format!("  {} {}) {}", prefix, letter, superscript_exponents(text)),
            style,
        )));
    }

    lines.push(Line::from(""));

    if submitted {
        let verdict = if engine.is_correct() {
            Span::styled("Correct!", Style::default().fg(theme.correct).add_modifier(Modifier::BOLD))
        } else {
            Span::styled(
                format!("Not quite. The answer is {}.", question.answer.mcq_key),
                Style::default().fg(theme.incorrect).add_modifier(Modifier::BOLD),
            )
        };
        lines.push(Line::from(verdict));
        lines.push(Line::from(""));
    }

    let hints = question.socratic_hints.revealed(engine.hint_tier());
    if !hints.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("Hints ({}/3)", engine.hint_tier()),
            Style::default().fg(theme.hint).add_modifier(Modifier::UNDERLINED),
        )));
        for hint in hints {
            let color = if hint.tier == 3 { theme.worked_step } else { theme.hint };
            lines.push(Line::from(Span::styled(
                format!("  \u{2022} {}", superscript_exponents(&hint.text)),
                Style::default().fg(color),
            )));
        }
        lines.push(Line::from(""));
    }

    let keys = if submitted {
        "[Enter/n] Next    [h] Hint"
    } else {
        "[j/k or A-Z] Select    [Enter] Submit    [h] Hint"
    };
    lines.push(Line::from(Span::styled(keys, Style::default().fg(theme.fg_muted))));

    lines
}
