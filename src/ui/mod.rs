//! UI rendering components

pub mod command_line;
pub mod layout;
pub mod quiz_panel;
pub mod summary_panel;

use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::Style,
    widgets::Block,
};

use crate::app::state::{AppState, Screen};
use crate::theme::Theme;

/// Main draw function
pub fn draw(frame: &mut Frame, state: &AppState, theme: &Theme) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(theme.bg_primary)), area);

    let [main_area, command_area] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(area);

    match state.screen() {
        Screen::Loading => layout::draw_message(frame, main_area, "Loading question banks...", theme),
        Screen::Error(message) => layout::draw_error(frame, main_area, &message, theme),
        Screen::Question => quiz_panel::draw(frame, main_area, &state.engine, state.highlighted, theme),
        Screen::Summary => summary_panel::draw(frame, main_area, &state.engine, theme),
    }

    command_line::draw(frame, command_area, &state.command_line, theme);
}
