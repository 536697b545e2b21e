//! Tokyo Night palettes

use ratatui::style::Color;

use super::Theme;

pub const NIGHT: Theme = Theme {
    name: "Tokyo Night",

    bg_primary: Color::Rgb(26, 27, 38), // #1a1b26
    bg_panel: Color::Rgb(36, 40, 59),   // #24283b

    fg_primary: Color::Rgb(192, 202, 245),   // #c0caf5
    fg_secondary: Color::Rgb(169, 177, 214), // #a9b1d6
    fg_muted: Color::Rgb(86, 95, 137),       // #565f89

    option_selected: Color::Rgb(122, 162, 247), // #7aa2f7
    hint: Color::Rgb(125, 207, 255),            // #7dcfff
    worked_step: Color::Rgb(187, 154, 247),     // #bb9af7

    correct: Color::Rgb(158, 206, 106),   // #9ece6a
    incorrect: Color::Rgb(247, 118, 142), // #f7768e
    warning: Color::Rgb(224, 175, 104),   // #e0af68

    border_focused: Color::Rgb(122, 162, 247), // #7aa2f7
};

pub const DAY: Theme = Theme {
    name: "Tokyo Night Day",

    bg_primary: Color::Rgb(225, 226, 231), // #e1e2e7
    bg_panel: Color::Rgb(208, 213, 227),   // #d0d5e3

    fg_primary: Color::Rgb(55, 96, 191),     // #3760bf
    fg_secondary: Color::Rgb(97, 114, 176),  // #6172b0
    fg_muted: Color::Rgb(132, 140, 181),     // #848cb5

    option_selected: Color::Rgb(46, 125, 233), // #2e7de9
    hint: Color::Rgb(0, 113, 151),             // #007197
    worked_step: Color::Rgb(152, 84, 241),     // #9854f1

    correct: Color::Rgb(88, 117, 57),    // #587539
    incorrect: Color::Rgb(245, 42, 101), // #f52a65
    warning: Color::Rgb(140, 108, 62),   // #8c6c3e

    border_focused: Color::Rgb(46, 125, 233), // #2e7de9
};
