//! Viewer colour palette

use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    /// Brackets and the status badge
    pub primary: Color,
    /// Line numbers of the cursor line, node indices
    pub secondary: Color,
    /// Comments, token ranges, idle borders
    pub comment: Color,
    pub success: Color,
    pub error: Color,
    pub keyword: Color,
    pub string: Color,
    pub number: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    /// Called names
    pub function: Color,
    /// fuzz-lang type names and their Rust counterparts
    pub type_name: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),
    secondary: Color::Rgb(250, 179, 135),
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    keyword: Color::Rgb(203, 166, 247),
    string: Color::Rgb(166, 227, 161),
    number: Color::Rgb(250, 179, 135),
    border_focused: Color::Rgb(249, 226, 175),
    border_normal: Color::Rgb(88, 91, 112),
    current_line_bg: Color::Rgb(49, 50, 68),
    function: Color::Rgb(249, 226, 175),
    type_name: Color::Rgb(148, 226, 213),
};
