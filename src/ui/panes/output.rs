//! Output pane: generated Rust or the compile error

use super::highlight::{highlight_line, Dialect};
use super::pane_block;
use crate::driver::Compilation;
use crate::error::CompileError;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

pub fn render_output_pane(
    frame: &mut Frame,
    area: Rect,
    outcome: &Result<Compilation, CompileError>,
    is_focused: bool,
    scroll: &mut usize,
) {
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    let (title, lines): (&str, Vec<Line>) = match outcome {
        Ok(compilation) => (
            " Rust ",
            compilation
                .rust
                .lines()
                .map(|line| highlight_line(line, Dialect::Rust))
                .collect(),
        ),
        Err(err) => (
            " Error ",
            vec![Line::from(Span::styled(
                err.to_string(),
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD),
            ))],
        ),
    };

    let max_scroll = lines.len().saturating_sub(visible_height);
    *scroll = (*scroll).min(max_scroll);

    let paragraph = Paragraph::new(lines)
        .block(pane_block(title, is_focused))
        .wrap(Wrap { trim: false })
        .scroll((*scroll as u16, 0));
    frame.render_widget(paragraph, area);
}
