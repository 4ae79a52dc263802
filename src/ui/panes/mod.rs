//! Pane rendering for the viewer
//!
//! - [`source`]: the fuzz-lang input with the selected line marked
//! - [`program`]: the flat program list with token ranges
//! - [`output`]: the generated Rust, or the error that stopped compilation
//! - [`status`]: key bindings and a one-line message
//!
//! Each pane exposes one `render_*` function; scroll state lives in the app.

mod highlight;

pub mod output;
pub mod program;
pub mod source;
pub mod status;

pub use output::render_output_pane;
pub use program::render_program_pane;
pub use source::{render_source_pane, SourceScrollState};
pub use status::render_status_bar;

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    style::{Modifier, Style},
    widgets::{Block, Borders},
};

/// Bordered block whose border colour follows focus
fn pane_block(title: &str, is_focused: bool) -> Block<'_> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}
