//! Program pane: one row per node of the flat program list

use super::pane_block;
use crate::codegen::emit::expression;
use crate::parser::ast::{Node, ProgramNode};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Compact one-line rendering of a node
pub fn summarize(node: &Node) -> String {
    match node {
        Node::Let {
            var_name,
            var_type,
            expr,
        } => format!(
            "{} {}: {} = {}",
            node.kind_name(),
            var_name,
            var_type.name(),
            expression(expr)
        ),
        Node::Loop {
            element_name,
            collection_name,
        } => format!("{} {} in {}", node.kind_name(), element_name, collection_name),
        Node::EndLoop => node.kind_name().to_string(),
        Node::Function {
            func_name,
            arg_name,
            input_type,
            output_type,
        } => format!(
            "{} {}({}: {}) -> {}",
            node.kind_name(),
            func_name,
            arg_name,
            input_type,
            output_type
        ),
        Node::Return { expr } | Node::Print { expr } => {
            format!("{} {}", node.kind_name(), expression(expr))
        }
    }
}

/// Render the program list, keeping `selected` in view
pub fn render_program_pane(
    frame: &mut Frame,
    area: Rect,
    nodes: &[ProgramNode],
    selected: usize,
    is_focused: bool,
    scroll: &mut usize,
) {
    let block = pane_block(" Program ", is_focused);
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    if selected < *scroll {
        *scroll = selected;
    } else if selected >= *scroll + visible_height {
        *scroll = selected + 1 - visible_height;
    }

    let rows: Vec<Line> = nodes
        .iter()
        .enumerate()
        .skip(*scroll)
        .take(visible_height)
        .map(|(idx, entry)| {
            let is_selected = idx == selected;
            let marker = if is_selected { "▶" } else { " " };
            let range = format!("{:>3}..{:<3}", entry.tokens.start, entry.tokens.end);

            let mut text_style = Style::default().fg(DEFAULT_THEME.fg);
            if is_selected {
                text_style = text_style
                    .bg(DEFAULT_THEME.current_line_bg)
                    .add_modifier(Modifier::BOLD);
            }

            Line::from(vec![
                Span::styled(
                    format!("{} {:>3} ", marker, idx),
                    Style::default().fg(DEFAULT_THEME.secondary),
                ),
                Span::styled(range, Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(
                    format!(" {:>6} ", entry.location.to_string()),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled(summarize(&entry.node), text_style),
            ])
        })
        .collect();

    let body = if rows.is_empty() {
        vec![Line::from(Span::styled(
            "(no program)",
            Style::default().fg(DEFAULT_THEME.comment),
        ))]
    } else {
        rows
    };

    frame.render_widget(Paragraph::new(body).block(block), area);
}
