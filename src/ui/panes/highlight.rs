//! Line-level syntax highlighting shared by the source and output panes
//!
//! A character scanner, not a lexer: it only needs to split words from
//! delimiters and recognise string literals and comments well enough to pick
//! colours. The keyword tables are the only difference between fuzz-lang and
//! Rust.

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

/// Which language a line is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Fuzz,
    Rust,
}

impl Dialect {
    fn comment_prefix(self) -> &'static str {
        match self {
            Dialect::Fuzz => "comment:",
            Dialect::Rust => "//",
        }
    }

    fn is_keyword(self, word: &str) -> bool {
        match self {
            Dialect::Fuzz => matches!(word, "fuzzy" | "labs" | "suzy" | "flabs" | "every" | "in"),
            Dialect::Rust => matches!(word, "fn" | "let" | "for" | "in" | "return"),
        }
    }

    fn is_type(self, word: &str) -> bool {
        match self {
            Dialect::Fuzz => matches!(word, "int" | "float" | "string" | "array"),
            Dialect::Rust => matches!(word, "i32" | "f32" | "str"),
        }
    }
}

pub fn highlight_line(line: &str, dialect: Dialect) -> Line<'static> {
    let mut spans = Vec::new();
    let mut current_word = String::new();
    let mut rest = line;

    while let Some(c) = rest.chars().next() {
        if rest.starts_with(dialect.comment_prefix()) {
            flush_word(&mut spans, &mut current_word, false, dialect);
            spans.push(Span::styled(
                rest.to_string(),
                Style::default().fg(DEFAULT_THEME.comment),
            ));
            return Line::from(spans);
        }

        if c == '"' {
            flush_word(&mut spans, &mut current_word, false, dialect);
            let end = rest[1..].find('"').map_or(rest.len(), |i| i + 2);
            spans.push(Span::styled(
                rest[..end].to_string(),
                Style::default().fg(DEFAULT_THEME.string),
            ));
            rest = &rest[end..];
            continue;
        }

        if c.is_alphanumeric() || c == '_' || (c == '.' && is_number(&current_word)) {
            current_word.push(c);
        } else {
            flush_word(&mut spans, &mut current_word, c == '(', dialect);
            let style = match c {
                '{' | '}' | '(' | ')' | '[' | ']' => Style::default().fg(DEFAULT_THEME.primary),
                _ => Style::default().fg(DEFAULT_THEME.fg),
            };
            spans.push(Span::styled(c.to_string(), style));
        }
        rest = &rest[c.len_utf8()..];
    }

    flush_word(&mut spans, &mut current_word, false, dialect);
    Line::from(spans)
}

fn is_number(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_digit() || c == '.')
}

fn flush_word(spans: &mut Vec<Span<'static>>, word: &mut String, is_call: bool, dialect: Dialect) {
    if word.is_empty() {
        return;
    }

    let style = if dialect.is_keyword(word) {
        Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD)
    } else if dialect.is_type(word) {
        Style::default().fg(DEFAULT_THEME.type_name)
    } else if is_number(word) {
        Style::default().fg(DEFAULT_THEME.number)
    } else if is_call {
        Style::default().fg(DEFAULT_THEME.function)
    } else {
        Style::default().fg(DEFAULT_THEME.fg)
    };

    spans.push(Span::styled(std::mem::take(word), style));
}
