//! Viewer application state and event loop

use crate::driver::Compilation;
use crate::error::CompileError;
use crate::parser::ast::ProgramNode;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use rustc_hash::FxHashMap;
use std::io;
use std::time::Duration;

use super::panes::{self, SourceScrollState};

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Program,
    Output,
}

impl FocusedPane {
    /// Move focus to the next pane (source -> program -> output)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Program,
            FocusedPane::Program => FocusedPane::Output,
            FocusedPane::Output => FocusedPane::Source,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Output,
            FocusedPane::Program => FocusedPane::Source,
            FocusedPane::Output => FocusedPane::Program,
        }
    }
}

/// The viewer state
pub struct App {
    pub source_code: String,
    pub outcome: Result<Compilation, CompileError>,
    pub focused_pane: FocusedPane,

    /// Index into the program list
    pub selected_node: usize,
    /// 1-based line shown as current in the source pane
    pub cursor_line: usize,

    pub source_scroll: SourceScrollState,
    pub program_scroll: usize,
    pub output_scroll: usize,

    /// First node starting on each source line
    line_to_node: FxHashMap<usize, usize>,

    pub should_quit: bool,
    pub status_message: String,
}

impl App {
    pub fn new(source_code: String, outcome: Result<Compilation, CompileError>) -> Self {
        let mut line_to_node = FxHashMap::default();
        if let Ok(compilation) = &outcome {
            for (idx, entry) in compilation.program.nodes.iter().enumerate() {
                line_to_node.entry(entry.location.line).or_insert(idx);
            }
        }

        let status_message = match &outcome {
            Ok(compilation) => format!(
                "{} tokens, {} nodes, {} lines of Rust",
                compilation.tokens.len(),
                compilation.program.len(),
                compilation.rust.lines().count()
            ),
            Err(err) => err.to_string(),
        };

        let mut app = App {
            source_code,
            outcome,
            focused_pane: FocusedPane::Source,
            selected_node: 0,
            cursor_line: 1,
            source_scroll: SourceScrollState::default(),
            program_scroll: 0,
            output_scroll: 0,
            line_to_node,
            should_quit: false,
            status_message,
        };
        app.select_node(0);
        app
    }

    fn nodes(&self) -> &[ProgramNode] {
        match &self.outcome {
            Ok(compilation) => &compilation.program.nodes,
            Err(_) => &[],
        }
    }

    fn error_line(&self) -> Option<usize> {
        self.outcome
            .as_ref()
            .err()
            .and_then(CompileError::location)
            .map(|location| location.line)
    }

    fn select_node(&mut self, idx: usize) {
        if let Some(line) = self.nodes().get(idx).map(|entry| entry.location.line) {
            self.selected_node = idx;
            self.cursor_line = line;
        }
    }

    fn move_cursor_line(&mut self, line: usize) {
        let total = self.source_code.lines().count().max(1);
        self.cursor_line = line.clamp(1, total);
        if let Some(&idx) = self.line_to_node.get(&self.cursor_line) {
            self.selected_node = idx;
        }
    }

    /// Run the viewer until the user quits
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(frame.area());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(main_chunks[0]);

        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(columns[1]);

        let error_line = self.error_line();
        panes::render_source_pane(
            frame,
            columns[0],
            &self.source_code,
            self.cursor_line,
            error_line,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        let nodes: &[ProgramNode] = match &self.outcome {
            Ok(compilation) => &compilation.program.nodes,
            Err(_) => &[],
        };
        panes::render_program_pane(
            frame,
            right_rows[0],
            nodes,
            self.selected_node,
            self.focused_pane == FocusedPane::Program,
            &mut self.program_scroll,
        );

        panes::render_output_pane(
            frame,
            right_rows[1],
            &self.outcome,
            self.focused_pane == FocusedPane::Output,
            &mut self.output_scroll,
        );

        panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.selected_node,
            nodes.len(),
            self.outcome.is_err(),
        );
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Source => self.move_cursor_line(self.cursor_line.saturating_sub(1)),
                FocusedPane::Program => self.select_node(self.selected_node.saturating_sub(1)),
                FocusedPane::Output => self.output_scroll = self.output_scroll.saturating_sub(1),
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Source => self.move_cursor_line(self.cursor_line + 1),
                FocusedPane::Program => self.select_node(self.selected_node + 1),
                FocusedPane::Output => self.output_scroll = self.output_scroll.saturating_add(1),
            },
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CodegenConfig;
    use crate::driver::compile_source;
    use crossterm::event::KeyModifiers;

    const SOURCE: &str = "fuzzy int x = 5;\n\nlabs(x);\nfuzzy float y = 1.5;\n";

    fn app_for(source: &str) -> App {
        let outcome = compile_source(source, &CodegenConfig::default());
        App::new(source.to_string(), outcome)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_focus_cycles() {
        let mut app = app_for(SOURCE);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Program);
        press(&mut app, KeyCode::BackTab);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focused_pane, FocusedPane::Output);
    }

    #[test]
    fn test_program_selection_moves_cursor_line() {
        let mut app = app_for(SOURCE);
        app.focused_pane = FocusedPane::Program;
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected_node, 1);
        assert_eq!(app.cursor_line, 3);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected_node, 2);
    }

    #[test]
    fn test_source_cursor_selects_node_on_line() {
        let mut app = app_for(SOURCE);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.cursor_line, 2);
        assert_eq!(app.selected_node, 0);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.cursor_line, 4);
        assert_eq!(app.selected_node, 2);
    }

    #[test]
    fn test_failed_compilation_reports_error_line() {
        let app = app_for("fuzzy int x = 5;\nlabs(\"x\");\n");
        assert!(app.outcome.is_err());
        assert_eq!(app.error_line(), Some(2));
        assert!(app.status_message.starts_with("Parse error"));
    }

    #[test]
    fn test_quit() {
        let mut app = app_for(SOURCE);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
