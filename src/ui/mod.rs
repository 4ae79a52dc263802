//! Terminal viewer built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! Shows one compilation side by side: the fuzz-lang source, the flat program
//! list the parser produced, and the generated Rust (or the error that stopped
//! the pipeline). Moving through the program list moves the source cursor and
//! back.
//!
//! - **[`app`]**: state, key handling, the event loop
//! - **[`panes`]**: render functions for each pane and the status bar
//! - **[`theme`]**: the colour palette shared by all panes

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
