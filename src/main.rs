// fuzzc: fuzz-lang to Rust compiler

use std::io;
use std::path::PathBuf;

use clap::{ArgGroup, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use fuzzc::config::{Action, CodegenConfig, Config, DEFAULT_OUT_DIR};
use fuzzc::driver;
use fuzzc::ui::App;

#[derive(Parser, Debug)]
#[command(name = "fuzzc", version)]
#[command(about = "Compile fuzz-lang source into Rust")]
#[command(group(ArgGroup::new("action").args(["stdout", "build", "run", "view"])))]
struct Cli {
    /// fuzz-lang source file
    file: PathBuf,

    /// Name of the emitted file and binary (defaults to the input's file stem)
    #[arg(long)]
    program: Option<String>,

    /// Directory for the emitted .rs file and built binary
    #[arg(long, default_value = DEFAULT_OUT_DIR)]
    out_dir: PathBuf,

    /// Spaces per indentation level in the generated code
    #[arg(long, default_value_t = 4)]
    indent: usize,

    /// Print the generated Rust to stdout instead of writing a file
    #[arg(long)]
    stdout: bool,

    /// Compile the generated file with rustc
    #[arg(long)]
    build: bool,

    /// Compile and run the generated program
    #[arg(long)]
    run: bool,

    /// Inspect the compilation in the terminal viewer
    #[arg(long)]
    view: bool,

    /// rustc executable
    #[arg(long, env = "RUSTC", default_value = "rustc")]
    rustc: PathBuf,
}

impl Cli {
    fn into_config(self) -> Config {
        let action = if self.view {
            Action::View
        } else if self.run {
            Action::Run
        } else if self.build {
            Action::Build
        } else if self.stdout {
            Action::Print
        } else {
            Action::Write
        };

        let mut config = Config::for_input(self.file);
        if let Some(program) = self.program {
            config.program = program;
        }
        config.out_dir = self.out_dir;
        config.rustc = self.rustc;
        config.action = action;
        config.codegen = CodegenConfig::with_indent_width(self.indent);
        config
    }
}

/// Log to stderr; `RUST_LOG` overrides the default `info` filter
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    init_logging();
    let config = Cli::parse().into_config();

    let source = match driver::read_input(&config) {
        Ok(source) => source,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    info!("Compiling {}", config.input.display());
    let outcome = driver::compile_source(&source, &config.codegen);

    if config.action == Action::View {
        if let Err(e) = view(source, outcome) {
            error!("Viewer error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    let compilation = match outcome {
        Ok(compilation) => compilation,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = dispatch(&config, &compilation.rust) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn dispatch(config: &Config, rust: &str) -> fuzzc::Result<()> {
    match config.action {
        Action::Print => {
            print!("{}", rust);
            Ok(())
        }
        Action::Write => driver::write_output(config, rust).map(|_| ()),
        Action::Build => {
            let rust_path = driver::write_output(config, rust)?;
            driver::build(config, &rust_path).map(|_| ())
        }
        Action::Run => {
            let rust_path = driver::write_output(config, rust)?;
            let binary = driver::build(config, &rust_path)?;
            driver::run(&binary)
        }
        Action::View => Ok(()),
    }
}

fn view(
    source: String,
    outcome: fuzzc::Result<fuzzc::Compilation>,
) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(source, outcome);
    let res = app.run(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_action_is_write() {
        let cli = Cli::parse_from(["fuzzc", "hello.fuzz"]);
        let config = cli.into_config();
        assert_eq!(config.action, Action::Write);
        assert_eq!(config.program, "hello");
        assert_eq!(config.out_dir, PathBuf::from(DEFAULT_OUT_DIR));
    }

    #[test]
    fn test_flags_map_to_config() {
        let cli = Cli::parse_from([
            "fuzzc",
            "src/demo.fuzz",
            "--run",
            "--program",
            "demo_bin",
            "--indent",
            "2",
            "--rustc",
            "/opt/rustc",
        ]);
        let config = cli.into_config();
        assert_eq!(config.action, Action::Run);
        assert_eq!(config.program, "demo_bin");
        assert_eq!(config.codegen.indent, "  ");
        assert_eq!(config.rustc, PathBuf::from("/opt/rustc"));
    }

    #[test]
    fn test_actions_are_exclusive() {
        assert!(Cli::try_parse_from(["fuzzc", "a.fuzz", "--stdout", "--view"]).is_err());
    }
}
