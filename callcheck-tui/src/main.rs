//! CallCheck TUI entry point.

use std::fs::OpenOptions;
use std::io::{self, stdout};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::EnvFilter;

use callcheck_core::data::Source;
use callcheck_tui::app::AppState;
use callcheck_tui::{input, ui};

#[derive(Parser)]
#[command(name = "callcheck-tui", about = "Terminal view of market calls vs. prices")]
struct Args {
    /// Prediction config (path or http(s) URL; .toml for TOML)
    #[arg(long, default_value = "config/predictions.json")]
    config: String,

    /// Price snapshot (path or http(s) URL)
    #[arg(long, default_value = "data/prices.json")]
    prices: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging()?;

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let mut app = AppState::new(Source::parse(&args.config), Source::parse(&args.prices));
    app.reload();

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        if !app.running {
            break;
        }
    }
    Ok(())
}

/// Log to the file named by `CALLCHECK_LOG`; stay silent when it is unset so
/// nothing is written over the alternate screen.
fn init_logging() -> Result<()> {
    let Ok(path) = std::env::var("CALLCHECK_LOG") else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {path}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}
