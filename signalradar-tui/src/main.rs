//! SignalRadar TUI — ranked signal table with local filters and a chart modal.
//!
//! The core runs network requests on background threads and publishes state
//! transitions to the subscriptions set up in `AppState::new`. This loop
//! redraws when something changed, pumps completions, and polls input.

mod app;
mod input;
mod theme;
mod ui;

use std::fs::{self, File};
use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::EnvFilter;

use signalradar_core::{Radar, RadarConfig};

use crate::app::AppState;

fn main() -> Result<()> {
    let log_path = init_logging()?;

    let config = RadarConfig::load(None).context("loading configuration")?;
    tracing::info!(api_base = %config.api_base, log = %log_path.display(), "starting tui");
    let radar = Radar::connect(&config).context("creating API client")?;

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let mut app = AppState::new(radar);
    app.start();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    let mut dirty = true;
    loop {
        // 1. Render only when state changed.
        if dirty {
            terminal.draw(|f| ui::draw(f, app))?;
            dirty = false;
        }

        // 2. Commit finished requests; subscriptions queue notices.
        if app.tick() {
            dirty = true;
        }

        // 3. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => {
                    input::handle_key(app, key);
                    dirty = true;
                }
                Event::Resize(..) => dirty = true,
                _ => {}
            }
        }

        // 4. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}

/// Log to `<cache_dir>/signalradar/tui.log` so output never hits the terminal.
/// Level comes from `RUST_LOG`, default `info`.
fn init_logging() -> Result<PathBuf> {
    let dir = dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("signalradar");
    fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join("tui.log");
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(path)
}
