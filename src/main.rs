use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::{io, path::PathBuf};

use mind_pace::app::{handle_input, AppState};
use mind_pace::config::{get_path, AppConfig, TimerParams, CLASSIC_FOCUS_MINUTES, CLASSIC_RELAX_MINUTES};
use mind_pace::logging::init_tracing;
use mind_pace::timer::Moment;
use mind_pace::ui::render_ui;
use mind_pace::Result;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Clone)]
#[command(author, version, about = "☕ mind-pace - Stay focused. Stay productive.")]
struct Args {
    /// Focus length in minutes (fractions and 90s/1m30s forms accepted)
    #[arg(short, long)]
    focus_time: Option<String>,
    /// Relax length in minutes
    #[arg(short, long)]
    relax_time: Option<String>,
    /// Open the timer screen directly
    #[arg(long)]
    skip_home: bool,
    /// Use 25/5 minute defaults instead of 0.5/0.5
    #[arg(long)]
    classic: bool,
    #[arg(short = 't', long)]
    theme: Option<String>,
    /// coffee or egg
    #[arg(long)]
    vessel: Option<String>,
    #[arg(long)]
    tick_ms: Option<u64>,
    /// Settings file (defaults to ./mind-pace/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(long)]
    log_level: Option<String>,
    #[arg(long)]
    log_file: Option<PathBuf>,
    #[arg(long)]
    no_log: bool,
}

// ============================================================================
// Main
// ============================================================================

fn main() -> Result<()> {
    let args = Args::parse();

    if !args.no_log {
        let log_file = args.log_file.clone().unwrap_or_else(|| get_path("mind-pace.log"));
        init_tracing(args.log_level.as_deref(), &log_file)?;
    }

    let config_path = args.config.clone().unwrap_or_else(|| get_path("config.json"));
    let mut config = AppConfig::load_or_default(&config_path);

    // CLI overrides
    if args.classic {
        config.focus_minutes = CLASSIC_FOCUS_MINUTES;
        config.relax_minutes = CLASSIC_RELAX_MINUTES;
    }
    if let Some(t) = args.theme { config.theme = t; }
    if let Some(v) = args.vessel { config.vessel = v; }
    if let Some(ms) = args.tick_ms { config.tick_ms = ms; }
    if args.skip_home { config.skip_home = true; }

    let mut app = AppState::new(&config);
    if config.skip_home || args.focus_time.is_some() || args.relax_time.is_some() {
        app.open_timer(&TimerParams {
            focus_time: args.focus_time,
            relax_time: args.relax_time,
        });
    }
    tracing::info!(theme = %app.theme_name, tick = ?app.tick_period, "starting");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        tracing::error!(%err, "exiting with error");
    }
    res
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        let timeout = app.poll_timeout(Moment::now());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && handle_input(key, app, Moment::now()) {
                    tracing::info!("quit requested");
                    return Ok(());
                }
            }
        }

        app.update(Moment::now());
    }
}
