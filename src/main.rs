//! School portal TUI
//!
//! A Ratatui front end for the admissions workflow, document checklist and
//! photo gallery.

mod app;
mod platform;
mod state;
mod ui;

use anyhow::Result;
use app::App;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use school_portal::admissions::SimulatedTransport;
use school_portal::clock::SystemClock;
use school_portal::config::{PortalConfig, CATEGORY_ENV};
use std::fs::{self, OpenOptions};
use std::io;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging to a file; stderr is the alternate screen
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "school_portal=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(log_writer()),
        )
        .init();

    let (config, config_error) = match PortalConfig::load() {
        Ok(config) => (config, None),
        Err(err) => (PortalConfig::default(), Some(err)),
    };
    let transport = Arc::new(SimulatedTransport::new(config.submission_delay()));
    let category = std::env::var(CATEGORY_ENV).ok();

    let mut app = App::new(
        config,
        Arc::new(SystemClock),
        transport,
        category.as_deref(),
    );
    if let Some(err) = config_error {
        app.push_error(format!("{err}. Using default settings."));
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    // Cancel anything still in flight before tearing down
    app.shutdown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

/// Append to the log file, or drop events when it cannot be opened
fn log_writer() -> BoxMakeWriter {
    let file = PortalConfig::log_path().and_then(|path| {
        let parent = path.parent()?;
        fs::create_dir_all(parent).ok()?;
        OpenOptions::new().create(true).append(true).open(&path).ok()
    });
    match file {
        Some(file) => BoxMakeWriter::new(Mutex::new(file)),
        None => BoxMakeWriter::new(io::sink),
    }
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        let term_size = terminal.size()?;
        app.terminal_size = Some((term_size.height, term_size.width));

        if app.in_splash() {
            app.update_splash(term_size.height);
        }

        app.poll_submission();

        terminal.draw(|frame| ui::draw(frame, app))?;

        // Faster polling while something animates (16ms = ~60fps)
        let poll_duration = if app.is_animating() {
            Duration::from_millis(16)
        } else {
            Duration::from_millis(100)
        };

        if event::poll(poll_duration)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        app.register_ctrl_c(Instant::now());
                    } else {
                        app.handle_key(key).await?;
                    }
                }
                Event::Mouse(mouse) => {
                    app.handle_mouse(mouse).await?;
                }
                _ => {}
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}
