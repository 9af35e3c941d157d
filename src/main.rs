// ABOUTME: Main entry point for demo-scheduler with TUI and CLI support
//
// Binary: demo-scheduler
// Usage: demo-scheduler [COMMAND]
// - No command: launches TUI
// - calendar: print a month with bookable days
// - slots: list the times offered on a date

#![allow(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::Backend, prelude::*, Terminal};
use std::{
    io::{self, IsTerminal},
    time::{Duration, Instant},
};

use demo_scheduler::app::{App, AppEvent, EventHandler};
use demo_scheduler::cli;
use demo_scheduler::components::LayoutComponent;
use demo_scheduler::config::AppConfig;

/// Terminal cleanup utility to ensure proper restoration
fn cleanup_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

/// Unified terminal cleanup that works with a terminal instance
fn cleanup_terminal_with_instance<B: Backend + std::io::Write>(
    terminal: &mut Terminal<B>,
) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();
    setup_panic_handler();

    let args = cli::Cli::parse();
    let config = args.load_config()?;

    let result = match &args.command {
        Some(cli::Commands::Calendar(calendar_args)) => {
            cli::calendar::execute(calendar_args, args.format, &config)
        }
        Some(cli::Commands::Slots(slots_args)) => {
            cli::slots::execute(slots_args, args.format, &config)
        }

        // TUI mode (explicit or default)
        Some(cli::Commands::Tui) | None => {
            let today = chrono::Local::now().date_naive();
            let mut app = App::new(config, today);
            let mut layout = LayoutComponent::new();

            // Flush any pending terminal events so a stray keypress doesn't open the modal
            while crossterm::event::poll(Duration::from_millis(10)).unwrap_or(false) {
                let _ = crossterm::event::read();
            }

            run_tui(&mut app, &mut layout).await
        }
    };

    // Ensure terminal is cleaned up on any error
    if result.is_err() {
        cleanup_terminal();
    }

    result
}

async fn run_tui(app: &mut App, layout: &mut LayoutComponent) -> Result<()> {
    // Check if we have a proper TTY
    if !IsTerminal::is_terminal(&io::stdout()) {
        return Err(anyhow::anyhow!(
            "No TTY detected. This application requires a terminal.\n\
             Try running directly in a terminal instead of redirecting output."
        ));
    }

    crossterm::terminal::is_raw_mode_enabled().context("Terminal not compatible")?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Ensure terminal cleanup happens even if there's an error
    let result = run_tui_loop(app, layout, &mut terminal).await;

    if let Err(e) = cleanup_terminal_with_instance(&mut terminal) {
        tracing::error!("Failed to cleanup terminal: {}", e);
        cleanup_terminal();
    }

    result
}

async fn run_tui_loop(
    app: &mut App,
    layout: &mut LayoutComponent,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| {
            layout.render(frame, &app.state);
        })?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if crossterm::event::poll(timeout)? {
            if let Event::Key(key_event) = event::read()? {
                // Windows reports releases too
                if key_event.kind != KeyEventKind::Press {
                    continue;
                }

                if let Some(app_event) = EventHandler::handle_key_event(key_event, &app.state) {
                    let is_submit = app_event == AppEvent::Submit;
                    EventHandler::process_event(app_event, &mut app.state);

                    // Start the submission right away so the busy state renders immediately
                    if is_submit {
                        if let Err(e) = app.tick().await {
                            tracing::error!("Error during immediate tick: {}", e);
                        }
                        last_tick = Instant::now();
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick().await?;
            last_tick = Instant::now();
        }

        if app.state.should_quit {
            break;
        }
    }

    Ok(())
}

fn setup_logging() {
    use std::fs::OpenOptions;
    use tracing_subscriber::prelude::*;

    let log_dir = AppConfig::base_dir()
        .map(|base| base.join("logs"))
        .unwrap_or_else(|_| std::path::PathBuf::from(".demo-scheduler/logs"));

    let _ = std::fs::create_dir_all(&log_dir);

    // Create JSONL log file with timestamp
    let log_file = log_dir.join(format!(
        "demo-scheduler-{}.jsonl",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    ));

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "demo_scheduler=info".into());

    // Logging must never stop the scheduler from starting
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_file) else {
        eprintln!("Could not open log file {}, logging disabled", log_file.display());
        return;
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_writer(file)
                .with_ansi(false),
        )
        .with(filter)
        .init();
}

fn setup_panic_handler() {
    use tracing::error;

    std::panic::set_hook(Box::new(|panic_info| {
        // Ensure terminal is restored before logging the panic
        cleanup_terminal();

        error!("Application panicked: {}", panic_info);
        eprintln!("Application panicked: {}", panic_info);
        eprintln!("Please check the logs for more details.");
    }));
}
