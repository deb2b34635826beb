// src/main.rs

use clap::Parser;
use color_eyre::eyre::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use std::io::stdout;
use std::process::ExitCode;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;

mod app;
mod cli;
mod config;
mod core;
mod logging;
mod ui;

use app::{App, AppState};
use cli::Args;
use crate::core::error::AnalysisError;
use crate::core::models::AnalysisReport;
use crate::core::scanner::Analyzer;

type AnalysisResult = std::result::Result<AnalysisReport, AnalysisError>;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let args = Args::parse();

    let headless = args.url.is_some();
    let log_path = logging::initialize_logging(headless && args.verbose)?;
    info!(log = %log_path.display(), headless, "url-intel starting.");

    if let Some(target) = args.url.as_deref() {
        return cli::run_headless(&args, target).await;
    }

    run_tui(Analyzer::new(args.analyzer_config())).await?;
    Ok(ExitCode::SUCCESS)
}

async fn run_tui(analyzer: Analyzer) -> Result<()> {
    // --- Setup ---
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;
    enable_raw_mode()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.clear()?;

    let result = event_loop(&mut terminal, analyzer).await;

    // --- Restore Terminal ---
    stdout().execute(LeaveAlternateScreen)?;
    stdout().execute(DisableMouseCapture)?;
    disable_raw_mode()?;
    result
}

async fn event_loop<B: Backend>(terminal: &mut Terminal<B>, analyzer: Analyzer) -> Result<()> {
    let mut app = App::new();
    let (tx, mut rx) = mpsc::channel::<AnalysisResult>(1);

    while !app.should_quit {
        terminal.draw(|frame| ui::render(&mut app, frame))?;

        if event::poll(Duration::from_millis(100))? {
            handle_events(&mut app, &analyzer, &tx)?;
        }

        if let Ok(result) = rx.try_recv() {
            match result {
                Ok(report) => app.set_report(report),
                Err(e) => app.set_failure(e.to_string()),
            }
        }

        app.tick();
    }
    Ok(())
}

/// Single entry point for terminal events.
fn handle_events(
    app: &mut App,
    analyzer: &Analyzer,
    tx: &mpsc::Sender<AnalysisResult>,
) -> Result<()> {
    if let Event::Key(key) = event::read()? {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }
        if app.show_disclaimer {
            match key.code {
                KeyCode::Enter => app.acknowledge_disclaimer(),
                KeyCode::Esc => app.quit(),
                _ => {}
            }
            return Ok(());
        }
        match app.state {
            AppState::Idle => handle_idle_input(app, key.code, analyzer, tx),
            AppState::Finished | AppState::Failed(_) => handle_finished_input(app, key.code),
            AppState::Analyzing => {
                if key.code == KeyCode::Esc {
                    app.quit();
                }
            }
        }
    }
    Ok(())
}

/// Handles typing in the target box.
fn handle_idle_input(
    app: &mut App,
    key_code: KeyCode,
    analyzer: &Analyzer,
    tx: &mpsc::Sender<AnalysisResult>,
) {
    match key_code {
        KeyCode::Esc => app.quit(),
        KeyCode::Char(c) => app.input.push(c),
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Enter => {
            if app.input.trim().is_empty() {
                return;
            }
            app.start_analysis();
            let target = app.target_url();
            let analyzer = analyzer.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = analyzer.analyze(&target).await;
                let _ = tx.send(result).await;
            });
        }
        _ => {}
    }
}

/// Handles navigation once a report (or an error) is displayed.
fn handle_finished_input(app: &mut App, key_code: KeyCode) {
    match key_code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('n') => app.reset(),
        KeyCode::Up => app.select_previous(),
        KeyCode::Down => app.select_next(),
        _ => {}
    }
}
