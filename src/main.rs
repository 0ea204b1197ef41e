mod cli;
mod config;
mod dispatcher;
mod registry;
mod report;
mod ui;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use crossterm::{
  event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
  execute,
  terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use dispatcher::{ProgressState, SharedProgress};
use ratatui::{backend::CrosstermBackend, Terminal};
use report::{Presenter, Theme};
use std::{io, sync::Arc, time::Duration};

/// Event poll timeout; doubles as the redraw tick while checks run
const POLL_TIMEOUT_MS: u64 = 100;

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  let config = config::Config::load().unwrap_or_default();
  let services = config.registries.enabled();

  // crates.io and GitHub reject requests without a User-Agent
  let client = reqwest::Client::builder()
    .user_agent(concat!("dibs/", env!("CARGO_PKG_VERSION")))
    .build()?;

  let state = ProgressState::shared(services.len());

  if cli.plain || cli.json {
    dispatcher::run_all(client, cli.name.clone(), services, Arc::clone(&state)).await;
    return print_report(&cli, &state).await;
  }

  // Checks run in the background while the UI loop polls shared progress
  tokio::spawn(dispatcher::run_all(
    client,
    cli.name.clone(),
    services,
    Arc::clone(&state),
  ));

  run_tui(&cli.name, state).await
}

async fn print_report(cli: &Cli, state: &SharedProgress) -> Result<()> {
  let progress = state.lock().await;

  if cli.json {
    println!("{}", serde_json::to_string_pretty(progress.results())?);
  } else {
    println!("Checking availability for: {}\n", cli.name);
    let presenter = Presenter::new(Theme::default());
    print!("{}", presenter.render_plain(progress.results()));
  }

  for (service, error) in progress.failures() {
    eprintln!("warning: {} check failed: {}", service, error);
  }
  Ok(())
}

async fn run_tui(name: &str, state: SharedProgress) -> Result<()> {
  // Setup terminal
  enable_raw_mode()?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen)?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend)?;

  let presenter = Presenter::new(Theme::default());
  let res = run_loop(&mut terminal, name, state, &presenter).await;

  // Restore terminal
  disable_raw_mode()?;
  execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
  terminal.show_cursor()?;

  res
}

async fn run_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  name: &str,
  state: SharedProgress,
  presenter: &Presenter,
) -> Result<()> {
  loop {
    // Draw from a consistent snapshot of count and results
    {
      let progress = state.lock().await;
      terminal.draw(|f| ui::render(f, name, &progress, presenter))?;
    }

    // The poll timeout is the redraw tick; a resize just falls through to
    // the next draw. In-flight requests are not cancelled on quit, process
    // exit reclaims the sockets.
    if event::poll(Duration::from_millis(POLL_TIMEOUT_MS))? {
      if let Event::Key(key) = event::read()? {
        if key.kind != KeyEventKind::Press {
          continue;
        }
        match key.code {
          KeyCode::Char('q') | KeyCode::Esc => break,
          KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
          _ => {}
        }
      }
    }
  }

  Ok(())
}
