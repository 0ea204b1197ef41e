//! Terminal rendering: a progress gauge while checks are in flight, the
//! final report once every check has completed.

use crate::dispatcher::ProgressState;
use crate::report::Presenter;
use ratatui::{
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  widgets::{Block, Borders, Gauge, List, ListItem, Paragraph},
  Frame,
};

pub fn render(frame: &mut Frame, name: &str, progress: &ProgressState, presenter: &Presenter) {
  let chunks = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(3), // Title
      Constraint::Min(0),    // Gauge or report
      Constraint::Length(1), // Status bar
    ])
    .split(frame.area());

  render_title(frame, name, chunks[0]);

  if progress.is_done() {
    render_report(frame, progress, presenter, chunks[1]);
  } else {
    render_gauge(frame, progress, presenter, chunks[1]);
  }

  render_status_bar(frame, progress, chunks[2]);
}

fn render_title(frame: &mut Frame, name: &str, area: Rect) {
  let title = Paragraph::new(format!("Checking availability for '{}'", name))
    .style(Style::default().add_modifier(Modifier::BOLD))
    .block(Block::default().borders(Borders::ALL).title(" dibs "));
  frame.render_widget(title, area);
}

fn render_gauge(frame: &mut Frame, progress: &ProgressState, presenter: &Presenter, area: Rect) {
  // Cap the bar width however wide the window gets
  let width = area.width.min(presenter.theme().max_width);
  let gauge_area = Rect {
    x: area.x,
    y: area.y,
    width,
    height: area.height.min(3),
  };

  let gauge = Gauge::default()
    .block(Block::default().borders(Borders::ALL).title(" Registries "))
    .gauge_style(Style::default().fg(Color::Cyan))
    .ratio(progress.fraction().clamp(0.0, 1.0))
    .label(format!(
      "{}/{}",
      progress.completed(),
      progress.total()
    ));
  frame.render_widget(gauge, gauge_area);
}

fn render_report(frame: &mut Frame, progress: &ProgressState, presenter: &Presenter, area: Rect) {
  let items: Vec<ListItem> = progress
    .results()
    .iter()
    .map(|result| ListItem::new(presenter.line(result)))
    .collect();

  let list = List::new(items).block(Block::default().borders(Borders::ALL).title(" Results "));
  frame.render_widget(list, area);
}

fn render_status_bar(frame: &mut Frame, progress: &ProgressState, area: Rect) {
  let (msg, style) = if !progress.is_done() {
    (
      "Checking... | q to quit".to_string(),
      Style::default().fg(Color::Yellow),
    )
  } else if !progress.failures().is_empty() {
    (
      format!(
        "Done, {} check(s) failed and are omitted | q to quit",
        progress.failures().len()
      ),
      Style::default().fg(Color::Red),
    )
  } else {
    (
      "Done | q to quit".to_string(),
      Style::default().fg(Color::DarkGray),
    )
  };

  frame.render_widget(Paragraph::new(msg).style(style), area);
}
