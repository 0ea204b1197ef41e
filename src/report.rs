//! Final report rendering, for both the TUI view and plain stdout.

use crate::registry::CheckResult;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Styling options handed to the presenter at construction; there is no
/// process-wide style state.
#[derive(Debug, Clone)]
pub struct Theme {
  pub available: Color,
  pub taken: Color,
  pub failure: Color,
  pub glyph_available: &'static str,
  pub glyph_taken: &'static str,
  /// Width of the service-name column
  pub name_width: usize,
  /// The progress bar never renders wider than this
  pub max_width: u16,
}

impl Default for Theme {
  fn default() -> Self {
    Self {
      available: Color::Green,
      taken: Color::Red,
      failure: Color::Yellow,
      glyph_available: "✓",
      glyph_taken: "✗",
      name_width: 12,
      max_width: 80,
    }
  }
}

pub struct Presenter {
  theme: Theme,
}

impl Presenter {
  pub fn new(theme: Theme) -> Self {
    Self { theme }
  }

  pub fn theme(&self) -> &Theme {
    &self.theme
  }

  /// One report line as ratatui text
  pub fn line(&self, result: &CheckResult) -> Line<'static> {
    let (glyph, verdict, color) = self.verdict(result);

    let mut spans = vec![
      Span::styled(
        format!(" {} ", glyph),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
      ),
      Span::styled(
        format!("{:<width$}", result.service, width = self.theme.name_width),
        Style::default().add_modifier(Modifier::BOLD),
      ),
      Span::styled(format!(" {:<10}", verdict), Style::default().fg(color)),
    ];
    if result.taken && !result.url.is_empty() {
      spans.push(Span::styled(
        result.url.clone(),
        Style::default().fg(Color::DarkGray),
      ));
    }
    Line::from(spans)
  }

  /// The whole report as plain text with ANSI colors, one line per result,
  /// in completion order
  pub fn render_plain(&self, results: &[CheckResult]) -> String {
    let mut out = String::new();
    for result in results {
      out.push_str(&self.plain_line(result));
      out.push('\n');
    }
    out
  }

  fn plain_line(&self, result: &CheckResult) -> String {
    let (glyph, verdict, color) = self.verdict(result);
    let mut line = format!(
      "  {}{} {:<width$} {}{}",
      ansi(color),
      glyph,
      result.service,
      verdict,
      ANSI_RESET,
      width = self.theme.name_width,
    );
    if result.taken && !result.url.is_empty() {
      line.push_str("  ");
      line.push_str(&result.url);
    }
    line
  }

  fn verdict(&self, result: &CheckResult) -> (&'static str, &'static str, Color) {
    if result.taken {
      (self.theme.glyph_taken, "Taken", self.theme.taken)
    } else {
      (self.theme.glyph_available, "Available", self.theme.available)
    }
  }
}

const ANSI_RESET: &str = "\x1b[0m";

fn ansi(color: Color) -> &'static str {
  match color {
    Color::Green => "\x1b[32m",
    Color::Red => "\x1b[31m",
    Color::Yellow => "\x1b[33m",
    Color::Blue => "\x1b[34m",
    Color::Cyan => "\x1b[36m",
    _ => "",
  }
}
