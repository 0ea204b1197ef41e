use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "dibs")]
#[command(version)]
#[command(about = "Check whether a package/project name is taken across registries", long_about = None)]
pub struct Cli {
  /// Candidate name, passed to each registry verbatim
  pub name: String,

  /// Skip the TUI and print the final report to stdout
  #[arg(long)]
  pub plain: bool,

  /// Print results as JSON (implies --plain)
  #[arg(long)]
  pub json: bool,
}
