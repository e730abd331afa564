use clap::{Parser, Subcommand};
use nova_release::commands::{self, CommandContext, NotesArgs};
use nova_release::core::error::{ReleaseError, print_error};
use nova_release::core::telemetry::init_tracing;
use std::path::PathBuf;

/// Aggregate tracker tasks into components and gate Nova releases
#[derive(Parser)]
#[command(name = "nova-release")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  /// Config file (default: release.toml, .release.toml or .config/release.toml)
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  /// Log debug diagnostics to stderr
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  // ============================================================================
  // Inspection
  // ============================================================================
  /// Show component statuses and the overall release status
  Status {
    /// Release snapshot (JSON)
    snapshot: PathBuf,
    /// Output status in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Render release notes
  Notes {
    /// Release snapshot (JSON)
    snapshot: PathBuf,
    /// Component to render (substring, or NAME! for an exact match)
    #[arg(short, long)]
    component: Option<String>,
    /// Revision the notes start from
    #[arg(long)]
    from: Option<String>,
    /// Revision the notes end at
    #[arg(long)]
    to: Option<String>,
    /// List tasks, marking those with manual deployment steps
    #[arg(long, conflicts_with = "changelog")]
    preview: bool,
    /// Prepend the component's notes to this changelog
    #[arg(long, requires = "component")]
    changelog: Option<PathBuf>,
  },

  /// List release tags of a component, newest first
  Tags {
    /// Release snapshot (JSON)
    snapshot: PathBuf,
    /// Component whose tags to list
    #[arg(short, long)]
    component: String,
    /// Only tags committed on or after this date (YYYY-MM-DD)
    #[arg(long)]
    since: Option<String>,
    /// Output tags in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Print the artifacts folder name for a release
  Artifacts {
    /// Release snapshot (JSON)
    snapshot: PathBuf,
  },

  // ============================================================================
  // Gating
  // ============================================================================
  /// Fail unless the release, or one component, can be released
  Check {
    /// Release snapshot (JSON)
    snapshot: PathBuf,
    /// Check a single component instead of the whole release
    #[arg(short, long)]
    component: Option<String>,
  },

  /// Print the version following VERSION
  NextVersion {
    /// Current version (e.g. 1.4 or nova-1.4.2)
    #[arg(value_name = "VERSION")]
    current: String,
    /// Bump the patch part instead of the minor part
    #[arg(long)]
    hotfix: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Cyan))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Cyan))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  let ctx = match load_context(&cli) {
    Ok(ctx) => ctx,
    Err(e) => handle_error(e),
  };

  let result = match cli.command {
    Commands::Status { snapshot, json } => commands::run_status(&ctx, &snapshot, json),
    Commands::Notes {
      snapshot,
      component,
      from,
      to,
      preview,
      changelog,
    } => commands::run_notes(
      &ctx,
      &snapshot,
      NotesArgs {
        component,
        from,
        to,
        preview,
        changelog,
      },
    ),
    Commands::Tags {
      snapshot,
      component,
      since,
      json,
    } => commands::run_tags(&ctx, &snapshot, &component, since, json),
    Commands::Artifacts { snapshot } => commands::run_artifacts(&ctx, &snapshot),
    Commands::Check { snapshot, component } => commands::run_check(&ctx, &snapshot, component),
    Commands::NextVersion { current, hotfix } => commands::run_next_version(&current, hotfix),
  };

  if let Err(e) = result {
    handle_error(e);
  }
}

/// next-version needs no config; everything else loads it once here
fn load_context(cli: &Cli) -> Result<CommandContext, ReleaseError> {
  if matches!(cli.command, Commands::NextVersion { .. }) {
    return Ok(CommandContext::default());
  }
  let cwd = std::env::current_dir()?;
  CommandContext::load(cli.config.as_deref(), &cwd)
}

fn handle_error(error: ReleaseError) -> ! {
  print_error(&error);
  std::process::exit(error.exit_code().as_i32());
}
