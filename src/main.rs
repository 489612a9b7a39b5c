//! ghi CLI entry point.
//!
//! Parses command-line arguments and dispatches to the appropriate command handler.

use clap::{Parser, Subcommand};
use ghi::commands::{
    comments_command, config_command, issues_command, milestone_command, milestones_command,
    show_command,
};
use ghi::config::load_config;
use ghi::output::{print_error, print_warning};
use ghi::terminal::{self, LayoutWidth};
use ghi::{ColorChoice, Formatter, IssueFilter, IssueQuery, Styler};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Environment variable holding the log filter, e.g. `GHI_LOG=debug`.
const LOG_ENV: &str = "GHI_LOG";

#[derive(Parser)]
#[command(name = "ghi")]
#[command(
    version,
    about = "Render GitHub issues, comments and milestones in the terminal",
    after_help = "EXAMPLES:
    # List issues of one repository
    gh api repos/octo/ghi/issues | ghi issues - --repo octo/ghi

    # Issues assigned to you across repositories
    ghi issues issues.json --user octocat

    # Show an issue with its comments
    ghi show issue.json --comments comments.json

    # Plain output for pipes and logs
    ghi --color never milestones milestones.json"
)]
struct Cli {
    /// When to use color (defaults to the config file, then auto)
    #[arg(long, global = true, value_enum)]
    color: Option<ColorChoice>,

    /// Login of the current user, for @mention highlighting and "you"
    #[arg(long, global = true)]
    user: Option<String>,

    /// Lay out for this many columns instead of the terminal width
    #[arg(long, global = true)]
    width: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List issues from a JSON array (`-` reads stdin)
    Issues {
        file: PathBuf,

        /// Repository the issues belong to (owner/name)
        #[arg(long)]
        repo: Option<String>,

        /// State the issues were filtered by (open, closed, all)
        #[arg(long)]
        state: Option<String>,

        /// Assignee filter: a login, `*` or `none`
        #[arg(long)]
        assignee: Option<String>,

        /// Mention filter: a login
        #[arg(long)]
        mentioned: Option<String>,

        /// Predefined filter for global listings
        #[arg(long, value_enum)]
        filter: Option<IssueFilter>,

        /// Comma-separated label names
        #[arg(long)]
        labels: Option<String>,

        /// Sort field (created, updated, comments)
        #[arg(long)]
        sort: Option<String>,

        /// Ascending instead of descending order
        #[arg(long)]
        reverse: bool,

        /// Show the repository column even for a single repository
        #[arg(long)]
        include_repo: bool,
    },

    /// Show a single issue
    Show {
        file: PathBuf,

        /// JSON array of the issue's comments
        #[arg(long)]
        comments: Option<PathBuf>,
    },

    /// List comments from a JSON array
    Comments { file: PathBuf },

    /// List milestones from a JSON array
    Milestones { file: PathBuf },

    /// Show a single milestone
    Milestone { file: PathBuf },

    /// Show the effective configuration
    Config {
        /// Write the effective configuration to the config file
        #[arg(long)]
        init: bool,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let config = match load_config() {
        Ok(config) => config.with_overrides(cli.user.clone(), cli.color),
        Err(e) => {
            print_error(&e.to_string());
            std::process::exit(1);
        }
    };

    let width = match cli.width {
        Some(0) => {
            print_warning("--width 0 ignored, using the terminal width");
            LayoutWidth::Terminal
        }
        Some(columns) => LayoutWidth::Fixed(columns),
        None => LayoutWidth::Terminal,
    };

    let formatter = Formatter::new(Styler::from_choice(config.color, terminal::is_interactive()))
        .with_current_user(config.user.clone())
        .with_width(width);

    let result = match &cli.command {
        Commands::Issues {
            file,
            repo,
            state,
            assignee,
            mentioned,
            filter,
            labels,
            sort,
            reverse,
            include_repo,
        } => {
            let query = IssueQuery {
                repo: repo.clone(),
                state: state.clone(),
                assignee: assignee.clone(),
                mentioned: mentioned.clone(),
                filter: *filter,
                labels: labels.clone(),
                sort: sort.clone(),
                reverse: *reverse,
            };
            issues_command(&formatter, file, &query, *include_repo)
        }

        Commands::Show { file, comments } => show_command(&formatter, file, comments.as_deref()),

        Commands::Comments { file } => comments_command(&formatter, file),

        Commands::Milestones { file } => milestones_command(&formatter, file),

        Commands::Milestone { file } => milestone_command(&formatter, file),

        Commands::Config { init } => config_command(&config, *init),
    };

    if let Err(e) = result {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}
