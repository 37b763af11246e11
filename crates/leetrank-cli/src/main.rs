//! leetrank — entry point.

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use leetrank_cli::cli::{self, output};
use leetrank_cli::config::{ConfigOverrides, TrackerConfig};
use leetrank_cli::logging;

#[derive(Parser)]
#[command(
    name = "leetrank",
    about = "Fetch a LeetCode profile ranking and append it to a local JSON history",
    version,
    after_help = "Run 'leetrank' with no command to fetch and record the current ranking."
)]
struct Cli {
    /// Profile to track (env: LEETRANK_USERNAME).
    #[arg(short, long, global = true)]
    username: Option<String>,

    /// History file (env: LEETRANK_DATA_FILE).
    #[arg(short, long, global = true)]
    data_file: Option<PathBuf>,

    /// GraphQL endpoint (env: LEETRANK_GRAPHQL_URL).
    #[arg(long, global = true)]
    graphql_url: Option<String>,

    /// Profile page URL template, `{username}` is substituted (env: LEETRANK_PROFILE_URL).
    #[arg(long, global = true)]
    profile_url: Option<String>,

    /// Network timeout in seconds (env: LEETRANK_TIMEOUT).
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Output results as JSON (machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = logging::DEFAULT_LOG_LEVEL)]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the current ranking and append it to the history (default).
    Fetch,
    /// List recorded ranking points.
    History {
        /// Show only the most recent N points.
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Show current rank, best rank and days tracked.
    Stats,
    /// Generate shell completion scripts.
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init(&cli.log_level);

    // Set global flags via environment variables so all modules can check them
    if cli.json {
        std::env::set_var(output::ENV_JSON, "1");
    }
    if cli.quiet {
        std::env::set_var(output::ENV_QUIET, "1");
    }

    let config = TrackerConfig::resolve(&ConfigOverrides {
        username: cli.username,
        graphql_url: cli.graphql_url,
        profile_url: cli.profile_url,
        data_file: cli.data_file,
        timeout_secs: cli.timeout,
    });
    tracing::debug!(?config, "resolved configuration");

    let result = match cli.command.unwrap_or(Commands::Fetch) {
        Commands::Fetch => cli::fetch_cmd::run(&config).await,
        Commands::History { limit } => cli::history_cmd::run_history(&config, limit).await,
        Commands::Stats => cli::history_cmd::run_stats(&config).await,
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "leetrank", &mut std::io::stdout());
            Ok(())
        }
    };

    // Consistent exit codes: 0=success, 1=error
    if let Err(e) = &result {
        if output::is_json() {
            output::print_json(&serde_json::json!({
                "error": true,
                "message": format!("{e:#}"),
            }));
        } else if !output::is_quiet() {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(1);
    }

    result
}
