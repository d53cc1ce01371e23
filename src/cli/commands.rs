// src/cli/commands.rs
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// ckpool dashboard - best share and block odds for a solo-mining worker
#[derive(Parser, Debug)]
#[command(name = "ckpool-dashboard")]
#[command(version, about, long_about = None)]
pub struct Commands {
    /// Path to configuration file (defaults apply if it does not exist)
    #[arg(short, long, global = true, default_value = "dashboard.toml")]
    pub config: PathBuf,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// The action to perform
    #[command(subcommand)]
    pub action: Action,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Action {
    /// Fetch once and print the dashboard
    Show(ShowOptions),

    /// Refresh the dashboard on an interval
    Watch(WatchOptions),

    /// Prompt for worker addresses; Enter updates
    Interactive(InteractiveOptions),

    /// Generate configuration file template
    Config(ConfigOptions),
}

/// Options shared by every command that talks to the pool
#[derive(Parser, Debug, Clone)]
pub struct WorkerOptions {
    /// Worker address (defaults to the last one used)
    #[arg(short, long)]
    pub worker: Option<String>,

    /// Preference file (overrides config)
    #[arg(long)]
    pub prefs: Option<PathBuf>,
}

/// Options for a one-shot update
#[derive(Parser, Debug)]
pub struct ShowOptions {
    #[command(flatten)]
    pub target: WorkerOptions,

    /// Print the report as JSON instead of the board
    #[arg(long)]
    pub json: bool,
}

/// Options for periodic updates
#[derive(Parser, Debug)]
pub struct WatchOptions {
    #[command(flatten)]
    pub target: WorkerOptions,

    /// Seconds between updates
    #[arg(short, long, default_value_t = 60)]
    pub interval: u64,
}

/// Options for the interactive prompt
#[derive(Parser, Debug)]
pub struct InteractiveOptions {
    /// Preference file (overrides config)
    #[arg(long)]
    pub prefs: Option<PathBuf>,

    /// Also refresh automatically every N seconds
    #[arg(short, long)]
    pub refresh: Option<u64>,
}

/// Options for generating configuration files
#[derive(Parser, Debug)]
pub struct ConfigOptions {
    /// Output file path
    #[arg(short, long, default_value = "dashboard.toml")]
    pub output: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_show_with_global_flags() {
        let cli = Commands::parse_from([
            "ckpool-dashboard",
            "-vv",
            "show",
            "--worker",
            "bc1qabc",
            "--json",
            "--config",
            "alt.toml",
        ]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, PathBuf::from("alt.toml"));
        match cli.action {
            Action::Show(opts) => {
                assert_eq!(opts.target.worker.as_deref(), Some("bc1qabc"));
                assert!(opts.json);
            }
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn watch_defaults_to_one_minute() {
        let cli = Commands::parse_from(["ckpool-dashboard", "watch"]);
        match cli.action {
            Action::Watch(opts) => {
                assert_eq!(opts.interval, 60);
                assert_eq!(opts.target.worker, None);
            }
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn interactive_accepts_refresh() {
        let cli = Commands::parse_from(["ckpool-dashboard", "interactive", "-r", "30"]);
        assert!(matches!(
            cli.action,
            Action::Interactive(InteractiveOptions { refresh: Some(30), .. })
        ));
    }
}
