// src/main.rs
use ckpool_dashboard::cli::{self, WorkerOptions};
use ckpool_dashboard::dashboard::session;
use ckpool_dashboard::{Board, Config, DashboardError, Presenter, UpdateOutcome, config, utils};
use clap::Parser;
use futures::stream::{self, StreamExt};
use std::io::Write;
use std::time::Duration;
use tokio::io::BufReader;
use tokio::runtime::Runtime;

/// Main entry point
///
/// Parses the command line, initializes logging and configuration, then
/// delegates to the subcommand handler.
fn main() -> Result<(), DashboardError> {
    let cli = cli::Commands::parse();
    utils::init_logging(cli.verbose);

    match cli.action {
        cli::Action::Show(opts) => {
            let config = load_config(&cli.config, &opts.target)?;
            Runtime::new()?.block_on(show(config, opts))
        }
        cli::Action::Watch(opts) => {
            let config = load_config(&cli.config, &opts.target)?;
            Runtime::new()?.block_on(watch(config, opts))
        }
        cli::Action::Interactive(opts) => {
            let mut config = config::load(&cli.config)?;
            if let Some(prefs) = opts.prefs.clone() {
                config.preferences_path = prefs;
            }
            Runtime::new()?.block_on(interactive(config, opts))
        }
        cli::Action::Config(opts) => generate_config(opts),
    }
}

/// Loads the config file and applies the preference-path override
///
/// # Arguments
/// * `path` - Configuration file given by `--config`
/// * `target` - Worker options that may carry a `--prefs` override
///
/// # Returns
/// * `Ok(Config)` - Defaults, file values and the override, in that order
/// * `Err(DashboardError)` - If the file exists but cannot be parsed
fn load_config(path: &std::path::Path, target: &WorkerOptions) -> Result<Config, DashboardError> {
    let mut config = config::load(path)?;
    if let Some(prefs) = &target.prefs {
        config.preferences_path = prefs.clone();
    }
    Ok(config)
}

/// Worker from the command line, else the remembered one
fn resolve_worker(presenter: &Presenter, target: &WorkerOptions) -> Result<String, DashboardError> {
    target
        .worker
        .clone()
        .or_else(|| presenter.initial_input())
        .ok_or_else(|| {
            DashboardError::InputError(
                "no worker address given and none saved; pass --worker".to_string(),
            )
        })
}

/// One update, printed as the board or as JSON
///
/// # Arguments
/// * `config` - Loaded configuration
/// * `opts` - Worker selection and output format
///
/// # Operations
/// 1. Builds the presenter and resolves the worker address
/// 2. Runs a single submit
/// 3. Prints the board, or the report as JSON with `--json`
async fn show(config: Config, opts: cli::ShowOptions) -> Result<(), DashboardError> {
    let presenter = Presenter::from_config(&config)?;
    let worker = resolve_worker(&presenter, &opts.target)?;
    let mut board = Board::new();

    let outcome = presenter.submit(&worker, &mut board).await;
    match (&outcome, opts.json) {
        (UpdateOutcome::Success(report), true) => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        (UpdateOutcome::Failed, true) => {
            println!("{}", serde_json::json!({ "identifier": worker.trim(), "error": "not found" }));
        }
        (_, false) => print!("{}", board),
    }
    Ok(())
}

/// Repeated updates every `interval` seconds until interrupted
///
/// # Arguments
/// * `config` - Loaded configuration
/// * `opts` - Worker selection and refresh interval
///
/// # Operations
/// 1. Resolves the worker address from `--worker` or the saved preference
/// 2. Merges interval ticks with a Ctrl-C listener into one trigger stream
/// 3. Redraws the board after every update
async fn watch(config: Config, opts: cli::WatchOptions) -> Result<(), DashboardError> {
    let presenter = Presenter::from_config(&config)?;
    let worker = resolve_worker(&presenter, &opts.target)?;
    let mut board = Board::new();

    log::info!("Watching '{}' every {}s", worker, opts.interval);
    let ticks = session::interval_triggers(Duration::from_secs(opts.interval.max(1)));
    let triggers = stream::select(ticks, session::quit_on(tokio::signal::ctrl_c()));

    session::run(&presenter, Some(worker), triggers, &mut board, |board, _, _| {
        print!("\x1b[2J\x1b[H{}", board);
        let _ = std::io::stdout().flush();
    })
    .await;
    Ok(())
}

/// Prompt loop: each entered line is a submit
async fn interactive(config: Config, opts: cli::InteractiveOptions) -> Result<(), DashboardError> {
    let presenter = Presenter::from_config(&config)?;
    let initial = presenter.initial_input();
    let mut board = Board::new();

    prompt(initial.as_deref());
    let lines = session::line_triggers(BufReader::new(tokio::io::stdin()));
    let triggers = match opts.refresh {
        Some(secs) => {
            // skip the immediate tick so nothing runs before the first Enter
            let ticks = session::interval_triggers(Duration::from_secs(secs.max(1))).skip(1);
            stream::select(lines, ticks.boxed()).boxed()
        }
        None => lines,
    };

    session::run(&presenter, initial, triggers, &mut board, |board, _, current| {
        print!("{}", board);
        prompt(Some(current));
    })
    .await;
    Ok(())
}

fn prompt(current: Option<&str>) {
    match current {
        Some(current) => print!("worker [{}]> ", current),
        None => print!("worker> "),
    }
    let _ = std::io::stdout().flush();
}

/// Writes the configuration template to `opts.output`
///
/// # Arguments
/// * `opts` - Configuration generation options
///
/// # Operations
/// 1. Renders the template with every key at its default
/// 2. Writes it to the output path
fn generate_config(opts: cli::ConfigOptions) -> Result<(), DashboardError> {
    std::fs::write(&opts.output, config::generate_template())?;
    println!("Wrote {}", opts.output.display());
    Ok(())
}
