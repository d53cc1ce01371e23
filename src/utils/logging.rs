// src/utils/logging.rs
//! Logging configuration
//!
//! Uses `env_logger` with a compact `[ts level module:line] msg` format.
//! Output goes to stderr so that the rendered dashboard on stdout stays clean.

use env_logger::{Builder, Target};
use log::LevelFilter;
use std::env;

/// Initializes the logging subsystem
///
/// `verbosity` maps 0 → warn, 1 → info, 2+ → debug. A set `RUST_LOG`
/// environment variable takes precedence over the verbosity flag.
pub fn init_logging(verbosity: u8) {
    let mut builder = common_log_config();

    if env::var("RUST_LOG").is_ok() {
        builder.parse_env("RUST_LOG");
    } else {
        builder.filter_level(level_for(verbosity));
    }

    // A second init (e.g. from tests) is harmless.
    let _ = builder.try_init();
}

/// Maps the `-v` count to a level filter
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}

fn common_log_config() -> Builder {
    let mut builder = Builder::new();

    builder
        .format(|buf, record| {
            use std::io::Write;
            let ts = buf.timestamp_seconds();
            let level = record.level();
            let module = record.module_path().unwrap_or_default();
            let line = record.line().unwrap_or(0);

            writeln!(
                buf,
                "[{} {} {}:{}] {}",
                ts,
                level,
                module,
                line,
                record.args()
            )
        })
        .target(Target::Stderr);

    builder
}
