//! Diagnostic logging. Records go to stderr so they never mix with the
//! progress output on stdout.

use std::io::Write;

use env_logger::{Env, Target};
use log::LevelFilter;

/// Overrides the level chosen from `--verbose`, using `env_logger` filter syntax
pub const LOG_ENV: &str = "PYPKGKIT_LOG";

/// Default level: warnings only, debug traces with `--verbose`.
pub fn default_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// Initializes the global logger.
pub fn init_logger(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(default_level(verbose))
        .parse_env(Env::new().filter(LOG_ENV))
        .target(Target::Stderr)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
