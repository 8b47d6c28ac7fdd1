//! Logging bootstrap
//!
//! Diagnostics go to stderr through `flexi_logger`. `RUST_LOG` wins over the
//! verbosity requested on the command line.

use flexi_logger::{Logger, LoggerHandle};

/// Map `-v` occurrences to a log level
pub fn level_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Start the logger. Keep the returned handle alive for the whole process.
pub fn init_logging(verbose: u8) -> Result<LoggerHandle, String> {
    let level = level_for_verbosity(verbose);
    Logger::try_with_env_or_str(level)
        .map_err(|err| format!("invalid log level `{level}`: {err}"))?
        .log_to_stderr()
        .format(flexi_logger::default_format)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))
}
