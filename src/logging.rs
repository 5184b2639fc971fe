//! Structured logging initialization for the hexflat CLI.
//!
//! Logs always go to stderr so that documents written to stdout stay clean.

use std::io::{self, IsTerminal};

use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// How log lines are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogStyle {
    /// JSON lines, for robot mode.
    Json,
    /// Colored multi-field lines for interactive terminals.
    Pretty,
    /// Plain compact lines for pipes and files.
    Compact,
}

impl LogStyle {
    /// Pick a style from the output mode and whether stderr is a terminal.
    pub const fn select(robot_mode: bool, stderr_is_tty: bool) -> Self {
        if robot_mode {
            Self::Json
        } else if stderr_is_tty {
            Self::Pretty
        } else {
            Self::Compact
        }
    }
}

/// Default filter directive for a verbosity level.
///
/// `quiet` wins over `verbose`. 0 = warn, 1 = info, 2 = debug, 3+ = trace.
pub const fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "hexflat=error";
    }
    match verbose {
        0 => "hexflat=warn",
        1 => "hexflat=info",
        2 => "hexflat=debug",
        _ => "hexflat=trace",
    }
}

/// Initialize the tracing subscriber based on CLI flags and environment.
///
/// `RUST_LOG` overrides the verbosity-derived filter
/// (e.g. `RUST_LOG=hexflat::scan=trace`).
pub fn init_logging(robot_mode: bool, verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    let base = fmt::layer()
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(io::stderr);

    let registry = tracing_subscriber::registry().with(filter);
    // try_init: tests may have installed a subscriber already.
    let _ = match LogStyle::select(robot_mode, io::stderr().is_terminal()) {
        LogStyle::Json => registry.with(base.json().with_target(true)).try_init(),
        LogStyle::Pretty => registry.with(base.with_target(false)).try_init(),
        LogStyle::Compact => registry
            .with(base.with_ansi(false).with_target(false).compact())
            .try_init(),
    };
}
