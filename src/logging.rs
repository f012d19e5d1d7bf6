use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

/// How much the seeder reports on stderr.
///
/// The default shows only warnings such as ignored duplicate fixture files.
/// `-v` adds one summary line per loaded class, `-vv` adds collection loads
/// and dedup decisions, `-vvv` traces every routed field. `-q` keeps errors
/// only. Variants are ordered from least to most output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    Debug,
    Trace,
}

impl Verbosity {
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            2 => Self::Debug,
            _ => Self::Trace,
        }
    }

    fn to_level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::INFO,
            Self::Debug => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// Directive limited to this crate, so dependencies stay quiet.
    fn to_filter(self) -> String {
        let level = self.to_level();
        format!("docseed={level}")
    }
}

/// Install the global subscriber, writing to stderr. `RUST_LOG` wins over
/// the flag-derived filter when set.
pub fn init(verbosity: Verbosity) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.to_filter()));

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(verbosity >= Verbosity::Debug)
        .with_line_number(verbosity >= Verbosity::Debug)
        .compact();

    match verbosity {
        Verbosity::Quiet => {
            subscriber.with_writer(std::io::sink).init();
        }
        Verbosity::Normal => {
            subscriber.with_writer(std::io::stderr).without_time().init();
        }
        _ => {
            subscriber.with_writer(std::io::stderr).init();
        }
    }
}
