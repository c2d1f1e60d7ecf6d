use thiserror::Error;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    #[error("cannot install log subscriber: {0}")]
    Init(#[from] TryInitError),
}

/// Install the console subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_level` (e.g. `info` or
/// `indicators=debug`) is used as the filter directive. Events go to stderr
/// so that tool output on stdout stays clean.
pub fn init_logging(default_level: &str) -> Result<(), LoggingError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_level)?,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    Ok(())
}
