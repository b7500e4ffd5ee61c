use tracing_log::LogTracer;
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

use crate::BoxedError;

/// JSON logs filtered by `level`. Records from the `log` crate (teloxide) are forwarded too.
pub fn init(level: &str) -> Result<(), BoxedError> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(level)?)
        .json()
        .with_span_events(FmtSpan::ENTER)
        .log_internal_errors(true)
        .with_line_number(true)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    LogTracer::init()?;

    Ok(())
}
