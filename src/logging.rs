use tracing::{debug, info};
use tracing_subscriber::fmt;
use tracing_subscriber::EnvFilter;

use crate::error::AgentResult;

/// Default filter when RUST_LOG is not defined
const DEFAULT_FILTER: &str = "collection_agent=info";

/// Initialize the tracing subscriber
///
/// `ansi` toggles color codes; pass `false` when stdout is piped or logs are
/// collected by another process. Calling this more than once is a no-op.
pub fn init_logging(ansi: bool) -> AgentResult<()> {
    init_with_filter(ansi, EnvFilter::try_from_default_env().ok())
}

/// Initialize logging at debug level for this crate unless RUST_LOG says otherwise
pub fn init_verbose_logging(ansi: bool) -> AgentResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("collection_agent=debug"));
    init_with_filter(ansi, Some(filter))
}

fn init_with_filter(ansi: bool, filter: Option<EnvFilter>) -> AgentResult<()> {
    let filter = filter.unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER));

    let result = fmt::Subscriber::builder()
        .with_ansi(ansi)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(ansi)
        .try_init();

    // Already initialized, probably by a test harness or an embedding application
    if result.is_err() {
        debug!("Logger already initialized, keeping existing subscriber");
        return Ok(());
    }

    info!(
        "Collection agent v{} logging initialized",
        env!("CARGO_PKG_VERSION")
    );
    Ok(())
}

/// Log a warning with context and source code location
#[macro_export]
macro_rules! log_warn {
    ($msg:expr, $context:expr) => {
        tracing::warn!("{}: {} (at {}:{})", $context, $msg, file!(), line!())
    };
    ($msg:expr) => {
        tracing::warn!("{} (at {}:{})", $msg, file!(), line!())
    };
}
