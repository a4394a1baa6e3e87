//! Logging setup for the scenario runner.

use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "todo_page=info";

/// Install a stderr fmt subscriber filtered by `RUST_LOG`.
///
/// `verbose` raises the default filter to debug. Returns false if a global
/// subscriber was already installed.
pub fn init(verbose: bool) -> bool {
    let fallback = if verbose { "todo_page=debug" } else { DEFAULT_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_refused() {
        init(false);
        assert!(!init(true));
    }
}
