pub mod build_info;

use tracing_subscriber::{fmt, EnvFilter};

/// Used when `RUST_LOG` is unset: info for this workspace's crates, warn for dependencies.
const DEFAULT_DIRECTIVES: &str = "warn,expense_tracker=info,tracker_core=info,\
tracker_storage_json=info,tracker_config=info,tracker_domain=info";

/// Installs the global fmt subscriber, honouring `RUST_LOG` when it is set.
///
/// Logs go to stderr so scripted stdout stays machine-readable.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter());
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn default_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_DIRECTIVES)
}

