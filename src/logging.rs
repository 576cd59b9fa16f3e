use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "kindred=info";

/// Installs the global subscriber. Logs go to stderr so they never mix with
/// the shell's own output. Safe to call more than once.
pub fn init(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
