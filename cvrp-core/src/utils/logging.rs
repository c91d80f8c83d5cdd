use std::sync::Arc;

/// A logger type which reports progress information of a solve run.
pub type InfoLogger = Arc<dyn Fn(&str) + Send + Sync>;

/// Creates a logger which writes to standard error.
pub fn create_stderr_logger() -> InfoLogger {
    Arc::new(|msg: &str| eprintln!("{msg}"))
}

/// Creates a logger which discards everything.
pub fn create_noop_logger() -> InfoLogger {
    Arc::new(|_: &str| {})
}
