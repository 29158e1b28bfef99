//! Logging setup.
//!
//! Log output goes to stderr so stdout carries only guidance text.

use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins over `level` when set. Calling this more than once is
/// harmless; later calls leave the first subscriber in place and return
/// `false`.
pub fn init_logging(level: &str) -> bool {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_is_idempotent() {
        // Another test may have installed a subscriber first; either way the
        // second call must not panic and must report that nothing changed.
        init_logging("debug");
        assert!(!init_logging("info"));
    }
}
