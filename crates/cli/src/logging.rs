//! Logging setup
//!
//! Log lines go to stderr so command output on stdout stays clean. The filter
//! comes from `GUARDPOST_LOG` when set, otherwise from `-v` flags, otherwise
//! from the config file's `log_level`, otherwise `warn`.

use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Environment variable holding a log filter
pub const LOG_ENV: &str = "GUARDPOST_LOG";

/// Filter directive for a verbosity count and optional configured level
pub fn default_directive(verbose: u8, configured: Option<&str>) -> String {
    match verbose {
        0 => configured.unwrap_or("warn").to_string(),
        1 => "info".to_string(),
        _ => "debug".to_string(),
    }
}

/// Install the global subscriber (a second call is a no-op)
pub fn init(verbose: u8, configured: Option<&str>) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, configured)));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(0, None), "warn");
        assert_eq!(default_directive(0, Some("error")), "error");
        assert_eq!(default_directive(1, Some("error")), "info");
        assert_eq!(default_directive(3, None), "debug");
    }
}
