use tracing_subscriber::EnvFilter;

use crate::config::LoggingSettings;

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins over the configured level. Supported formats are `json`,
/// `pretty` and `compact`; anything else falls back to the default layout.
/// Returns `false` when a subscriber was already installed.
pub fn init(settings: &LoggingSettings) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match settings.format.as_str() {
        "json" => subscriber.json().try_init().is_ok(),
        "pretty" => subscriber.pretty().try_init().is_ok(),
        "compact" => subscriber.compact().try_init().is_ok(),
        _ => subscriber.try_init().is_ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        let settings = LoggingSettings {
            level: "not a directive ==".to_string(),
            format: "compact".to_string(),
        };
        init(&settings);
        assert!(!init(&settings));
    }
}
