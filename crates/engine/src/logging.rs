use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "parv_engine=debug,parv_shared=info,info";

/// Installs the global subscriber. `RUST_LOG` overrides the default filter,
/// then `LOG_LEVEL` (`INFO`, `DEBUG`, ...). `LOG_FORMAT=json` switches to JSON lines.
pub fn init() {
    let directives = directives(std::env::var("RUST_LOG").ok(), std::env::var("LOG_LEVEL").ok());
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .init();
    }
}

fn directives(rust_log: Option<String>, log_level: Option<String>) -> String {
    let set = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

    set(rust_log)
        .or_else(|| set(log_level).map(|level| match level.to_lowercase().as_str() {
            "warning" => "warn".to_string(),
            "critical" | "fatal" => "error".to_string(),
            other => other.to_string(),
        }))
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rust_log_wins() {
        assert_eq!(
            directives(Some("parv_engine=trace".into()), Some("INFO".into())),
            "parv_engine=trace"
        );
    }

    #[test]
    fn log_level_is_used_without_rust_log() {
        assert_eq!(directives(None, Some("DEBUG".into())), "debug");
        assert_eq!(directives(Some("".into()), Some("INFO".into())), "info");
        assert_eq!(directives(None, Some("WARNING".into())), "warn");
        assert_eq!(directives(None, Some("CRITICAL".into())), "error");
    }

    #[test]
    fn default_filter_when_nothing_set() {
        assert_eq!(directives(None, None), DEFAULT_FILTER);
        assert_eq!(directives(None, Some("  ".into())), DEFAULT_FILTER);
    }
}
