//! Opt-in `tracing` setup for dashboards hosting the visualization.
//!
//! Scene rebuilds, lifecycle changes and data-service mutations log at
//! `debug`; hover transitions at `trace`. Nothing is installed unless the host
//! asks for it, and a host with its own subscriber can skip this module.

/// Directive used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "warn,sales_viz3d=info";

/// Installs a compact fmt subscriber filtered by `RUST_LOG` or [`DEFAULT_FILTER`].
///
/// `false` means the `telemetry` feature is off or a global subscriber exists.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter(DEFAULT_FILTER)
}

/// Like [`init_default_tracing`] with a caller-chosen fallback directive.
///
/// `RUST_LOG` still wins when set. An unparsable fallback installs nothing.
#[must_use]
pub fn init_tracing_with_filter(fallback_filter: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => match EnvFilter::try_new(fallback_filter) {
                Ok(filter) => filter,
                Err(_) => return false,
            },
        };

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_filter;
        false
    }
}

#[cfg(all(test, feature = "telemetry"))]
mod tests {
    use tracing_subscriber::EnvFilter;

    use super::DEFAULT_FILTER;

    #[test]
    fn default_filter_is_a_valid_directive() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
    }
}
