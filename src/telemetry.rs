//! Telemetry helpers for applications embedding `xychart-rs`.
//!
//! The library only emits `tracing` events under the `xychart_rs` target;
//! installing a subscriber is left to the host.

/// Filter directive used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "xychart_rs=info";

/// Filter directive that surfaces every layout pass and axis measurement.
pub const LAYOUT_TRACE_FILTER: &str = "xychart_rs::api=debug,xychart_rs::encoding=trace";

/// Initializes a compact fmt subscriber filtered by `RUST_LOG`, falling back
/// to [`DEFAULT_FILTER`].
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter(None)
}

/// Same as [`init_default_tracing`] with an explicit filter directive that
/// overrides `RUST_LOG`.
#[must_use]
pub fn init_tracing_with_filter(directive: Option<&str>) -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = match directive {
            Some(directive) => EnvFilter::new(directive),
            None => EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        };
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = directive;
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(feature = "telemetry"))]
    #[test]
    fn disabled_feature_never_installs_a_subscriber() {
        assert!(!init_default_tracing());
        assert!(!init_tracing_with_filter(Some(LAYOUT_TRACE_FILTER)));
    }

    #[cfg(feature = "telemetry")]
    #[test]
    fn second_install_is_rejected() {
        let _ = init_tracing_with_filter(Some(LAYOUT_TRACE_FILTER));
        assert!(!init_default_tracing());
    }
}
