//! Internal logging macros.
//!
//! These follow the `otel_debug!` convention: every event carries a `name`,
//! optional `key = value` fields, and the crate name as its target. Without
//! the `internal-logs` feature they expand to nothing observable.

/// Emits a debug event about a conversion policy being applied.
///
/// ```ignore
/// zipkin_debug!(name: "Decoder.SelfAddressDropped", address = "ca");
/// ```
macro_rules! zipkin_debug {
    (name: $name:expr $(,)?) => {
        #[cfg(feature = "internal-logs")]
        {
            tracing::debug!(name: $name, target: env!("CARGO_PKG_NAME"), name = $name);
        }

        #[cfg(not(feature = "internal-logs"))]
        {
            let _ = $name;
        }
    };
    (name: $name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        #[cfg(feature = "internal-logs")]
        {
            tracing::debug!(name: $name, target: env!("CARGO_PKG_NAME"), name = $name, $($key = $value),+);
        }

        #[cfg(not(feature = "internal-logs"))]
        {
            let _ = ($name, $($value),+);
        }
    };
}

pub(crate) use zipkin_debug;
