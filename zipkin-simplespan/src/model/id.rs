//! Identifier and timestamp helpers shared by the model and the converter.
use crate::Error;
use opentelemetry::trace::{SpanId, TraceId};

/// Parses a 16 or 32 character hex trace id, as found in Zipkin JSON.
///
/// ```
/// use zipkin_simplespan::model::parse_trace_id;
///
/// assert!(parse_trace_id("216a2aea45d08fc9").is_ok());
/// assert!(parse_trace_id("7180c278b62e8f6a216a2aea45d08fc9").is_ok());
/// assert!(parse_trace_id("216a2aea").is_err());
/// ```
pub fn parse_trace_id(hex: &str) -> Result<TraceId, Error> {
    if !matches!(hex.len(), 16 | 32) || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::InvalidTraceId(hex.to_owned()));
    }
    u128::from_str_radix(hex, 16)
        .map(trace_id_from_u128)
        .map_err(|_| Error::InvalidTraceId(hex.to_owned()))
}

/// Parses a hex span id of at most 16 characters. Shorter ids are left-padded with zeros.
pub fn parse_span_id(hex: &str) -> Result<SpanId, Error> {
    if hex.is_empty() || hex.len() > 16 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::InvalidSpanId(hex.to_owned()));
    }
    u64::from_str_radix(hex, 16)
        .map(span_id_from_u64)
        .map_err(|_| Error::InvalidSpanId(hex.to_owned()))
}

pub(crate) fn trace_id_from_u128(value: u128) -> TraceId {
    TraceId::from_bytes(value.to_be_bytes())
}

pub(crate) fn trace_id_from_halves(high: u64, low: u64) -> TraceId {
    trace_id_from_u128((u128::from(high) << 64) | u128::from(low))
}

/// Splits a trace id into its (high, low) 64-bit halves.
pub(crate) fn trace_id_halves(trace_id: TraceId) -> (u64, u64) {
    let value = u128::from_be_bytes(trace_id.to_bytes());
    ((value >> 64) as u64, value as u64)
}

pub(crate) fn span_id_from_u64(value: u64) -> SpanId {
    SpanId::from_bytes(value.to_be_bytes())
}

pub(crate) fn span_id_to_u64(span_id: SpanId) -> u64 {
    u64::from_be_bytes(span_id.to_bytes())
}

/// 64-bit trace ids are written with 16 characters, 128-bit ones with 32.
pub(crate) fn trace_id_to_hex(trace_id: TraceId) -> String {
    match trace_id_halves(trace_id) {
        (0, low) => format!("{:016x}", low),
        (high, low) => format!("{:016x}{:016x}", high, low),
    }
}

pub(crate) fn span_id_to_hex(span_id: SpanId) -> String {
    format!("{:016x}", span_id_to_u64(span_id))
}

pub(crate) fn duration(start: Option<u64>, finish: Option<u64>) -> Option<u64> {
    finish?.checked_sub(start?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rustfmt::skip]
    fn trace_id_test_data() -> Vec<(&'static str, u64, u64)> {
        vec![
            ("216a2aea45d08fc9", 0, 0x216a_2aea_45d0_8fc9),
            ("7180c278b62e8f6a216a2aea45d08fc9", 0x7180_c278_b62e_8f6a, 0x216a_2aea_45d0_8fc9),
            ("00000000000000010000000000000002", 1, 2),
        ]
    }

    #[test]
    fn test_trace_id() {
        for (hex, high, low) in trace_id_test_data() {
            let trace_id = parse_trace_id(hex).unwrap();
            assert_eq!(trace_id_halves(trace_id), (high, low));
            assert_eq!(trace_id, trace_id_from_halves(high, low));
            assert_eq!(trace_id_to_hex(trace_id), hex);
        }
    }

    #[test]
    fn test_invalid_trace_id() {
        for hex in ["", "42", "216a2aea45d08fc", "not-hex-at-all!!", "7180c278b62e8f6a216a2aea45d08fc9ff"] {
            assert!(
                matches!(parse_trace_id(hex), Err(Error::InvalidTraceId(ref s)) if s == hex),
                "{hex} should be rejected"
            );
        }
    }

    #[test]
    fn test_span_id() {
        assert_eq!(span_id_to_u64(parse_span_id("5b4185666d50f68b").unwrap()), 0x5b41_8566_6d50_f68b);
        assert_eq!(span_id_to_hex(parse_span_id("2a").unwrap()), "000000000000002a");
        assert!(matches!(parse_span_id(""), Err(Error::InvalidSpanId(_))));
        assert!(matches!(parse_span_id("5b4185666d50f68b0"), Err(Error::InvalidSpanId(_))));
        assert!(matches!(parse_span_id("xyz"), Err(Error::InvalidSpanId(_))));
    }

    #[test]
    fn test_duration() {
        assert_eq!(duration(Some(1), Some(3)), Some(2));
        assert_eq!(duration(Some(3), Some(3)), Some(0));
        assert_eq!(duration(Some(3), Some(1)), None);
        assert_eq!(duration(None, Some(1)), None);
        assert_eq!(duration(Some(1), None), None);
    }
}
