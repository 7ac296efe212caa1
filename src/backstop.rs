//! Secondary defence against HTTP 429 responses.
//!
//! Pacing keeps the client under the provider's quota, but a 429 can still
//! arrive (clock skew, competing clients on the same token). The transport
//! is expected to sleep for the server-suggested duration and retry the
//! request exactly once; the limiter does not learn from the event.

use tracing::debug;

/// Seconds to wait when the `retry-after` header is missing or malformed.
pub const DEFAULT_RETRY_AFTER: f64 = 2.0;

/// Parse a `retry-after` header value as seconds.
///
/// The provider sends plain seconds, never an HTTP date. Missing,
/// unparsable, negative, or non-finite values fall back to
/// [`DEFAULT_RETRY_AFTER`] as a conservative guess.
pub fn retry_after_secs(header: Option<&str>) -> f64 {
    match header.and_then(|value| value.trim().parse::<f64>().ok()) {
        Some(secs) if secs.is_finite() && secs >= 0.0 => secs,
        _ => {
            debug!(header, "Unusable retry-after header, using default");
            DEFAULT_RETRY_AFTER
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_plain_seconds() {
        assert_eq!(retry_after_secs(Some("2.5")), 2.5);
        assert_eq!(retry_after_secs(Some("0")), 0.0);
        assert_eq!(retry_after_secs(Some(" 3 ")), 3.0);
    }

    #[test]
    fn test_missing_header_uses_default() {
        assert_eq!(retry_after_secs(None), DEFAULT_RETRY_AFTER);
    }

    #[test]
    fn test_malformed_header_uses_default() {
        assert_eq!(retry_after_secs(Some("soon")), DEFAULT_RETRY_AFTER);
        assert_eq!(retry_after_secs(Some("")), DEFAULT_RETRY_AFTER);
        // HTTP dates are not supported by the provider
        assert_eq!(
            retry_after_secs(Some("Wed, 21 Oct 2015 07:28:00 GMT")),
            DEFAULT_RETRY_AFTER
        );
    }

    #[test]
    fn test_nonsense_values_use_default() {
        assert_eq!(retry_after_secs(Some("-1")), DEFAULT_RETRY_AFTER);
        assert_eq!(retry_after_secs(Some("inf")), DEFAULT_RETRY_AFTER);
        assert_eq!(retry_after_secs(Some("NaN")), DEFAULT_RETRY_AFTER);
    }
}
