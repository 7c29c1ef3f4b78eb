//! Submission API response interpretation
//!
//! The API answers a batch POST in one of two shapes: 200 with a JSON array
//! of per-record acknowledgement tokens, or a rejection status whose body
//! may name offending record indexes. This module turns both shapes into
//! per-record values; nothing here retries or touches the store.

use crate::domain::SubmissionResult;
use chrono::{NaiveDateTime, Utc};
use regex::Regex;

/// Map an HTTP status to the API's documented meaning
///
/// Unknown codes get a generic explanation carrying the raw code.
pub fn explain_status(status: u16) -> String {
    match status {
        204 => "No content".to_string(),
        400 => "Malformed Payload".to_string(),
        401 => "Invalid API token".to_string(),
        403 => "API access disallowed".to_string(),
        413 => "Payload exceeds limit".to_string(),
        429 => "Rate limit exceeded".to_string(),
        other => format!("Unexpected Error: {other}"),
    }
}

/// Whether a rejection status is worth retrying
///
/// Token rejections and rate limits are transient; everything else means
/// the batch itself is wrong and resending it unchanged cannot help.
pub fn is_retryable(status: u16) -> bool {
    matches!(status, 401 | 403 | 429)
}

/// Convert one acknowledgement token into a success outcome
///
/// Tokens decompose as `<date>_<time>_<reference>` with the timestamp
/// formatted `%Y-%m-%d %H:%M:%S%.f`. A token that does not fit still counts
/// as a success; the reference falls back to the raw token and the
/// timestamp to now. One malformed token never fails its batch.
pub fn ack_to_result(token: &str) -> SubmissionResult {
    let parts: Vec<&str> = token.split('_').collect();

    if parts.len() == 3 {
        let stamp = format!("{} {}", parts[0], parts[1]);
        if let Ok(parsed) = NaiveDateTime::parse_from_str(&stamp, "%Y-%m-%d %H:%M:%S%.f") {
            return SubmissionResult::Accepted {
                reference: parts[2].to_string(),
                timestamp: parsed.and_utc(),
            };
        }
    }

    tracing::warn!(token = %token, "Malformed acknowledgement token, using raw token as reference");
    SubmissionResult::Accepted {
        reference: token.to_string(),
        timestamp: Utc::now(),
    }
}

/// Spread a batch-level rejection across the records of the batch
///
/// The API names offending records as bracketed indexes in the response
/// body. Records at named positions get the response detail; the rest
/// carry a generic message. A body naming no indexes blames every record.
///
/// # Arguments
///
/// * `status` - HTTP status the API returned
/// * `detail` - Raw response body
/// * `batch_len` - Number of records in the rejected batch
///
/// # Returns
///
/// One failure message per record, batch-ordered.
pub fn attribute_batch_failure(status: u16, detail: &str, batch_len: usize) -> Vec<String> {
    let explanation = explain_status(status);

    let index_pattern = Regex::new(r"\[(\d+)\]").unwrap();
    let failed_indexes: Vec<usize> = index_pattern
        .captures_iter(detail)
        .filter_map(|caps| caps[1].parse().ok())
        .collect();

    (0..batch_len)
        .map(|i| {
            if failed_indexes.is_empty() || failed_indexes.contains(&i) {
                format!("API error ({status}): {explanation} - {detail}")
            } else {
                format!("API error ({status}): {explanation} - record valid but batch failed")
            }
        })
        .collect()
}
