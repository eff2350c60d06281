//! Request gating: schema contract and expiry deadline.
//!
//! Both checks run on the cache-miss path only. A malformed request that
//! happens to hit cache is still delivered — an explicit trade-off carried
//! over from the upstream contract, not an oversight.

use chrono::Utc;
use validator::Validate;

use crate::error::CoreError;
use crate::types::{Timestamp, WorkRequest};

/// Check the request against its schema contract.
pub fn validate_request(request: &WorkRequest) -> Result<(), CoreError> {
    request
        .validate()
        .map_err(|e| CoreError::Validation(flatten_errors(&e)))
}

/// Fail when the request's deadline is at or before `now`.
///
/// Evaluated at dispatch time, not submission time: a request that waited
/// behind a slow cache lookup can legitimately expire before reaching a
/// worker.
pub fn ensure_not_expired(request: &WorkRequest, now: Timestamp) -> Result<(), CoreError> {
    if request.timeout <= now {
        return Err(CoreError::ExpiredRequest {
            uuid: request.uuid.clone(),
            timeout: request.timeout,
        });
    }
    Ok(())
}

/// Same check against the current instant.
pub fn ensure_not_expired_now(request: &WorkRequest) -> Result<(), CoreError> {
    ensure_not_expired(request, Utc::now())
}

/// Flatten validator's per-field error map into one readable message.
fn flatten_errors(errors: &validator::ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => format!("{field}: {msg}"),
                None => format!("{field}: invalid"),
            })
        })
        .collect();
    parts.sort();
    parts.join("; ")
}
