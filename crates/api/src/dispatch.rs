//! The cache-first work dispatch flow.
//!
//! State machine per request, each terminal state reached exactly once:
//!
//! ```text
//! START -> CACHE_LOOKUP -> DELIVERED            (hit)
//!                       -> VALIDATE -> SUBMITTED (miss, checks pass)
//!                                   -> REJECTED  (miss, checks fail)
//! ```
//!
//! `Submitted` means only "handed to the worker pool": delivery happens
//! later, when (and if) a matching notification arrives. There is no
//! pending-submission table and no cancellation path past submission.

use workbroker_cache::CacheLookup;
use workbroker_core::types::WorkRequest;
use workbroker_core::validate;

use crate::error::AppResult;
use crate::state::AppState;

/// Terminal state of a successful dispatch. Rejections surface as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A cached response was delivered immediately.
    Delivered,
    /// The request was enqueued to the worker pool.
    Submitted,
}

/// Dispatch one inbound work request.
///
/// Tries the cache first; on a hit the cached response is delivered through
/// the correlator with the *current* request's pagination. On a miss the
/// request is validated, gated on its deadline, and submitted to the worker
/// pool.
///
/// A cache-store fault is not a miss: the request is abandoned without a
/// submission, so a degraded store cannot amplify load on the worker pool.
pub async fn dispatch_work_request(
    state: &AppState,
    request: WorkRequest,
) -> AppResult<DispatchOutcome> {
    tracing::debug!(uuid = %request.uuid, "Trying to fetch response to request from cache");

    match state.cache.lookup(&request).await {
        Ok(CacheLookup::Hit(cached)) => {
            tracing::info!(uuid = %request.uuid, "Cache hit, delivering response");
            state
                .correlator
                .deliver(&request.uuid, &cached, request.pagination.as_ref())
                .await;
            Ok(DispatchOutcome::Delivered)
        }

        Ok(CacheLookup::Miss) => {
            tracing::info!(uuid = %request.uuid, "Cache miss, sending request to the worker pool");

            validate::validate_request(&request)?;
            validate::ensure_not_expired_now(&request)?;

            state.queue.submit(&request).await?;
            Ok(DispatchOutcome::Submitted)
        }

        Err(e) => {
            // Not a miss: surfacing the fault without submitting avoids
            // duplicate work against the pool while the store is degraded.
            tracing::error!(
                uuid = %request.uuid,
                error = %e,
                "Cache lookup failed, abandoning request"
            );
            Err(e.into())
        }
    }
}
