//! Wire-facing domain types.
//!
//! Field names follow the external camelCase contract (`experimentId`,
//! `orderBy`, ...) via serde renames; Rust code uses snake_case throughout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// UTC timestamp used for request deadlines.
pub type Timestamp = DateTime<Utc>;

/// Name of the per-request delivery channel, as seen by clients.
///
/// The `WorkResponse-{uuid}` convention is part of the external contract;
/// internally correlation is done through a typed uuid -> connection map,
/// never by parsing this string back apart.
pub fn response_channel(uuid: &str) -> String {
    format!("WorkResponse-{uuid}")
}

// ---------------------------------------------------------------------------
// WorkRequest
// ---------------------------------------------------------------------------

/// One unit of work a client wants computed.
///
/// Created by the inbound client call, read by the dispatcher, validator and
/// cache gateway, and never mutated. `(experiment_id, body)` plus the
/// process-wide sandbox id determine cache equivalence; `uuid` correlates
/// the eventual result back to the issuing client.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WorkRequest {
    /// Client-generated opaque identifier, also the delivery-channel key.
    #[validate(length(min = 1, message = "uuid must not be empty"))]
    pub uuid: String,

    /// Experiment this work belongs to; part of the cache identity.
    #[validate(length(min = 1, message = "experimentId must not be empty"))]
    pub experiment_id: String,

    /// Free-form task description; part of the cache identity.
    pub body: serde_json::Value,

    /// Absolute deadline. Requests whose deadline has passed at dispatch
    /// time are rejected, never submitted.
    pub timeout: Timestamp,

    /// Optional result-set slicing applied before delivery.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Sort direction for paginated result sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Client-requested slicing/ordering of a result set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Key within each result object to order by. When absent, the incoming
    /// order is preserved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,

    /// Ascending or descending. Ignored when `order_by` is absent.
    #[serde(default)]
    pub order_direction: SortDirection,

    /// Number of leading results to skip.
    #[serde(default)]
    pub offset: usize,

    /// Maximum number of results to return. `None` means "to the end".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

// ---------------------------------------------------------------------------
// WorkResponse
// ---------------------------------------------------------------------------

/// A computed result set, as produced by a worker and as stored in cache.
///
/// The originating request is embedded so the cache key (and the pagination
/// spec) can be re-derived from the response alone — no pending-request
/// table is needed to correlate an asynchronous completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkResponse {
    /// The request this response answers.
    pub request: WorkRequest,

    /// The computed result set, one JSON object per row.
    pub results: Vec<serde_json::Value>,
}
