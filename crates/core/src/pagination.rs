//! Result-set pagination.
//!
//! [`apply`] is pure and total: the same `(results, spec)` always yields the
//! same slice, and the input is never mutated — important because the same
//! cached result set may be shared by concurrent requests.

use std::cmp::Ordering;

use crate::types::{Pagination, SortDirection};

/// Slice and order a result set per the client's pagination spec.
///
/// Ordering is applied first (stable sort on the `order_by` key, when one is
/// given), then `offset`/`limit` slicing. Rows missing the sort key order
/// before rows that have it.
pub fn apply(results: &[serde_json::Value], spec: &Pagination) -> Vec<serde_json::Value> {
    let mut rows: Vec<serde_json::Value> = results.to_vec();

    if let Some(key) = spec.order_by.as_deref() {
        rows.sort_by(|a, b| {
            let ordering = compare_values(a.get(key), b.get(key));
            match spec.order_direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }

    let take = spec.limit.unwrap_or(usize::MAX);
    rows.into_iter().skip(spec.offset).take(take).collect()
}

/// Total order over optional JSON values for sorting purposes.
///
/// Absent < null < number < string < everything else (compared by its JSON
/// serialization, so the order is at least deterministic).
fn compare_values(a: Option<&serde_json::Value>, b: Option<&serde_json::Value>) -> Ordering {
    use serde_json::Value;

    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(Value::Null), Some(Value::Null)) => Ordering::Equal,
        (Some(Value::Null), Some(_)) => Ordering::Less,
        (Some(_), Some(Value::Null)) => Ordering::Greater,
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::Number(_)), Some(_)) => Ordering::Less,
        (Some(_), Some(Value::Number(_))) => Ordering::Greater,
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::String(_)), Some(_)) => Ordering::Less,
        (Some(_), Some(Value::String(_))) => Ordering::Greater,
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
    }
}
