//! As-of-date resolution: pick the single version of each line item that
//! was in effect at the query date.

use crate::domain::{ItemKey, LineItemVersion, VersionOrigin};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

use super::VersionIndex;

/// Resolve the version in effect for every identity at `query_date`.
///
/// Per identity:
/// 1. Versions dated strictly after the query date are inadmissible.
/// 2. With no admissible version, the identity is absent from the result.
/// 3. Any admissible amendment beats every sale, whatever their relative
///    dates: an amendment is a correction, not another sale.
/// 4. Within the winning origin, the latest effective date wins; equal
///    dates fall back to the higher insertion sequence.
pub fn resolve_as_of(
    index: &VersionIndex,
    query_date: DateTime<Utc>,
) -> HashMap<ItemKey, LineItemVersion> {
    let mut resolved = HashMap::with_capacity(index.len());

    for (key, versions) in index.iter() {
        if let Some(winner) = resolve_identity(versions, query_date) {
            resolved.insert(*key, winner);
        }
    }

    resolved
}

fn resolve_identity(
    versions: &[LineItemVersion],
    query_date: DateTime<Utc>,
) -> Option<LineItemVersion> {
    let admissible = versions.iter().filter(|v| v.effective_date <= query_date);

    let mut best_sale: Option<LineItemVersion> = None;
    let mut best_amendment: Option<LineItemVersion> = None;

    for version in admissible {
        let slot = match version.origin {
            VersionOrigin::Sale => &mut best_sale,
            VersionOrigin::Amendment => &mut best_amendment,
        };
        let wins = match slot {
            Some(current) => version.supersedes(current),
            None => true,
        };
        if wins {
            *slot = Some(*version);
        }
    }

    best_amendment.or(best_sale)
}
