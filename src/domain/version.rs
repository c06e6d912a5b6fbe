//! Line-item versions: the unit the resolution engine reasons about.

use crate::domain::Decimal;
use chrono::{DateTime, Utc};

/// Where a version came from.
///
/// An amendment always supersedes a sale once both are in effect, so the
/// origin participates in winner selection, not just bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersionOrigin {
    Sale,
    Amendment,
}

/// One recorded version of a line item's (cost, taxRate) pair.
///
/// `seq` is the insertion sequence assigned while building the version
/// index: strictly increasing across all versions in ingest order (sales
/// first, then amendments). Effective-date comparison is primary; `seq`
/// breaks ties deterministically when two versions share a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineItemVersion {
    pub effective_date: DateTime<Utc>,
    pub cost: Decimal,
    pub tax_rate: Decimal,
    pub origin: VersionOrigin,
    pub seq: u64,
}

impl LineItemVersion {
    /// Tax contributed by this version: cost × rate.
    pub fn tax(&self) -> Decimal {
        self.cost * self.tax_rate
    }

    /// True if this version beats `other` under the (date, seq) ordering.
    ///
    /// Callers only compare versions of the same origin; cross-origin
    /// precedence (amendment over sale) is handled by the resolver.
    pub fn supersedes(&self, other: &LineItemVersion) -> bool {
        (self.effective_date, self.seq) > (other.effective_date, other.seq)
    }
}
