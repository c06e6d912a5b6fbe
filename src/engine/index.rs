//! Version index: every recorded version of every line item, grouped by
//! identity and tagged with an insertion sequence.

use crate::domain::{Amendment, ItemKey, LineItemVersion, SaleEvent, VersionOrigin};
use std::collections::HashMap;

/// All versions ever recorded, grouped by (invoice, item) identity.
///
/// Building the index never drops a version; date filtering happens later
/// in the resolver. Sales are consumed first (in ingest order, items in
/// invoice order), then amendments, with one shared sequence counter, so
/// `seq` totally orders versions by ingestion within each identity.
#[derive(Debug, Default)]
pub struct VersionIndex {
    versions: HashMap<ItemKey, Vec<LineItemVersion>>,
}

impl VersionIndex {
    /// Build the index from the full event history.
    ///
    /// The slices must be in ingest order; the repository guarantees this
    /// by ordering on the persisted insertion id.
    pub fn build(sales: &[SaleEvent], amendments: &[Amendment]) -> Self {
        let mut versions: HashMap<ItemKey, Vec<LineItemVersion>> = HashMap::new();
        let mut seq: u64 = 0;

        for sale in sales {
            for item in &sale.items {
                let key = ItemKey::new(sale.invoice_id, item.item_id);
                versions.entry(key).or_default().push(LineItemVersion {
                    effective_date: sale.date,
                    cost: item.cost,
                    tax_rate: item.tax_rate,
                    origin: VersionOrigin::Sale,
                    seq,
                });
                seq += 1;
            }
        }

        for amendment in amendments {
            let key = ItemKey::new(amendment.invoice_id, amendment.item_id);
            versions.entry(key).or_default().push(LineItemVersion {
                effective_date: amendment.date,
                cost: amendment.cost,
                tax_rate: amendment.tax_rate,
                origin: VersionOrigin::Amendment,
                seq,
            });
            seq += 1;
        }

        VersionIndex { versions }
    }

    /// Iterate identities with their full version lists.
    pub fn iter(&self) -> impl Iterator<Item = (&ItemKey, &[LineItemVersion])> {
        self.versions.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Number of distinct identities in the index.
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}
