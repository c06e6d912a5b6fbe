//! Domain primitives: InvoiceId, ItemId and the composite ItemKey.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Invoice identifier. UUIDs on the wire; rejects anything else at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InvoiceId(pub Uuid);

impl InvoiceId {
    pub fn new(id: Uuid) -> Self {
        InvoiceId(id)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for InvoiceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(InvoiceId)
    }
}

/// Line-item identifier, unique within its sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(pub Uuid);

impl ItemId {
    pub fn new(id: Uuid) -> Self {
        ItemId(id)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ItemId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(ItemId)
    }
}

/// Identity of one conceptual line item across its whole version history.
///
/// A typed composite key rather than a joined string, so identifiers can
/// never collide on a delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemKey {
    pub invoice_id: InvoiceId,
    pub item_id: ItemId,
}

impl ItemKey {
    pub fn new(invoice_id: InvoiceId, item_id: ItemId) -> Self {
        ItemKey {
            invoice_id,
            item_id,
        }
    }
}

impl std::fmt::Display for ItemKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.invoice_id, self.item_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_invoice_id_rejects_non_uuid() {
        assert!(InvoiceId::from_str("inv-1").is_err());
        assert!(InvoiceId::from_str("b7aa2cf8-3b2c-4d6e-9f00-1c2d3e4f5a6b").is_ok());
    }

    #[test]
    fn test_item_key_equality_is_componentwise() {
        let inv = InvoiceId::from_str("b7aa2cf8-3b2c-4d6e-9f00-1c2d3e4f5a6b").unwrap();
        let item_a = ItemId::from_str("0e8dd723-71d2-4b0a-8c11-aaaaaaaaaaaa").unwrap();
        let item_b = ItemId::from_str("0e8dd723-71d2-4b0a-8c11-bbbbbbbbbbbb").unwrap();

        assert_eq!(ItemKey::new(inv, item_a), ItemKey::new(inv, item_a));
        assert_ne!(ItemKey::new(inv, item_a), ItemKey::new(inv, item_b));
    }
}
