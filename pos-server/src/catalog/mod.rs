//! Master-data boundary
//!
//! Menu items, sizes, and combos are read-mostly reference data owned by a
//! separate back office. The order workflow only ever reads them through the
//! [`Catalog`] trait; [`InMemoryCatalog`] is the edge-side cache seeded at
//! startup (and directly by tests).

use dashmap::DashMap;
use rust_decimal::Decimal;
use shared::types::{BusinessId, ComboId, ItemId, SizeId};

/// A priced size variant of a menu item
#[derive(Debug, Clone)]
pub struct SizeInfo {
    pub name: String,
    pub price: Decimal,
}

/// One expanded component of a combo
#[derive(Debug, Clone)]
pub struct ComboComponent {
    pub item_id: ItemId,
    pub size_id: Option<SizeId>,
    pub qty: u32,
}

/// Read access to menu master data
///
/// A missing size resolves to no price; money paths treat that as zero,
/// matching how an unpriced line behaves at the till.
pub trait Catalog: Send + Sync {
    fn item_name(&self, business_id: BusinessId, item_id: ItemId) -> Option<String>;

    fn size(&self, business_id: BusinessId, size_id: SizeId) -> Option<SizeInfo>;

    /// Components of a combo; empty means the combo does not exist
    fn combo_components(&self, business_id: BusinessId, combo_id: ComboId) -> Vec<ComboComponent>;
}

/// Price of a line: its size's price, or zero when unpriced
pub fn price_of(
    catalog: &dyn Catalog,
    business_id: BusinessId,
    size_id: Option<SizeId>,
) -> Decimal {
    size_id
        .and_then(|s| catalog.size(business_id, s))
        .map(|s| s.price)
        .unwrap_or(Decimal::ZERO)
}

/// In-memory catalog cache
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    items: DashMap<(BusinessId, ItemId), String>,
    sizes: DashMap<(BusinessId, SizeId), SizeInfo>,
    combos: DashMap<(BusinessId, ComboId), Vec<ComboComponent>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_item(&self, business_id: BusinessId, item_id: ItemId, name: impl Into<String>) {
        self.items.insert((business_id, item_id), name.into());
    }

    pub fn put_size(
        &self,
        business_id: BusinessId,
        size_id: SizeId,
        name: impl Into<String>,
        price: Decimal,
    ) {
        self.sizes.insert(
            (business_id, size_id),
            SizeInfo {
                name: name.into(),
                price,
            },
        );
    }

    pub fn put_combo(
        &self,
        business_id: BusinessId,
        combo_id: ComboId,
        components: Vec<ComboComponent>,
    ) {
        self.combos.insert((business_id, combo_id), components);
    }
}

impl Catalog for InMemoryCatalog {
    fn item_name(&self, business_id: BusinessId, item_id: ItemId) -> Option<String> {
        self.items.get(&(business_id, item_id)).map(|e| e.clone())
    }

    fn size(&self, business_id: BusinessId, size_id: SizeId) -> Option<SizeInfo> {
        self.sizes.get(&(business_id, size_id)).map(|e| e.clone())
    }

    fn combo_components(&self, business_id: BusinessId, combo_id: ComboId) -> Vec<ComboComponent> {
        self.combos
            .get(&(business_id, combo_id))
            .map(|e| e.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::FromPrimitive;

    #[test]
    fn test_item_and_size_lookup() {
        let catalog = InMemoryCatalog::new();
        catalog.put_item(10, 100, "Margherita");
        catalog.put_size(10, 1, "Regular", Decimal::from_f64(9.5).unwrap());

        assert_eq!(catalog.item_name(10, 100).as_deref(), Some("Margherita"));
        assert_eq!(
            catalog.size(10, 1).unwrap().price,
            Decimal::from_f64(9.5).unwrap()
        );

        // Scoped per business
        assert!(catalog.item_name(11, 100).is_none());
        assert!(catalog.size(11, 1).is_none());
    }

    #[test]
    fn test_price_of_missing_size_is_zero() {
        let catalog = InMemoryCatalog::new();
        assert_eq!(price_of(&catalog, 10, None), Decimal::ZERO);
        assert_eq!(price_of(&catalog, 10, Some(99)), Decimal::ZERO);

        catalog.put_size(10, 1, "Large", Decimal::from(12));
        assert_eq!(price_of(&catalog, 10, Some(1)), Decimal::from(12));
    }

    #[test]
    fn test_combo_components() {
        let catalog = InMemoryCatalog::new();
        assert!(catalog.combo_components(10, 5).is_empty());

        catalog.put_combo(
            10,
            5,
            vec![
                ComboComponent {
                    item_id: 100,
                    size_id: Some(1),
                    qty: 1,
                },
                ComboComponent {
                    item_id: 101,
                    size_id: Some(2),
                    qty: 2,
                },
            ],
        );

        let components = catalog.combo_components(10, 5);
        assert_eq!(components.len(), 2);
        assert_eq!(components[1].qty, 2);
    }
}
