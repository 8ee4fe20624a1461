//! Common access to stocked, priced records.

use rust_decimal::Decimal;

use bakehouse_core::{StockStatus, SupplierId, Unit};

use super::{Ingredient, Packaging};

/// A record with a stock level and a purchase price.
///
/// Implemented by ingredients and packaging so stock movements and price
/// changes share one code path.
pub trait InventoryItem {
    fn item_id(&self) -> &str;
    fn unit(&self) -> Unit;
    fn current_stock(&self) -> Decimal;
    fn set_current_stock(&mut self, stock: Decimal);
    fn min_stock(&self) -> Decimal;
    fn current_price(&self) -> Decimal;
    fn set_current_price(&mut self, price: Decimal);
    fn supplier_id(&self) -> Option<&SupplierId>;

    fn status(&self) -> StockStatus {
        StockStatus::classify(self.current_stock(), self.min_stock())
    }
}

macro_rules! impl_inventory_item {
    ($ty:ty) => {
        impl InventoryItem for $ty {
            fn item_id(&self) -> &str {
                self.id.as_str()
            }

            fn unit(&self) -> Unit {
                self.unit
            }

            fn current_stock(&self) -> Decimal {
                self.current_stock
            }

            fn set_current_stock(&mut self, stock: Decimal) {
                self.current_stock = stock;
            }

            fn min_stock(&self) -> Decimal {
                self.min_stock
            }

            fn current_price(&self) -> Decimal {
                self.current_price
            }

            fn set_current_price(&mut self, price: Decimal) {
                self.current_price = price;
            }

            fn supplier_id(&self) -> Option<&SupplierId> {
                self.supplier_id.as_ref()
            }
        }
    };
}

impl_inventory_item!(Ingredient);
impl_inventory_item!(Packaging);
