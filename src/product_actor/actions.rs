use crate::domain::Product;
use crate::error::ProductError;

/// Stock movements caused by orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockAction {
    /// Takes units out of stock for a new or enlarged order.
    ///
    /// # Errors
    /// Will fail if the requested amount exceeds available stock.
    Reserve(u32),
    /// Puts units back, e.g. when an order is deleted or shrunk.
    Release(u32),
}

impl StockAction {
    /// Action that moves stock from `old` reserved units to `new` reserved units.
    pub fn for_change(old: u32, new: u32) -> Option<Self> {
        match new.cmp(&old) {
            std::cmp::Ordering::Greater => Some(StockAction::Reserve(new - old)),
            std::cmp::Ordering::Less => Some(StockAction::Release(old - new)),
            std::cmp::Ordering::Equal => None,
        }
    }
}

impl Product {
    /// Copy of this product with the action applied to its stock.
    pub fn apply_stock(&self, action: StockAction) -> Result<Product, ProductError> {
        let stock = match action {
            StockAction::Reserve(amount) => self.stock.checked_sub(amount).ok_or(
                ProductError::InsufficientStock { requested: amount, available: self.stock },
            )?,
            StockAction::Release(amount) => self.stock.checked_add(amount).ok_or(
                ProductError::StockOverflow { stock: self.stock, released: amount },
            )?,
        };
        Ok(Product { stock, ..self.clone() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserve_decrements_stock() {
        let product = Product::new(1, "Lamp", 100.0, 10);
        assert_eq!(product.apply_stock(StockAction::Reserve(3)).unwrap().stock, 7);
        assert_eq!(product.apply_stock(StockAction::Reserve(10)).unwrap().stock, 0);
    }

    #[test]
    fn reserve_beyond_stock_fails() {
        let product = Product::new(1, "Lamp", 100.0, 2);
        assert_eq!(
            product.apply_stock(StockAction::Reserve(3)),
            Err(ProductError::InsufficientStock { requested: 3, available: 2 })
        );
    }

    #[test]
    fn release_increments_stock() {
        let product = Product::new(1, "Lamp", 100.0, 5);
        assert_eq!(product.apply_stock(StockAction::Release(2)).unwrap().stock, 7);
    }

    #[test]
    fn change_maps_to_action() {
        assert_eq!(StockAction::for_change(2, 5), Some(StockAction::Reserve(3)));
        assert_eq!(StockAction::for_change(5, 2), Some(StockAction::Release(3)));
        assert_eq!(StockAction::for_change(4, 4), None);
    }
}
