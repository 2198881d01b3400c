//! 购物车
//!
//! 会话内的可变订单内容。每个菜品最多一行，行按插入顺序保存。
//! 数量降到 0 时该行被删除；总价按需从行计算，从不存储。

use rust_decimal::Decimal;
use shared::models::{CartLineView, CartSnapshot, MenuItem};
use thiserror::Error;

use crate::utils::AppError;
use crate::utils::money::{MAX_QUANTITY, line_total, to_f64};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CartError {
    #[error("quantity must be positive, got {0}")]
    InvalidQuantity(u32),

    #[error("quantity for {item_id} would exceed maximum allowed ({max})")]
    QuantityLimit { item_id: String, max: u32 },

    #[error("item {0} is not in the cart")]
    NotInCart(String),
}

impl From<CartError> for AppError {
    fn from(err: CartError) -> Self {
        match &err {
            CartError::InvalidQuantity(q) => {
                AppError::with_message(shared::ErrorCode::QuantityOutOfRange, err.to_string())
                    .with_detail("quantity", *q)
            }
            CartError::QuantityLimit { item_id, max } => {
                AppError::with_message(shared::ErrorCode::QuantityOutOfRange, err.to_string())
                    .with_detail("item_id", item_id.clone())
                    .with_detail("max", *max)
            }
            CartError::NotInCart(id) => AppError::cart_item_not_found(id.clone()),
        }
    }
}

/// 购物车行：菜品 + 数量 (≥ 1)
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub item: MenuItem,
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total(&self) -> Decimal {
        line_total(self.item.price, self.quantity)
    }

    fn view(&self) -> CartLineView {
        CartLineView {
            item_id: self.item.id.clone(),
            name: self.item.name.clone(),
            unit_price: self.item.price,
            quantity: self.quantity,
            line_total: to_f64(self.line_total()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// 增加数量或插入新行，返回该行新数量
    pub fn add_item(&mut self, item: &MenuItem, quantity: u32) -> Result<u32, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity(quantity));
        }

        let current = self.quantity_of(&item.id);
        let next = current
            .checked_add(quantity)
            .filter(|q| *q <= MAX_QUANTITY)
            .ok_or_else(|| CartError::QuantityLimit {
                item_id: item.id.clone(),
                max: MAX_QUANTITY,
            })?;

        match self.lines.iter_mut().find(|l| l.item.id == item.id) {
            Some(line) => line.quantity = next,
            None => self.lines.push(CartLine {
                item: item.clone(),
                quantity: next,
            }),
        }
        Ok(next)
    }

    /// 数量减一，降到 0 时删除该行；返回剩余数量
    pub fn remove_one(&mut self, item_id: &str) -> Result<u32, CartError> {
        let idx = self
            .lines
            .iter()
            .position(|l| l.item.id == item_id)
            .ok_or_else(|| CartError::NotInCart(item_id.to_string()))?;

        let line = &mut self.lines[idx];
        if line.quantity > 1 {
            line.quantity -= 1;
            Ok(line.quantity)
        } else {
            self.lines.remove(idx);
            Ok(0)
        }
    }

    /// 整行移除
    pub fn evict(&mut self, item_id: &str) -> Option<CartLine> {
        let idx = self.lines.iter().position(|l| l.item.id == item_id)?;
        Some(self.lines.remove(idx))
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn quantity_of(&self, item_id: &str) -> u32 {
        self.lines
            .iter()
            .find(|l| l.item.id == item_id)
            .map(|l| l.quantity)
            .unwrap_or(0)
    }

    pub fn contains(&self, item_id: &str) -> bool {
        self.lines.iter().any(|l| l.item.id == item_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// 不同菜品的行数
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// 所有行数量之和
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Σ price × quantity
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            lines: self.lines.iter().map(CartLine::view).collect(),
            subtotal: to_f64(self.total()),
            item_count: self.item_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_item(id: &str, name: &str, price: f64) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            price,
            image: None,
            food_info: None,
        }
    }

    #[test]
    fn test_add_inserts_then_increments() {
        let mut cart = Cart::new();
        let item = create_test_item("app1", "Bruschetta", 8.0);

        assert_eq!(cart.add_item(&item, 2).unwrap(), 2);
        assert_eq!(cart.add_item(&item, 2).unwrap(), 4);
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total(), Decimal::from(32));
    }

    #[test]
    fn test_add_zero_rejected() {
        let mut cart = Cart::new();
        let item = create_test_item("app1", "Bruschetta", 8.0);
        assert_eq!(cart.add_item(&item, 0), Err(CartError::InvalidQuantity(0)));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_over_limit_rejected() {
        let mut cart = Cart::new();
        let item = create_test_item("side4", "French Fries", 5.0);
        cart.add_item(&item, MAX_QUANTITY).unwrap();
        assert!(matches!(
            cart.add_item(&item, 1),
            Err(CartError::QuantityLimit { .. })
        ));
        assert_eq!(cart.quantity_of("side4"), MAX_QUANTITY);
    }

    #[test]
    fn test_remove_one_decrements_and_deletes() {
        let mut cart = Cart::new();
        let item = create_test_item("app1", "Bruschetta", 8.0);
        cart.add_item(&item, 3).unwrap();

        assert_eq!(cart.remove_one("app1").unwrap(), 2);
        assert_eq!(cart.remove_one("app1").unwrap(), 1);
        assert_eq!(cart.remove_one("app1").unwrap(), 0);
        assert!(cart.is_empty());
        assert_eq!(
            cart.remove_one("app1"),
            Err(CartError::NotInCart("app1".into()))
        );
    }

    #[test]
    fn test_add_then_remove_restores_cart() {
        let mut cart = Cart::new();
        let a = create_test_item("app1", "Bruschetta", 8.0);
        let b = create_test_item("main1", "Grilled Salmon", 22.0);
        cart.add_item(&a, 1).unwrap();
        let before = cart.clone();

        cart.add_item(&b, 2).unwrap();
        cart.remove_one("main1").unwrap();
        cart.remove_one("main1").unwrap();
        assert_eq!(cart, before);
    }

    #[test]
    fn test_insertion_order_kept() {
        let mut cart = Cart::new();
        cart.add_item(&create_test_item("main1", "Grilled Salmon", 22.0), 1)
            .unwrap();
        cart.add_item(&create_test_item("app1", "Bruschetta", 8.0), 1)
            .unwrap();
        cart.add_item(&create_test_item("main1", "Grilled Salmon", 22.0), 1)
            .unwrap();

        let ids: Vec<&str> = cart.lines().iter().map(|l| l.item.id.as_str()).collect();
        assert_eq!(ids, vec!["main1", "app1"]);
    }

    #[test]
    fn test_evict_removes_whole_line() {
        let mut cart = Cart::new();
        cart.add_item(&create_test_item("app1", "Bruschetta", 8.0), 5)
            .unwrap();
        let line = cart.evict("app1").unwrap();
        assert_eq!(line.quantity, 5);
        assert!(cart.evict("app1").is_none());
    }

    #[test]
    fn test_snapshot_totals() {
        let mut cart = Cart::new();
        cart.add_item(&create_test_item("app4", "Calamari", 12.99), 2)
            .unwrap();
        cart.add_item(&create_test_item("side5", "Steamed Rice", 0.1), 3)
            .unwrap();

        let snap = cart.snapshot();
        assert_eq!(snap.lines.len(), 2);
        assert_eq!(snap.lines[0].line_total, 25.98);
        assert_eq!(snap.lines[1].line_total, 0.3);
        assert_eq!(snap.subtotal, 26.28);
        assert_eq!(snap.item_count, 5);
    }

    #[test]
    fn test_cart_error_to_app_error() {
        let err: AppError = CartError::NotInCart("app1".into()).into();
        assert_eq!(err.code, shared::ErrorCode::CartItemNotFound);

        let err: AppError = CartError::InvalidQuantity(0).into();
        assert_eq!(err.code, shared::ErrorCode::QuantityOutOfRange);
    }
}
