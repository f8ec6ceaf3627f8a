//! Order Model
//!
//! An order is a top-level document: a point-in-time snapshot of cart
//! lines plus a status and a total that must never drift from the lines.

pub mod lifecycle;

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cart::{Cart, CartLine};

pub use lifecycle::{TransitionError, advance};

/// Sentinel table id for takeout orders (no physical table)
pub const TAKEOUT_TABLE: &str = "takeout";

/// Order status
///
/// `Paid` exists on the wire for compatibility but no transition produces
/// it; the active workflow ends at `Served`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Cooking,
    Served,
    Paid,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Option<String>,
    /// Physical table id, or [`TAKEOUT_TABLE`]
    pub table_id: String,
    /// Snapshots of cart lines, immune to later menu edits
    pub items: Vec<CartLine>,
    pub status: OrderStatus,
    /// Sum of all line totals, in minor currency units; recomputed
    /// whenever `items` changes
    pub total_amount: i64,
    /// Immutable once set
    pub created_at: DateTime<Utc>,
    /// Chat-platform user id of the submitting customer, when known;
    /// used only to address the push notification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
}

impl Order {
    /// Build a pending order from a cart.
    ///
    /// The id is a fresh UUID so two concurrent submissions on the same
    /// process cannot collide the way timestamp-only ids can.
    pub fn from_cart(table_id: impl Into<String>, cart: Cart, customer_id: Option<String>) -> Self {
        let total_amount = cart.total();
        Self {
            id: Some(Uuid::new_v4().to_string()),
            table_id: table_id.into(),
            items: cart.lines,
            status: OrderStatus::Pending,
            total_amount,
            created_at: Utc::now(),
            customer_id,
        }
    }

    /// Recompute `total_amount` from the line snapshots
    pub fn recompute_total(&mut self) {
        self.total_amount = self.items.iter().map(CartLine::line_total).sum();
    }

    /// Not yet served
    pub fn is_active(&self) -> bool {
        self.status != OrderStatus::Served
    }

    pub fn is_takeout(&self) -> bool {
        self.table_id == TAKEOUT_TABLE
    }
}

/// Total revenue: the sum over all served orders
pub fn total_revenue(orders: &[Order]) -> i64 {
    orders
        .iter()
        .filter(|o| o.status == OrderStatus::Served)
        .map(|o| o.total_amount)
        .sum()
}

/// Revenue from served orders created on `day`, with timestamps read in
/// the restaurant's local offset
pub fn revenue_for_day(orders: &[Order], day: NaiveDate, offset: FixedOffset) -> i64 {
    orders
        .iter()
        .filter(|o| o.status == OrderStatus::Served)
        .filter(|o| o.created_at.with_timezone(&offset).date_naive() == day)
        .map(|o| o.total_amount)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{CartLine, ItemSnapshot};
    use crate::models::MenuItem;
    use chrono::TimeZone;

    fn line(item_id: &str, price: i64, quantity: u32) -> CartLine {
        CartLine {
            item: ItemSnapshot {
                item_id: item_id.to_string(),
                name: format!("dish {item_id}"),
                price,
                category: "soup".to_string(),
                image_url: String::new(),
            },
            quantity,
            selected_options: vec![],
        }
    }

    fn served(total: i64, created_at: DateTime<Utc>) -> Order {
        Order {
            id: Some(Uuid::new_v4().to_string()),
            table_id: "3".to_string(),
            items: vec![],
            status: OrderStatus::Served,
            total_amount: total,
            created_at,
            customer_id: None,
        }
    }

    #[test]
    fn from_cart_snapshots_and_totals() {
        let mut cart = Cart::new();
        let item = MenuItem {
            id: Some("7".to_string()),
            name: "Clam Soup".to_string(),
            description: None,
            price: 350,
            category: "soup".to_string(),
            image_url: String::new(),
            available: true,
            option_groups: vec![],
        };
        cart.add(&item, vec![]).unwrap();

        let order = Order::from_cart("7", cart, None);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total_amount, 350);
        assert_eq!(order.table_id, "7");
        assert!(order.is_active());
        assert!(order.id.is_some());
    }

    #[test]
    fn fresh_ids_do_not_collide() {
        let a = Order::from_cart("1", Cart::new(), None);
        let b = Order::from_cart("1", Cart::new(), None);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn recompute_total_tracks_items() {
        let mut order = Order::from_cart("2", Cart::new(), None);
        order.items = vec![line("a", 100, 2), line("b", 50, 1)];
        order.recompute_total();
        assert_eq!(order.total_amount, 250);

        order.items.remove(0);
        order.recompute_total();
        assert_eq!(order.total_amount, 50);
    }

    #[test]
    fn revenue_rollups() {
        let offset = FixedOffset::east_opt(8 * 3600).unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 8, 28).unwrap();

        // 10:00 local on the 28th and 23:00 local on the 27th
        let on_day = offset
            .with_ymd_and_hms(2026, 8, 28, 10, 0, 0)
            .unwrap()
            .with_timezone(&Utc);
        let day_before = offset
            .with_ymd_and_hms(2026, 8, 27, 23, 0, 0)
            .unwrap()
            .with_timezone(&Utc);

        let mut pending = served(999, on_day);
        pending.status = OrderStatus::Pending;

        let orders = vec![served(300, on_day), served(200, day_before), pending];

        assert_eq!(total_revenue(&orders), 500);
        assert_eq!(revenue_for_day(&orders, today, offset), 300);
    }

    #[test]
    fn takeout_sentinel() {
        let order = Order::from_cart(TAKEOUT_TABLE, Cart::new(), None);
        assert!(order.is_takeout());
    }
}
