//! OrderService - order workflow operations
//!
//! All order mutations go through here:
//!
//! ```text
//! submit(table, lines)        # customer flow: validate -> snapshot -> persist -> push
//! create_manual(table, lines) # staff flow: same cart rules, no push
//! advance_status(id, to)      # pending -> cooking -> served, forward only
//! delete_line(id, index)      # recompute total; empty orders are signalled, never persisted
//! delete_order(id)            # hard delete
//! clear_all()                 # best-effort bulk delete (end-of-day reset)
//! ```
//!
//! Multi-step mutations are sequential store writes, not transactions; a
//! crash between steps can leave partial state. Acceptable at single-
//! restaurant scale, and documented rather than papered over.

use serde::{Deserialize, Serialize};

use shared::cart::Cart;
use shared::order::{self, Order, OrderStatus};

use crate::core::ServerState;
use crate::db::repository::{MenuItemRepository, OrderRepository};
use crate::services::NotifyService;
use crate::utils::{AppError, AppResult, time};

/// One requested line of a new order: the item reference plus the chosen
/// option names. Prices are resolved server-side from the current menu,
/// never trusted from the client.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderDraftLine {
    pub item_id: String,
    pub quantity: u32,
    #[serde(default)]
    pub selected_options: Vec<String>,
}

/// Outcome of deleting a line from an order.
///
/// An order with an empty items array is an invalid state and must not be
/// persisted: removing the last line signals that the whole order should
/// be deleted instead, and the order is left untouched until staff
/// confirm.
#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LineRemoval {
    Updated { order: Order },
    WouldEmptyOrder,
}

/// Revenue rollup over served orders
#[derive(Debug, Clone, Serialize)]
pub struct RevenueSummary {
    /// Served orders created today (local calendar day), minor units
    pub today_revenue: i64,
    /// All served orders, minor units
    pub total_revenue: i64,
    pub active_orders: usize,
    pub served_orders: usize,
}

#[derive(Clone)]
pub struct OrderService {
    orders: OrderRepository,
    menu: MenuItemRepository,
    notify: NotifyService,
}

impl OrderService {
    pub fn new(state: &ServerState) -> Self {
        Self {
            orders: OrderRepository::new(state.get_db()),
            menu: MenuItemRepository::new(state.get_db()),
            notify: state.notify.clone(),
        }
    }

    // ==================== Customer flow ====================

    /// Submit a customer order.
    ///
    /// Persists the order, then fires the chat push without awaiting it:
    /// notification failure is logged and never blocks or rolls back the
    /// order.
    pub async fn submit(
        &self,
        table_id: &str,
        lines: Vec<OrderDraftLine>,
        customer_id: Option<String>,
    ) -> AppResult<Order> {
        let cart = self.build_cart(&lines).await?;
        let order = self.persist_new(table_id, cart, customer_id).await?;

        if let Some(user_id) = order.customer_id.clone() {
            let notify = self.notify.clone();
            let pushed = order.clone();
            tokio::spawn(async move {
                if let Err(e) = notify.push_order_confirmation(&user_id, &pushed).await {
                    tracing::warn!(
                        user_id,
                        order_id = ?pushed.id,
                        error = %e,
                        "Order confirmation push failed"
                    );
                }
            });
        }

        Ok(order)
    }

    // ==================== Staff mutations ====================

    /// Staff-initiated order bypassing the customer flow. Identical cart
    /// and pricing rules; an order is only persisted once it has lines.
    pub async fn create_manual(&self, table_id: &str, lines: Vec<OrderDraftLine>) -> AppResult<Order> {
        let cart = self.build_cart(&lines).await?;
        self.persist_new(table_id, cart, None).await
    }

    /// Move an order along the forward edge list. Any other requested
    /// transition is rejected before anything is written.
    pub async fn advance_status(&self, order_id: &str, requested: OrderStatus) -> AppResult<Order> {
        let mut order = self.get(order_id).await?;
        order.status = order::advance(order.status, requested)?;
        let saved = self.orders.save(&order).await?;
        tracing::info!(order_id, status = ?saved.status, "Order status advanced");
        Ok(saved)
    }

    /// Remove the line at `line_index` and recompute the total. The caller
    /// addresses the exact line by index: with duplicate item ids carrying
    /// different customizations, removal by item id could hit the wrong
    /// line.
    pub async fn delete_line(&self, order_id: &str, line_index: usize) -> AppResult<LineRemoval> {
        let mut order = self.get(order_id).await?;

        if line_index >= order.items.len() {
            return Err(AppError::validation(format!(
                "Order has no line at index {line_index}"
            )));
        }
        if order.items.len() == 1 {
            return Ok(LineRemoval::WouldEmptyOrder);
        }

        order.items.remove(line_index);
        order.recompute_total();
        let saved = self.orders.save(&order).await?;
        Ok(LineRemoval::Updated { order: saved })
    }

    /// Hard delete; irreversible, no tombstone
    pub async fn delete_order(&self, order_id: &str) -> AppResult<()> {
        if !self.orders.delete(order_id).await? {
            return Err(AppError::not_found(format!("Order {order_id} not found")));
        }
        tracing::info!(order_id, "Order deleted");
        Ok(())
    }

    /// End-of-day reset: best-effort delete of every order document
    pub async fn clear_all(&self) -> AppResult<usize> {
        let deleted = self.orders.delete_all().await?;
        tracing::info!(deleted, "All orders cleared");
        Ok(deleted)
    }

    // ==================== Queries ====================

    pub async fn get(&self, order_id: &str) -> AppResult<Order> {
        self.orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {order_id} not found")))
    }

    pub async fn list_all(&self) -> AppResult<Vec<Order>> {
        Ok(self.orders.find_all().await?)
    }

    /// Orders not yet served, oldest first
    pub async fn list_active(&self) -> AppResult<Vec<Order>> {
        Ok(self
            .list_all()
            .await?
            .into_iter()
            .filter(Order::is_active)
            .collect())
    }

    /// Served orders (history)
    pub async fn list_history(&self) -> AppResult<Vec<Order>> {
        Ok(self
            .list_all()
            .await?
            .into_iter()
            .filter(|o| !o.is_active())
            .collect())
    }

    pub async fn revenue_summary(&self) -> AppResult<RevenueSummary> {
        let orders = self.list_all().await?;
        let (today, offset) = time::local_today();
        let served = orders.iter().filter(|o| !o.is_active()).count();
        Ok(RevenueSummary {
            today_revenue: order::revenue_for_day(&orders, today, offset),
            total_revenue: order::total_revenue(&orders),
            active_orders: orders.len() - served,
            served_orders: served,
        })
    }

    // ==================== Internals ====================

    /// Resolve draft lines against the current menu and aggregate them
    /// through the cart rules (line merging, option validation, pricing).
    async fn build_cart(&self, lines: &[OrderDraftLine]) -> AppResult<Cart> {
        let mut cart = Cart::new();
        for draft in lines {
            if draft.quantity == 0 {
                return Err(AppError::validation("Line quantity must be at least 1"));
            }
            let item = self
                .menu
                .find_by_id(&draft.item_id)
                .await?
                .ok_or_else(|| {
                    AppError::validation(format!("Unknown menu item: {}", draft.item_id))
                })?;

            let mut selections = Vec::with_capacity(draft.selected_options.len());
            for option_name in &draft.selected_options {
                let option = item
                    .option_groups
                    .iter()
                    .flat_map(|g| g.options.iter())
                    .find(|o| &o.name == option_name)
                    .ok_or_else(|| {
                        AppError::validation(format!(
                            "Option '{}' does not belong to '{}'",
                            option_name, item.name
                        ))
                    })?;
                selections.push(option.clone());
            }

            for _ in 0..draft.quantity {
                cart.add(&item, selections.clone())?;
            }
        }
        Ok(cart)
    }

    async fn persist_new(
        &self,
        table_id: &str,
        cart: Cart,
        customer_id: Option<String>,
    ) -> AppResult<Order> {
        if table_id.trim().is_empty() {
            return Err(AppError::validation("Table id is required"));
        }
        if cart.is_empty() {
            return Err(AppError::validation("Cart is empty"));
        }

        let order = Order::from_cart(table_id, cart, customer_id);
        let saved = self.orders.create(&order).await?;
        tracing::info!(
            order_id = ?saved.id,
            table_id,
            total = saved.total_amount,
            "Order created"
        );
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{MenuItemCreate, MenuItemUpdate, MenuOption, OptionGroup, SelectionMode};

    use crate::core::Config;

    async fn test_state() -> ServerState {
        let config = Config::with_overrides("unused", 0);
        ServerState::initialize_in_memory(&config).await.unwrap()
    }

    async fn seed_item(
        state: &ServerState,
        name: &str,
        price: i64,
        option_groups: Vec<OptionGroup>,
    ) -> String {
        let repo = MenuItemRepository::new(state.get_db());
        let item = repo
            .create(MenuItemCreate {
                name: name.to_string(),
                description: None,
                price,
                category: "mains".to_string(),
                image_url: None,
                available: Some(true),
                option_groups: Some(option_groups),
            })
            .await
            .unwrap();
        item.id.unwrap()
    }

    fn size_group() -> OptionGroup {
        OptionGroup {
            id: "grp_size".to_string(),
            name: "size".to_string(),
            mode: SelectionMode::Single,
            required: false,
            options: vec![
                MenuOption {
                    name: "regular".to_string(),
                    price: 0,
                },
                MenuOption {
                    name: "large".to_string(),
                    price: 20,
                },
            ],
        }
    }

    fn line(item_id: &str, quantity: u32, options: &[&str]) -> OrderDraftLine {
        OrderDraftLine {
            item_id: item_id.to_string(),
            quantity,
            selected_options: options.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn submit_merges_identical_lines_and_prices_server_side() {
        let state = test_state().await;
        let noodles = seed_item(&state, "Beef Noodles", 100, vec![size_group()]).await;
        let service = OrderService::new(&state);

        let order = service
            .submit(
                "5",
                vec![
                    line(&noodles, 1, &["large"]),
                    line(&noodles, 1, &["large"]),
                    line(&noodles, 1, &[]),
                ],
                None,
            )
            .await
            .unwrap();

        // large x2 merged into one line, plain kept separate
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.total_amount, 120 * 2 + 100);
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.id.is_some());
    }

    #[tokio::test]
    async fn submit_rejects_unknown_items_and_zero_quantity() {
        let state = test_state().await;
        let noodles = seed_item(&state, "Beef Noodles", 100, vec![]).await;
        let service = OrderService::new(&state);

        let err = service
            .submit("5", vec![line("no-such-item", 1, &[])], None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = service
            .submit("5", vec![line(&noodles, 0, &[])], None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = service.submit("5", vec![], None).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = service
            .submit("  ", vec![line(&noodles, 1, &[])], None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn order_total_is_immune_to_later_menu_edits() {
        let state = test_state().await;
        let noodles = seed_item(&state, "Beef Noodles", 100, vec![]).await;
        let service = OrderService::new(&state);

        let order = service
            .submit("5", vec![line(&noodles, 1, &[])], None)
            .await
            .unwrap();

        MenuItemRepository::new(state.get_db())
            .update(
                &noodles,
                MenuItemUpdate {
                    name: None,
                    description: None,
                    price: Some(999),
                    category: None,
                    image_url: None,
                    available: None,
                    option_groups: None,
                },
            )
            .await
            .unwrap();

        let reloaded = service.get(order.id.as_deref().unwrap()).await.unwrap();
        assert_eq!(reloaded.total_amount, 100);
        assert_eq!(reloaded.items[0].item.price, 100);
    }

    #[tokio::test]
    async fn status_moves_forward_only() {
        let state = test_state().await;
        let noodles = seed_item(&state, "Beef Noodles", 100, vec![]).await;
        let service = OrderService::new(&state);

        let order = service
            .submit("5", vec![line(&noodles, 1, &[])], None)
            .await
            .unwrap();
        let id = order.id.clone().unwrap();

        // Skipping cooking is rejected
        let err = service
            .advance_status(&id, OrderStatus::Served)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition(_)));

        let order = service
            .advance_status(&id, OrderStatus::Cooking)
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::Cooking);

        // No going back
        let err = service
            .advance_status(&id, OrderStatus::Pending)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition(_)));

        let order = service
            .advance_status(&id, OrderStatus::Served)
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::Served);

        // Served is terminal
        let err = service
            .advance_status(&id, OrderStatus::Cooking)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition(_)));
    }

    #[tokio::test]
    async fn served_orders_move_from_active_to_history() {
        let state = test_state().await;
        let noodles = seed_item(&state, "Beef Noodles", 100, vec![]).await;
        let service = OrderService::new(&state);

        let order = service
            .submit("5", vec![line(&noodles, 1, &[])], None)
            .await
            .unwrap();
        let id = order.id.clone().unwrap();

        assert_eq!(service.list_active().await.unwrap().len(), 1);
        assert!(service.list_history().await.unwrap().is_empty());

        service
            .advance_status(&id, OrderStatus::Cooking)
            .await
            .unwrap();
        service
            .advance_status(&id, OrderStatus::Served)
            .await
            .unwrap();

        assert!(service.list_active().await.unwrap().is_empty());
        assert_eq!(service.list_history().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_line_recomputes_total_and_signals_empty() {
        let state = test_state().await;
        let noodles = seed_item(&state, "Beef Noodles", 100, vec![]).await;
        let tea = seed_item(&state, "Milk Tea", 50, vec![]).await;
        let service = OrderService::new(&state);

        let order = service
            .submit("5", vec![line(&noodles, 1, &[]), line(&tea, 1, &[])], None)
            .await
            .unwrap();
        let id = order.id.clone().unwrap();
        assert_eq!(order.total_amount, 150);

        let err = service.delete_line(&id, 5).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let outcome = service.delete_line(&id, 0).await.unwrap();
        let order = match outcome {
            LineRemoval::Updated { order } => order,
            LineRemoval::WouldEmptyOrder => panic!("expected an updated order"),
        };
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.total_amount, 50);

        // Last line: order left untouched, caller told to delete instead
        let outcome = service.delete_line(&id, 0).await.unwrap();
        assert!(matches!(outcome, LineRemoval::WouldEmptyOrder));
        assert_eq!(service.get(&id).await.unwrap().items.len(), 1);
    }

    #[tokio::test]
    async fn delete_and_clear_remove_orders() {
        let state = test_state().await;
        let noodles = seed_item(&state, "Beef Noodles", 100, vec![]).await;
        let service = OrderService::new(&state);

        let order = service
            .submit("5", vec![line(&noodles, 1, &[])], None)
            .await
            .unwrap();
        let id = order.id.clone().unwrap();

        service.delete_order(&id).await.unwrap();
        let err = service.get(&id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        service
            .submit("1", vec![line(&noodles, 1, &[])], None)
            .await
            .unwrap();
        service
            .create_manual("takeout", vec![line(&noodles, 2, &[])])
            .await
            .unwrap();
        assert_eq!(service.clear_all().await.unwrap(), 2);
        assert!(service.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn revenue_counts_served_orders_only() {
        let state = test_state().await;
        let noodles = seed_item(&state, "Beef Noodles", 100, vec![]).await;
        let service = OrderService::new(&state);

        let served = service
            .submit("1", vec![line(&noodles, 2, &[])], None)
            .await
            .unwrap();
        let id = served.id.clone().unwrap();
        service
            .advance_status(&id, OrderStatus::Cooking)
            .await
            .unwrap();
        service
            .advance_status(&id, OrderStatus::Served)
            .await
            .unwrap();

        // Still pending; must not count towards revenue
        service
            .submit("2", vec![line(&noodles, 1, &[])], None)
            .await
            .unwrap();

        let summary = service.revenue_summary().await.unwrap();
        assert_eq!(summary.total_revenue, 200);
        assert_eq!(summary.today_revenue, 200);
        assert_eq!(summary.active_orders, 1);
        assert_eq!(summary.served_orders, 1);
    }
}
