//! Chat push notification
//!
//! Sends an order confirmation to the customer's chat client. Delivery is
//! best-effort: the caller fires this after the order is persisted and a
//! failure is logged, never surfaced to the customer or rolled back into
//! the order flow. Without a configured access token the push degrades to
//! a logged no-op success.

use serde_json::json;
use thiserror::Error;

use shared::order::Order;

use crate::core::Config;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("push request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("push endpoint returned {status}: {body}")]
    Rejected { status: u16, body: String },
}

#[derive(Clone, Debug)]
pub struct NotifyService {
    client: reqwest::Client,
    endpoint: String,
    access_token: Option<String>,
}

impl NotifyService {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.line_push_endpoint.clone(),
            access_token: config.line_channel_token.clone(),
        }
    }

    /// Push an order confirmation to `user_id`'s chat client.
    pub async fn push_order_confirmation(
        &self,
        user_id: &str,
        order: &Order,
    ) -> Result<(), NotifyError> {
        let Some(token) = &self.access_token else {
            tracing::warn!("Chat push credential missing, skipping order confirmation");
            return Ok(());
        };

        let body = json!({
            "to": user_id,
            "messages": [{
                "type": "text",
                "text": order_summary(order),
            }],
        });

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected { status, body });
        }

        tracing::info!(user_id, order_id = ?order.id, "Order confirmation pushed");
        Ok(())
    }
}

/// Plain-text order summary: ticket line, itemized lines with quantity and
/// line total, grand total. Amounts are minor currency units.
fn order_summary(order: &Order) -> String {
    let mut text = String::from("🎉 訂單成立 🎉\n");
    if order.is_takeout() {
        text.push_str("外帶\n");
    } else {
        text.push_str(&format!("桌號 {}\n", order.table_id));
    }
    text.push_str("——————————\n");
    for line in &order.items {
        let mut name = line.item.name.clone();
        if !line.selected_options.is_empty() {
            let opts: Vec<&str> = line
                .selected_options
                .iter()
                .map(|o| o.name.as_str())
                .collect();
            name.push_str(&format!(" ({})", opts.join(", ")));
        }
        text.push_str(&format!("{} x{}  ${}\n", name, line.quantity, line.line_total()));
    }
    text.push_str("——————————\n");
    text.push_str(&format!("總金額 ${}\n", order.total_amount));
    text.push_str("請稍候，我們正在為您準備餐點。");
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::cart::{CartLine, ItemSnapshot};
    use shared::models::MenuOption;
    use shared::order::{OrderStatus, TAKEOUT_TABLE};

    fn order_with_lines(table_id: &str, lines: Vec<CartLine>) -> Order {
        let mut order = Order {
            id: Some("o1".to_string()),
            table_id: table_id.to_string(),
            items: lines,
            status: OrderStatus::Pending,
            total_amount: 0,
            created_at: chrono::Utc::now(),
            customer_id: None,
        };
        order.recompute_total();
        order
    }

    fn line(name: &str, price: i64, quantity: u32, options: Vec<(&str, i64)>) -> CartLine {
        CartLine {
            item: ItemSnapshot {
                item_id: name.to_string(),
                name: name.to_string(),
                price,
                category: "stir-fry".to_string(),
                image_url: String::new(),
            },
            quantity,
            selected_options: options
                .into_iter()
                .map(|(n, p)| MenuOption {
                    name: n.to_string(),
                    price: p,
                })
                .collect(),
        }
    }

    #[test]
    fn summary_lists_lines_and_total() {
        let order = order_with_lines(
            "7",
            vec![
                line("宮保雞丁", 180, 2, vec![]),
                line("炒飯", 100, 1, vec![("加蛋", 15)]),
            ],
        );
        let text = order_summary(&order);
        assert!(text.contains("桌號 7"));
        assert!(text.contains("宮保雞丁 x2  $360"));
        assert!(text.contains("炒飯 (加蛋) x1  $115"));
        assert!(text.contains("總金額 $475"));
    }

    #[test]
    fn takeout_orders_say_so() {
        let order = order_with_lines(TAKEOUT_TABLE, vec![]);
        assert!(order_summary(&order).contains("外帶"));
    }

    #[tokio::test]
    async fn missing_token_degrades_to_noop_success() {
        let config = Config::with_overrides("/tmp/unused", 0);
        let service = NotifyService {
            client: reqwest::Client::new(),
            endpoint: config.line_push_endpoint.clone(),
            access_token: None,
        };
        let order = order_with_lines("1", vec![]);
        assert!(service.push_order_confirmation("U123", &order).await.is_ok());
    }
}
