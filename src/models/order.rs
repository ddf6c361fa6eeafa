use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_PAYMENT_MODE: &str = "Cash on Delivery";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Packed,
    OutForDelivery,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Packed,
        OrderStatus::OutForDelivery,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Packed => "packed",
            OrderStatus::OutForDelivery => "out_for_delivery",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == s)
    }

    /// Comma-separated list for validation messages.
    pub fn valid_values() -> String {
        Self::ALL
            .iter()
            .map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Denormalized snapshot of a product at order time. Orders never hold a
/// live reference to the catalog: later product edits and deletions must
/// not change what the customer bought.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub product_id: String,
    pub name: String,
    pub price: f64,
    pub quantity: i64,
    #[serde(default = "default_unit")]
    pub unit: String,
}

fn default_unit() -> String {
    "500g".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: String,
    pub customer_name: String,
    pub phone: String,
    pub address: String,
    pub pincode: String,
    pub items: Vec<OrderItem>,
    pub total: f64,
    pub status: OrderStatus,
    pub payment_mode: String,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

/// Raw row shape: items are a JSON text column, status a plain string.
#[derive(Debug, sqlx::FromRow)]
pub struct OrderRow {
    pub id: String,
    pub customer_name: String,
    pub phone: String,
    pub address: String,
    pub pincode: String,
    pub items: String,
    pub total: f64,
    pub status: String,
    pub payment_mode: String,
    pub created_at: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl TryFrom<OrderRow> for Order {
    type Error = AppError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let items: Vec<OrderItem> = serde_json::from_str(&row.items)?;
        let status = OrderStatus::parse(&row.status).ok_or_else(|| {
            AppError::InternalError(format!("Unknown order status in store: {}", row.status))
        })?;
        Ok(Order {
            id: row.id,
            customer_name: row.customer_name,
            phone: row.phone,
            address: row.address,
            pincode: row.pincode,
            items,
            total: row.total,
            status,
            payment_mode: row.payment_mode,
            created_at: row.created_at,
            latitude: row.latitude,
            longitude: row.longitude,
        })
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub customer_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub pincode: Option<String>,
    pub items: Option<Vec<OrderItem>>,
    pub total: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct OrderQuery {
    /// Calendar-day filter, matched as a prefix of created_at (YYYY-MM-DD).
    pub date: Option<String>,
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in OrderStatus::ALL {
            assert_eq!(OrderStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(OrderStatus::parse("shipped"), None);
        assert_eq!(OrderStatus::parse(""), None);
    }

    #[test]
    fn test_status_serde_snake_case() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::OutForDelivery).unwrap(),
            "\"out_for_delivery\""
        );
        let parsed: OrderStatus = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(parsed, OrderStatus::Pending);
    }

    #[test]
    fn test_valid_values_message() {
        assert_eq!(
            OrderStatus::valid_values(),
            "pending, confirmed, packed, out_for_delivery, completed, cancelled"
        );
    }

    #[test]
    fn test_item_unit_defaults() {
        let item: OrderItem = serde_json::from_str(
            r#"{"product_id":"p1","name":"Chicken Breast","price":280,"quantity":2}"#,
        )
        .unwrap();
        assert_eq!(item.unit, "500g");
    }

    #[test]
    fn test_order_row_conversion() {
        let row = OrderRow {
            id: "o1".into(),
            customer_name: "Asha".into(),
            phone: "9876543210".into(),
            address: "12 Lake Rd".into(),
            pincode: "500001".into(),
            items: r#"[{"product_id":"p1","name":"Chicken Breast","price":280.0,"quantity":2,"unit":"500g"}]"#.into(),
            total: 560.0,
            status: "pending".into(),
            payment_mode: DEFAULT_PAYMENT_MODE.into(),
            created_at: "2026-08-30T10:00:00.000Z".into(),
            latitude: None,
            longitude: None,
        };
        let order = Order::try_from(row).unwrap();
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.status, OrderStatus::Pending);

        let bad = OrderRow {
            id: "o2".into(),
            customer_name: String::new(),
            phone: String::new(),
            address: String::new(),
            pincode: String::new(),
            items: "[]".into(),
            total: 0.0,
            status: "shipped".into(),
            payment_mode: String::new(),
            created_at: String::new(),
            latitude: None,
            longitude: None,
        };
        assert!(Order::try_from(bad).is_err());
    }
}
