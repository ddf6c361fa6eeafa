use crate::models::{Order, OrderStatus};
use serde_json::json;

/// Events pushed to connected admin sessions. Delivery is at-most-once with
/// no replay buffer; clients recover missed events by re-fetching the order
/// list.
#[derive(Debug, Clone)]
pub enum OrderEvent {
    Placed(Order),
    StatusUpdated {
        order_id: String,
        status: OrderStatus,
    },
}

impl OrderEvent {
    pub fn name(&self) -> &'static str {
        match self {
            OrderEvent::Placed(_) => "orderPlaced",
            OrderEvent::StatusUpdated { .. } => "orderStatusUpdated",
        }
    }

    pub fn payload(&self) -> serde_json::Value {
        match self {
            OrderEvent::Placed(order) => json!(order),
            OrderEvent::StatusUpdated { order_id, status } => json!({
                "order_id": order_id,
                "status": status,
            }),
        }
    }

    /// Server-Sent Events wire frame.
    pub fn to_sse_frame(&self) -> String {
        format!("event: {}\ndata: {}\n\n", self.name(), self.payload())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_updated_frame() {
        let event = OrderEvent::StatusUpdated {
            order_id: "o1".to_string(),
            status: OrderStatus::Confirmed,
        };
        let frame = event.to_sse_frame();
        assert!(frame.starts_with("event: orderStatusUpdated\ndata: "));
        assert!(frame.ends_with("\n\n"));

        let data = frame
            .lines()
            .nth(1)
            .unwrap()
            .strip_prefix("data: ")
            .unwrap();
        let payload: serde_json::Value = serde_json::from_str(data).unwrap();
        assert_eq!(payload["order_id"], "o1");
        assert_eq!(payload["status"], "confirmed");
    }
}
