use crate::database::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::realtime::{EventBroadcaster, OrderEvent};
use crate::services::NotificationService;
use chrono::{SecondsFormat, Utc};
use uuid::Uuid;

/// Orchestrates order placement and fulfillment: validation, persistence,
/// notification fan-out, realtime broadcast. Collaborators are injected at
/// construction time.
#[derive(Clone)]
pub struct OrderService {
    pool: DbPool,
    notifications: NotificationService,
    events: EventBroadcaster,
}

impl OrderService {
    pub fn new(
        pool: DbPool,
        notifications: NotificationService,
        events: EventBroadcaster,
    ) -> Self {
        Self {
            pool,
            notifications,
            events,
        }
    }

    pub async fn place_order(&self, request: CreateOrderRequest) -> AppResult<Order> {
        let CreateOrderRequest {
            customer_name,
            phone,
            address,
            pincode,
            items,
            total,
            latitude,
            longitude,
        } = request;

        let (Some(customer_name), Some(phone), Some(address), Some(pincode), Some(items), Some(total)) =
            (customer_name, phone, address, pincode, items, total)
        else {
            return Err(AppError::ValidationError(
                "All fields are required".to_string(),
            ));
        };

        if items.is_empty() {
            return Err(AppError::ValidationError(
                "Order must contain at least one item".to_string(),
            ));
        }

        let order = Order {
            id: Uuid::new_v4().to_string(),
            customer_name,
            phone,
            address,
            pincode,
            items,
            total,
            status: OrderStatus::Pending,
            payment_mode: DEFAULT_PAYMENT_MODE.to_string(),
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            latitude,
            longitude,
        };

        let items_json = serde_json::to_string(&order.items)?;
        sqlx::query(
            r#"
            INSERT INTO orders
                (id, customer_name, phone, address, pincode, items, total,
                 status, payment_mode, created_at, latitude, longitude)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&order.id)
        .bind(&order.customer_name)
        .bind(&order.phone)
        .bind(&order.address)
        .bind(&order.pincode)
        .bind(&items_json)
        .bind(order.total)
        .bind(order.status.as_str())
        .bind(&order.payment_mode)
        .bind(&order.created_at)
        .bind(order.latitude)
        .bind(order.longitude)
        .execute(&self.pool)
        .await?;

        log::info!(
            "Order {} placed by {} ({} item(s), ₹{})",
            order.id,
            order.customer_name,
            order.items.len(),
            order.total
        );

        // Best-effort side channels; the response never waits on them.
        self.notifications.notify_order_placed(order.clone());
        self.events.publish(OrderEvent::Placed(order.clone()));

        Ok(order)
    }

    pub async fn update_status(&self, order_id: &str, status: &str) -> AppResult<OrderStatus> {
        let Some(new_status) = OrderStatus::parse(status) else {
            return Err(AppError::ValidationError(format!(
                "Invalid status. Must be one of: {}",
                OrderStatus::valid_values()
            )));
        };

        let result = sqlx::query("UPDATE orders SET status = ? WHERE id = ?")
            .bind(new_status.as_str())
            .bind(order_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Order not found".to_string()));
        }

        log::info!("Order {order_id} status -> {new_status}");
        self.events.publish(OrderEvent::StatusUpdated {
            order_id: order_id.to_string(),
            status: new_status,
        });

        Ok(new_status)
    }

    pub async fn list_orders(&self, query: &OrderQuery) -> AppResult<Vec<Order>> {
        let mut builder = sqlx::QueryBuilder::<sqlx::Sqlite>::new(
            "SELECT id, customer_name, phone, address, pincode, items, total, \
             status, payment_mode, created_at, latitude, longitude \
             FROM orders WHERE 1=1",
        );

        if let Some(date) = query.date.as_deref().filter(|d| !d.is_empty()) {
            // Calendar-day filter as a prefix match on the ISO timestamp.
            builder.push(" AND created_at LIKE ");
            builder.push_bind(format!("{date}%"));
        }
        if let Some(status) = query.status.as_deref().filter(|s| !s.is_empty()) {
            builder.push(" AND status = ");
            builder.push_bind(status.to_string());
        }
        builder.push(" ORDER BY created_at DESC");

        let rows: Vec<OrderRow> = builder.build_query_as().fetch_all(&self.pool).await?;
        rows.into_iter().map(Order::try_from).collect()
    }
}
