use crate::error::AppResult;
use crate::external::{MailService, WhatsAppService, mailer};
use crate::models::Order;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;

/// Best-effort fan-out after order creation: append-only file log, WhatsApp
/// message, admin email. Runs detached from the request so a slow or broken
/// channel never delays the response, and a failed channel never blocks the
/// others.
#[derive(Clone)]
pub struct NotificationService {
    whatsapp: WhatsAppService,
    mailer: MailService,
    log_path: PathBuf,
}

impl NotificationService {
    pub fn new(
        whatsapp: WhatsAppService,
        mailer: MailService,
        log_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            whatsapp,
            mailer,
            log_path: log_path.into(),
        }
    }

    /// Fire-and-forget dispatch; the caller gets no handle and no errors.
    pub fn notify_order_placed(&self, order: Order) {
        let this = self.clone();
        tokio::spawn(async move {
            this.run_fan_out(&order).await;
        });
    }

    /// The three channels in sequence, each individually caught and logged.
    pub async fn run_fan_out(&self, order: &Order) {
        if let Err(e) = self.log_order(order).await {
            log::error!("Failed to write order log for {}: {e}", order.id);
        }

        let summary = order_summary(order);
        if let Err(e) = self.whatsapp.send_message(&summary).await {
            log::error!("Failed to send WhatsApp notification for {}: {e}", order.id);
        }

        let map_link = mailer::map_link(order.latitude, order.longitude, &order.address);
        let subject = format!("🛒 New Order {}", order.id);
        let body = format!("{summary}\n\n📍 Location: {map_link}");
        if let Err(e) = self.mailer.send(&subject, &body).await {
            log::error!("Failed to send order email for {}: {e}", order.id);
        }
    }

    async fn log_order(&self, order: &Order) -> AppResult<()> {
        if let Some(parent) = self.log_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .await?;
        file.write_all(log_block(order).as_bytes()).await?;
        Ok(())
    }
}

/// Human-readable order summary shared by the chat and mail channels.
pub fn order_summary(order: &Order) -> String {
    let items_text = order
        .items
        .iter()
        .map(|item| {
            format!(
                "• {} x {} ({}) - ₹{}",
                item.name,
                item.quantity,
                item.unit,
                item.price * item.quantity as f64
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "🛒 NEW ORDER RECEIVED!\n\n\
         👤 Customer: {}\n\
         📞 Phone: {}\n\
         📍 Address: {}\n\
         📮 Pincode: {}\n\n\
         📦 Items:\n{}\n\n\
         💰 Total: ₹{}\n\
         💳 Payment: {}\n\n\
         Order ID: {}",
        order.customer_name,
        order.phone,
        order.address,
        order.pincode,
        items_text,
        order.total,
        order.payment_mode,
        order.id
    )
}

fn log_block(order: &Order) -> String {
    let items_text = order
        .items
        .iter()
        .map(|item| format!("{} x {}", item.name, item.quantity))
        .collect::<Vec<_>>()
        .join(", ");

    let separator = "=".repeat(80);
    format!(
        "\n{separator}\n\
         Order ID: {}\n\
         Date: {}\n\
         Customer: {}\n\
         Phone: {}\n\
         Address: {}, Pincode: {}\n\
         Items: {}\n\
         Total: ₹{}\n\
         Payment: {}\n\
         Status: {}\n\
         {separator}\n",
        order.id,
        order.created_at,
        order.customer_name,
        order.phone,
        order.address,
        order.pincode,
        items_text,
        order.total,
        order.payment_mode,
        order.status
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OrderItem, OrderStatus};

    fn sample_order() -> Order {
        Order {
            id: "order-1".to_string(),
            customer_name: "Asha".to_string(),
            phone: "9876543210".to_string(),
            address: "12 Lake Rd".to_string(),
            pincode: "500001".to_string(),
            items: vec![OrderItem {
                product_id: "p1".to_string(),
                name: "Chicken Breast".to_string(),
                price: 280.0,
                quantity: 2,
                unit: "500g".to_string(),
            }],
            total: 560.0,
            status: OrderStatus::Pending,
            payment_mode: "Cash on Delivery".to_string(),
            created_at: "2026-08-30T10:00:00.000Z".to_string(),
            latitude: None,
            longitude: None,
        }
    }

    fn unconfigured_service(log_path: PathBuf) -> NotificationService {
        NotificationService::new(
            WhatsAppService::new(Default::default()),
            MailService::new(Default::default()),
            log_path,
        )
    }

    #[test]
    fn test_order_summary_contents() {
        let summary = order_summary(&sample_order());
        assert!(summary.contains("Customer: Asha"));
        assert!(summary.contains("Phone: 9876543210"));
        assert!(summary.contains("Address: 12 Lake Rd"));
        assert!(summary.contains("• Chicken Breast x 2 (500g) - ₹560"));
        assert!(summary.contains("Total: ₹560"));
        assert!(summary.contains("Order ID: order-1"));
    }

    #[test]
    fn test_log_block_contents() {
        let block = log_block(&sample_order());
        assert!(block.contains("Order ID: order-1"));
        assert!(block.contains("Customer: Asha"));
        assert!(block.contains("Items: Chicken Breast x 2"));
        assert!(block.contains("Total: ₹560"));
        assert!(block.contains("Status: pending"));
    }

    #[tokio::test]
    async fn test_fan_out_appends_to_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("logs").join("orders.txt");
        let service = unconfigured_service(log_path.clone());

        service.run_fan_out(&sample_order()).await;
        service.run_fan_out(&sample_order()).await;

        let contents = tokio::fs::read_to_string(&log_path).await.unwrap();
        assert_eq!(contents.matches("Order ID: order-1").count(), 2);
    }
}
