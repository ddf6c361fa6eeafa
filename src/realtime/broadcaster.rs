use super::OrderEvent;
use actix_web::web::Bytes;
use futures_util::Stream;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

/// Single fan-out channel from the order service to every connected admin
/// session. Injected into the order service at construction time; there is
/// no global handle.
#[derive(Clone)]
pub struct EventBroadcaster {
    tx: broadcast::Sender<OrderEvent>,
}

impl EventBroadcaster {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Non-blocking publish. Having no subscribers is not an error.
    pub fn publish(&self, event: OrderEvent) {
        if let Ok(receivers) = self.tx.send(event) {
            log::debug!("Broadcast order event to {receivers} subscriber(s)");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<OrderEvent> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// Adapts one subscription into an SSE byte stream. Lagged receivers skip
/// the dropped events and keep going (at-most-once, no replay).
pub fn sse_stream(
    rx: broadcast::Receiver<OrderEvent>,
) -> impl Stream<Item = Result<Bytes, actix_web::Error>> {
    futures_util::stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    return Some((Ok(Bytes::from(event.to_sse_frame())), rx));
                }
                Err(RecvError::Lagged(skipped)) => {
                    log::warn!("SSE subscriber lagged, skipped {skipped} event(s)");
                    continue;
                }
                Err(RecvError::Closed) => return None,
            }
        }
    })
}
