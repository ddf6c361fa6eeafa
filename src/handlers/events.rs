use crate::realtime::EventBroadcaster;
use crate::realtime::broadcaster::sse_stream;
use actix_web::http::header;
use actix_web::{HttpResponse, web};

/// Realtime channel for admin sessions: `orderPlaced` and
/// `orderStatusUpdated` frames over Server-Sent Events. No replay; clients
/// that connect late re-fetch the order list instead.
#[utoipa::path(
    get,
    path = "/events",
    tag = "order",
    responses(
        (status = 200, description = "SSE stream of order events")
    )
)]
pub async fn order_events(broadcaster: web::Data<EventBroadcaster>) -> HttpResponse {
    let rx = broadcaster.subscribe();
    log::debug!(
        "SSE subscriber connected ({} active)",
        broadcaster.subscriber_count()
    );

    HttpResponse::Ok()
        .content_type("text/event-stream")
        .insert_header((header::CACHE_CONTROL, "no-cache"))
        .streaming(sse_stream(rx))
}

pub fn events_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/events", web::get().to(order_events));
}
