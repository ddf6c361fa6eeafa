pub mod broadcaster;
pub mod events;

pub use broadcaster::EventBroadcaster;
pub use events::OrderEvent;
