pub mod catalog_service;
pub mod notification_service;
pub mod order_service;
pub mod pincode_service;
pub mod seed_service;

pub use catalog_service::*;
pub use notification_service::*;
pub use order_service::*;
pub use pincode_service::*;
pub use seed_service::*;
