pub mod admin;
pub mod category;
pub mod events;
pub mod init_data;
pub mod order;
pub mod pincode;
pub mod product;
pub mod upload;

pub use admin::admin_config;
pub use category::category_config;
pub use events::events_config;
pub use init_data::init_data_config;
pub use order::order_config;
pub use pincode::pincode_config;
pub use product::product_config;
pub use upload::upload_config;

use actix_web::HttpResponse;
use serde_json::json;

pub async fn api_index() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "message": "Fresh Meat Hub API" }))
}
