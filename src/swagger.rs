use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::category::get_categories,
        handlers::category::create_category,
        handlers::category::delete_category,
        handlers::product::get_products,
        handlers::product::get_product,
        handlers::product::create_product,
        handlers::product::update_product,
        handlers::product::delete_product,
        handlers::pincode::get_pincodes,
        handlers::pincode::create_pincode,
        handlers::pincode::delete_pincode,
        handlers::pincode::verify_pincode,
        handlers::order::get_orders,
        handlers::order::create_order,
        handlers::order::update_order_status,
        handlers::admin::verify_pin,
        handlers::upload::upload_image,
        handlers::init_data::init_data,
        handlers::events::order_events,
    ),
    components(
        schemas(
            Category,
            CreateCategoryRequest,
            Product,
            CreateProductRequest,
            UpdateProductRequest,
            Pincode,
            CreatePincodeRequest,
            VerifyPincodeResponse,
            OrderItem,
            Order,
            OrderStatus,
            CreateOrderRequest,
            UpdateStatusRequest,
            handlers::admin::VerifyPinRequest,
        )
    ),
    tags(
        (name = "catalog", description = "Category and product management"),
        (name = "pincode", description = "Serviceable delivery areas"),
        (name = "order", description = "Order placement and fulfillment"),
        (name = "admin", description = "Admin utilities"),
        (name = "upload", description = "Image uploads"),
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );
}
