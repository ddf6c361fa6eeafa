use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter
use std::path::Path;

use meathub_backend::{
    config::Config,
    database::{create_pool, run_migrations},
    external::{MailService, WhatsAppService},
    handlers,
    middlewares::create_cors,
    realtime::EventBroadcaster,
    services::*,
    swagger::swagger_config,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    let config = Config::from_toml().expect("Failed to load configuration file");

    let pool = create_pool(&config.database)
        .await
        .expect("Failed to create database connection pool");

    run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    // Storage directories for uploads and the order log.
    tokio::fs::create_dir_all(&config.storage.uploads_dir).await?;
    if let Some(parent) = Path::new(&config.storage.orders_log).parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    // External notification sinks.
    let whatsapp_service = WhatsAppService::new(config.whatsapp.clone());
    let mail_service = MailService::new(config.mail.clone());
    let notification_service = NotificationService::new(
        whatsapp_service,
        mail_service,
        config.storage.orders_log.clone(),
    );

    // Realtime fan-out, injected into the order service.
    let event_broadcaster = EventBroadcaster::new(config.realtime.channel_capacity);

    let catalog_service = CatalogService::new(pool.clone());
    let pincode_service = PincodeService::new(pool.clone());
    let seed_service = SeedService::new(pool.clone());
    let order_service = OrderService::new(
        pool.clone(),
        notification_service,
        event_broadcaster.clone(),
    );

    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    let server_config = config.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .app_data(web::Data::new(server_config.clone()))
            .app_data(web::Data::new(catalog_service.clone()))
            .app_data(web::Data::new(pincode_service.clone()))
            .app_data(web::Data::new(order_service.clone()))
            .app_data(web::Data::new(seed_service.clone()))
            .app_data(web::Data::new(event_broadcaster.clone()))
            .configure(swagger_config)
            .service(actix_files::Files::new(
                "/uploads",
                server_config.storage.uploads_dir.clone(),
            ))
            .service(
                web::scope("/api")
                    .route("", web::get().to(handlers::api_index))
                    .configure(handlers::admin_config)
                    .configure(handlers::category_config)
                    .configure(handlers::product_config)
                    .configure(handlers::order_config)
                    .configure(handlers::pincode_config)
                    .configure(handlers::upload_config)
                    .configure(handlers::init_data_config)
                    .configure(handlers::events_config),
            )
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
