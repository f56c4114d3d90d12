pub mod events;
pub mod health;
pub mod metrics;
pub mod swagger;

use actix_web::web;

use crate::middleware::DeliveryAuth;

/// Registers every route of the service
pub fn configure(cfg: &mut web::ServiceConfig, auth: DeliveryAuth) {
    cfg
        // Health check
        .route("/health", web::get().to(health::health_check))
        // Metrics
        .route("/metrics", web::get().to(metrics::get_metrics))
        // Auth platform events
        .service(
            web::scope("/api/v1/events")
                .wrap(auth)
                .route("/user-created", web::post().to(events::user_created)),
        );
}
