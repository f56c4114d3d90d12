use utoipa::OpenApi;
use utoipa::openapi::security::{SecurityScheme, HttpAuthScheme, HttpBuilder};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Profile Initializer API",
        version = "1.0.0",
        description = "Receives user-created events from the authentication platform and initializes the matching profile document in the `users` collection.\n\n**Authentication:** when a webhook secret is configured, event deliveries require a JWT Bearer token signed with it.\n\n**Delivery contract:** every accepted delivery answers 204, including malformed events and failed writes, so the platform never retries."
    ),
    paths(
        // Events
        crate::api::events::user_created,

        // Health & Metrics
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,
    ),
    components(
        schemas(
            crate::models::UserCreatedEvent,
            crate::api::health::HealthResponse,
            crate::services::StatsSnapshot,
        )
    ),
    tags(
        (name = "Events", description = "Authentication platform event deliveries."),
        (name = "Health", description = "Health check and event handling counters."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Delivery token signed with the webhook secret"))
                        .build()
                ),
            );
        }
    }
}
