use actix_web::{web, HttpResponse};

use crate::{models::UserCreatedEvent, services::ProfileInitializer};

/// POST /api/v1/events/user-created - Evento de conta criada na plataforma de autenticação
///
/// Responde 204 em todos os casos (perfil gravado, evento inválido ou falha de escrita),
/// para que a plataforma não reenvie o evento.
#[utoipa::path(
    post,
    path = "/api/v1/events/user-created",
    tag = "Events",
    request_body = UserCreatedEvent,
    responses(
        (status = 204, description = "Event handled (profile written, skipped or dropped)"),
        (status = 401, description = "Missing or invalid delivery token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn user_created(
    initializer: web::Data<ProfileInitializer>,
    body: Result<web::Bytes, actix_web::Error>,
) -> HttpResponse {
    // Corpo ilegível (ex.: acima do limite de payload) vale como evento ausente
    let event = match body {
        Ok(body) => {
            log::debug!("📨 POST /events/user-created ({} bytes)", body.len());
            UserCreatedEvent::from_payload(&body)
        }
        Err(e) => {
            log::warn!("⚠️  Could not read user event body: {}", e);
            None
        }
    };

    let outcome = initializer.on_user_created(event).await;
    log::debug!("📨 Delivery resolved: {:?}", outcome);

    HttpResponse::NoContent().finish()
}
