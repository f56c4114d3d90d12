use serde::{Deserialize, Deserializer, Serialize};

/// Payload do evento "user created" emitido pela plataforma de autenticação.
/// Campos extras (displayName, providerData, ...) são ignorados.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, utoipa::ToSchema)]
pub struct UserCreatedEvent {
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub email: Option<String>,
}

// email não-string (número, objeto, ...) vale como ausente; o perfil ainda é criado
fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

impl UserCreatedEvent {
    /// Decodes a raw delivery body. An empty body, a JSON `null`, or anything that
    /// does not decode into the event shape yields `None` (absent event).
    pub fn from_payload(payload: &[u8]) -> Option<Self> {
        if payload.iter().all(|b| b.is_ascii_whitespace()) {
            return None;
        }

        match serde_json::from_slice::<Option<UserCreatedEvent>>(payload) {
            Ok(event) => event,
            Err(e) => {
                log::warn!("⚠️  Could not decode user event payload: {}", e);
                None
            }
        }
    }

    /// Non-empty `uid`, if any
    pub fn usable_uid(&self) -> Option<&str> {
        self.uid.as_deref().filter(|uid| !uid.is_empty())
    }
}
