use crate::{config::WebhookConfig, utils::AppError};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// Claims read from the platform's delivery token. `iss`, `aud` (string or array)
// and `exp` are checked by `Validation` on the raw claims.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DeliveryClaims {
    #[serde(default)]
    pub sub: Option<String>,   // delivering service/project
    pub exp: usize,            // expiration
}

/// Verifies `Authorization: Bearer` tokens on event deliveries (HS256, shared secret)
#[derive(Clone)]
pub struct DeliveryVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl DeliveryVerifier {
    pub fn new(config: &WebhookConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[config.audience.as_str()]);

        let mut issuers = HashSet::new();
        issuers.insert(config.issuer.clone());
        validation.iss = Some(issuers);

        Self {
            key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        }
    }

    pub fn verify(&self, token: &str) -> Result<DeliveryClaims, AppError> {
        decode::<DeliveryClaims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))
    }

    /// Extracts and verifies the token of an `Authorization` header value
    pub fn verify_header(&self, header: Option<&str>) -> Result<DeliveryClaims, AppError> {
        let header = header.ok_or_else(|| AppError::Unauthorized("Missing authorization token".to_string()))?;
        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("Invalid token format".to_string()))?;
        self.verify(token)
    }
}

#[cfg(test)]
pub mod test_tokens {
    use super::*;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    pub fn webhook_config() -> WebhookConfig {
        WebhookConfig {
            secret: "test-webhook-secret".to_string(),
            issuer: "auth-platform".to_string(),
            audience: "profile-initializer".to_string(),
        }
    }

    pub fn sign(config: &WebhookConfig, issuer: &str, lifetime: Duration) -> String {
        let now = Utc::now();
        sign_claims(
            config,
            &json!({
                "sub": "auth-events",
                "iat": now.timestamp(),
                "exp": (now + lifetime).timestamp(),
                "aud": config.audience,
                "iss": issuer,
            }),
        )
    }

    pub fn sign_claims(config: &WebhookConfig, claims: &serde_json::Value) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::test_tokens::*;
    use super::*;
    use chrono::Duration;

    #[test]
    fn accepts_valid_token() {
        let config = webhook_config();
        let verifier = DeliveryVerifier::new(&config);
        let token = sign(&config, "auth-platform", Duration::minutes(5));

        let claims = verifier.verify_header(Some(&format!("Bearer {}", token))).unwrap();
        assert_eq!(claims.sub.as_deref(), Some("auth-events"));
    }

    #[test]
    fn accepts_token_without_iat_or_sub_and_with_audience_list() {
        let config = webhook_config();
        let verifier = DeliveryVerifier::new(&config);
        let exp = (chrono::Utc::now() + Duration::minutes(5)).timestamp();

        let token = sign_claims(
            &config,
            &serde_json::json!({
                "exp": exp,
                "iss": "auth-platform",
                "aud": ["other-service", "profile-initializer"],
            }),
        );

        let claims = verifier.verify(&token).unwrap();
        assert_eq!(claims.sub, None);
    }

    #[test]
    fn rejects_missing_or_malformed_header() {
        let verifier = DeliveryVerifier::new(&webhook_config());

        assert!(matches!(verifier.verify_header(None), Err(AppError::Unauthorized(_))));
        assert!(matches!(
            verifier.verify_header(Some("Basic dXNlcjpwYXNz")),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn rejects_wrong_issuer_secret_or_expired() {
        let config = webhook_config();
        let verifier = DeliveryVerifier::new(&config);

        let wrong_issuer = sign(&config, "someone-else", Duration::minutes(5));
        assert!(verifier.verify(&wrong_issuer).is_err());

        let expired = sign(&config, "auth-platform", Duration::minutes(-10));
        assert!(verifier.verify(&expired).is_err());

        let other = WebhookConfig {
            secret: "another-secret".to_string(),
            ..webhook_config()
        };
        let forged = sign(&other, "auth-platform", Duration::minutes(5));
        assert!(verifier.verify(&forged).is_err());
    }
}
