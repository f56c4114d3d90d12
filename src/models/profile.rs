use serde::{Deserialize, Serialize};

use super::UserCreatedEvent;

pub const DEFAULT_USER_TYPE: &str = "manager";

/// Documento da collection "users", chave `_id` = uid do usuário
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProfileDocument {
    pub email: String,
    pub name: String,
    pub club_id: String,
    #[serde(rename = "userType")]
    pub user_type: String,
}

impl ProfileDocument {
    /// Initial profile for a freshly created account
    pub fn for_new_user(event: &UserCreatedEvent) -> Self {
        Self {
            email: event.email.clone().unwrap_or_default(),
            name: String::new(),
            club_id: String::new(),
            user_type: DEFAULT_USER_TYPE.to_string(),
        }
    }
}
