// ==================== PROFILE INITIALIZER ====================
// Cria (ou faz merge) do documento de perfil em "users" para cada conta nova
// criada na plataforma de autenticação

use crate::{
    models::{ProfileDocument, UserCreatedEvent},
    services::profile_store::ProfileStore,
    utils::AppError,
};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// How one delivery was resolved. Every variant counts as a completed event.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Written { uid: String },
    /// Event absent or without a usable uid; no write attempted
    Skipped,
    /// Write attempted and failed; the profile is not retried
    Dropped { uid: String, error: AppError },
}

#[derive(Default)]
pub struct HandlerStats {
    events_total: AtomicU64,
    profiles_written: AtomicU64,
    malformed_events: AtomicU64,
    write_failures: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct StatsSnapshot {
    pub events_total: u64,
    pub profiles_written: u64,
    pub malformed_events: u64,
    pub write_failures: u64,
}

impl HandlerStats {
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            events_total: self.events_total.load(Ordering::Relaxed),
            profiles_written: self.profiles_written.load(Ordering::Relaxed),
            malformed_events: self.malformed_events.load(Ordering::Relaxed),
            write_failures: self.write_failures.load(Ordering::Relaxed),
        }
    }
}

pub struct ProfileInitializer {
    store: Arc<dyn ProfileStore>,
    stats: HandlerStats,
}

impl ProfileInitializer {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self {
            store,
            stats: HandlerStats::default(),
        }
    }

    pub fn store(&self) -> &dyn ProfileStore {
        self.store.as_ref()
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Validates the event and performs the merge-write, surfacing every failure.
    /// Returns the uid that was written.
    pub async fn try_initialize(&self, event: Option<&UserCreatedEvent>) -> Result<String, AppError> {
        let event = event.ok_or_else(|| AppError::MalformedEvent("event is absent".to_string()))?;
        let uid = event
            .usable_uid()
            .ok_or_else(|| AppError::MalformedEvent("missing uid".to_string()))?;

        log::info!("👤 New user created: {}", uid);

        let profile = ProfileDocument::for_new_user(event);
        self.store.merge_profile(uid, &profile).await?;

        Ok(uid.to_string())
    }

    /// Platform-facing entry point.
    ///
    /// Never fails: malformed events and failed writes are logged and resolved as
    /// completed, so the delivering platform never retries on our behalf. A failed
    /// write is therefore lost unless an operator acts on the error log.
    pub async fn on_user_created(&self, event: Option<UserCreatedEvent>) -> Outcome {
        self.stats.events_total.fetch_add(1, Ordering::Relaxed);

        match self.try_initialize(event.as_ref()).await {
            Ok(uid) => {
                self.stats.profiles_written.fetch_add(1, Ordering::Relaxed);
                log::info!("✅ Profile document ready: {}", uid);
                Outcome::Written { uid }
            }
            Err(AppError::MalformedEvent(reason)) => {
                self.stats.malformed_events.fetch_add(1, Ordering::Relaxed);
                log::error!("❌ Invalid user object: {:?} ({})", event, reason);
                Outcome::Skipped
            }
            Err(error) => {
                self.stats.write_failures.fetch_add(1, Ordering::Relaxed);
                let uid = event
                    .as_ref()
                    .and_then(|e| e.uid.clone())
                    .unwrap_or_default();
                log::error!("❌ Error creating user document for {}: {}", uid, error);
                Outcome::Dropped { uid, error }
            }
        }
    }
}
