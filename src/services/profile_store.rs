use async_trait::async_trait;

use crate::{models::ProfileDocument, utils::AppError};

/// Document store holding user profiles, keyed by uid
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Create-or-update the document at `uid`. Fields of an existing document
    /// that `profile` does not name must be left untouched.
    async fn merge_profile(&self, uid: &str, profile: &ProfileDocument) -> Result<(), AppError>;

    /// Connectivity probe used by the health endpoint
    async fn ping(&self) -> Result<(), AppError>;
}

#[cfg(test)]
pub mod memory {
    use super::*;
    use mongodb::bson::{to_document, Document};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// In-memory store with merge semantics and failure injection
    #[derive(Default)]
    pub struct MemoryProfileStore {
        documents: Mutex<HashMap<String, Document>>,
        failing: AtomicBool,
        writes: AtomicUsize,
    }

    impl MemoryProfileStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn failing() -> Self {
            let store = Self::default();
            store.set_failing(true);
            store
        }

        pub fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        pub fn seed(&self, uid: &str, document: Document) {
            self.documents
                .lock()
                .unwrap()
                .insert(uid.to_string(), document);
        }

        pub fn get(&self, uid: &str) -> Option<Document> {
            self.documents.lock().unwrap().get(uid).cloned()
        }

        pub fn len(&self) -> usize {
            self.documents.lock().unwrap().len()
        }

        /// Write attempts that reached the store, including failed ones
        pub fn write_attempts(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ProfileStore for MemoryProfileStore {
        async fn merge_profile(&self, uid: &str, profile: &ProfileDocument) -> Result<(), AppError> {
            self.writes.fetch_add(1, Ordering::SeqCst);

            if self.failing.load(Ordering::SeqCst) {
                return Err(AppError::WriteFailure("store unavailable".to_string()));
            }

            let fields = to_document(profile).map_err(|e| AppError::WriteFailure(e.to_string()))?;
            let mut documents = self.documents.lock().unwrap();
            let document = documents.entry(uid.to_string()).or_default();
            for (key, value) in fields {
                document.insert(key, value);
            }

            Ok(())
        }

        async fn ping(&self) -> Result<(), AppError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(AppError::DatabaseError("store unavailable".to_string()));
            }
            Ok(())
        }
    }
}
