use crate::{models::ProfileDocument, services::ProfileStore, utils::AppError};
use async_trait::async_trait;
use mongodb::bson::{doc, Document};
use mongodb::{Client, Collection, Database};
use std::error::Error;

const DEFAULT_DATABASE: &str = "profiles";

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        // Pool de conexões
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        // Timeouts
        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;
        let db = client.database(database_name(uri));

        // Test connection
        db.list_collection_names().await?;

        Ok(Self { db })
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

/// Database name from the URI path, e.g. `mongodb://host:27017/clubs?retryWrites=true` -> `clubs`
fn database_name(uri: &str) -> &str {
    let without_scheme = uri.split_once("://").map(|(_, rest)| rest).unwrap_or(uri);

    without_scheme
        .split_once('/')
        .map(|(_, path)| path.split('?').next().unwrap_or(""))
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_DATABASE)
}

/// Profiles collection backed by MongoDB, documents keyed by `_id = uid`
pub struct MongoProfileStore {
    db: MongoDB,
    collection: String,
}

impl MongoProfileStore {
    pub fn new(db: MongoDB, collection: &str) -> Self {
        Self {
            db,
            collection: collection.to_string(),
        }
    }
}

#[async_trait]
impl ProfileStore for MongoProfileStore {
    async fn merge_profile(&self, uid: &str, profile: &ProfileDocument) -> Result<(), AppError> {
        let fields = mongodb::bson::to_document(profile)
            .map_err(|e| AppError::WriteFailure(format!("Failed to encode profile: {}", e)))?;

        // $set + upsert: cria o documento ou atualiza só estes campos
        let filter = doc! { "_id": uid };
        let update = doc! { "$set": fields };

        let options = mongodb::options::UpdateOptions::builder()
            .upsert(true)
            .build();

        self.db
            .collection::<Document>(&self.collection)
            .update_one(filter, update)
            .with_options(options)
            .await
            .map_err(|e| AppError::WriteFailure(e.to_string()))?;

        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.db
            .database()
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        Ok(())
    }
}
