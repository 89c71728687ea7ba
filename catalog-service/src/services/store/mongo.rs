use super::{ProductQuery, ProductStore};
use crate::models::Product;
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::ConnectionString,
    Client as MongoClient, Collection, Database,
};
use service_core::error::AppError;
use tokio::sync::OnceCell;

pub const PRODUCTS_COLLECTION: &str = "products";
pub const DEFAULT_DATABASE: &str = "catalog";

/// MongoDB-backed store.
///
/// The client is created on first use rather than at construction.
/// Creating it can fail for transient reasons (a `mongodb+srv://` URI needs
/// SRV/TXT lookups), and a failed attempt is not cached: the next call tries
/// again.
pub struct MongoProductStore {
    uri: String,
    database: Option<String>,
    db: OnceCell<Database>,
}

impl MongoProductStore {
    /// Checks the syntax of `uri` without touching the network.
    ///
    /// The database is `database` when given, otherwise the one named in the
    /// URI, otherwise [`DEFAULT_DATABASE`].
    pub fn new(uri: &str, database: Option<&str>) -> Result<Self, AppError> {
        ConnectionString::parse(uri).map_err(|e| {
            tracing::error!("Invalid MongoDB connection string: {}", e);
            AppError::from(e)
        })?;
        Ok(Self {
            uri: uri.to_string(),
            database: database.map(str::to_string),
            db: OnceCell::new(),
        })
    }

    pub async fn database(&self) -> Result<&Database, AppError> {
        self.db
            .get_or_try_init(|| async {
                let client = MongoClient::with_uri_str(&self.uri).await.map_err(|e| {
                    tracing::error!("Failed to create MongoDB client: {}", e);
                    AppError::from(e)
                })?;
                let db = match self.database.as_deref() {
                    Some(name) => client.database(name),
                    None => client
                        .default_database()
                        .unwrap_or_else(|| client.database(DEFAULT_DATABASE)),
                };
                tracing::info!(database = %db.name(), "MongoDB client ready");
                Ok::<Database, AppError>(db)
            })
            .await
    }

    pub async fn products(&self) -> Result<Collection<Product>, AppError> {
        Ok(self.database().await?.collection(PRODUCTS_COLLECTION))
    }
}

#[async_trait]
impl ProductStore for MongoProductStore {
    async fn find(&self, query: &ProductQuery) -> Result<Vec<Product>, AppError> {
        let mut cursor = self
            .products()
            .await?
            .find(query.filter.to_document(), query.find_options())
            .await
            .map_err(AppError::from)?;

        let mut products = Vec::new();
        while let Some(product) = cursor.try_next().await.map_err(AppError::from)? {
            products.push(product);
        }
        Ok(products)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Product>, AppError> {
        let oid = ObjectId::parse_str(id).map_err(|e| {
            AppError::BadRequest(anyhow::anyhow!("Invalid product id '{}': {}", id, e))
        })?;

        let product = self
            .products()
            .await?
            .find_one(doc! { "_id": oid }, None)
            .await
            .map_err(AppError::from)?;
        Ok(product)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.database()
            .await?
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }
}
