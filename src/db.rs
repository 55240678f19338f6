use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use deadpool_redis::{Config as PoolConfig, Pool, Runtime, redis};
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not create store pool: {0}")]
    Setup(#[from] deadpool_redis::CreatePoolError),
    #[error("store connection unavailable: {0}")]
    Pool(#[from] deadpool_redis::PoolError),
    #[error("store command failed: {0}")]
    Command(#[from] redis::RedisError),
    #[error("stored value is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),
}

/// String key-value capability behind the box store.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    /// Returns how many keys were removed.
    async fn delete(&self, key: &str) -> Result<usize, StoreError>;
    async fn delete_many(&self, keys: &[String]) -> Result<usize, StoreError>;
    /// Every key starting with `prefix`, taken literally.
    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError>;
}

pub struct RedisStore {
    pool: Pool,
}

impl RedisStore {
    pub fn connect(url: &str) -> Result<Self, StoreError> {
        let pool = PoolConfig::from_url(url).create_pool(Some(Runtime::Tokio1))?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.pool.get().await?;
        let value: Option<String> = redis::cmd("GET").arg(key).query_async(&mut conn).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.pool.get().await?;
        let _: () = redis::cmd("SET")
            .arg(key)
            .arg(value)
            .query_async(&mut conn)
            .await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<usize, StoreError> {
        let mut conn = self.pool.get().await?;
        let removed: usize = redis::cmd("DEL").arg(key).query_async(&mut conn).await?;
        Ok(removed)
    }

    async fn delete_many(&self, keys: &[String]) -> Result<usize, StoreError> {
        if keys.is_empty() {
            return Ok(0);
        }
        let mut conn = self.pool.get().await?;
        let removed: usize = redis::cmd("DEL").arg(keys).query_async(&mut conn).await?;
        Ok(removed)
    }

    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let mut conn = self.pool.get().await?;
        let pattern = format!("{}*", escape_glob(prefix));
        let keys: Vec<String> = redis::cmd("KEYS").arg(pattern).query_async(&mut conn).await?;
        Ok(keys)
    }
}

/// In-process store used by tests and by `REDIS_URL=memory://`.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<usize, StoreError> {
        Ok(usize::from(self.entries.write().await.remove(key).is_some()))
    }

    async fn delete_many(&self, keys: &[String]) -> Result<usize, StoreError> {
        let mut entries = self.entries.write().await;
        Ok(keys.iter().filter(|k| entries.remove(*k).is_some()).count())
    }

    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let entries = self.entries.read().await;
        Ok(entries
            .range::<str, _>((std::ops::Bound::Included(prefix), std::ops::Bound::Unbounded))
            .map(|(k, _)| k)
            .take_while(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }
}

pub fn init_store(url: &str) -> Result<Arc<dyn KeyValueStore>, StoreError> {
    if url.starts_with("memory://") {
        tracing::warn!("using in-memory store, box entries will not survive a restart");
        return Ok(Arc::new(MemoryStore::new()));
    }
    Ok(Arc::new(RedisStore::connect(url)?))
}

/// Escapes Redis glob metacharacters so `raw` only ever matches itself.
fn escape_glob(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
