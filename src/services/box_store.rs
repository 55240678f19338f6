use std::sync::Arc;

use uuid::Uuid;

use crate::db::{KeyValueStore, StoreError};
use crate::models::box_entry::{BoxEntry, InsertBoxEntry, UpdateBoxEntry};

const NAMESPACE: &str = "pokedex";

fn entry_key(owner: &str, id: &str) -> String {
    format!("{owner}:{NAMESPACE}:{id}")
}

fn owner_prefix(owner: &str) -> String {
    format!("{owner}:{NAMESPACE}:")
}

/// Per-owner CRUD over box entries. Every call is scoped by `owner`.
#[derive(Clone)]
pub struct BoxStore {
    kv: Arc<dyn KeyValueStore>,
}

impl BoxStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    pub async fn create(&self, owner: &str, input: InsertBoxEntry) -> Result<BoxEntry, StoreError> {
        let entry = BoxEntry::new(Uuid::new_v4().simple().to_string(), input);
        self.save(owner, &entry).await?;
        tracing::debug!(owner, id = %entry.id, "box entry created");
        Ok(entry)
    }

    pub async fn read(&self, owner: &str, id: &str) -> Result<Option<BoxEntry>, StoreError> {
        match self.kv.get(&entry_key(owner, id)).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub async fn update(
        &self,
        owner: &str,
        id: &str,
        update: UpdateBoxEntry,
    ) -> Result<Option<BoxEntry>, StoreError> {
        let Some(mut entry) = self.read(owner, id).await? else {
            return Ok(None);
        };
        entry.apply(update);
        self.save(owner, &entry).await?;
        Ok(Some(entry))
    }

    pub async fn delete(&self, owner: &str, id: &str) -> Result<bool, StoreError> {
        Ok(self.kv.delete(&entry_key(owner, id)).await? > 0)
    }

    /// Entry ids in whatever order the store scan yields.
    pub async fn list(&self, owner: &str) -> Result<Vec<String>, StoreError> {
        let prefix = owner_prefix(owner);
        let keys = self.kv.keys_with_prefix(&prefix).await?;
        Ok(keys
            .iter()
            .filter_map(|k| k.strip_prefix(&prefix))
            .map(str::to_string)
            .collect())
    }

    /// Best-effort batch delete; not atomic.
    pub async fn clear(&self, owner: &str) -> Result<usize, StoreError> {
        let keys = self.kv.keys_with_prefix(&owner_prefix(owner)).await?;
        if keys.is_empty() {
            return Ok(0);
        }
        let removed = self.kv.delete_many(&keys).await?;
        tracing::debug!(owner, removed, "box cleared");
        Ok(removed)
    }

    async fn save(&self, owner: &str, entry: &BoxEntry) -> Result<(), StoreError> {
        let raw = serde_json::to_string(entry)?;
        self.kv.set(&entry_key(owner, &entry.id), &raw).await
    }
}
