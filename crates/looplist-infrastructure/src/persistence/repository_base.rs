use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use looplist_domain::shared::DomainError;

use super::result_ext::ResultExt;
use super::session_storage::SessionStorage;

/// Shared plumbing for repositories that keep one JSON array per storage key.
#[derive(Clone)]
pub struct StorageRepositoryBase {
    storage: Arc<SessionStorage>,
    key: &'static str,
}

impl StorageRepositoryBase {
    pub fn new(storage: Arc<SessionStorage>, key: &'static str) -> Self {
        Self { storage, key }
    }

    pub fn storage(&self) -> &Arc<SessionStorage> {
        &self.storage
    }

    /// Decode the whole collection. A missing key is an empty collection.
    pub async fn load_all<T: DeserializeOwned>(&self, context: &str) -> Result<Vec<T>, DomainError> {
        match self.storage.get_item(self.key).await {
            Some(json) => decode(&json, context),
            None => Ok(Vec::new()),
        }
    }

    /// Decode, modify and re-encode the collection under one write lock.
    ///
    /// On any error the stored value is left as it was.
    pub async fn mutate<T, R, F>(&self, context: &str, f: F) -> Result<R, DomainError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&mut Vec<T>) -> R,
    {
        let key = self.key;
        let result = self
            .storage
            .update(key, |current| {
                let keep = current.map(str::to_string);
                let mut items: Vec<T> = match current {
                    Some(json) => match decode(json, context) {
                        Ok(items) => items,
                        Err(e) => return (keep, Err(e)),
                    },
                    None => Vec::new(),
                };

                let result = f(&mut items);
                match serde_json::to_string(&items).to_serialization_err(context) {
                    Ok(json) => (Some(json), Ok(result)),
                    Err(e) => (keep, Err(e)),
                }
            })
            .await;

        debug!("[storage] {} key={} ok={}", context, key, result.is_ok());
        result
    }
}

fn decode<T: DeserializeOwned>(json: &str, context: &str) -> Result<Vec<T>, DomainError> {
    serde_json::from_str(json).to_deserialization_err(context)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_key_is_empty() {
        let base = StorageRepositoryBase::new(Arc::new(SessionStorage::new()), "numbers");
        let items: Vec<i32> = base.load_all("Load numbers").await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_mutate_persists_changes() {
        let base = StorageRepositoryBase::new(Arc::new(SessionStorage::new()), "numbers");
        let len = base
            .mutate("Push", |items: &mut Vec<i32>| {
                items.push(7);
                items.len()
            })
            .await
            .unwrap();
        assert_eq!(len, 1);

        let items: Vec<i32> = base.load_all("Load numbers").await.unwrap();
        assert_eq!(items, vec![7]);
    }

    #[tokio::test]
    async fn test_corrupt_blob_is_reported_and_kept() {
        let storage = Arc::new(SessionStorage::new());
        storage.set_item("numbers", "{broken".to_string()).await;
        let base = StorageRepositoryBase::new(storage.clone(), "numbers");

        let result = base
            .mutate("Push", |items: &mut Vec<i32>| items.push(1))
            .await;
        assert!(matches!(result, Err(DomainError::Deserialization(_))));
        assert_eq!(storage.get_item("numbers").await.as_deref(), Some("{broken"));
    }
}
