use std::collections::HashMap;
use tokio::sync::RwLock;

/// Key holding every loop as one JSON array
pub const LOOPS_KEY: &str = "looplist_loops";
/// Key holding every registered user as one JSON array
pub const USERS_KEY: &str = "looplist_users";
/// Key holding the signed-in user
pub const USER_KEY: &str = "looplist_user";
/// Key holding the mock session token
pub const TOKEN_KEY: &str = "looplist_token";

/// Process-lifetime string key/value store.
///
/// Values are opaque strings, normally JSON documents. Nothing outlives the
/// process.
#[derive(Debug, Default)]
pub struct SessionStorage {
    items: RwLock<HashMap<String, String>>,
}

impl SessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_item(&self, key: &str) -> Option<String> {
        self.items.read().await.get(key).cloned()
    }

    pub async fn set_item(&self, key: &str, value: String) {
        self.items.write().await.insert(key.to_string(), value);
    }

    pub async fn remove_item(&self, key: &str) -> Option<String> {
        self.items.write().await.remove(key)
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.items.read().await.contains_key(key)
    }

    pub async fn clear(&self) {
        self.items.write().await.clear();
    }

    /// Read-modify-write one value under a single write lock.
    ///
    /// `f` gets the current value (if any) and returns the new one; returning
    /// `None` removes the key.
    pub async fn update<F, R>(&self, key: &str, f: F) -> R
    where
        F: FnOnce(Option<&str>) -> (Option<String>, R),
    {
        let mut items = self.items.write().await;
        let (next, result) = f(items.get(key).map(String::as_str));
        match next {
            Some(value) => {
                items.insert(key.to_string(), value);
            }
            None => {
                items.remove(key);
            }
        }
        result
    }
}
