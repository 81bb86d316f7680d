//! API key repository trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::RwLock;

use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};

use super::key::ApiKey;

/// Length of generated key values.
const KEY_LENGTH: usize = 40;

/// Trait for storing issued API keys.
///
/// The uniqueness invariant — at most one key per account — lives here:
/// `get_or_create` must be atomic with respect to concurrent calls for the
/// same account. Implement this trait to back keys with a database, where
/// a uniqueness constraint on the account column provides the same
/// guarantee.
pub trait ApiKeyRepository: Send + Sync {
    /// Finds a key by its opaque value.
    fn find_by_key(&self, key: &str) -> Option<ApiKey>;

    /// Finds a key by its repository-assigned id.
    fn find_by_id(&self, id: u64) -> Option<ApiKey>;

    /// Finds the key owned by the given account, if one exists.
    fn find_by_account(&self, account_id: u64) -> Option<ApiKey>;

    /// Returns all live keys, ordered by id.
    fn all(&self) -> Vec<ApiKey>;

    /// Returns the account's key, creating one if absent.
    ///
    /// Repeated calls return the same key until it is removed.
    fn get_or_create(&self, account_id: u64) -> ApiKey;

    /// Removes a key by id, invalidating it for authentication.
    fn remove(&self, id: u64) -> Option<ApiKey>;
}

#[derive(Debug, Default)]
struct Store {
    by_key: HashMap<String, ApiKey>,
    by_account: HashMap<u64, String>,
    next_id: u64,
}

/// In-memory implementation of `ApiKeyRepository`.
///
/// A single `RwLock` write guard covers the whole get-or-create critical
/// section, so concurrent issuance for one account cannot mint duplicate
/// keys.
#[derive(Debug, Default)]
pub struct InMemoryApiKeyRepository {
    store: RwLock<Store>,
}

impl InMemoryApiKeyRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store::default()),
        }
    }

    /// Returns the number of live keys.
    pub fn len(&self) -> usize {
        self.store.read().unwrap().by_key.len()
    }

    /// Returns true if no keys have been issued.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn generate_key(store: &Store) -> String {
        loop {
            let key: String = thread_rng()
                .sample_iter(&Alphanumeric)
                .take(KEY_LENGTH)
                .map(char::from)
                .collect();
            if !store.by_key.contains_key(&key) {
                return key;
            }
        }
    }
}

impl ApiKeyRepository for InMemoryApiKeyRepository {
    fn find_by_key(&self, key: &str) -> Option<ApiKey> {
        self.store.read().unwrap().by_key.get(key).cloned()
    }

    fn find_by_id(&self, id: u64) -> Option<ApiKey> {
        self.store
            .read()
            .unwrap()
            .by_key
            .values()
            .find(|k| k.get_id() == id)
            .cloned()
    }

    fn find_by_account(&self, account_id: u64) -> Option<ApiKey> {
        let store = self.store.read().unwrap();
        let value = store.by_account.get(&account_id)?;
        store.by_key.get(value).cloned()
    }

    fn all(&self) -> Vec<ApiKey> {
        let mut keys: Vec<ApiKey> = self
            .store
            .read()
            .unwrap()
            .by_key
            .values()
            .cloned()
            .collect();
        keys.sort_by_key(ApiKey::get_id);
        keys
    }

    fn get_or_create(&self, account_id: u64) -> ApiKey {
        let mut store = self.store.write().unwrap();
        if let Some(value) = store.by_account.get(&account_id) {
            if let Some(existing) = store.by_key.get(value) {
                return existing.clone();
            }
        }

        let value = Self::generate_key(&store);
        store.next_id += 1;
        let key = ApiKey::new(store.next_id, value.clone(), account_id);
        store.by_account.insert(account_id, value.clone());
        store.by_key.insert(value, key.clone());
        log::debug!("issued key {} for account {}", key.get_id(), account_id);
        key
    }

    fn remove(&self, id: u64) -> Option<ApiKey> {
        let mut store = self.store.write().unwrap();
        let value = store
            .by_key
            .values()
            .find(|k| k.get_id() == id)
            .map(|k| k.get_key().to_string())?;
        let key = store.by_key.remove(&value)?;
        store.by_account.remove(&key.get_account_id());
        Some(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_empty_repository() {
        let repo = InMemoryApiKeyRepository::new();
        assert!(repo.is_empty());
        assert!(repo.find_by_key("nope").is_none());
        assert!(repo.find_by_id(1).is_none());
        assert!(repo.find_by_account(1).is_none());
    }

    #[test]
    fn test_get_or_create_is_idempotent() {
        let repo = InMemoryApiKeyRepository::new();

        let first = repo.get_or_create(1);
        let second = repo.get_or_create(1);

        assert_eq!(first.get_key(), second.get_key());
        assert_eq!(first.get_id(), second.get_id());
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_distinct_accounts_get_distinct_keys() {
        let repo = InMemoryApiKeyRepository::new();

        let alice = repo.get_or_create(1);
        let bob = repo.get_or_create(2);

        assert_ne!(alice.get_key(), bob.get_key());
        assert_eq!(repo.len(), 2);
    }

    #[test]
    fn test_generated_key_shape() {
        let repo = InMemoryApiKeyRepository::new();
        let key = repo.get_or_create(1);

        assert_eq!(key.get_key().len(), KEY_LENGTH);
        assert!(key.get_key().chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_find_by_key_and_id() {
        let repo = InMemoryApiKeyRepository::new();
        let key = repo.get_or_create(5);

        assert_eq!(
            repo.find_by_key(key.get_key()).unwrap().get_account_id(),
            5
        );
        assert_eq!(repo.find_by_id(key.get_id()).unwrap().get_key(), key.get_key());
        assert_eq!(repo.find_by_account(5).unwrap().get_id(), key.get_id());
    }

    #[test]
    fn test_all_ordered_by_id() {
        let repo = InMemoryApiKeyRepository::new();
        repo.get_or_create(3);
        repo.get_or_create(1);
        repo.get_or_create(2);

        let ids: Vec<u64> = repo.all().iter().map(ApiKey::get_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_remove_invalidates_key() {
        let repo = InMemoryApiKeyRepository::new();
        let key = repo.get_or_create(1);

        let removed = repo.remove(key.get_id()).unwrap();
        assert_eq!(removed.get_key(), key.get_key());
        assert!(repo.find_by_key(key.get_key()).is_none());
        assert!(repo.find_by_account(1).is_none());
        assert!(repo.remove(key.get_id()).is_none());
    }

    #[test]
    fn test_reissue_after_remove_mints_new_key() {
        let repo = InMemoryApiKeyRepository::new();
        let first = repo.get_or_create(1);
        repo.remove(first.get_id());

        let second = repo.get_or_create(1);
        assert_ne!(first.get_key(), second.get_key());
    }

    #[test]
    fn test_concurrent_get_or_create_single_key() {
        let repo = Arc::new(InMemoryApiKeyRepository::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repo = Arc::clone(&repo);
                std::thread::spawn(move || repo.get_or_create(1).get_key().to_string())
            })
            .collect();

        let keys: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(keys.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(repo.len(), 1);
    }
}
