//! API key model.

use std::time::SystemTime;

/// An issued API key: an opaque token bound to exactly one account.
///
/// Keys are created lazily by the issuance endpoints and live until the
/// session view deletes them; there is no rotation or expiry.
#[derive(Debug, Clone)]
pub struct ApiKey {
    /// Repository-assigned id, used to address the session view.
    id: u64,
    /// The opaque token value presented on authenticated requests.
    key: String,
    /// Owning account.
    account_id: u64,
    /// When the key was created.
    created: SystemTime,
}

impl ApiKey {
    /// Creates a key record. Normally only called by a repository's
    /// get-or-create path.
    pub fn new(id: u64, key: impl Into<String>, account_id: u64) -> Self {
        Self {
            id,
            key: key.into(),
            account_id,
            created: SystemTime::now(),
        }
    }

    /// Returns the repository-assigned id.
    pub fn get_id(&self) -> u64 {
        self.id
    }

    /// Returns the opaque key value.
    pub fn get_key(&self) -> &str {
        &self.key
    }

    /// Returns the owning account's id.
    pub fn get_account_id(&self) -> u64 {
        self.account_id
    }

    /// Returns when the key was created.
    pub fn get_created(&self) -> SystemTime {
        self.created
    }
}
