//! Account model and repository.

use std::collections::HashMap;

/// An account record as seen by this service: read-only identity data
/// plus the encoded secret used by the primary credential scheme.
///
/// # Example
/// ```
/// use keygate::security::Account;
///
/// let account = Account::new(1, "alice", "secret")
///     .email("alice@example.com")
///     .first_name("Alice")
///     .last_name("Liddell");
///
/// assert_eq!(account.get_username(), "alice");
/// assert!(account.is_active());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    id: u64,
    username: String,
    password: String,
    email: String,
    first_name: String,
    last_name: String,
    active: bool,
}

impl Account {
    /// Creates a new active account with the given id, username and
    /// encoded password.
    pub fn new(id: u64, username: impl Into<String>, password: impl Into<String>) -> Self {
        Account {
            id,
            username: username.into(),
            password: password.into(),
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            active: true,
        }
    }

    /// Sets the email address (builder pattern).
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Sets the first name (builder pattern).
    pub fn first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = first_name.into();
        self
    }

    /// Sets the last name (builder pattern).
    pub fn last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = last_name.into();
        self
    }

    /// Sets whether the account may authenticate.
    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Returns the account id.
    pub fn get_id(&self) -> u64 {
        self.id
    }

    /// Returns the username.
    pub fn get_username(&self) -> &str {
        &self.username
    }

    /// Returns the encoded password (for credential checks).
    pub fn get_password(&self) -> &str {
        &self.password
    }

    /// Returns the email address.
    pub fn get_email(&self) -> &str {
        &self.email
    }

    /// Returns the first name.
    pub fn get_first_name(&self) -> &str {
        &self.first_name
    }

    /// Returns the last name.
    pub fn get_last_name(&self) -> &str {
        &self.last_name
    }

    /// Returns whether the account may authenticate.
    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// Trait for loading accounts.
///
/// Implement this to provide a storage backend for accounts (database,
/// directory service, ...). Accounts are immutable from this service's
/// perspective, so the trait is read-only.
pub trait AccountRepository: Send + Sync {
    /// Finds an account by its id.
    fn find_by_id(&self, id: u64) -> Option<Account>;

    /// Finds an account by username.
    fn find_by_username(&self, username: &str) -> Option<Account>;

    /// Finds an account by email address.
    fn find_by_email(&self, email: &str) -> Option<Account>;

    /// Returns all accounts, ordered by id.
    fn all(&self) -> Vec<Account>;
}

/// In-memory implementation of `AccountRepository`.
///
/// # Example
/// ```
/// use keygate::security::{Account, AccountRepository, InMemoryAccountRepository};
///
/// let accounts = InMemoryAccountRepository::new()
///     .with_account(Account::new(1, "alice", "secret"))
///     .with_account(Account::new(2, "bob", "hunter2"));
///
/// assert!(accounts.find_by_username("alice").is_some());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    accounts: HashMap<u64, Account>,
}

impl InMemoryAccountRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self {
            accounts: HashMap::new(),
        }
    }

    /// Adds an account to the repository.
    pub fn with_account(mut self, account: Account) -> Self {
        use std::collections::hash_map::Entry;
        match self.accounts.entry(account.get_id()) {
            Entry::Occupied(e) => {
                log::warn!("account id {} already exists, skipping", e.key());
            }
            Entry::Vacant(e) => {
                e.insert(account);
            }
        }
        self
    }

    /// Returns the number of accounts in the repository.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Returns true if the repository is empty.
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl AccountRepository for InMemoryAccountRepository {
    fn find_by_id(&self, id: u64) -> Option<Account> {
        self.accounts.get(&id).cloned()
    }

    fn find_by_username(&self, username: &str) -> Option<Account> {
        self.accounts
            .values()
            .find(|a| a.get_username() == username)
            .cloned()
    }

    fn find_by_email(&self, email: &str) -> Option<Account> {
        if email.is_empty() {
            return None;
        }
        self.accounts
            .values()
            .find(|a| a.get_email() == email)
            .cloned()
    }

    fn all(&self) -> Vec<Account> {
        let mut accounts: Vec<Account> = self.accounts.values().cloned().collect();
        accounts.sort_by_key(Account::get_id);
        accounts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_builder() {
        let account = Account::new(7, "alice", "secret")
            .email("alice@example.com")
            .first_name("Alice")
            .last_name("Liddell");

        assert_eq!(account.get_id(), 7);
        assert_eq!(account.get_username(), "alice");
        assert_eq!(account.get_password(), "secret");
        assert_eq!(account.get_email(), "alice@example.com");
        assert_eq!(account.get_first_name(), "Alice");
        assert_eq!(account.get_last_name(), "Liddell");
        assert!(account.is_active());
    }

    #[test]
    fn test_account_inactive() {
        let account = Account::new(1, "ghost", "x").active(false);
        assert!(!account.is_active());
    }

    #[test]
    fn test_empty_repository() {
        let repo = InMemoryAccountRepository::new();
        assert!(repo.is_empty());
        assert!(repo.find_by_id(1).is_none());
        assert!(repo.find_by_username("alice").is_none());
    }

    #[test]
    fn test_find_by_id_and_username() {
        let repo = InMemoryAccountRepository::new()
            .with_account(Account::new(1, "alice", "secret"))
            .with_account(Account::new(2, "bob", "hunter2"));

        assert_eq!(repo.len(), 2);
        assert_eq!(repo.find_by_id(2).unwrap().get_username(), "bob");
        assert_eq!(repo.find_by_username("alice").unwrap().get_id(), 1);
        assert!(repo.find_by_username("carol").is_none());
    }

    #[test]
    fn test_find_by_email() {
        let repo = InMemoryAccountRepository::new()
            .with_account(Account::new(1, "alice", "secret").email("alice@example.com"))
            .with_account(Account::new(2, "bob", "hunter2"));

        assert_eq!(
            repo.find_by_email("alice@example.com").unwrap().get_id(),
            1
        );
        assert!(repo.find_by_email("nobody@example.com").is_none());
    }

    #[test]
    fn test_find_by_empty_email_never_matches() {
        // bob has no email; an empty lookup must not resolve to him
        let repo =
            InMemoryAccountRepository::new().with_account(Account::new(2, "bob", "hunter2"));
        assert!(repo.find_by_email("").is_none());
    }

    #[test]
    fn test_duplicate_id_is_skipped() {
        let repo = InMemoryAccountRepository::new()
            .with_account(Account::new(1, "alice", "secret"))
            .with_account(Account::new(1, "impostor", "x"));

        assert_eq!(repo.len(), 1);
        assert_eq!(repo.find_by_id(1).unwrap().get_username(), "alice");
    }

    #[test]
    fn test_all_ordered_by_id() {
        let repo = InMemoryAccountRepository::new()
            .with_account(Account::new(3, "carol", "c"))
            .with_account(Account::new(1, "alice", "a"))
            .with_account(Account::new(2, "bob", "b"));

        let ids: Vec<u64> = repo.all().iter().map(Account::get_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
