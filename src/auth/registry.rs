use uuid::Uuid;

use super::{normalize_email, AuthError};
use crate::crypto::PasswordHasher;
use crate::db::{keys, KeyValueStore, LocalStore};
use crate::models::Account;

/// Registered accounts, persisted as one JSON array.
///
/// Email uniqueness is checked here at registration time only; the
/// storage layer itself holds no constraint.
pub struct AccountRegistry<'a, S: KeyValueStore> {
    store: &'a LocalStore<S>,
    hasher: &'a PasswordHasher,
}

impl<'a, S: KeyValueStore> AccountRegistry<'a, S> {
    pub fn new(store: &'a LocalStore<S>, hasher: &'a PasswordHasher) -> Self {
        Self { store, hasher }
    }

    /// Every account, empty when the stored value is unreadable.
    pub fn list(&self) -> Vec<Account> {
        self.store.read_list(keys::USERS)
    }

    /// Every account, failing when the stored value cannot be read. Used
    /// before any write so a bad read never overwrites existing accounts.
    pub fn load(&self) -> Result<Vec<Account>, AuthError> {
        Ok(self.store.try_read_list(keys::USERS)?)
    }

    pub fn find_by_email(&self, email: &str) -> Option<Account> {
        let email = normalize_email(email);
        self.list()
            .into_iter()
            .find(|a| a.email.to_lowercase() == email)
    }

    /// `Ok(None)` means the accounts were read and none has this id.
    pub fn find_by_id(&self, user_id: &str) -> Result<Option<Account>, AuthError> {
        Ok(self.load()?.into_iter().find(|a| a.user_id == user_id))
    }

    /// Create an account. The email is stored lowercased.
    pub fn register(&self, email: &str, password: &str) -> Result<Account, AuthError> {
        let email = normalize_email(email);
        let mut accounts = self.load()?;
        if accounts.iter().any(|a| a.email.to_lowercase() == email) {
            tracing::debug!("Registration rejected: email already registered");
            return Err(AuthError::DuplicateAccount);
        }

        let account = Account {
            user_id: format!("user_{}", Uuid::new_v4().simple()),
            email,
            password_hash: self.hasher.hash(password),
        };
        accounts.push(account.clone());
        self.store.try_write_json(keys::USERS, &accounts)?;

        tracing::info!(user_id = %account.user_id, "Account registered");
        Ok(account)
    }

    /// Check credentials without touching the session.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<Account, AuthError> {
        let account = self
            .find_by_email(email)
            .ok_or(AuthError::InvalidCredentials)?;

        match self.hasher.verify(password, &account.password_hash) {
            Ok(true) => Ok(account),
            Ok(false) => Err(AuthError::InvalidCredentials),
            Err(e) => {
                tracing::warn!(user_id = %account.user_id, error = %e, "Stored credential hash unreadable");
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    /// Remove every account with this email. Returns whether one was removed.
    pub fn remove(&self, email: &str) -> Result<bool, AuthError> {
        let email = normalize_email(email);
        let accounts = self.load()?;
        let before = accounts.len();
        let kept: Vec<Account> = accounts
            .into_iter()
            .filter(|a| a.email.to_lowercase() != email)
            .collect();
        if kept.len() == before {
            return Ok(false);
        }
        self.store.try_write_json(keys::USERS, &kept)?;
        tracing::info!(removed = before - kept.len(), "Account removed");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    fn setup() -> (LocalStore<MemoryStore>, PasswordHasher) {
        (LocalStore::new(MemoryStore::new()), PasswordHasher::new(1_000))
    }

    #[test]
    fn register_lowercases_email() {
        let (store, hasher) = setup();
        let registry = AccountRegistry::new(&store, &hasher);
        let account = registry.register("Alice@Example.COM", "password1").unwrap();
        assert_eq!(account.email, "alice@example.com");
        assert!(account.user_id.starts_with("user_"));
        assert_eq!(registry.list().len(), 1);
    }

    #[test]
    fn duplicate_email_rejected_regardless_of_case() {
        let (store, hasher) = setup();
        let registry = AccountRegistry::new(&store, &hasher);
        registry.register("bob@example.com", "password1").unwrap();
        let result = registry.register("BOB@example.com", "different");
        assert_eq!(result, Err(AuthError::DuplicateAccount));
        assert_eq!(registry.list().len(), 1);
    }

    #[test]
    fn password_is_not_stored_in_clear() {
        let (store, hasher) = setup();
        let registry = AccountRegistry::new(&store, &hasher);
        registry.register("carol@example.com", "plaintext-secret").unwrap();
        let raw = store.read_raw(keys::USERS).unwrap();
        assert!(!raw.contains("plaintext-secret"));
        assert!(raw.contains("\"passwordHash\""));
        assert!(raw.contains("\"userId\""));
    }

    #[test]
    fn authenticate_checks_password() {
        let (store, hasher) = setup();
        let registry = AccountRegistry::new(&store, &hasher);
        let created = registry.register("dave@example.com", "right-pass").unwrap();

        let found = registry.authenticate("DAVE@example.com", "right-pass").unwrap();
        assert_eq!(found, created);
        assert_eq!(
            registry.authenticate("dave@example.com", "wrong-pass"),
            Err(AuthError::InvalidCredentials)
        );
        assert_eq!(
            registry.authenticate("nobody@example.com", "right-pass"),
            Err(AuthError::InvalidCredentials)
        );
    }

    #[test]
    fn legacy_mock_hash_never_authenticates() {
        let (store, hasher) = setup();
        store.write_json(
            keys::USERS,
            &vec![Account {
                user_id: "user_legacy".into(),
                email: "old@example.com".into(),
                password_hash: "hashed_secret1_mock".into(),
            }],
        );
        let registry = AccountRegistry::new(&store, &hasher);
        assert_eq!(
            registry.authenticate("old@example.com", "secret1"),
            Err(AuthError::InvalidCredentials)
        );
    }

    #[test]
    fn remove_deletes_only_matching_account() {
        let (store, hasher) = setup();
        let registry = AccountRegistry::new(&store, &hasher);
        let keep = registry.register("keep@example.com", "password1").unwrap();
        registry.register("drop@example.com", "password2").unwrap();

        assert_eq!(registry.remove("DROP@example.com"), Ok(true));
        assert_eq!(registry.remove("drop@example.com"), Ok(false));

        let remaining = registry.list();
        assert_eq!(remaining, vec![keep.clone()]);
        assert_eq!(registry.find_by_id(&keep.user_id), Ok(Some(keep)));
    }

    #[test]
    fn register_over_unreadable_accounts_writes_nothing() {
        let (store, hasher) = setup();
        let registry = AccountRegistry::new(&store, &hasher);
        registry.register("alice@example.com", "password1").unwrap();

        let mut raw: Vec<serde_json::Value> =
            serde_json::from_str(&store.read_raw(keys::USERS).unwrap()).unwrap();
        raw.push(serde_json::json!({ "email": "legacy@example.com" }));
        let corrupted = serde_json::to_string(&raw).unwrap();
        store.write_raw(keys::USERS, &corrupted);

        let result = registry.register("alice@example.com", "other99");
        assert!(matches!(result, Err(AuthError::StorageUnavailable(_))));
        assert_eq!(store.read_raw(keys::USERS), Some(corrupted));
    }

    #[test]
    fn remove_over_unreadable_accounts_writes_nothing() {
        let (store, hasher) = setup();
        store.write_raw(keys::USERS, "not json");
        let registry = AccountRegistry::new(&store, &hasher);

        assert!(matches!(
            registry.remove("alice@example.com"),
            Err(AuthError::StorageUnavailable(_))
        ));
        assert_eq!(store.read_raw(keys::USERS).as_deref(), Some("not json"));
    }

    #[test]
    fn register_with_unavailable_storage_fails() {
        let (store, hasher) = setup();
        store.backend().set_available(false);
        let registry = AccountRegistry::new(&store, &hasher);

        assert!(matches!(
            registry.register("alice@example.com", "password1"),
            Err(AuthError::StorageUnavailable(_))
        ));
    }

    #[test]
    fn find_by_id_tells_unreadable_from_missing() {
        let (store, hasher) = setup();
        let registry = AccountRegistry::new(&store, &hasher);
        assert_eq!(registry.find_by_id("user_1"), Ok(None));

        store.write_raw(keys::USERS, "{");
        assert!(registry.find_by_id("user_1").is_err());
    }
}
