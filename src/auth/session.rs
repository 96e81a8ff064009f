use super::registry::AccountRegistry;
use crate::db::{keys, KeyValueStore, LocalStore};
use crate::models::SessionUser;

const AUTHENTICATED: &str = "true";

/// Persisted half of the login session: the auth flag and the current user.
pub struct SessionStore<'a, S: KeyValueStore> {
    store: &'a LocalStore<S>,
}

impl<'a, S: KeyValueStore> SessionStore<'a, S> {
    pub fn new(store: &'a LocalStore<S>) -> Self {
        Self { store }
    }

    pub fn persist(&self, user: &SessionUser) {
        self.store.write_raw(keys::AUTH_STATUS, AUTHENTICATED);
        self.store.write_json(keys::CURRENT_USER, user);
    }

    /// The persisted user, if the auth flag is set and the entry parses.
    pub fn load(&self) -> Option<SessionUser> {
        let flag = self.store.read_raw(keys::AUTH_STATUS)?;
        if flag != AUTHENTICATED {
            return None;
        }
        self.store.read_json(keys::CURRENT_USER)
    }

    /// Always succeeds; failures to remove are only logged.
    pub fn clear(&self) {
        self.store.remove(keys::AUTH_STATUS);
        self.store.remove(keys::CURRENT_USER);
    }

    /// Rebuild the session after a fresh start.
    ///
    /// The persisted entry alone is not trusted: the account it names must
    /// still exist with the same id and email. A stale entry is cleared;
    /// one that cannot be checked because the accounts are unreadable is
    /// kept for the next start.
    pub fn restore(&self, registry: &AccountRegistry<'_, S>) -> Option<SessionUser> {
        let user = self.load()?;
        match registry.find_by_id(&user.user_id) {
            Ok(Some(account)) if account.email.eq_ignore_ascii_case(&user.email) => {
                tracing::info!(user_id = %account.user_id, "Session restored");
                Some(SessionUser::from(&account))
            }
            Err(e) => {
                tracing::warn!(user_id = %user.user_id, error = %e, "Accounts unreadable, session not restored");
                None
            }
            Ok(_) => {
                tracing::warn!(user_id = %user.user_id, "Persisted session has no matching account, clearing");
                self.clear();
                None
            }
        }
    }
}
