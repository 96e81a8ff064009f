use serde::{Deserialize, Serialize};

/// A registered identity. Stored in the accounts collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub user_id: String,
    /// Always stored lowercased.
    pub email: String,
    pub password_hash: String,
}

/// The persisted "current user" entry of an authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub email: String,
    pub user_id: String,
}

impl From<&Account> for SessionUser {
    fn from(account: &Account) -> Self {
        Self {
            email: account.email.clone(),
            user_id: account.user_id.clone(),
        }
    }
}
