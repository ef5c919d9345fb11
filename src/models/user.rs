//! User model
//!
//! A user holds login credentials and an ordered list of wallets with unique
//! names. Credentials are stored and compared as plain text; real
//! authentication security is out of scope for this application.

use serde::{Deserialize, Serialize};

use super::wallet::Wallet;

/// An account holder with login credentials and a list of wallets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    login: String,
    password: String,
    wallets: Vec<Wallet>,
}

impl User {
    /// Create a user with no wallets
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: password.into(),
            wallets: Vec::new(),
        }
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    /// Plain-text credential comparison
    pub fn verify_password(&self, password: &str) -> bool {
        self.password == password
    }

    pub fn wallets(&self) -> &[Wallet] {
        &self.wallets
    }

    /// Look up a wallet by exact name
    pub fn wallet(&self, name: &str) -> Option<&Wallet> {
        self.wallets.iter().find(|w| w.name() == name)
    }

    /// Mutable lookup by exact name
    pub fn wallet_mut(&mut self, name: &str) -> Option<&mut Wallet> {
        self.wallets.iter_mut().find(|w| w.name() == name)
    }

    /// True when a wallet with this name exists
    pub fn has_wallet(&self, name: &str) -> bool {
        self.wallet(name).is_some()
    }

    /// Append a new empty wallet. The caller enforces name uniqueness.
    pub fn add_wallet(&mut self, name: impl Into<String>) {
        self.wallets.push(Wallet::new(name));
    }

    /// Remove a wallet by name; false when no wallet matched
    pub fn remove_wallet(&mut self, name: &str) -> bool {
        let before = self.wallets.len();
        self.wallets.retain(|w| w.name() != name);
        self.wallets.len() != before
    }
}
