//! In-memory registry of every resident and administrator account.
//!
//! The registry owns the approval workflow. Accounts are appended on
//! registration, never removed, and only their status changes afterwards.

use std::sync::Arc;

use mockable::Clock;
use tracing::{debug, info, warn};

use crate::domain::account::{Account, AccountId, AccountStatus, Role};
use crate::domain::ports::CredentialVerifier;
use crate::domain::registration::ResidentProfile;

/// Ordered collection of accounts plus the approval operations over them.
pub struct UserRegistry {
    accounts: Vec<Account>,
    clock: Arc<dyn Clock>,
    verifier: Arc<dyn CredentialVerifier>,
}

impl UserRegistry {
    /// Create an empty registry.
    pub fn new(clock: Arc<dyn Clock>, verifier: Arc<dyn CredentialVerifier>) -> Self {
        Self {
            accounts: Vec::new(),
            clock,
            verifier,
        }
    }

    /// Append a pre-built account, e.g. one loaded from a seed registry.
    pub fn seed(&mut self, account: Account) {
        debug!(account_id = %account.id(), role = %account.role(), "account seeded");
        self.accounts.push(account);
    }

    /// Register a new resident. The account starts pending approval.
    pub fn register(&mut self, profile: ResidentProfile) -> Account {
        let account = Account::resident(AccountId::random(), profile, self.clock.utc());
        info!(
            account_id = %account.id(),
            apartment = account.apartment(),
            "resident registered; awaiting approval"
        );
        self.accounts.push(account.clone());
        account
    }

    /// Find the first account whose email and password match exactly.
    ///
    /// The lookup ignores approval status; gating on status is the
    /// session's job. Accounts without a password never match, and verifier
    /// failures count as a mismatch.
    pub fn find_by_credentials(&self, email: &str, password: &str) -> Option<&Account> {
        self.accounts
            .iter()
            .filter(|account| account.email() == email)
            .find(|account| self.password_matches(account, password))
    }

    fn password_matches(&self, account: &Account, presented: &str) -> bool {
        let Some(stored) = account.password() else {
            return false;
        };
        match self.verifier.verify(stored, presented) {
            Ok(matched) => matched,
            Err(error) => {
                warn!(account_id = %account.id(), error = %error, "credential verification failed");
                false
            }
        }
    }

    /// Look up an account by id.
    pub fn find(&self, id: &AccountId) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id() == id)
    }

    /// First resident registered against `apartment`.
    pub fn find_resident_by_apartment(&self, apartment: &str) -> Option<&Account> {
        self.accounts
            .iter()
            .find(|account| account.role() == Role::Resident && account.apartment() == apartment)
    }

    /// Set the status of an account.
    ///
    /// Returns `None` and leaves the registry untouched when the id is
    /// unknown.
    pub fn update_status(&mut self, id: &AccountId, status: AccountStatus) -> Option<&Account> {
        let Some(slot) = self.accounts.iter_mut().find(|account| account.id() == id) else {
            warn!(account_id = %id, status = %status, "status update for unknown account ignored");
            return None;
        };
        let previous = slot.status();
        *slot = slot.clone().with_status(status);
        info!(account_id = %id, from = %previous, to = %status, "account status updated");
        Some(&*slot)
    }

    /// Residents awaiting approval, in registration order.
    pub fn list_pending(&self) -> Vec<&Account> {
        self.accounts
            .iter()
            .filter(|account| {
                account.role() == Role::Resident && account.status() == AccountStatus::Pending
            })
            .collect()
    }

    /// Every account, in registration order.
    pub fn list_all(&self) -> &[Account] {
        &self.accounts
    }
}

#[cfg(test)]
mod tests;
