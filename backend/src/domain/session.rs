//! The single authenticated identity of a running client.
//!
//! The session stores only an [`AccountId`]. The account is re-read from the
//! [`UserRegistry`] on every access, so status changes made by an
//! administrator are visible immediately.

use tracing::{info, warn};

use crate::domain::account::{Account, AccountId, AccountStatus, Role};
use crate::domain::auth::LoginCredentials;
use crate::domain::error::DomainError;
use crate::domain::user_registry::UserRegistry;

/// At most one logged-in account.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Session {
    current: Option<AccountId>,
}

impl Session {
    /// A session with nobody logged in.
    pub fn new() -> Self {
        Self::default()
    }

    /// Authenticate against `registry` and remember the account.
    ///
    /// Only approved accounts may log in. On failure the previous session,
    /// if any, is kept.
    ///
    /// # Errors
    ///
    /// [`ErrorCode::Unauthorized`](crate::domain::ErrorCode::Unauthorized)
    /// when no account matches, and
    /// [`ErrorCode::Forbidden`](crate::domain::ErrorCode::Forbidden) when the
    /// account is pending or rejected.
    pub fn login(
        &mut self,
        registry: &UserRegistry,
        credentials: &LoginCredentials,
    ) -> Result<Account, DomainError> {
        let found = registry.find_by_credentials(credentials.email(), credentials.password());
        let Some(account) = found else {
            warn!("login rejected: invalid credentials");
            return Err(DomainError::unauthorized("invalid credentials"));
        };

        match account.status() {
            AccountStatus::Approved => {}
            AccountStatus::Pending => {
                warn!(account_id = %account.id(), "login rejected: account awaiting approval");
                return Err(DomainError::forbidden("account is awaiting approval"));
            }
            AccountStatus::Rejected => {
                warn!(account_id = %account.id(), "login rejected: account was rejected");
                return Err(DomainError::forbidden("account registration was rejected"));
            }
        }

        info!(account_id = %account.id(), role = %account.role(), "logged in");
        self.current = Some(account.id().clone());
        Ok(account.clone())
    }

    /// Forget the current account. Safe to call when nobody is logged in.
    pub fn logout(&mut self) {
        if let Some(id) = self.current.take() {
            info!(account_id = %id, "logged out");
        }
    }

    /// Id of the logged-in account.
    pub fn current_id(&self) -> Option<&AccountId> {
        self.current.as_ref()
    }

    /// The logged-in account as currently stored in `registry`.
    pub fn current<'r>(&self, registry: &'r UserRegistry) -> Option<&'r Account> {
        self.current.as_ref().and_then(|id| registry.find(id))
    }

    /// The logged-in account, provided it holds `role` and is approved.
    ///
    /// # Errors
    ///
    /// `Unauthorized` with nobody logged in; `Forbidden` for the wrong role or
    /// an account that is no longer approved.
    pub fn require_role<'r>(
        &self,
        registry: &'r UserRegistry,
        role: Role,
    ) -> Result<&'r Account, DomainError> {
        let account = self
            .current(registry)
            .ok_or_else(|| DomainError::unauthorized("login required"))?;
        if account.role() != role {
            return Err(DomainError::forbidden(format!("{role} access required")));
        }
        if !account.is_approved() {
            return Err(DomainError::forbidden(format!(
                "account is {}",
                account.status()
            )));
        }
        Ok(account)
    }
}
