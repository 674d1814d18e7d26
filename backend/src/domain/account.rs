//! Account data model.
//!
//! Accounts are the residents and administrators known to the
//! [`UserRegistry`](crate::domain::UserRegistry). Tenancy details live in the
//! [`Occupancy`] variant so a tenant can never exist without its owner's name
//! and contact.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::domain::registration::{AdminProfile, ContactDetails, ResidentProfile};

/// Validation errors returned by [`AccountId::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountIdValidationError {
    Empty,
    SurroundingWhitespace,
}

impl fmt::Display for AccountIdValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "account id must not be empty"),
            Self::SurroundingWhitespace => {
                write!(f, "account id must not contain surrounding whitespace")
            }
        }
    }
}

impl std::error::Error for AccountIdValidationError {}

/// Stable account identifier.
///
/// Seeded accounts use readable ids such as `user-1`; registrations receive a
/// random UUID string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(String);

impl AccountId {
    /// Validate and construct an [`AccountId`].
    ///
    /// # Examples
    /// ```
    /// use secudeliv::domain::AccountId;
    ///
    /// let id = AccountId::new("user-1").expect("valid id");
    /// assert_eq!(id.as_ref(), "user-1");
    /// assert!(AccountId::new(" user-1").is_err());
    /// ```
    pub fn new(id: impl Into<String>) -> Result<Self, AccountIdValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(AccountIdValidationError::Empty);
        }
        if id.trim() != id {
            return Err(AccountIdValidationError::SurroundingWhitespace);
        }
        Ok(Self(id))
    }

    /// Generate a new random [`AccountId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl AsRef<str> for AccountId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<AccountId> for String {
    fn from(value: AccountId) -> Self {
        value.0
    }
}

impl TryFrom<String> for AccountId {
    type Error = AccountIdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Role held by an account. Every account has exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Resident,
    Admin,
}

impl Role {
    /// Lowercase label used in messages and serialised payloads.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Resident => "resident",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Approval state of an account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl AccountStatus {
    /// Lowercase label used in messages and serialised payloads.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a resident owns or rents their apartment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Occupancy {
    Owner,
    #[serde(rename_all = "camelCase")]
    Tenant {
        owner_name: String,
        owner_contact: String,
    },
}

impl Occupancy {
    /// Name of the apartment owner when the resident is a tenant.
    pub fn owner_name(&self) -> Option<&str> {
        match self {
            Self::Owner => None,
            Self::Tenant { owner_name, .. } => Some(owner_name.as_str()),
        }
    }

    /// Contact number of the apartment owner when the resident is a tenant.
    pub fn owner_contact(&self) -> Option<&str> {
        match self {
            Self::Owner => None,
            Self::Tenant { owner_contact, .. } => Some(owner_contact.as_str()),
        }
    }
}

/// Plain-text password held in memory.
///
/// The value is wiped on drop and never printed or serialised. Comparison
/// goes through a [`CredentialVerifier`](crate::domain::ports::CredentialVerifier).
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Wrap a password string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(Zeroizing::new(value.into()))
    }

    /// Borrow the raw password for verification.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// A registered resident or seeded administrator.
///
/// ## Invariants
/// - `id` never changes once the account exists.
/// - Residents always carry an [`Occupancy`]; administrators never do.
/// - Only `status` changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    id: AccountId,
    role: Role,
    status: AccountStatus,
    name: String,
    apartment: String,
    email: String,
    phone: String,
    #[serde(skip)]
    password: Option<Password>,
    #[serde(skip_serializing_if = "Option::is_none")]
    occupancy: Option<Occupancy>,
    registered_at: DateTime<Utc>,
}

impl Account {
    /// Build a resident account awaiting approval.
    pub fn resident(id: AccountId, profile: ResidentProfile, registered_at: DateTime<Utc>) -> Self {
        let (contact, password, occupancy) = profile.into_parts();
        Self::from_contact(id, Role::Resident, contact, Some(password), Some(occupancy))
            .registered(registered_at)
    }

    /// Build an administrator account. Administrators are approved from the
    /// start.
    pub fn admin(id: AccountId, profile: AdminProfile, registered_at: DateTime<Utc>) -> Self {
        let (contact, password) = profile.into_parts();
        Self::from_contact(id, Role::Admin, contact, password, None)
            .registered(registered_at)
            .with_status(AccountStatus::Approved)
    }

    fn from_contact(
        id: AccountId,
        role: Role,
        contact: ContactDetails,
        password: Option<Password>,
        occupancy: Option<Occupancy>,
    ) -> Self {
        let ContactDetails {
            name,
            apartment,
            email,
            phone,
        } = contact;
        Self {
            id,
            role,
            status: AccountStatus::Pending,
            name,
            apartment,
            email,
            phone,
            password,
            occupancy,
            registered_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    fn registered(mut self, registered_at: DateTime<Utc>) -> Self {
        self.registered_at = registered_at;
        self
    }

    /// Return a copy of the account carrying `status`.
    #[must_use]
    pub fn with_status(mut self, status: AccountStatus) -> Self {
        self.status = status;
        self
    }

    /// Stable account identifier.
    pub fn id(&self) -> &AccountId {
        &self.id
    }

    /// Role held by the account.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Current approval status.
    pub fn status(&self) -> AccountStatus {
        self.status
    }

    /// Whether the account has been approved.
    pub fn is_approved(&self) -> bool {
        self.status == AccountStatus::Approved
    }

    /// Full name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Apartment identifier, or the post for administrators.
    pub fn apartment(&self) -> &str {
        &self.apartment
    }

    /// Login email.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Phone number.
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Stored password, if the account can log in.
    pub fn password(&self) -> Option<&Password> {
        self.password.as_ref()
    }

    /// Occupancy details; `None` for administrators.
    pub fn occupancy(&self) -> Option<&Occupancy> {
        self.occupancy.as_ref()
    }

    /// When the account was registered or seeded.
    pub fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }

    /// Label shown next to content the account authors, e.g. `John Doe (A-101)`.
    pub fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.apartment)
    }
}

#[cfg(test)]
mod tests;
