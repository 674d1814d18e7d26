//! Seed record types.
//!
//! These types describe fixture accounts, notices, and charges as they appear
//! in the registry JSON, plus the residents produced by generation. They are
//! independent of backend domain types to avoid circular dependencies.

use serde::{Deserialize, Serialize};

/// Role of a seeded account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleSeed {
    /// A resident of the community.
    Resident,
    /// A security or management administrator.
    Admin,
}

/// Approval status of a seeded account.
///
/// Mirrors the backend's `AccountStatus` enum without creating a dependency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusSeed {
    /// Awaiting review by an administrator.
    #[default]
    Pending,
    /// Approved by an administrator.
    Approved,
    /// Rejected by an administrator.
    Rejected,
}

/// Occupancy of a seeded resident.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OccupancySeed {
    /// The resident owns the apartment.
    Owner,
    /// The resident rents the apartment from its owner.
    #[serde(rename_all = "camelCase")]
    Tenant {
        /// Full name of the apartment owner.
        owner_name: String,
        /// Contact number of the apartment owner.
        owner_contact: String,
    },
}

/// A fixed or generated account record.
///
/// # Example
///
/// ```
/// use example_data::{AccountSeed, OccupancySeed, RoleSeed, StatusSeed};
///
/// let account = AccountSeed {
///     id: "user-1".to_owned(),
///     role: RoleSeed::Resident,
///     status: StatusSeed::Approved,
///     name: "John Doe".to_owned(),
///     apartment: "A-101".to_owned(),
///     email: "john@example.com".to_owned(),
///     phone: "1234567890".to_owned(),
///     password: Some("password123".to_owned()),
///     occupancy: Some(OccupancySeed::Owner),
/// };
///
/// assert_eq!(account.apartment, "A-101");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSeed {
    /// Stable account identifier.
    pub id: String,
    /// Account role.
    pub role: RoleSeed,
    /// Approval status.
    #[serde(default)]
    pub status: StatusSeed,
    /// Full name.
    pub name: String,
    /// Apartment identifier such as `A-101`.
    pub apartment: String,
    /// Email address used for login.
    pub email: String,
    /// Phone number.
    pub phone: String,
    /// Plain-text password, when the account can log in.
    #[serde(default)]
    pub password: Option<String>,
    /// Occupancy details for residents.
    #[serde(default)]
    pub occupancy: Option<OccupancySeed>,
}

/// A broadcast notice shown on resident dashboards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastSeed {
    /// Notice headline.
    pub title: String,
    /// Notice body text.
    pub body: String,
    /// Label of the poster, e.g. `Management`.
    pub posted_by: String,
}

/// A celebration invitation hosted by a seeded account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitationSeed {
    /// Invitation headline.
    pub title: String,
    /// Identifier of the hosting account.
    pub host_account_id: String,
    /// Display label of the host, e.g. `John Doe (A-101)`.
    pub host_label: String,
    /// Free-text schedule such as `Next Saturday, 6 PM`.
    pub schedule: String,
    /// Invitation message.
    pub message: String,
}

/// A maintenance charge raised against an apartment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceChargeSeed {
    /// Apartment the charge applies to.
    pub apartment: String,
    /// Charge description.
    pub description: String,
    /// Amount in minor currency units.
    pub amount_minor: u64,
    /// Due date in `YYYY-MM-DD` form.
    pub due_on: String,
}
