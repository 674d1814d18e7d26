//! Delivery access requests and the comments attached to them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::account::AccountId;

/// Identifier of an access request.
///
/// Ids derive from the creation time in Unix milliseconds. A `-n` suffix
/// separates requests created within the same millisecond.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessRequestId(String);

impl AccessRequestId {
    /// Build an id from a millisecond timestamp and a collision counter.
    ///
    /// # Examples
    /// ```
    /// use secudeliv::domain::AccessRequestId;
    ///
    /// assert_eq!(AccessRequestId::from_millis(1_700_000_000_000, 0).as_ref(), "1700000000000");
    /// assert_eq!(AccessRequestId::from_millis(1_700_000_000_000, 2).as_ref(), "1700000000000-2");
    /// ```
    pub fn from_millis(millis: i64, suffix: u32) -> Self {
        if suffix == 0 {
            Self(millis.to_string())
        } else {
            Self(format!("{millis}-{suffix}"))
        }
    }
}

impl AsRef<str> for AccessRequestId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for AccessRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Error returned when parsing an unknown enum label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownLabelError {
    kind: &'static str,
    value: String,
}

impl UnknownLabelError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}

/// Kind of delivery awaiting access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryType {
    /// Meal or grocery order.
    Food,
    /// Parcel from a courier service.
    Courier,
    /// Letters and paperwork.
    Document,
}

impl DeliveryType {
    /// Lowercase label, as shown on the request cards.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Courier => "courier",
            Self::Document => "document",
        }
    }
}

impl fmt::Display for DeliveryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliveryType {
    type Err = UnknownLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "food" => Ok(Self::Food),
            "courier" => Ok(Self::Courier),
            "document" => Ok(Self::Document),
            other => Err(UnknownLabelError::new("delivery type", other)),
        }
    }
}

/// Review state of an access request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Awaiting a decision from the gate.
    #[default]
    Pending,
    /// The delivery person may enter.
    Approved,
    /// The delivery person is turned away.
    Rejected,
}

impl RequestStatus {
    /// Lowercase label used for filtering and serialization.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Approved and rejected requests are final.
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Only pending requests move, and only to a final state.
    pub const fn can_transition_to(&self, target: Self) -> bool {
        !self.is_terminal() && target.is_terminal()
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = UnknownLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(UnknownLabelError::new("request status", other)),
        }
    }
}

/// Status selector used by the admin request list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    /// Every request.
    #[default]
    All,
    /// Requests in one status.
    Only(RequestStatus),
}

impl StatusFilter {
    /// Whether a request in `status` passes the filter.
    pub fn admits(&self, status: RequestStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => *expected == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = UnknownLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(Self::All);
        }
        s.parse::<RequestStatus>()
            .map(Self::Only)
            .map_err(|_| UnknownLabelError::new("status filter", s))
    }
}

/// Who is delivering and what.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryDetails {
    /// Service the delivery comes from, e.g. `Swiggy`.
    #[serde(rename = "deliveryPlatform")]
    pub platform: String,
    /// Name of the person at the gate.
    #[serde(rename = "deliveryPersonName")]
    pub person_name: String,
    /// What is being delivered.
    pub delivery_type: DeliveryType,
}

/// Input to [`AccessRequestStore::create`](crate::domain::AccessRequestStore::create).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccessRequest {
    /// Resident the delivery is for.
    pub user_id: AccountId,
    /// Delivery platform, person and type.
    pub details: DeliveryDetails,
    /// Whether the gate raised it for the resident.
    pub initiated_by_admin: bool,
}

/// A request for temporary delivery access on behalf of one resident.
///
/// ## Invariants
/// - `updated_at >= created_at`.
/// - Once approved or rejected the status never changes again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessRequest {
    id: AccessRequestId,
    user_id: AccountId,
    #[serde(flatten)]
    details: DeliveryDetails,
    status: RequestStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    initiated_by_admin: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    delivery_person_image: Option<String>,
}

impl AccessRequest {
    pub(crate) fn new(id: AccessRequestId, request: NewAccessRequest, at: DateTime<Utc>) -> Self {
        let NewAccessRequest {
            user_id,
            details,
            initiated_by_admin,
        } = request;
        Self {
            id,
            user_id,
            details,
            status: RequestStatus::Pending,
            created_at: at,
            updated_at: at,
            initiated_by_admin,
            comment: None,
            delivery_person_image: None,
        }
    }

    pub(crate) fn set_status(&mut self, status: RequestStatus, at: DateTime<Utc>) {
        self.status = status;
        self.touch(at);
    }

    pub(crate) fn set_comment(&mut self, comment: String, at: DateTime<Utc>) {
        self.comment = Some(comment);
        self.touch(at);
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at.max(self.created_at);
    }

    /// Creation-time identifier.
    pub fn id(&self) -> &AccessRequestId {
        &self.id
    }

    /// Resident the delivery is for.
    pub fn user_id(&self) -> &AccountId {
        &self.user_id
    }

    /// Delivery platform, person and type.
    pub fn details(&self) -> &DeliveryDetails {
        &self.details
    }

    /// Current review state.
    pub fn status(&self) -> RequestStatus {
        self.status
    }

    /// When the request was raised.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last status or comment change; never before `created_at`.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Whether an administrator raised the request for the resident.
    pub fn initiated_by_admin(&self) -> bool {
        self.initiated_by_admin
    }

    /// Review note set through `update_comment`.
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Photo reference of the delivery person. Uploads are not supported, so
    /// this is always `None`.
    pub fn delivery_person_image(&self) -> Option<&str> {
        self.delivery_person_image.as_deref()
    }
}

/// Identifier of a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(Uuid);

impl CommentId {
    /// A fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A note left on an access request. Comments are never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Comment identifier.
    pub id: CommentId,
    /// Request the comment belongs to.
    pub request_id: AccessRequestId,
    /// Resident or administrator who wrote it.
    pub author_id: AccountId,
    /// Comment body.
    pub text: String,
    /// When it was posted.
    pub created_at: DateTime<Utc>,
}

/// Result of asking the store to change a request's status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusTransition {
    /// The status changed; carries the updated request.
    Applied(AccessRequest),
    /// No request has the given id. Nothing changed.
    UnknownRequest,
    /// The request is already decided, or the target is not a decision.
    Illegal {
        from: RequestStatus,
        to: RequestStatus,
    },
}

impl StatusTransition {
    /// The updated request when the transition applied.
    pub fn applied(self) -> Option<AccessRequest> {
        match self {
            Self::Applied(request) => Some(request),
            Self::UnknownRequest | Self::Illegal { .. } => None,
        }
    }
}
