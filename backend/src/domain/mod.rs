//! Domain primitives, stores, and the community application state.
//!
//! Purpose: Define strongly typed community entities and the in-memory
//! stores that own them. Keep types immutable outside their store and
//! document invariants and serialisation contracts (serde) in each type's
//! Rustdoc.
//!
//! Public surface:
//! - DomainError: code, message and details returned by the role-gated flows.
//! - ErrorCode: stable error identifier.
//! - Account, AccountId, Role, AccountStatus, Occupancy: registry records.
//! - UserRegistry: accounts and the approval workflow.
//! - AccessRequestStore: delivery access requests and comments.
//! - Session: the single logged-in identity.
//! - NoticeBoard, MaintenanceLedger: dashboard content.
//! - Community: application state owning one of each store.
//! - ExampleDataSeeder: loads example-data registries into a community.

pub mod access_request;
pub mod access_request_store;
pub mod account;
pub mod auth;
pub mod community;
pub mod error;
pub mod example_data;
pub mod maintenance;
pub mod notices;
pub mod ports;
pub mod registration;
pub mod session;
pub mod user_registry;

pub use self::access_request::{
    AccessRequest, AccessRequestId, Comment, CommentId, DeliveryDetails, DeliveryType,
    NewAccessRequest, RequestStatus, StatusFilter, StatusTransition, UnknownLabelError,
};
pub use self::access_request_store::AccessRequestStore;
pub use self::account::{
    Account, AccountId, AccountIdValidationError, AccountStatus, Occupancy, Password, Role,
};
pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::community::Community;
pub use self::error::{DomainError, ErrorCode};
pub use self::example_data::{
    ExampleDataSeedOutcome, ExampleDataSeeder, ExampleDataSeedingError, SeedingResult,
};
pub use self::maintenance::{ChargeId, ChargeStatus, MaintenanceCharge, MaintenanceLedger};
pub use self::notices::{
    Broadcast, Invitation, InvitationDraft, NoticeBoard, NoticeId, Rsvp, RsvpEntry,
};
pub use self::registration::{
    AdminProfile, ContactDetails, OccupancyKind, RegistrationError, RegistrationRequest,
    ResidentProfile,
};
pub use self::session::Session;
pub use self::user_registry::UserRegistry;

