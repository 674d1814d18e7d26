//! Application state for one running client.
//!
//! [`Community`] owns one instance of every store plus the session, and
//! implements the role-gated flows the resident and admin pages drive. Tests
//! build an isolated community per case instead of sharing global state.

use std::sync::Arc;

use chrono::NaiveDate;
use mockable::Clock;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::access_request::{
    AccessRequest, AccessRequestId, Comment, DeliveryDetails, NewAccessRequest, RequestStatus,
    StatusFilter, StatusTransition,
};
use crate::domain::access_request_store::AccessRequestStore;
use crate::domain::account::{Account, AccountId, AccountStatus, Role};
use crate::domain::auth::LoginCredentials;
use crate::domain::error::DomainError;
use crate::domain::maintenance::{ChargeId, MaintenanceCharge, MaintenanceLedger};
use crate::domain::notices::{Broadcast, Invitation, InvitationDraft, NoticeBoard, NoticeId, Rsvp};
use crate::domain::ports::{CredentialVerifier, PlaintextCredentialVerifier};
use crate::domain::registration::{RegistrationError, RegistrationRequest, ResidentProfile};
use crate::domain::session::Session;
use crate::domain::user_registry::UserRegistry;

/// Every store of the community plus the current session.
pub struct Community {
    registry: UserRegistry,
    requests: AccessRequestStore,
    session: Session,
    notices: NoticeBoard,
    maintenance: MaintenanceLedger,
}

impl Community {
    /// Create an empty community.
    pub fn new(clock: Arc<dyn Clock>, verifier: Arc<dyn CredentialVerifier>) -> Self {
        Self {
            registry: UserRegistry::new(clock.clone(), verifier),
            requests: AccessRequestStore::new(clock.clone()),
            session: Session::new(),
            notices: NoticeBoard::new(clock.clone()),
            maintenance: MaintenanceLedger::new(clock),
        }
    }

    /// Create an empty community comparing passwords in plain text.
    pub fn with_plaintext_credentials(clock: Arc<dyn Clock>) -> Self {
        Self::new(clock, Arc::new(PlaintextCredentialVerifier))
    }

    /// Every registered account.
    pub fn registry(&self) -> &UserRegistry {
        &self.registry
    }

    /// Delivery access requests and their comments.
    pub fn requests(&self) -> &AccessRequestStore {
        &self.requests
    }

    /// The current login, if any.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Announcements and invitations.
    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    /// Maintenance charges per apartment.
    pub fn maintenance(&self) -> &MaintenanceLedger {
        &self.maintenance
    }

    pub(crate) fn notices_mut(&mut self) -> &mut NoticeBoard {
        &mut self.notices
    }

    pub(crate) fn maintenance_mut(&mut self) -> &mut MaintenanceLedger {
        &mut self.maintenance
    }

    /// Add a pre-built account, bypassing registration.
    pub fn seed_account(&mut self, account: Account) {
        self.registry.seed(account);
    }

    // Accounts and session.

    /// Validate a registration form and add the resident, pending approval.
    pub fn register_resident(
        &mut self,
        request: RegistrationRequest,
    ) -> Result<Account, RegistrationError> {
        let profile = ResidentProfile::try_from(request)?;
        Ok(self.registry.register(profile))
    }

    /// Log in any approved account.
    pub fn login(&mut self, email: &str, password: &str) -> Result<Account, DomainError> {
        let credentials = parse_credentials(email, password)?;
        self.session.login(&self.registry, &credentials)
    }

    /// Log in through the security login page, which only admits
    /// administrators. A resident's credentials leave the session untouched.
    pub fn admin_login(&mut self, email: &str, password: &str) -> Result<Account, DomainError> {
        let credentials = parse_credentials(email, password)?;
        let is_resident = self
            .registry
            .find_by_credentials(credentials.email(), credentials.password())
            .is_some_and(|account| account.role() != Role::Admin);
        if is_resident {
            return Err(DomainError::forbidden("admin access required"));
        }
        self.session.login(&self.registry, &credentials)
    }

    /// End the current session. Logging out twice is harmless.
    pub fn logout(&mut self) {
        self.session.logout();
    }

    /// The logged-in account as currently stored.
    pub fn current_account(&self) -> Option<&Account> {
        self.session.current(&self.registry)
    }

    fn require(&self, role: Role) -> Result<&Account, DomainError> {
        self.session.require_role(&self.registry, role)
    }

    fn require_any(&self) -> Result<&Account, DomainError> {
        let account = self
            .current_account()
            .ok_or_else(|| DomainError::unauthorized("login required"))?;
        if !account.is_approved() {
            return Err(DomainError::forbidden(format!("account is {}", account.status())));
        }
        Ok(account)
    }

    // Delivery access.

    /// Raise a delivery request for the logged-in resident.
    pub fn request_delivery_access(
        &mut self,
        details: DeliveryDetails,
    ) -> Result<AccessRequest, DomainError> {
        let user_id = self.require(Role::Resident)?.id().clone();
        Ok(self.requests.create(NewAccessRequest {
            user_id,
            details,
            initiated_by_admin: false,
        }))
    }

    /// Raise a delivery request on behalf of the resident of `apartment`.
    pub fn create_request_for_apartment(
        &mut self,
        apartment: &str,
        details: DeliveryDetails,
    ) -> Result<AccessRequest, DomainError> {
        let admin_id = self.require(Role::Admin)?.id().clone();
        let user_id = self
            .registry
            .find_resident_by_apartment(apartment)
            .map(|resident| resident.id().clone())
            .ok_or_else(|| {
                DomainError::not_found(format!("no resident registered for apartment {apartment}"))
            })?;
        info!(admin_id = %admin_id, apartment, "admin raising request for resident");
        Ok(self.requests.create(NewAccessRequest {
            user_id,
            details,
            initiated_by_admin: true,
        }))
    }

    /// Approve or reject a pending delivery request.
    pub fn review_access_request(
        &mut self,
        request_id: &AccessRequestId,
        status: RequestStatus,
    ) -> Result<AccessRequest, DomainError> {
        self.require(Role::Admin)?;
        match self.requests.update_status(request_id, status) {
            StatusTransition::Applied(request) => Ok(request),
            StatusTransition::UnknownRequest => {
                Err(DomainError::unknown("access request", request_id))
            }
            StatusTransition::Illegal { from, to } => Err(DomainError::invalid_request(format!(
                "access request {request_id} cannot move from {from} to {to}"
            ))
            .with_details(json!({ "from": from, "to": to }))),
        }
    }

    /// Leave a comment on a request. Residents may only comment on their own.
    pub fn comment_on_request(
        &mut self,
        request_id: &AccessRequestId,
        text: &str,
    ) -> Result<Comment, DomainError> {
        let author = self.require_any()?;
        let author_id = author.id().clone();
        let request = self
            .requests
            .find(request_id)
            .ok_or_else(|| DomainError::unknown("access request", request_id))?;
        if author.role() == Role::Resident && request.user_id() != &author_id {
            return Err(DomainError::forbidden("residents may only comment on their own requests"));
        }
        if text.trim().is_empty() {
            return Err(DomainError::invalid_request("comment must not be empty"));
        }
        self.requests
            .add_comment(request_id, &author_id, text)
            .ok_or_else(|| DomainError::unknown("access request", request_id))
    }

    /// Requests of the logged-in resident, newest first.
    pub fn my_requests(&self) -> Result<Vec<&AccessRequest>, DomainError> {
        let account = self.require(Role::Resident)?;
        Ok(self.requests.list_for_user(account.id()))
    }

    /// The admin request list.
    pub fn filtered_requests(
        &self,
        filter: StatusFilter,
        search: &str,
    ) -> Result<Vec<&AccessRequest>, DomainError> {
        self.require(Role::Admin)?;
        Ok(self.requests.list_filtered(filter, search, &self.registry))
    }

    // Registrations.

    /// Residents awaiting approval.
    pub fn pending_registrations(&self) -> Result<Vec<&Account>, DomainError> {
        self.require(Role::Admin)?;
        Ok(self.registry.list_pending())
    }

    /// Approve or reject a resident registration.
    ///
    /// Only resident accounts are reviewed here, and only to a decided
    /// status. A later review may overturn an earlier decision.
    ///
    /// # Errors
    ///
    /// [`ErrorCode::InvalidRequest`](crate::domain::ErrorCode::InvalidRequest)
    /// when `status` is pending, and
    /// [`ErrorCode::Forbidden`](crate::domain::ErrorCode::Forbidden) when the
    /// account is an administrator.
    pub fn review_registration(
        &mut self,
        account_id: &AccountId,
        status: AccountStatus,
    ) -> Result<Account, DomainError> {
        let reviewer_id = self.require(Role::Admin)?.id().clone();
        if status == AccountStatus::Pending {
            return Err(DomainError::invalid_request(
                "registrations can only be approved or rejected",
            )
            .with_details(json!({ "status": status })));
        }
        let target = self
            .registry
            .find(account_id)
            .ok_or_else(|| DomainError::unknown("account", account_id))?;
        if target.role() != Role::Resident {
            warn!(
                reviewer_id = %reviewer_id,
                account_id = %account_id,
                "refusing to review a non-resident account"
            );
            return Err(DomainError::forbidden("only resident registrations can be reviewed"));
        }
        self.registry
            .update_status(account_id, status)
            .cloned()
            .ok_or_else(|| DomainError::unknown("account", account_id))
    }

    // Notices.

    /// Publish an announcement signed by the logged-in administrator.
    pub fn post_broadcast(&mut self, title: &str, body: &str) -> Result<Broadcast, DomainError> {
        let posted_by = self.require(Role::Admin)?.name().to_owned();
        Ok(self.notices.post_broadcast(title, body, posted_by))
    }

    /// Invite neighbours to a celebration hosted by the logged-in resident.
    pub fn host_invitation(&mut self, draft: InvitationDraft) -> Result<Invitation, DomainError> {
        let host = self.require(Role::Resident)?.clone();
        Ok(self.notices.create_invitation(&host, draft))
    }

    /// Accept or decline an invitation as the logged-in resident.
    pub fn respond_to_invitation(
        &mut self,
        invitation_id: NoticeId,
        response: Rsvp,
    ) -> Result<Invitation, DomainError> {
        let guest_id = self.require(Role::Resident)?.id().clone();
        self.notices
            .respond(invitation_id, &guest_id, response)
            .ok_or_else(|| DomainError::unknown("invitation", invitation_id))
    }

    // Maintenance.

    /// Raise a maintenance charge against an apartment.
    pub fn raise_maintenance_charge(
        &mut self,
        apartment: &str,
        description: &str,
        amount_minor: u64,
        due_on: NaiveDate,
    ) -> Result<MaintenanceCharge, DomainError> {
        self.require(Role::Admin)?;
        if amount_minor == 0 {
            return Err(DomainError::invalid_request("charge amount must be positive"));
        }
        Ok(self
            .maintenance
            .raise_charge(apartment, description, amount_minor, due_on))
    }

    /// Pay a charge raised against the logged-in resident's apartment.
    pub fn pay_charge(&mut self, charge_id: ChargeId) -> Result<MaintenanceCharge, DomainError> {
        let apartment = self.require(Role::Resident)?.apartment().to_owned();
        let charge = self
            .maintenance
            .find(charge_id)
            .ok_or_else(|| DomainError::unknown("charge", charge_id))?;
        if charge.apartment != apartment {
            return Err(DomainError::forbidden("charge belongs to another apartment"));
        }
        self.maintenance
            .mark_paid(charge_id)
            .ok_or_else(|| DomainError::unknown("charge", charge_id))
    }

    /// Unpaid charges of the logged-in resident's apartment.
    pub fn my_pending_charges(&self) -> Result<Vec<&MaintenanceCharge>, DomainError> {
        let account = self.require(Role::Resident)?;
        Ok(self.maintenance.pending_for(account.apartment()))
    }

    /// Paid charges of the logged-in resident's apartment.
    pub fn my_payment_history(&self) -> Result<Vec<&MaintenanceCharge>, DomainError> {
        let account = self.require(Role::Resident)?;
        Ok(self.maintenance.history_for(account.apartment()))
    }
}

fn parse_credentials(email: &str, password: &str) -> Result<LoginCredentials, DomainError> {
    LoginCredentials::try_from_parts(email, password)
        .map_err(|err| DomainError::invalid_request(err.to_string()))
}

#[cfg(test)]
mod tests;
