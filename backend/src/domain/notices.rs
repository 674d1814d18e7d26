//! Community broadcasts and celebration invitations.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::account::{Account, AccountId};

/// Identifier of a broadcast or invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoticeId(Uuid);

impl NoticeId {
    /// A fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for NoticeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Announcement from the management or security office.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Broadcast {
    /// Board identifier.
    pub id: NoticeId,
    /// Headline.
    pub title: String,
    /// Full text.
    pub body: String,
    /// Who posted it, e.g. `Management`.
    pub posted_by: String,
    /// When it was posted.
    pub posted_at: DateTime<Utc>,
}

/// A resident's answer to an invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rsvp {
    /// The guest will attend.
    Accepted,
    /// The guest will not attend.
    Declined,
}

/// The latest answer of one guest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpEntry {
    /// The responding resident.
    pub account_id: AccountId,
    /// Their answer.
    pub response: Rsvp,
}

/// Values a host supplies when inviting neighbours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvitationDraft {
    /// Occasion, e.g. `Housewarming`.
    pub title: String,
    /// Free-text time, e.g. `Next Saturday, 6 PM`.
    pub schedule: String,
    /// Note to the guests.
    pub message: String,
}

/// A celebration hosted by a resident.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Invitation {
    id: NoticeId,
    title: String,
    host_id: AccountId,
    host_label: String,
    schedule: String,
    message: String,
    created_at: DateTime<Utc>,
    responses: Vec<RsvpEntry>,
}

impl Invitation {
    /// Board identifier.
    pub fn id(&self) -> NoticeId {
        self.id
    }

    /// Occasion.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Hosting resident.
    pub fn host_id(&self) -> &AccountId {
        &self.host_id
    }

    /// Host as shown on the card, e.g. `John Doe (A-101)`.
    pub fn host_label(&self) -> &str {
        &self.host_label
    }

    /// Free-text time of the event.
    pub fn schedule(&self) -> &str {
        &self.schedule
    }

    /// Note to the guests.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// When the invitation was sent.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// One entry per responding account, in order of first response.
    pub fn responses(&self) -> &[RsvpEntry] {
        &self.responses
    }

    /// The answer `account_id` gave, if any.
    pub fn response_of(&self, account_id: &AccountId) -> Option<Rsvp> {
        self.responses
            .iter()
            .find(|entry| &entry.account_id == account_id)
            .map(|entry| entry.response)
    }

    /// Number of accepted invitations.
    pub fn accepted_count(&self) -> usize {
        self.responses
            .iter()
            .filter(|entry| entry.response == Rsvp::Accepted)
            .count()
    }

    fn record(&mut self, account_id: &AccountId, response: Rsvp) {
        match self
            .responses
            .iter_mut()
            .find(|entry| &entry.account_id == account_id)
        {
            Some(entry) => entry.response = response,
            None => self.responses.push(RsvpEntry {
                account_id: account_id.clone(),
                response,
            }),
        }
    }
}

/// Broadcasts and invitations, each kept newest first.
pub struct NoticeBoard {
    broadcasts: Vec<Broadcast>,
    invitations: Vec<Invitation>,
    clock: Arc<dyn Clock>,
}

impl NoticeBoard {
    /// An empty board stamping notices with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            broadcasts: Vec::new(),
            invitations: Vec::new(),
            clock,
        }
    }

    /// Publish an announcement.
    pub fn post_broadcast(
        &mut self,
        title: impl Into<String>,
        body: impl Into<String>,
        posted_by: impl Into<String>,
    ) -> Broadcast {
        let broadcast = Broadcast {
            id: NoticeId::random(),
            title: title.into(),
            body: body.into(),
            posted_by: posted_by.into(),
            posted_at: self.clock.utc(),
        };
        info!(notice_id = %broadcast.id, posted_by = %broadcast.posted_by, "broadcast posted");
        self.broadcasts.insert(0, broadcast.clone());
        broadcast
    }

    /// Announcements, newest first.
    pub fn broadcasts(&self) -> &[Broadcast] {
        &self.broadcasts
    }

    /// Host a celebration on behalf of `host`.
    pub fn create_invitation(&mut self, host: &Account, draft: InvitationDraft) -> Invitation {
        self.seed_invitation(host.id().clone(), host.display_label(), draft)
    }

    /// Add an invitation whose host label is already known, e.g. from a seed
    /// registry.
    pub fn seed_invitation(
        &mut self,
        host_id: AccountId,
        host_label: String,
        draft: InvitationDraft,
    ) -> Invitation {
        let InvitationDraft {
            title,
            schedule,
            message,
        } = draft;
        let invitation = Invitation {
            id: NoticeId::random(),
            title,
            host_id,
            host_label,
            schedule,
            message,
            created_at: self.clock.utc(),
            responses: Vec::new(),
        };
        info!(notice_id = %invitation.id, host_id = %invitation.host_id, "invitation created");
        self.invitations.insert(0, invitation.clone());
        invitation
    }

    /// Invitations, newest first.
    pub fn invitations(&self) -> &[Invitation] {
        &self.invitations
    }

    /// Record `account_id`'s answer, replacing any earlier one.
    pub fn respond(
        &mut self,
        invitation_id: NoticeId,
        account_id: &AccountId,
        response: Rsvp,
    ) -> Option<Invitation> {
        let Some(invitation) = self
            .invitations
            .iter_mut()
            .find(|invitation| invitation.id == invitation_id)
        else {
            warn!(notice_id = %invitation_id, "rsvp for unknown invitation ignored");
            return None;
        };
        invitation.record(account_id, response);
        Some(invitation.clone())
    }
}
