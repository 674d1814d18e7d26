//! In-memory store of delivery access requests and their comments.
//!
//! Requests are kept newest-first. Updates against unknown ids are ignored
//! with a warning instead of failing the caller.

use std::sync::Arc;

use mockable::Clock;
use tracing::{debug, info, warn};

use crate::domain::access_request::{
    AccessRequest, AccessRequestId, Comment, CommentId, NewAccessRequest, RequestStatus,
    StatusFilter, StatusTransition,
};
use crate::domain::account::AccountId;
use crate::domain::user_registry::UserRegistry;

/// Ordered collection of access requests plus their comment threads.
pub struct AccessRequestStore {
    requests: Vec<AccessRequest>,
    comments: Vec<Comment>,
    clock: Arc<dyn Clock>,
}

impl AccessRequestStore {
    /// Create an empty store.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            requests: Vec::new(),
            comments: Vec::new(),
            clock,
        }
    }

    /// Record a new pending request at the front of the list.
    pub fn create(&mut self, request: NewAccessRequest) -> AccessRequest {
        let now = self.clock.utc();
        let id = self.next_id(now.timestamp_millis());
        let created = AccessRequest::new(id, request, now);
        info!(
            request_id = %created.id(),
            user_id = %created.user_id(),
            delivery_type = %created.details().delivery_type,
            initiated_by_admin = created.initiated_by_admin(),
            "access request created"
        );
        self.requests.insert(0, created.clone());
        created
    }

    fn next_id(&self, millis: i64) -> AccessRequestId {
        let mut suffix = 0;
        loop {
            let candidate = AccessRequestId::from_millis(millis, suffix);
            if self.find(&candidate).is_none() {
                return candidate;
            }
            suffix += 1;
        }
    }

    /// Decide a pending request.
    pub fn update_status(
        &mut self,
        request_id: &AccessRequestId,
        status: RequestStatus,
    ) -> StatusTransition {
        let now = self.clock.utc();
        let Some(request) = self.find_mut(request_id) else {
            warn!(request_id = %request_id, status = %status, "status update for unknown request ignored");
            return StatusTransition::UnknownRequest;
        };

        let from = request.status();
        if !from.can_transition_to(status) {
            warn!(request_id = %request_id, from = %from, to = %status, "illegal request status transition");
            return StatusTransition::Illegal { from, to: status };
        }

        request.set_status(status, now);
        info!(request_id = %request_id, from = %from, to = %status, "access request reviewed");
        StatusTransition::Applied(request.clone())
    }

    /// Set the review note on a request.
    pub fn update_comment(
        &mut self,
        request_id: &AccessRequestId,
        text: impl Into<String>,
    ) -> Option<AccessRequest> {
        let now = self.clock.utc();
        let Some(request) = self.find_mut(request_id) else {
            warn!(request_id = %request_id, "comment update for unknown request ignored");
            return None;
        };
        request.set_comment(text.into(), now);
        debug!(request_id = %request_id, "access request comment updated");
        Some(request.clone())
    }

    /// Append a comment to a request's thread.
    ///
    /// The request's own review note is left untouched.
    pub fn add_comment(
        &mut self,
        request_id: &AccessRequestId,
        author_id: &AccountId,
        text: impl Into<String>,
    ) -> Option<Comment> {
        if self.find(request_id).is_none() {
            warn!(request_id = %request_id, author_id = %author_id, "comment on unknown request ignored");
            return None;
        }
        let comment = Comment {
            id: CommentId::random(),
            request_id: request_id.clone(),
            author_id: author_id.clone(),
            text: text.into(),
            created_at: self.clock.utc(),
        };
        debug!(request_id = %request_id, comment_id = %comment.id, "comment added");
        self.comments.push(comment.clone());
        Some(comment)
    }

    /// Comments on a request, oldest first.
    pub fn list_comments(&self, request_id: &AccessRequestId) -> Vec<&Comment> {
        self.comments
            .iter()
            .filter(|comment| &comment.request_id == request_id)
            .collect()
    }

    /// Requests belonging to one resident, newest first.
    pub fn list_for_user(&self, user_id: &AccountId) -> Vec<&AccessRequest> {
        self.requests
            .iter()
            .filter(|request| request.user_id() == user_id)
            .collect()
    }

    /// Requests passing `filter` whose owner's apartment or name contains
    /// `search`, ignoring case.
    ///
    /// A blank search matches everything. Requests whose owner is not in
    /// `registry` only appear when the search is blank.
    pub fn list_filtered(
        &self,
        filter: StatusFilter,
        search: &str,
        registry: &UserRegistry,
    ) -> Vec<&AccessRequest> {
        let needle = search.trim().to_lowercase();
        self.requests
            .iter()
            .filter(|request| filter.admits(request.status()))
            .filter(|request| {
                if needle.is_empty() {
                    return true;
                }
                registry.find(request.user_id()).is_some_and(|owner| {
                    owner.apartment().to_lowercase().contains(&needle)
                        || owner.name().to_lowercase().contains(&needle)
                })
            })
            .collect()
    }

    /// Look up a request by id.
    pub fn find(&self, request_id: &AccessRequestId) -> Option<&AccessRequest> {
        self.requests.iter().find(|request| request.id() == request_id)
    }

    fn find_mut(&mut self, request_id: &AccessRequestId) -> Option<&mut AccessRequest> {
        self.requests
            .iter_mut()
            .find(|request| request.id() == request_id)
    }

    /// Every request, newest first.
    pub fn all(&self) -> &[AccessRequest] {
        &self.requests
    }
}
