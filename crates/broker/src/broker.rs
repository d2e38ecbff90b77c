//! Tenant-scoped operations over the request store

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tracing::info;

use askuser_common::{AskRequest, AskUserError, AuthContext, RequestId, Result};

use crate::store::{RequestStore, WaitOutcome};

/// Authorization-aware business logic over a [`RequestStore`].
///
/// The store is owned by the broker instance and injected into the adapters;
/// separate broker instances are fully independent.
pub struct AskUserBroker {
    store: Arc<RequestStore>,
}

impl AskUserBroker {
    pub fn new() -> Self {
        Self {
            store: Arc::new(RequestStore::new()),
        }
    }

    pub fn with_store(store: Arc<RequestStore>) -> Self {
        Self { store }
    }

    /// Register a new question under the caller's identities.
    ///
    /// Non-blocking; the waiting happens in the tool adapter.
    pub fn create_request(&self, auth: &AuthContext, question: &str) -> Result<AskRequest> {
        let question = question.trim();
        if question.is_empty() {
            return Err(AskUserError::EmptyQuestion);
        }

        let request = AskRequest::new(
            question.to_string(),
            auth.user_id.clone(),
            auth.ai_id.clone(),
        );
        self.store.put(request.clone())?;
        info!(
            request_id = %request.id,
            user_id = %auth.user_id,
            ai_id = %auth.ai_id,
            "ask-user request created"
        );
        Ok(request)
    }

    /// Record a human answer. Exactly one answer per request ever succeeds.
    pub fn answer_request(
        &self,
        auth: &AuthContext,
        id: RequestId,
        answer: &str,
    ) -> Result<AskRequest> {
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(AskUserError::EmptyAnswer);
        }

        let request = self
            .store
            .get(id)?
            .ok_or(AskUserError::RequestNotFound(id))?;
        // Identity fields are immutable, so checking them on a snapshot is
        // safe; `mark_answered` re-validates the pending status atomically.
        if request.user_identity != auth.user_id {
            return Err(AskUserError::Forbidden);
        }

        let updated = self.store.mark_answered(id, answer, Utc::now())?;
        info!(request_id = %id, user_id = %auth.user_id, "ask-user request answered");
        Ok(updated)
    }

    /// Pending and answered requests visible to the caller's identity.
    pub fn list_requests(
        &self,
        auth: &AuthContext,
    ) -> Result<(Vec<AskRequest>, Vec<AskRequest>)> {
        self.store.list(&auth.user_id)
    }

    /// Block until `id` is answered, the timeout elapses, or the caller goes
    /// away. Delegates to [`RequestStore::await_answer`].
    pub async fn await_answer(
        &self,
        id: RequestId,
        timeout: Duration,
        cancel: CancellationToken,
    ) -> Result<(AskRequest, WaitOutcome)> {
        self.store.await_answer(id, timeout, cancel).await
    }

    pub fn store(&self) -> Arc<RequestStore> {
        self.store.clone()
    }
}

impl Default for AskUserBroker {
    fn default() -> Self {
        Self::new()
    }
}
