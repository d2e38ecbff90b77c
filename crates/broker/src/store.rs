//! Thread-safe request registry with per-request wakeup signalling

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use askuser_common::{AskRequest, AskUserError, RequestId, RequestStatus, Result};

/// How a call to [`RequestStore::await_answer`] was released.
///
/// Only `Answered` reflects a state change. A timed-out or cancelled wait
/// leaves the request pending and answerable; the waiter merely stopped
/// listening.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    Answered,
    TimedOut,
    Cancelled,
}

struct Entry {
    request: AskRequest,
    answered: Arc<Notify>,
}

/// In-memory registry of ask-user requests.
///
/// All map access goes through one mutex. The critical section that marks a
/// request answered also fires its wakeup signal, and `await_answer` checks
/// the status and grabs the signal handle under that same mutex; together
/// this rules out the answer-arrives-between-check-and-subscribe race.
/// Reads hand out clones, never references into the guarded map.
pub struct RequestStore {
    inner: Mutex<HashMap<RequestId, Entry>>,
}

impl RequestStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<RequestId, Entry>>> {
        self.inner
            .lock()
            .map_err(|e| AskUserError::Internal(format!("request store lock poisoned: {e}")))
    }

    /// Insert a new pending request.
    pub fn put(&self, request: AskRequest) -> Result<()> {
        let mut map = self.lock()?;
        if map.contains_key(&request.id) {
            return Err(AskUserError::DuplicateId(request.id));
        }
        map.insert(
            request.id,
            Entry {
                request,
                answered: Arc::new(Notify::new()),
            },
        );
        Ok(())
    }

    /// Snapshot of a request, if present.
    pub fn get(&self, id: RequestId) -> Result<Option<AskRequest>> {
        Ok(self.lock()?.get(&id).map(|entry| entry.request.clone()))
    }

    /// Requests owned by `user_identity`: pending oldest-first, history most
    /// recently answered first.
    pub fn list(&self, user_identity: &str) -> Result<(Vec<AskRequest>, Vec<AskRequest>)> {
        let mut pending = Vec::new();
        let mut history = Vec::new();
        {
            let map = self.lock()?;
            for entry in map.values() {
                if entry.request.user_identity != user_identity {
                    continue;
                }
                match entry.request.status {
                    RequestStatus::Pending => pending.push(entry.request.clone()),
                    RequestStatus::Answered => history.push(entry.request.clone()),
                }
            }
        }
        pending.sort_by_key(|r| r.created_at);
        history.sort_by(|a, b| b.answered_at.cmp(&a.answered_at));
        Ok((pending, history))
    }

    /// Atomically transition a pending request to answered and wake its waiter.
    pub fn mark_answered(
        &self,
        id: RequestId,
        answer: &str,
        now: DateTime<Utc>,
    ) -> Result<AskRequest> {
        let mut map = self.lock()?;
        let entry = map.get_mut(&id).ok_or(AskUserError::RequestNotFound(id))?;
        if entry.request.status != RequestStatus::Pending {
            return Err(AskUserError::AlreadyAnswered(id));
        }

        entry.request.status = RequestStatus::Answered;
        entry.request.answer = Some(answer.to_string());
        entry.request.answered_at = Some(now);
        entry.request.updated_at = now;
        let snapshot = entry.request.clone();
        entry.answered.notify_one();
        Ok(snapshot)
    }

    /// Block until the request is answered, the timeout elapses, or `cancel`
    /// fires, whichever happens first. Timeout and cancellation mutate
    /// nothing; the request stays pending.
    pub async fn await_answer(
        &self,
        id: RequestId,
        timeout: Duration,
        cancel: CancellationToken,
    ) -> Result<(AskRequest, WaitOutcome)> {
        let answered = {
            let map = self.lock()?;
            let entry = map.get(&id).ok_or(AskUserError::RequestNotFound(id))?;
            if entry.request.status == RequestStatus::Answered {
                // The answer landed before the wait began.
                return Ok((entry.request.clone(), WaitOutcome::Answered));
            }
            entry.answered.clone()
        };
        // `notify_one` stores a permit, so a signal fired between releasing
        // the lock above and polling `notified()` still wakes this waiter.

        let outcome = tokio::select! {
            _ = answered.notified() => WaitOutcome::Answered,
            _ = tokio::time::sleep(timeout) => WaitOutcome::TimedOut,
            _ = cancel.cancelled() => WaitOutcome::Cancelled,
        };
        debug!(request_id = %id, outcome = ?outcome, "wait released");

        let snapshot = self.get(id)?.ok_or(AskUserError::RequestNotFound(id))?;
        let outcome = match outcome {
            // The answer tied with the timer; prefer delivery.
            WaitOutcome::TimedOut if snapshot.status == RequestStatus::Answered => {
                WaitOutcome::Answered
            }
            other => other,
        };
        Ok((snapshot, outcome))
    }
}

impl Default for RequestStore {
    fn default() -> Self {
        Self::new()
    }
}
