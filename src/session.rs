//! Per-user conversation state: whether the next free text is a submission.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::relay::RelayKind;

/// What the next free-text message from a user means
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PendingInput {
    #[default]
    None,
    AwaitingQuestion,
    AwaitingOrderNumber,
}

impl PendingInput {
    /// Relay kind for a pending submission
    pub fn relay_kind(self) -> Option<RelayKind> {
        match self {
            PendingInput::None => None,
            PendingInput::AwaitingQuestion => Some(RelayKind::Question),
            PendingInput::AwaitingOrderNumber => Some(RelayKind::OrderNumber),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserSession {
    pub pending_input: PendingInput,
    pub updated_at: DateTime<Utc>,
}

/// Sessions keyed by chat user id, held only while input is pending
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<u64, UserSession>>,
    ttl: Option<Duration>,
}

impl SessionStore {
    /// `ttl` bounds how long pending input is honoured; `None` never expires it
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    pub async fn set_pending(&self, user_id: u64, pending: PendingInput) {
        self.set_pending_at(user_id, pending, Utc::now()).await;
    }

    /// Record pending input; `None` drops the session
    ///
    /// Only users with something pending are kept, so navigation alone never
    /// grows the map. Expired entries are pruned whenever one is inserted.
    pub async fn set_pending_at(&self, user_id: u64, pending: PendingInput, now: DateTime<Utc>) {
        let mut sessions = self.sessions.lock().await;
        if pending == PendingInput::None {
            sessions.remove(&user_id);
            return;
        }
        if let Some(ttl) = self.ttl {
            sessions.retain(|_, s| !is_expired(s, ttl, now));
        }
        sessions.insert(
            user_id,
            UserSession {
                pending_input: pending,
                updated_at: now,
            },
        );
    }

    /// Consume the pending input, leaving `None` behind
    ///
    /// Pending input older than the TTL is discarded and reported as `None`.
    pub async fn take_pending(&self, user_id: u64) -> PendingInput {
        self.take_pending_at(user_id, Utc::now()).await
    }

    pub async fn take_pending_at(&self, user_id: u64, now: DateTime<Utc>) -> PendingInput {
        let Some(session) = self.sessions.lock().await.remove(&user_id) else {
            return PendingInput::None;
        };
        match self.ttl {
            Some(ttl) if is_expired(&session, ttl, now) => PendingInput::None,
            _ => session.pending_input,
        }
    }

    pub async fn pending(&self, user_id: u64) -> PendingInput {
        self.sessions
            .lock()
            .await
            .get(&user_id)
            .map(|s| s.pending_input)
            .unwrap_or_default()
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }
}

fn is_expired(session: &UserSession, ttl: Duration, now: DateTime<Utc>) -> bool {
    now.signed_duration_since(session.updated_at)
        .to_std()
        .is_ok_and(|age| age > ttl)
}
