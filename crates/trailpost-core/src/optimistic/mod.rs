//! Optimistic mutations for toggle-style actions (like, collect, comment votes).
//!
//! Each action instance moves `Idle -> Pending -> {Settled, RolledBack}`:
//!
//! - the viewer flag flips and the counter moves by one before the request
//!   resolves,
//! - on success the server's values replace the guess, even when they agree,
//! - on failure the exact pre-action values are restored, unless a reload
//!   replaced the counter while the request was pending.
//!
//! A second invocation for the same entity and action while one is pending is
//! ignored; different actions on the same entity run independently.

use std::collections::HashSet;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::lifetime::ViewLifetime;

/// A viewer flag and the counter it contributes to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleCounter {
    pub active: bool,
    pub count: u64,
}

impl ToggleCounter {
    pub const fn new(active: bool, count: u64) -> Self {
        Self { active, count }
    }

    /// The optimistic guess: flip the flag and move the count one step.
    #[must_use]
    pub const fn toggled(self) -> Self {
        if self.active {
            Self::new(false, self.count.saturating_sub(1))
        } else {
            Self::new(true, self.count.saturating_add(1))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Like,
    Collect,
    CommentLike,
    CommentDislike,
}

/// Identifies one action on one entity for the re-entrancy guard.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActionKey {
    pub entity: String,
    pub kind: ActionKind,
}

impl ActionKey {
    pub fn new(entity: impl Into<String>, kind: ActionKind) -> Self {
        Self {
            entity: entity.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionPhase {
    Idle,
    Pending,
    Settled,
    RolledBack,
}

#[derive(Debug)]
pub enum ActionOutcome {
    /// Server values applied.
    Settled,
    /// Request failed; pre-action values restored.
    RolledBack(ApiError),
    /// Same action already pending for this entity; nothing happened.
    Ignored,
    /// Target entity is not part of the view state.
    NotFound,
    /// No session; the action never started.
    AuthRequired,
    /// The view closed before the response arrived; pre-action values restored.
    Abandoned,
}

impl ActionOutcome {
    pub const fn phase(&self) -> ActionPhase {
        match self {
            Self::Settled => ActionPhase::Settled,
            Self::RolledBack(_) | Self::Abandoned => ActionPhase::RolledBack,
            Self::Ignored | Self::NotFound | Self::AuthRequired => ActionPhase::Idle,
        }
    }

    /// Message to surface in the view, if any.
    pub fn error_message(&self) -> Option<String> {
        match self {
            Self::RolledBack(error) => Some(error.to_string()),
            Self::AuthRequired => Some(ApiError::AuthRequired.to_string()),
            Self::NotFound => Some("That item is not on the current page".to_string()),
            Self::Settled | Self::Ignored | Self::Abandoned => None,
        }
    }
}

/// Reads and writes one toggle counter inside view state `S`.
pub trait CounterAccess<S> {
    fn get(&self, state: &S) -> Option<ToggleCounter>;
    fn set(&self, state: &mut S, counter: ToggleCounter);
}

/// Keys of actions currently pending.
#[derive(Debug, Clone, Default)]
pub struct InFlight {
    keys: Arc<Mutex<HashSet<ActionKey>>>,
}

impl InFlight {
    /// Marks `key` pending, or returns `None` if it already is.
    pub fn try_begin(&self, key: ActionKey) -> Option<InFlightGuard> {
        let mut keys = self.keys.lock().unwrap_or_else(PoisonError::into_inner);
        if !keys.insert(key.clone()) {
            return None;
        }
        Some(InFlightGuard {
            keys: Arc::clone(&self.keys),
            key,
        })
    }

    pub fn is_pending(&self, key: &ActionKey) -> bool {
        self.keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(key)
    }
}

/// Clears the pending mark on drop.
#[derive(Debug)]
pub struct InFlightGuard {
    keys: Arc<Mutex<HashSet<ActionKey>>>,
    key: ActionKey,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}

/// Shared view state plus the bookkeeping needed to mutate it optimistically.
#[derive(Debug)]
pub struct ActionController<S> {
    state: Arc<Mutex<S>>,
    in_flight: InFlight,
    lifetime: ViewLifetime,
}

impl<S> Clone for ActionController<S> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            in_flight: self.in_flight.clone(),
            lifetime: self.lifetime.clone(),
        }
    }
}

impl<S> ActionController<S> {
    pub fn new(state: S) -> Self {
        Self::with_lifetime(state, ViewLifetime::new())
    }

    pub fn with_lifetime(state: S, lifetime: ViewLifetime) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
            in_flight: InFlight::default(),
            lifetime,
        }
    }

    pub const fn lifetime(&self) -> &ViewLifetime {
        &self.lifetime
    }

    pub const fn in_flight(&self) -> &InFlight {
        &self.in_flight
    }

    pub fn read<R>(&self, read: impl FnOnce(&S) -> R) -> R {
        read(&self.lock())
    }

    /// Applies `update` unless the view has closed.
    pub fn update(&self, update: impl FnOnce(&mut S)) -> bool {
        if !self.lifetime.is_alive() {
            return false;
        }
        update(&mut self.lock());
        true
    }

    /// Runs one optimistic toggle.
    ///
    /// `accessor` locates the counter, `mutation` is the server call (not
    /// polled unless the action starts), and `settle` writes the server's
    /// authoritative response into the state.
    pub async fn run<A, R, F, M>(
        &self,
        key: ActionKey,
        authenticated: bool,
        accessor: &A,
        mutation: F,
        settle: M,
    ) -> ActionOutcome
    where
        A: CounterAccess<S>,
        F: Future<Output = ApiResult<R>>,
        M: FnOnce(&mut S, R),
    {
        if !authenticated {
            return ActionOutcome::AuthRequired;
        }
        let Some(_pending) = self.in_flight.try_begin(key.clone()) else {
            tracing::debug!("Ignoring {:?} on {}: already pending", key.kind, key.entity);
            return ActionOutcome::Ignored;
        };

        let before = {
            let mut state = self.lock();
            let Some(before) = accessor.get(&state) else {
                return ActionOutcome::NotFound;
            };
            accessor.set(&mut state, before.toggled());
            before
        };

        match self.lifetime.guard(mutation).await.and_then(|result| result) {
            Ok(response) => {
                settle(&mut self.lock(), response);
                ActionOutcome::Settled
            }
            Err(ApiError::Cancelled) => {
                self.roll_back(accessor, before);
                ActionOutcome::Abandoned
            }
            Err(error) => {
                self.roll_back(accessor, before);
                tracing::warn!(
                    "{:?} on {} rolled back: {}",
                    key.kind,
                    key.entity,
                    error
                );
                ActionOutcome::RolledBack(error)
            }
        }
    }

    /// Restores `before` unless the counter was replaced while pending, in
    /// which case the newer value stays.
    fn roll_back<A: CounterAccess<S>>(&self, accessor: &A, before: ToggleCounter) {
        let mut state = self.lock();
        if accessor.get(&state) == Some(before.toggled()) {
            accessor.set(&mut state, before);
        }
    }

    fn lock(&self) -> MutexGuard<'_, S> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
