//! View lifetimes: late responses are dropped once the owning view closes.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

use crate::error::{ApiError, ApiResult};

/// Cloneable token tied to a view; every clone observes [`ViewLifetime::end`].
#[derive(Debug, Clone, Default)]
pub struct ViewLifetime {
    inner: Arc<LifetimeInner>,
}

#[derive(Debug, Default)]
struct LifetimeInner {
    ended: AtomicBool,
    notify: Notify,
}

impl ViewLifetime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ends the lifetime and wakes every pending [`ViewLifetime::guard`].
    pub fn end(&self) {
        if !self.inner.ended.swap(true, Ordering::SeqCst) {
            self.inner.notify.notify_waiters();
            tracing::debug!("View lifetime ended");
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.inner.ended.load(Ordering::SeqCst)
    }

    /// Resolves once [`ViewLifetime::end`] has been called.
    pub async fn ended(&self) {
        let notified = self.inner.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();
        if !self.is_alive() {
            return;
        }
        notified.await;
    }

    /// Runs `future` unless the lifetime ends first.
    ///
    /// Returns [`ApiError::Cancelled`] if the lifetime had already ended, ends
    /// while waiting, or ended by the time the output is ready.
    pub async fn guard<F: Future>(&self, future: F) -> ApiResult<F::Output> {
        if !self.is_alive() {
            return Err(ApiError::Cancelled);
        }
        tokio::select! {
            biased;
            () = self.ended() => Err(ApiError::Cancelled),
            output = future => {
                if self.is_alive() {
                    Ok(output)
                } else {
                    Err(ApiError::Cancelled)
                }
            }
        }
    }
}
