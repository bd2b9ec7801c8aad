//! Like and subscribe state keyed by target id.
//!
//! The status stored for a target is always the last one the backend sent
//! back. Nothing is flipped locally before a toggle call resolves, and a
//! second toggle for the same id is suppressed while the first is in flight.

use inkpost_common::api::{LikeStatus, SubscriptionStatus};
use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

/// A status payload with an on/off flag.
pub trait ToggleStatus: Clone {
    fn is_active(&self) -> bool;
}

impl ToggleStatus for LikeStatus {
    fn is_active(&self) -> bool {
        self.liked
    }
}

impl ToggleStatus for SubscriptionStatus {
    fn is_active(&self) -> bool {
        self.subscribed
    }
}

#[derive(Debug)]
struct Inner<K, S> {
    statuses: HashMap<K, S>,
    pending: HashSet<K>,
}

#[derive(Debug)]
pub struct ToggleMap<K, S> {
    inner: Mutex<Inner<K, S>>,
}

impl<K, S> Default for ToggleMap<K, S> {
    fn default() -> Self {
        Self {
            inner: Mutex::new(Inner {
                statuses: HashMap::new(),
                pending: HashSet::new(),
            }),
        }
    }
}

impl<K, S> ToggleMap<K, S>
where
    K: Eq + Hash + Clone + Display,
    S: ToggleStatus,
{
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner<K, S>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Loads the status for `id`. Failures are logged and otherwise ignored so
    /// the rest of the view still renders; the id then reads as inactive.
    pub async fn check_status<F, Fut, E>(&self, id: K, fetch: F)
    where
        F: FnOnce(K) -> Fut,
        Fut: Future<Output = Result<S, E>>,
        E: Display,
    {
        match fetch(id.clone()).await {
            Ok(status) => {
                let mut inner = self.lock();
                // A toggle that started meanwhile carries the newer truth.
                if !inner.pending.contains(&id) {
                    inner.statuses.insert(id, status);
                }
            }
            Err(err) => warn!(%id, "status check failed: {err}"),
        }
    }

    /// Flips `id` on the backend and stores whatever it answers.
    ///
    /// Returns `Ok(None)` without sending anything when a toggle for `id` is
    /// already in flight. On error the previous status is kept.
    pub async fn toggle<F, Fut, E>(&self, id: K, fetch: F) -> Result<Option<S>, E>
    where
        F: FnOnce(K) -> Fut,
        Fut: Future<Output = Result<S, E>>,
    {
        if !self.lock().pending.insert(id.clone()) {
            debug!(%id, "toggle already in flight");
            return Ok(None);
        }

        let result = fetch(id.clone()).await;

        let mut inner = self.lock();
        inner.pending.remove(&id);
        let status = result?;
        inner.statuses.insert(id, status.clone());
        Ok(Some(status))
    }

    pub fn status(&self, id: &K) -> Option<S> {
        self.lock().statuses.get(id).cloned()
    }

    pub fn is_active(&self, id: &K) -> bool {
        self.lock().statuses.get(id).is_some_and(S::is_active)
    }

    pub fn is_pending(&self, id: &K) -> bool {
        self.lock().pending.contains(id)
    }

    /// Seeds a status the view already has, e.g. counts embedded in a post.
    pub fn seed(&self, id: K, status: S) {
        self.lock().statuses.entry(id).or_insert(status);
    }

    pub fn forget(&self, id: &K) {
        self.lock().statuses.remove(id);
    }
}

pub type LikeMap<K> = ToggleMap<K, LikeStatus>;
pub type SubscriptionMap<K> = ToggleMap<K, SubscriptionStatus>;

#[cfg(test)]
mod tests {
    use super::*;

    fn like(liked: bool, like_count: u64) -> LikeStatus {
        LikeStatus {
            liked,
            like_count,
            like: None,
        }
    }

    #[tokio::test]
    async fn toggle_takes_counts_from_response() {
        let likes: LikeMap<String> = ToggleMap::new();
        let id = "post-42".to_string();

        likes
            .check_status(id.clone(), |_| async { Ok::<_, String>(like(false, 5)) })
            .await;
        assert_eq!(likes.status(&id), Some(like(false, 5)));

        let after = likes
            .toggle(id.clone(), |_| async { Ok::<_, String>(like(true, 6)) })
            .await
            .unwrap();
        assert_eq!(after, Some(like(true, 6)));
        assert!(likes.is_active(&id));

        likes
            .toggle(id.clone(), |_| async { Ok::<_, String>(like(false, 5)) })
            .await
            .unwrap();
        assert_eq!(likes.status(&id), Some(like(false, 5)));
    }

    #[tokio::test]
    async fn failed_check_reads_inactive() {
        let likes: LikeMap<u32> = ToggleMap::new();
        likes
            .check_status(1, |_| async { Err::<LikeStatus, _>("timeout") })
            .await;
        assert!(likes.status(&1).is_none());
        assert!(!likes.is_active(&1));
    }

    #[tokio::test]
    async fn failed_toggle_keeps_previous_state() {
        let likes: LikeMap<u32> = ToggleMap::new();
        likes.seed(1, like(true, 3));

        let err = likes
            .toggle(1, |_| async { Err::<LikeStatus, _>("boom") })
            .await;
        assert_eq!(err, Err("boom"));
        assert_eq!(likes.status(&1), Some(like(true, 3)));
        assert!(!likes.is_pending(&1));
    }

    #[tokio::test]
    async fn second_toggle_while_pending_is_suppressed() {
        let likes: LikeMap<u32> = ToggleMap::new();
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();

        let first = likes.toggle(1, |_| async move {
            rx.await.ok();
            Ok::<_, String>(like(true, 1))
        });
        let second = async {
            tokio::task::yield_now().await;
            let suppressed = likes
                .toggle(1, |_| async { Ok::<_, String>(like(false, 0)) })
                .await;
            let other = likes
                .toggle(2, |_| async { Ok::<_, String>(like(true, 9)) })
                .await;
            tx.send(()).ok();
            (suppressed, other)
        };

        let (first, (suppressed, other)) = tokio::join!(first, second);
        assert_eq!(first, Ok(Some(like(true, 1))));
        assert_eq!(suppressed, Ok(None));
        assert_eq!(other, Ok(Some(like(true, 9))));
        assert!(likes.is_active(&1));
    }

    #[test]
    fn subscription_status_is_a_toggle() {
        let status = SubscriptionStatus {
            subscribed: true,
            subscriber_count: 10,
            subscription_count: 2,
            subscription: None,
        };
        assert!(status.is_active());
    }
}
