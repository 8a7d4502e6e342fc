//! One-shot delivery of a session's outcome.

use crate::error::{SessionError, SessionResult};
use futures::channel::oneshot;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Create a linked completer/pending pair.
pub fn channel<T>() -> (Completer<T>, Pending<T>) {
    let (tx, rx) = oneshot::channel();
    (Completer { tx }, Pending { rx, taken: false })
}

/// Sending half, consumed by the single resolution of a session.
#[derive(Debug)]
pub struct Completer<T> {
    tx: oneshot::Sender<SessionResult<T>>,
}

impl<T> Completer<T> {
    pub fn settle(self, result: SessionResult<T>) {
        if self.tx.send(result).is_err() {
            log::debug!("session result dropped: nobody is waiting");
        }
    }

    pub fn resolve(self, value: T) {
        self.settle(Ok(value));
    }

    pub fn reject(self, error: SessionError) {
        self.settle(Err(error));
    }
}

/// The caller's view of a draw or edit.
///
/// Await it, or poll it without blocking via [`Pending::try_take`]. A session
/// dropped before it resolves yields [`SessionError::Abandoned`].
#[derive(Debug)]
#[must_use = "a pending session reports failures only through its result"]
pub struct Pending<T> {
    rx: oneshot::Receiver<SessionResult<T>>,
    taken: bool,
}

impl<T> Pending<T> {
    /// Already failed, for rejections before any session starts.
    pub fn rejected(error: SessionError) -> Self {
        let (completer, pending) = channel();
        completer.reject(error);
        pending
    }

    /// Take the result if the session has ended. Yields it at most once.
    pub fn try_take(&mut self) -> Option<SessionResult<T>> {
        if self.taken {
            return None;
        }
        let result = match self.rx.try_recv() {
            Ok(Some(result)) => result,
            Ok(None) => return None,
            Err(oneshot::Canceled) => Err(SessionError::Abandoned),
        };
        self.taken = true;
        Some(result)
    }
}

impl<T> Future for Pending<T> {
    type Output = SessionResult<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        Pin::new(&mut this.rx).poll(cx).map(|received| {
            this.taken = true;
            received.unwrap_or(Err(SessionError::Abandoned))
        })
    }
}
