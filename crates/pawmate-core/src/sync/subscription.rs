//! Lazy, cancellable event sequences.
//!
//! Remote change notifications and device sensor callbacks all flow through
//! the same primitive: a [`FeedSender`]/[`Subscription`] pair over an
//! unbounded channel. Producers push; consumers `recv` (or poll the
//! [`futures::Stream`] impl). A feed failure is delivered as one terminal
//! `Err` item, after which the producer drops its sender and the sequence
//! ends. The core never reconnects on its own - resubscribing is the
//! caller's decision.

use crate::error::{PawmateError, Result};
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;

/// Producer half of a feed.
pub struct FeedSender<T> {
    tx: mpsc::UnboundedSender<Result<T>>,
}

impl<T> Clone for FeedSender<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T> FeedSender<T> {
    /// Delivers a value. Returns `false` once the subscriber is gone, so
    /// producers can prune stale registrations.
    pub fn send(&self, value: T) -> bool {
        self.tx.send(Ok(value)).is_ok()
    }

    /// Delivers a terminal error. The producer must not send afterwards.
    pub fn fail(&self, error: PawmateError) -> bool {
        self.tx.send(Err(error)).is_ok()
    }

    /// Whether the subscriber has closed or dropped its end.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Consumer half of a feed.
pub struct Subscription<T> {
    rx: mpsc::UnboundedReceiver<Result<T>>,
    closed: bool,
}

impl<T> Subscription<T> {
    /// Creates a connected sender/subscription pair.
    pub fn channel() -> (FeedSender<T>, Subscription<T>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (FeedSender { tx }, Subscription { rx, closed: false })
    }

    /// Next feed item; `None` once the feed ended or was closed.
    pub async fn recv(&mut self) -> Option<Result<T>> {
        if self.closed {
            return None;
        }
        self.rx.recv().await
    }

    /// Cancels the subscription. No further item is observed after this
    /// returns, including ones already in flight.
    pub fn close(&mut self) {
        self.closed = true;
        self.rx.close();
    }
}

impl<T> futures::Stream for Subscription<T> {
    type Item = Result<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.closed {
            return Poll::Ready(None);
        }
        this.rx.poll_recv(cx)
    }
}
