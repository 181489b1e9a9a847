// tween/completion.rs
//
// Async bridge: await a tween finishing. Nothing here drives the tween; the
// host keeps calling `update` and the future resolves from inside it.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::channel::oneshot;
use futures::future::{AbortRegistration, Abortable};
use futures::FutureExt;

use super::{Tween, TweenStatus};

/// Resolves with the tween's status once it stops playing: `Completed` or
/// `Killed`. A tween dropped while awaited resolves as `Killed`.
#[derive(Debug)]
#[must_use = "futures do nothing unless polled"]
pub struct Completion {
    receiver: oneshot::Receiver<TweenStatus>,
}

impl Future for Completion {
    type Output = TweenStatus;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<TweenStatus> {
        self.receiver
            .poll_unpin(cx)
            .map(|status| status.unwrap_or(TweenStatus::Killed))
    }
}

impl Tween {
    /// Future for the end of the current run. Ready immediately with the
    /// current status when the tween is not playing or paused.
    pub fn completion(&self) -> Completion {
        let (sender, receiver) = oneshot::channel();
        if self.is_active() {
            self.add_waiter(sender);
        } else {
            let _ = sender.send(self.status());
        }
        Completion { receiver }
    }

    /// Like [`Tween::completion`], but abortable. Aborting stops the wait
    /// with `Err(Aborted)` and leaves the tween running.
    pub fn await_complete_or_kill(&self, registration: AbortRegistration) -> Abortable<Completion> {
        Abortable::new(self.completion(), registration)
    }
}
