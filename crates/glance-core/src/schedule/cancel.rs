use core::sync::atomic::{AtomicU8, Ordering};

use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, signal::Signal};

/// Why a run stopped early.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum CancelReason {
    /// Explicit stop request.
    Stop = 1,
    /// Exclusive device control was revoked.
    ControlLost = 2,
    /// New content replaced the running content.
    Superseded = 3,
    /// The session is shutting down.
    Shutdown = 4,
    /// The canvas could not provide the text slots.
    CanvasFault = 5,
}

impl CancelReason {
    fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            1 => Some(Self::Stop),
            2 => Some(Self::ControlLost),
            3 => Some(Self::Superseded),
            4 => Some(Self::Shutdown),
            5 => Some(Self::CanvasFault),
            _ => None,
        }
    }
}

/// Shared cancellation flag that can also be awaited.
///
/// The first reason wins until [`CancelToken::reset`].
pub struct CancelToken {
    reason: AtomicU8,
    wake: Signal<CriticalSectionRawMutex, ()>,
}

impl CancelToken {
    pub const fn new() -> Self {
        Self {
            reason: AtomicU8::new(0),
            wake: Signal::new(),
        }
    }

    pub fn cancel(&self, reason: CancelReason) {
        if self
            .reason
            .compare_exchange(0, reason as u8, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            self.wake.signal(());
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.reason().is_some()
    }

    pub fn reason(&self) -> Option<CancelReason> {
        CancelReason::from_raw(self.reason.load(Ordering::Acquire))
    }

    /// Resolves once the token is cancelled.
    pub async fn cancelled(&self) -> CancelReason {
        loop {
            if let Some(reason) = self.reason() {
                return reason;
            }
            self.wake.wait().await;
        }
    }

    /// Re-arms the token for the next run.
    pub fn reset(&self) {
        self.reason.store(0, Ordering::Release);
        self.wake.reset();
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use embassy_futures::{block_on, poll_once};

    use super::*;

    #[test]
    fn first_reason_wins() {
        let token = CancelToken::new();
        assert_eq!(token.reason(), None);

        token.cancel(CancelReason::ControlLost);
        token.cancel(CancelReason::Stop);

        assert_eq!(token.reason(), Some(CancelReason::ControlLost));
        assert_eq!(block_on(token.cancelled()), CancelReason::ControlLost);
    }

    #[test]
    fn wait_is_pending_until_cancelled() {
        let token = CancelToken::new();
        let mut wait = core::pin::pin!(token.cancelled());
        assert!(poll_once(wait.as_mut()).is_pending());

        token.cancel(CancelReason::Stop);
        assert_eq!(block_on(wait), CancelReason::Stop);
    }

    #[test]
    fn reset_rearms() {
        let token = CancelToken::new();
        token.cancel(CancelReason::Shutdown);
        token.reset();

        assert!(!token.is_cancelled());
        let mut wait = core::pin::pin!(token.cancelled());
        assert!(poll_once(wait.as_mut()).is_pending());
    }
}
