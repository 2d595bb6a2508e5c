//! Cooperative stop signal shared between the control surface and the director loop.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A cloneable stop flag.
///
/// The director loop and the turn engine poll it at iteration boundaries.
/// It never interrupts a generation call that is already in flight.
///
/// # Examples
///
/// ```
/// use writers_room_narrative::StopToken;
///
/// let token = StopToken::new();
/// let observer = token.clone();
/// token.cancel();
/// assert!(observer.is_cancelled());
/// token.clear();
/// assert!(!observer.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct StopToken {
    stopped: Arc<AtomicBool>,
}

impl StopToken {
    /// A token that has not been cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a stop.
    pub fn cancel(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    /// Withdraw a stop request.
    pub fn clear(&self) {
        self.stopped.store(false, Ordering::SeqCst);
    }

    /// Whether a stop has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}
