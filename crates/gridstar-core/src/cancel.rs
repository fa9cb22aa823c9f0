//! Cooperative cancellation for long-running searches.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A cancellation flag backed by an [`AtomicBool`].
///
/// Clones share the same flag, so a driver can hand one clone to a search
/// and keep another to trip it. The search polls it once per expanded cell,
/// so a trip takes effect before the next expansion.
#[derive(Clone, Debug)]
pub struct CancelToken {
    tripped: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a new, non-cancelled token.
    pub fn new() -> Self {
        Self {
            tripped: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether cancellation has been requested.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.tripped.load(Ordering::Acquire)
    }

    /// Request cancellation.
    #[inline]
    pub fn cancel(&self) {
        self.tripped.store(true, Ordering::Release);
    }

    /// Clear a previous request so the token can be reused.
    #[inline]
    pub fn reset(&self) {
        self.tripped.store(false, Ordering::Release);
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}
