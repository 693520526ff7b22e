//! Emulated kernel event.

use core::sync::atomic::{AtomicBool, Ordering};

/// A kernel event the guest can wait on.
///
/// Services hand the guest a handle to an event instead of blocking; whoever owns the
/// condition (the compositor for VSync) signals it out of band.
#[derive(Debug, Default)]
pub struct Event {
    signaled: AtomicBool,
}

impl Event {
    /// Creates an event in the cleared state.
    pub const fn new() -> Self {
        Self {
            signaled: AtomicBool::new(false),
        }
    }

    /// Signals the event.
    pub fn signal(&self) {
        self.signaled.store(true, Ordering::Release);
    }

    /// Clears the event, returning whether it was signaled.
    pub fn clear(&self) -> bool {
        self.signaled.swap(false, Ordering::AcqRel)
    }

    /// Returns whether the event is currently signaled.
    pub fn is_signaled(&self) -> bool {
        self.signaled.load(Ordering::Acquire)
    }
}
