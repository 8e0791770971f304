//! Single-slot deferred work token.
//!
//! Interrupt or poll handlers call [`WorkSlot::schedule`] to request a status report; the
//! work context later calls [`WorkSlot::take`] and performs the bus transactions. At most one
//! request is outstanding per slot: scheduling while a request is pending coalesces into it.

use core::sync::atomic::{AtomicBool, Ordering};

/// Pending-report flag shared between the trigger and the work context.
#[derive(Debug, Default)]
pub struct WorkSlot {
    pending: AtomicBool,
}

impl WorkSlot {
    /// Creates an idle slot.
    pub const fn new() -> Self {
        Self {
            pending: AtomicBool::new(false),
        }
    }

    /// Marks work as pending without blocking.
    ///
    /// Returns `false` when a request was already pending and this one was coalesced.
    pub fn schedule(&self) -> bool {
        !self.pending.swap(true, Ordering::AcqRel)
    }

    /// Returns `true` while a request waits to be processed.
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Claims the pending request, returning `false` when there was none.
    pub fn take(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }
}

#[cfg(test)]
mod tests {
    use super::WorkSlot;

    #[test]
    fn repeated_schedule_is_coalesced() {
        let slot = WorkSlot::new();
        assert!(!slot.is_pending());
        assert!(slot.schedule());
        assert!(!slot.schedule());
        assert!(slot.is_pending());

        assert!(slot.take());
        assert!(!slot.take());
        assert!(!slot.is_pending());
    }

    #[test]
    fn slot_can_be_rearmed_after_take() {
        let slot = WorkSlot::new();
        assert!(slot.schedule());
        assert!(slot.take());
        assert!(slot.schedule());
    }
}
