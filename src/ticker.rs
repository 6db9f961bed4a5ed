/// Identifies one scheduled frame. Ids are never reused by a ticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(u64);

/// Cancellable self-rescheduling frame task.
///
/// At most one frame is pending at a time. The host loop asks `pending()`
/// for the frame to deliver and hands the id back through `accept()`, which
/// consumes it only if it is still the live request. Cancelled or replaced
/// ids are rejected, so a late callback can never draw.
#[derive(Debug, Default)]
pub struct FrameTicker {
    next_id: u64,
    pending: Option<FrameId>,
}

impl FrameTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the next frame, replacing any pending request.
    pub fn schedule(&mut self) -> FrameId {
        self.next_id += 1;
        let id = FrameId(self.next_id);
        self.pending = Some(id);
        id
    }

    /// Drop the pending request. Returns the cancelled id, if any.
    pub fn cancel(&mut self) -> Option<FrameId> {
        self.pending.take()
    }

    pub fn pending(&self) -> Option<FrameId> {
        self.pending
    }

    /// Claim `id` for execution. True only for the live request.
    pub fn accept(&mut self, id: FrameId) -> bool {
        if self.pending == Some(id) {
            self.pending = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accept_consumes_the_live_request() {
        let mut ticker = FrameTicker::new();
        let id = ticker.schedule();
        assert!(ticker.accept(id));
        assert!(!ticker.accept(id));
        assert!(ticker.pending().is_none());
    }

    #[test]
    fn cancelled_id_is_stale() {
        let mut ticker = FrameTicker::new();
        let id = ticker.schedule();
        assert_eq!(ticker.cancel(), Some(id));
        assert!(!ticker.accept(id));
        assert_eq!(ticker.cancel(), None);
    }

    #[test]
    fn reschedule_replaces_previous() {
        let mut ticker = FrameTicker::new();
        let first = ticker.schedule();
        let second = ticker.schedule();
        assert_ne!(first, second);
        assert!(!ticker.accept(first));
        assert!(ticker.accept(second));
    }
}
