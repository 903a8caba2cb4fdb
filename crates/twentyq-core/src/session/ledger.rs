//! Request supersession bookkeeping.
//!
//! Every submission gets a ticket; starting a new one supersedes the old,
//! and a completion is only applied while its ticket is still current.
//! Overlapping submissions therefore cannot repaint the screen out of
//! order.

/// Handle for one in-flight `/ask` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

/// Issues tickets and tracks which one is current.
///
/// The counter is monotonic for the life of the session, including across
/// game resets, so a ticket from before a reset can never be mistaken for
/// a live one.
#[derive(Debug, Default)]
pub struct RequestLedger {
    current: u64,
}

impl RequestLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new request, superseding any outstanding one.
    pub fn begin(&mut self) -> RequestTicket {
        self.current += 1;
        RequestTicket(self.current)
    }

    /// True while `ticket` is the most recent one issued.
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_ticket_is_current() {
        let mut ledger = RequestLedger::new();
        let ticket = ledger.begin();
        assert!(ledger.is_current(ticket));
    }

    #[test]
    fn new_request_supersedes_old() {
        let mut ledger = RequestLedger::new();
        let first = ledger.begin();
        let second = ledger.begin();
        assert!(!ledger.is_current(first));
        assert!(ledger.is_current(second));
    }

    #[test]
    fn tickets_stay_stale_forever() {
        let mut ledger = RequestLedger::new();
        let old = ledger.begin();
        for _ in 0..10 {
            ledger.begin();
        }
        assert!(!ledger.is_current(old));
    }
}
