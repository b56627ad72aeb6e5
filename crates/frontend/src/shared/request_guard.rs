//! Sequencing for overlapping loads.
//!
//! Each load takes a ticket before it awaits anything. When the response
//! arrives it is applied only if no newer ticket was issued in the meantime,
//! so a slow early request can never overwrite the result of a later one.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;

/// Monotonic ticket counter; only the latest ticket is current.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RequestSequence {
    latest: u64,
}

impl RequestSequence {
    pub fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        ticket == self.latest
    }
}

/// Reactive-owner-scoped [`RequestSequence`] for one component.
#[derive(Clone, Copy)]
pub struct RequestGuard {
    name: &'static str,
    seq: StoredValue<RequestSequence>,
}

impl RequestGuard {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            seq: StoredValue::new(RequestSequence::default()),
        }
    }

    pub fn next(&self) -> u64 {
        let mut ticket = 0;
        self.seq.update_value(|s| ticket = s.issue());
        ticket
    }

    /// True when `ticket` is still the latest; logs the drop otherwise.
    /// A guard whose owner was disposed accepts nothing.
    pub fn accept(&self, ticket: u64) -> bool {
        let current = self.is_current(ticket);
        if !current {
            log::debug!("{}: dropping stale response #{}", self.name, ticket);
        }
        current
    }

    /// Debounce: waits `delay_ms` and reports whether `ticket` survived.
    pub async fn settle(&self, ticket: u64, delay_ms: u32) -> bool {
        TimeoutFuture::new(delay_ms).await;
        self.is_current(ticket)
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.seq
            .try_with_value(|s| s.is_current(ticket))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_latest_ticket_is_current() {
        let mut seq = RequestSequence::default();
        let first = seq.issue();
        let second = seq.issue();
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
    }

    #[test]
    fn late_response_of_earlier_request_is_rejected() {
        // page 1 requested, then page 2; page 1 answers last
        let mut seq = RequestSequence::default();
        let page_one = seq.issue();
        let page_two = seq.issue();
        assert!(seq.is_current(page_two));
        assert!(!seq.is_current(page_one));
    }

    #[test]
    fn tickets_keep_increasing() {
        let mut seq = RequestSequence::default();
        let tickets: Vec<u64> = (0..3).map(|_| seq.issue()).collect();
        assert_eq!(tickets, vec![1, 2, 3]);
        assert!(seq.is_current(3));
    }
}
