use std::time::{Duration, Instant};

/// Identifies one scheduled deferred callback.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeferToken(u64);

impl DeferToken {
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Deadline-ordered queue of one-shot deferred callbacks.
///
/// Intended for event loops that sleep until the next deadline (e.g.
/// `ControlFlow::WaitUntil`). Tokens are never reused.
#[derive(Debug, Default)]
pub struct DeferQueue {
    next_id: u64,
    entries: Vec<(Instant, DeferToken)>,
}

impl DeferQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, now: Instant, delay: Duration) -> DeferToken {
        self.next_id = self.next_id.wrapping_add(1);
        let token = DeferToken(self.next_id);
        self.entries.push((now + delay, token));
        token
    }

    /// Removes `token`; returns whether it was still scheduled.
    pub fn cancel(&mut self, token: DeferToken) -> bool {
        let before = self.entries.len();
        self.entries.retain(|&(_, t)| t != token);
        self.entries.len() != before
    }

    /// Removes and returns every token whose deadline is `<= now`, earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<DeferToken> {
        let mut due: Vec<(Instant, DeferToken)> = Vec::new();
        self.entries.retain(|&entry| {
            if entry.0 <= now {
                due.push(entry);
                false
            } else {
                true
            }
        });
        due.sort();
        due.into_iter().map(|(_, t)| t).collect()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.iter().map(|&(at, _)| at).min()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
