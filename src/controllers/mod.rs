//! One controller per screen. Each binds the slots it uses at construction,
//! talks to the backend through `Backend`, and writes to its page only via
//! patches from `render`.

pub mod dashboard;
pub mod generator;
pub mod login;
pub mod shortlist;
pub mod upload;

pub use dashboard::DashboardController;
pub use generator::GeneratorController;
pub use login::LoginController;
pub use shortlist::ShortlistController;
pub use upload::UploadController;

use std::sync::atomic::{AtomicU64, Ordering};

/// What happened to one user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The response was painted into the page.
    Applied,
    /// Blocked before any request (validation, declined prompt).
    Rejected,
    /// The request failed and the user was told, or it was logged.
    Failed,
    /// A newer request of the same kind started; this result was dropped.
    Superseded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Orders requests of one kind: only the newest ticket may apply its result.
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: AtomicU64,
}

impl RequestSequence {
    pub fn begin(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_newest_ticket_is_current() {
        let sequence = RequestSequence::default();
        let first = sequence.begin();
        assert!(sequence.is_current(first));
        let second = sequence.begin();
        assert!(!sequence.is_current(first));
        assert!(sequence.is_current(second));
    }
}
