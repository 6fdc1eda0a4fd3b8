//! Analysis history: the fetched summary list, its filtered and paged view,
//! and the list/detail view state.

pub mod filter;
pub mod paging;
pub mod store;
pub mod view;

pub use filter::{FilterState, filter_summaries, filter_summaries_in};
pub use paging::{PAGE_SIZE, PageControl, page_controls, page_slice, total_pages};
pub use store::{AnalysisStore, ListKind, ListOutcome, ListTicket};
pub use view::{DetailOutcome, DetailTicket, HistoryView, ViewState};

/// Tag attached to each asynchronous request.
///
/// Bumping the generation invalidates every request issued under the old
/// value; responses carrying a stale generation are dropped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_advances() {
        let first = Generation::default();
        let second = first.next();
        assert_ne!(first, second);
        assert_eq!(second.value(), 1);
    }
}
