use crate::api::{ApiError, Operation};
use crate::model::AnalysisSummary;

use super::Generation;

/// Why a list fetch was issued. Each kind has its own in-flight flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListKind {
    Initial,
    Refresh,
}

impl ListKind {
    pub fn operation(self) -> Operation {
        match self {
            Self::Initial => Operation::ListAnalyses,
            Self::Refresh => Operation::RefreshAnalyses,
        }
    }
}

/// Everything a worker needs to run one list fetch.
#[derive(Clone, Debug)]
pub struct ListTicket {
    pub kind: ListKind,
    pub generation: Generation,
    pub token: String,
}

/// What applying a finished list fetch did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListOutcome {
    Loaded { kind: ListKind, count: usize },
    Failed { kind: ListKind, message: String },
    /// The store moved on since the request was issued.
    Stale,
}

/// Client-side copy of the analysis summaries.
#[derive(Debug, Default)]
pub struct AnalysisStore {
    summaries: Vec<AnalysisSummary>,
    loading: bool,
    refreshing: bool,
    generation: Generation,
}

impl AnalysisStore {
    pub fn summaries(&self) -> &[AnalysisSummary] {
        &self.summaries
    }

    /// Initial load in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Manual refresh in flight.
    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    /// Start a list fetch. Without a token nothing is sent.
    ///
    /// Every call supersedes earlier fetches: only the newest ticket's
    /// response is applied.
    pub fn begin_list(&mut self, kind: ListKind, token: Option<&str>) -> Option<ListTicket> {
        let token = token.map(str::trim).filter(|token| !token.is_empty())?;
        self.generation = self.generation.next();
        self.loading = kind == ListKind::Initial;
        self.refreshing = kind == ListKind::Refresh;
        Some(ListTicket {
            kind,
            generation: self.generation,
            token: token.to_string(),
        })
    }

    /// Apply a finished fetch. Success replaces the whole collection;
    /// failure leaves it untouched.
    pub fn finish_list(
        &mut self,
        kind: ListKind,
        generation: Generation,
        result: Result<Vec<AnalysisSummary>, ApiError>,
    ) -> ListOutcome {
        if generation != self.generation {
            return ListOutcome::Stale;
        }
        self.loading = false;
        self.refreshing = false;
        match result {
            Ok(summaries) => {
                let count = summaries.len();
                self.summaries = summaries;
                ListOutcome::Loaded { kind, count }
            }
            Err(err) => ListOutcome::Failed {
                kind,
                message: err.user_message(kind.operation()),
            },
        }
    }

    /// Drop in-flight fetches without touching the loaded rows.
    pub fn invalidate(&mut self) {
        self.generation = self.generation.next();
        self.loading = false;
        self.refreshing = false;
    }

    /// Forget everything, e.g. on sign-out.
    pub fn clear(&mut self) {
        self.invalidate();
        self.summaries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(ids: &[&str]) -> Vec<AnalysisSummary> {
        ids.iter()
            .map(|id| AnalysisSummary {
                id: id.to_string(),
                overall_score: 50,
                created_at: "2024-01-01T00:00:00Z".into(),
            })
            .collect()
    }

    #[test]
    fn no_token_sends_nothing() {
        let mut store = AnalysisStore::default();
        assert!(store.begin_list(ListKind::Initial, None).is_none());
        assert!(store.begin_list(ListKind::Initial, Some("  ")).is_none());
        assert!(!store.is_loading());
    }

    #[test]
    fn success_replaces_collection_wholesale() {
        let mut store = AnalysisStore::default();
        let ticket = store.begin_list(ListKind::Initial, Some("tok")).unwrap();
        assert!(store.is_loading() && !store.is_refreshing());
        store.finish_list(ticket.kind, ticket.generation, Ok(rows(&["a", "b", "c"])));
        let ticket = store.begin_list(ListKind::Refresh, Some("tok")).unwrap();
        assert!(store.is_refreshing() && !store.is_loading());
        let outcome = store.finish_list(ticket.kind, ticket.generation, Ok(rows(&["d"])));
        assert_eq!(
            outcome,
            ListOutcome::Loaded {
                kind: ListKind::Refresh,
                count: 1
            }
        );
        assert_eq!(store.summaries(), rows(&["d"]).as_slice());
        assert!(!store.is_refreshing());
    }

    #[test]
    fn failure_keeps_rows_and_uses_operation_fallback() {
        let mut store = AnalysisStore::default();
        let ticket = store.begin_list(ListKind::Initial, Some("tok")).unwrap();
        store.finish_list(ticket.kind, ticket.generation, Ok(rows(&["a"])));
        let ticket = store.begin_list(ListKind::Refresh, Some("tok")).unwrap();
        let outcome = store.finish_list(
            ticket.kind,
            ticket.generation,
            Err(ApiError::Api {
                status: 500,
                message: None,
            }),
        );
        assert_eq!(
            outcome,
            ListOutcome::Failed {
                kind: ListKind::Refresh,
                message: "Failed to refresh analyses".into()
            }
        );
        assert_eq!(store.summaries().len(), 1);
    }

    #[test]
    fn superseded_fetch_is_ignored() {
        let mut store = AnalysisStore::default();
        let old = store.begin_list(ListKind::Initial, Some("tok")).unwrap();
        let new = store.begin_list(ListKind::Refresh, Some("tok")).unwrap();
        assert_eq!(
            store.finish_list(old.kind, old.generation, Ok(rows(&["old"]))),
            ListOutcome::Stale
        );
        assert!(store.is_refreshing());
        store.finish_list(new.kind, new.generation, Ok(rows(&["new"])));
        assert_eq!(store.summaries()[0].id, "new");
    }

    #[test]
    fn invalidate_drops_in_flight_response() {
        let mut store = AnalysisStore::default();
        let ticket = store.begin_list(ListKind::Initial, Some("tok")).unwrap();
        store.invalidate();
        assert!(!store.is_loading());
        assert_eq!(
            store.finish_list(ticket.kind, ticket.generation, Ok(rows(&["a"]))),
            ListOutcome::Stale
        );
        assert!(store.summaries().is_empty());
    }
}
