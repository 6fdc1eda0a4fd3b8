use super::jobs::{DetailLoadResult, ListLoadResult};
use super::*;
use crate::history::{
    DetailOutcome, ListKind, ListOutcome, ViewState, filter_summaries, page_slice, total_pages,
};
use crate::model::AnalysisSummary;

/// Derived rows and paging for the history list.
#[derive(Debug)]
pub struct HistoryPage<'a> {
    pub rows: Vec<&'a AnalysisSummary>,
    pub current_page: usize,
    pub total_pages: usize,
    pub match_count: usize,
    /// Whether any summaries were fetched before filtering.
    pub has_summaries: bool,
}

impl<'a> HistoryPage<'a> {
    /// Empty-state hint shown under "No matching analysis records found."
    pub fn empty_hint(&self) -> &'static str {
        if self.has_summaries {
            "Try adjusting your search criteria."
        } else {
            "Upload a sales call recording to get started."
        }
    }
}

impl AppController {
    pub fn history_page(&self) -> HistoryPage<'_> {
        let summaries = self.history.store.summaries();
        let filtered = filter_summaries(summaries, self.history.filter.query());
        let total = total_pages(filtered.len());
        let current_page = self.history.filter.page();
        HistoryPage {
            rows: page_slice(&filtered, current_page).to_vec(),
            current_page,
            total_pages: total,
            match_count: filtered.len(),
            has_summaries: !summaries.is_empty(),
        }
    }

    pub fn history_view(&self) -> &ViewState {
        self.history.view.state()
    }

    pub fn history_loading(&self) -> bool {
        self.history.store.is_loading()
    }

    pub fn history_refreshing(&self) -> bool {
        self.history.store.is_refreshing()
    }

    /// Id of the row whose detail is being fetched.
    pub fn pending_detail_id(&self) -> Option<&str> {
        self.history.view.pending_id()
    }

    pub fn history_rows_interactive(&self) -> bool {
        self.history.view.rows_interactive()
    }

    /// Initial list load for the History screen.
    pub(crate) fn load_history(&mut self) {
        self.history.needs_load = false;
        self.start_list(ListKind::Initial);
    }

    pub fn refresh_history(&mut self) {
        if self.history.store.is_refreshing() {
            return;
        }
        self.start_list(ListKind::Refresh);
    }

    fn start_list(&mut self, kind: ListKind) {
        let Some(ticket) = self.history.store.begin_list(kind, self.session.token()) else {
            tracing::debug!("Skipping {kind:?} history fetch without a session");
            return;
        };
        tracing::info!("Fetching analysis history ({kind:?})");
        self.jobs.load_analyses(ticket);
    }

    /// Replace the search text; the page returns to 1.
    pub fn set_history_query(&mut self, query: &str) {
        if self.ui.history_search != query {
            self.ui.history_search = query.to_string();
        }
        self.history.filter.set_query(query);
    }

    pub fn go_to_history_page(&mut self, page: usize) {
        let total = self.history_page().total_pages;
        self.history.filter.go_to_page(page, total);
    }

    pub fn next_history_page(&mut self) {
        let total = self.history_page().total_pages;
        self.history.filter.next_page(total);
    }

    pub fn previous_history_page(&mut self) {
        let total = self.history_page().total_pages;
        self.history.filter.previous_page(total);
    }

    /// Row click: fetch the full record for the detail view.
    pub fn select_analysis(&mut self, id: &str) {
        let Some(token) = self.session.token().map(str::to_string) else {
            return;
        };
        let Some(ticket) = self.history.view.request_detail(id) else {
            tracing::debug!("Ignoring selection of {id} while a detail fetch is pending");
            return;
        };
        tracing::info!("Fetching analysis {id}");
        self.jobs.load_detail(ticket, token);
    }

    pub fn back_to_history_list(&mut self) {
        self.history.view.back_to_list();
    }

    pub(super) fn leave_history(&mut self) {
        self.history.view.invalidate();
        self.history.store.invalidate();
    }

    pub(super) fn handle_list_loaded(&mut self, message: ListLoadResult) {
        match self
            .history
            .store
            .finish_list(message.kind, message.generation, message.result)
        {
            ListOutcome::Loaded { kind, count } => {
                tracing::info!("Loaded {count} analyses");
                self.history.filter.reset_page();
                if kind == ListKind::Refresh {
                    self.notify(NotificationTone::Success, "Success", "Analysis history refreshed");
                }
            }
            ListOutcome::Failed { message, .. } => self.notify_error(message),
            ListOutcome::Stale => tracing::debug!("Dropped stale history response"),
        }
    }

    pub(super) fn handle_detail_loaded(&mut self, message: DetailLoadResult) {
        match self.history.view.finish_detail(&message.ticket, message.result) {
            DetailOutcome::Shown => tracing::info!("Showing analysis {}", message.ticket.id),
            DetailOutcome::Failed(error) => self.notify_error(error),
            DetailOutcome::Stale => {
                tracing::debug!("Dropped stale detail response for {}", message.ticket.id)
            }
        }
    }

    /// Forget history state entirely, e.g. on sign-out.
    pub(super) fn reset_history(&mut self) {
        self.history.store.clear();
        self.history.view.invalidate();
        self.history.filter.reset();
        self.ui.history_search.clear();
        self.history.needs_load = true;
    }
}
