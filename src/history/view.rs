use crate::api::{ApiError, Operation};
use crate::model::AnalysisDetail;

use super::Generation;

/// What the history screen is showing.
///
/// Detail mode always owns its record; list mode retains none.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ViewState {
    #[default]
    List,
    Detail(Box<AnalysisDetail>),
}

impl ViewState {
    pub fn detail(&self) -> Option<&AnalysisDetail> {
        match self {
            Self::List => None,
            Self::Detail(detail) => Some(detail),
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::List)
    }
}

/// A detail fetch handed to a worker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailTicket {
    pub id: String,
    pub generation: Generation,
}

/// What applying a finished detail fetch did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DetailOutcome {
    Shown,
    Failed(String),
    Stale,
}

/// Master/detail controller for the history screen.
#[derive(Debug, Default)]
pub struct HistoryView {
    state: ViewState,
    generation: Generation,
    pending: Option<DetailTicket>,
}

impl HistoryView {
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Id of the record being fetched, if any.
    pub fn pending_id(&self) -> Option<&str> {
        self.pending.as_ref().map(|ticket| ticket.id.as_str())
    }

    /// Rows accept clicks only in list mode with no fetch outstanding.
    pub fn rows_interactive(&self) -> bool {
        self.state.is_list() && self.pending.is_none()
    }

    /// Start fetching `id` for the detail view.
    ///
    /// Refused while another detail fetch is outstanding or a detail is
    /// already showing.
    pub fn request_detail(&mut self, id: &str) -> Option<DetailTicket> {
        if !self.rows_interactive() {
            return None;
        }
        self.generation = self.generation.next();
        let ticket = DetailTicket {
            id: id.to_string(),
            generation: self.generation,
        };
        self.pending = Some(ticket.clone());
        Some(ticket)
    }

    /// Apply a finished detail fetch. Responses for anything but the
    /// outstanding ticket are dropped.
    pub fn finish_detail(
        &mut self,
        ticket: &DetailTicket,
        result: Result<AnalysisDetail, ApiError>,
    ) -> DetailOutcome {
        if self.pending.as_ref() != Some(ticket) {
            return DetailOutcome::Stale;
        }
        self.pending = None;
        match result {
            Ok(detail) => {
                self.state = ViewState::Detail(Box::new(detail));
                DetailOutcome::Shown
            }
            Err(err) => DetailOutcome::Failed(err.user_message(Operation::AnalysisDetail)),
        }
    }

    /// Return to the list, discarding the retained record.
    pub fn back_to_list(&mut self) {
        self.invalidate();
    }

    /// Discard the detail and anything in flight, e.g. when leaving the screen.
    pub fn invalidate(&mut self) {
        self.generation = self.generation.next();
        self.pending = None;
        self.state = ViewState::List;
    }
}
