use crate::api::{AnalysisBackend, ApiError};
use crate::history::{DetailTicket, Generation, ListKind, ListTicket};
use crate::model::{AnalysisDetail, AnalysisSummary, AnalyzeResponse, Credentials};
use crate::upload::UploadTicket;
use std::{
    sync::{
        Arc,
        mpsc::{Receiver, Sender},
    },
    thread,
};

type TryRecvError = std::sync::mpsc::TryRecvError;

/// Results reported back to the UI thread by workers.
#[derive(Debug)]
pub(crate) enum JobMessage {
    AnalysesLoaded(ListLoadResult),
    DetailLoaded(DetailLoadResult),
    AnalyzeFinished(AnalyzeResult),
    LoginFinished(LoginResult),
    RegisterFinished(RegisterResult),
}

#[derive(Debug)]
pub(crate) struct ListLoadResult {
    pub(crate) kind: ListKind,
    pub(crate) generation: Generation,
    pub(crate) result: Result<Vec<AnalysisSummary>, ApiError>,
}

#[derive(Debug)]
pub(crate) struct DetailLoadResult {
    pub(crate) ticket: DetailTicket,
    pub(crate) result: Result<AnalysisDetail, ApiError>,
}

#[derive(Debug)]
pub(crate) struct AnalyzeResult {
    pub(crate) generation: Generation,
    pub(crate) result: Result<AnalyzeResponse, ApiError>,
}

#[derive(Debug)]
pub(crate) struct LoginResult {
    pub(crate) username: String,
    pub(crate) result: Result<String, ApiError>,
}

#[derive(Debug)]
pub(crate) struct RegisterResult {
    pub(crate) username: String,
    pub(crate) result: Result<(), ApiError>,
}

/// Spawns backend calls and collects their results on one channel.
pub(crate) struct ControllerJobs {
    backend: Arc<dyn AnalysisBackend>,
    message_tx: Sender<JobMessage>,
    message_rx: Receiver<JobMessage>,
}

impl ControllerJobs {
    pub(super) fn new(backend: Arc<dyn AnalysisBackend>) -> Self {
        let (message_tx, message_rx) = std::sync::mpsc::channel::<JobMessage>();
        Self {
            backend,
            message_tx,
            message_rx,
        }
    }

    pub(super) fn try_recv_message(&self) -> Result<JobMessage, TryRecvError> {
        self.message_rx.try_recv()
    }

    fn spawn<F>(&self, work: F)
    where
        F: FnOnce(&dyn AnalysisBackend) -> JobMessage + Send + 'static,
    {
        let backend = Arc::clone(&self.backend);
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let message = work(backend.as_ref());
            let _ = tx.send(message);
        });
    }

    pub(super) fn load_analyses(&self, ticket: ListTicket) {
        self.spawn(move |backend| {
            let result = backend.list_analyses(&ticket.token);
            JobMessage::AnalysesLoaded(ListLoadResult {
                kind: ticket.kind,
                generation: ticket.generation,
                result,
            })
        });
    }

    pub(super) fn load_detail(&self, ticket: DetailTicket, token: String) {
        self.spawn(move |backend| {
            let result = backend.analysis_detail(&token, &ticket.id);
            JobMessage::DetailLoaded(DetailLoadResult { ticket, result })
        });
    }

    pub(super) fn analyze(&self, ticket: UploadTicket) {
        self.spawn(move |backend| {
            let result = backend.analyze(&ticket.token, &ticket.file);
            JobMessage::AnalyzeFinished(AnalyzeResult {
                generation: ticket.generation,
                result,
            })
        });
    }

    pub(super) fn login(&self, credentials: Credentials) {
        self.spawn(move |backend| {
            let result = backend.login(&credentials);
            JobMessage::LoginFinished(LoginResult {
                username: credentials.username,
                result,
            })
        });
    }

    pub(super) fn register(&self, credentials: Credentials) {
        self.spawn(move |backend| {
            let result = backend.register(&credentials);
            JobMessage::RegisterFinished(RegisterResult {
                username: credentials.username,
                result,
            })
        });
    }
}
