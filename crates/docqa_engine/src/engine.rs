use std::collections::HashMap;
use std::sync::{mpsc, Arc};
use std::thread;

use client_logging::{client_debug, client_error};
use tokio_util::sync::CancellationToken;

use crate::{ApiOutcome, ApiRequest, DocumentApi, EngineEvent, ScopeId};

/// Receives completions from the engine's worker tasks.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

enum EngineCommand {
    Submit { scope: ScopeId, request: ApiRequest },
    Cancel { scope: ScopeId },
}

/// Runs backend requests on a background tokio runtime.
///
/// Requests are grouped by scope. Cancelling a scope aborts its in-flight
/// requests; their results are never emitted. There are no timeouts and no
/// retries here: each submitted request is attempted exactly once.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(api: Arc<dyn DocumentApi>, sink: Arc<dyn EventSink>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    client_error!("Failed to start request runtime: {}", err);
                    return;
                }
            };
            let mut scopes: HashMap<ScopeId, CancellationToken> = HashMap::new();

            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::Submit { scope, request } => {
                        let token = scopes.entry(scope).or_default().clone();
                        let api = api.clone();
                        let sink = sink.clone();
                        runtime.spawn(async move {
                            tokio::select! {
                                _ = token.cancelled() => {
                                    client_debug!("Dropped request for cancelled scope {}", scope);
                                }
                                outcome = execute(api.as_ref(), request) => {
                                    sink.emit(EngineEvent { scope, outcome });
                                }
                            }
                        });
                    }
                    EngineCommand::Cancel { scope } => {
                        if let Some(token) = scopes.remove(&scope) {
                            token.cancel();
                        }
                    }
                }
            }
        });

        Self { cmd_tx }
    }

    pub fn submit(&self, scope: ScopeId, request: ApiRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Submit { scope, request });
    }

    pub fn cancel(&self, scope: ScopeId) {
        let _ = self.cmd_tx.send(EngineCommand::Cancel { scope });
    }
}

async fn execute(api: &dyn DocumentApi, request: ApiRequest) -> ApiOutcome {
    match request {
        ApiRequest::Register { username, password } => {
            ApiOutcome::Registered(api.register(&username, &password).await)
        }
        ApiRequest::ObtainToken { username, password } => {
            ApiOutcome::LoggedIn(api.obtain_token(&username, &password).await)
        }
        ApiRequest::ListDocuments => ApiOutcome::DocumentsListed(api.list_documents().await),
        ApiRequest::Upload { path } => ApiOutcome::Uploaded(api.upload_document(&path).await),
        ApiRequest::Delete { id } => ApiOutcome::Deleted {
            id,
            result: api.delete_document(id).await,
        },
        ApiRequest::Ask {
            question,
            document_id,
        } => ApiOutcome::Answered(api.ask_question(&question, document_id).await),
    }
}
