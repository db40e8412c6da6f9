use std::sync::{mpsc, Arc};

use client_logging::{client_error, client_info, client_warn};
use docqa_core::{Credentials, Document, Effect, Failure, Msg};
use docqa_engine::{
    ApiOutcome, ApiRequest, DocumentApi, DocumentRecord, EngineEvent, EngineHandle, EventSink,
    RequestError, SessionContext,
};

/// Executes core effects. Credential effects run inline, in order, so a
/// `CheckSession` emitted after a save or clear sees the store as written.
/// Network effects go to the engine and come back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
    session: SessionContext,
    msg_tx: mpsc::Sender<Msg>,
}

impl EffectRunner {
    pub fn new(
        api: Arc<dyn DocumentApi>,
        session: SessionContext,
        msg_tx: mpsc::Sender<Msg>,
    ) -> Self {
        let sink = Arc::new(MsgSink {
            msg_tx: msg_tx.clone(),
        });
        Self {
            engine: EngineHandle::new(api, sink),
            session,
            msg_tx,
        }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            self.run(effect);
        }
    }

    fn run(&self, effect: Effect) {
        match effect {
            Effect::CheckSession { scope } => {
                let token_present = self.session.has_token();
                if !token_present {
                    client_info!("No access token; redirecting to login");
                }
                let _ = self.msg_tx.send(Msg::SessionChecked {
                    scope,
                    token_present,
                });
            }
            Effect::SaveCredentials {
                scope,
                credentials: Credentials { access, refresh },
            } => {
                let result = self.session.save(&access, &refresh).map_err(|err| {
                    client_error!("Failed to store credentials: {}", err);
                    Failure::default()
                });
                let _ = self.msg_tx.send(Msg::CredentialsSaved { scope, result });
            }
            Effect::ClearCredentials => {
                if let Err(err) = self.session.clear() {
                    client_error!("Failed to clear credentials: {}", err);
                }
            }
            Effect::CancelScope { scope } => self.engine.cancel(scope),
            Effect::Login {
                scope,
                username,
                password,
            } => {
                client_info!("Login user={}", username);
                self.engine
                    .submit(scope, ApiRequest::ObtainToken { username, password });
            }
            Effect::Register {
                scope,
                username,
                password,
            } => {
                client_info!("Register user={}", username);
                self.engine
                    .submit(scope, ApiRequest::Register { username, password });
            }
            Effect::FetchDocuments { scope } => {
                self.engine.submit(scope, ApiRequest::ListDocuments);
            }
            Effect::UploadDocument { scope, path } => {
                client_info!("Upload path={:?}", path);
                self.engine.submit(scope, ApiRequest::Upload { path });
            }
            Effect::DeleteDocument { scope, id } => {
                client_info!("Delete document_id={}", id);
                self.engine.submit(scope, ApiRequest::Delete { id });
            }
            Effect::AskQuestion {
                scope,
                question,
                document_id,
            } => {
                client_info!(
                    "AskQuestion document_id={} question_len={}",
                    document_id,
                    question.len()
                );
                self.engine.submit(
                    scope,
                    ApiRequest::Ask {
                        question,
                        document_id,
                    },
                );
            }
        }
    }
}

struct MsgSink {
    msg_tx: mpsc::Sender<Msg>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.msg_tx.send(map_event(event));
    }
}

fn map_event(event: EngineEvent) -> Msg {
    let EngineEvent { scope, outcome } = event;
    match outcome {
        ApiOutcome::Registered(result) => Msg::SignupCompleted {
            scope,
            result: result.map_err(|err| map_failure("Register", err)),
        },
        ApiOutcome::LoggedIn(result) => Msg::LoginCompleted {
            scope,
            result: result
                .map(|pair| Credentials {
                    access: pair.access,
                    refresh: pair.refresh,
                })
                .map_err(|err| map_failure("Login", err)),
        },
        ApiOutcome::DocumentsListed(result) => Msg::DocumentsFetched {
            scope,
            result: result
                .map(|records| records.into_iter().map(map_document).collect())
                .map_err(|err| map_failure("Fetching documents", err)),
        },
        ApiOutcome::Uploaded(result) => Msg::UploadCompleted {
            scope,
            result: result.map_err(|err| map_failure("Upload", err)),
        },
        ApiOutcome::Deleted { id, result } => Msg::DeleteCompleted {
            scope,
            id,
            result: result.map_err(|err| map_failure("Delete", err)),
        },
        ApiOutcome::Answered(result) => Msg::AnswerReceived {
            scope,
            result: result.map_err(|err| map_failure("Ask", err)),
        },
    }
}

fn map_document(record: DocumentRecord) -> Document {
    Document::new(record.id, record.file)
}

fn map_failure(operation: &str, err: RequestError) -> Failure {
    client_warn!("{} failed: {}", operation, err);
    Failure {
        server_message: err.server_message,
    }
}
