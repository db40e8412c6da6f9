use std::path::Path;
use std::sync::{mpsc, Arc};
use std::time::Duration;

use docqa_engine::{
    ApiOutcome, ApiRequest, ChannelEventSink, DocumentApi, DocumentId, DocumentRecord,
    EngineEvent, EngineHandle, FailureKind, RequestError, TokenPair,
};
use tokio::sync::Notify;

/// Answers every call immediately except `ask_question`, which waits for
/// `release` to be notified.
struct FakeApi {
    release: Arc<Notify>,
}

fn failure() -> RequestError {
    RequestError {
        kind: FailureKind::HttpStatus(500),
        message: "500 Internal Server Error".to_string(),
        server_message: None,
    }
}

#[async_trait::async_trait]
impl DocumentApi for FakeApi {
    async fn register(&self, _username: &str, _password: &str) -> Result<(), RequestError> {
        Err(failure())
    }

    async fn obtain_token(
        &self,
        username: &str,
        _password: &str,
    ) -> Result<TokenPair, RequestError> {
        Ok(TokenPair {
            access: format!("{username}-access"),
            refresh: format!("{username}-refresh"),
        })
    }

    async fn list_documents(&self) -> Result<Vec<DocumentRecord>, RequestError> {
        Ok(vec![DocumentRecord {
            id: 1,
            file: "/media/a.pdf".to_string(),
        }])
    }

    async fn upload_document(&self, _path: &Path) -> Result<(), RequestError> {
        Ok(())
    }

    async fn delete_document(&self, _id: DocumentId) -> Result<(), RequestError> {
        Err(failure())
    }

    async fn ask_question(
        &self,
        _question: &str,
        _document_id: DocumentId,
    ) -> Result<String, RequestError> {
        self.release.notified().await;
        Ok("late".to_string())
    }
}

fn engine() -> (EngineHandle, mpsc::Receiver<EngineEvent>, Arc<Notify>) {
    let release = Arc::new(Notify::new());
    let api = Arc::new(FakeApi {
        release: release.clone(),
    });
    let (tx, rx) = mpsc::channel();
    let handle = EngineHandle::new(api, Arc::new(ChannelEventSink::new(tx)));
    (handle, rx, release)
}

#[test]
fn completions_are_tagged_with_their_scope() {
    let (engine, rx, _release) = engine();

    engine.submit(
        7,
        ApiRequest::ObtainToken {
            username: "alice".to_string(),
            password: "pw".to_string(),
        },
    );

    let event = rx.recv_timeout(Duration::from_secs(5)).expect("event");
    assert_eq!(event.scope, 7);
    assert_eq!(
        event.outcome,
        ApiOutcome::LoggedIn(Ok(TokenPair {
            access: "alice-access".to_string(),
            refresh: "alice-refresh".to_string(),
        }))
    );
}

#[test]
fn delete_outcome_keeps_the_document_id() {
    let (engine, rx, _release) = engine();

    engine.submit(3, ApiRequest::Delete { id: 11 });

    let event = rx.recv_timeout(Duration::from_secs(5)).expect("event");
    assert_eq!(
        event.outcome,
        ApiOutcome::Deleted {
            id: 11,
            result: Err(failure()),
        }
    );
}

#[test]
fn cancelled_scope_never_delivers() {
    let (engine, rx, release) = engine();

    engine.submit(
        1,
        ApiRequest::Ask {
            question: "q".to_string(),
            document_id: 1,
        },
    );
    engine.cancel(1);
    // Give the cancellation time to land before releasing the response.
    std::thread::sleep(Duration::from_millis(100));
    release.notify_waiters();

    assert!(rx.recv_timeout(Duration::from_millis(300)).is_err());

    // Other scopes are unaffected.
    engine.submit(2, ApiRequest::ListDocuments);
    let event = rx.recv_timeout(Duration::from_secs(5)).expect("event");
    assert_eq!(event.scope, 2);
}
