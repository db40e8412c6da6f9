use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub type DocumentId = u64;
pub type ScopeId = u64;

/// One entry of `GET documents/`. Extra fields sent by the server are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: DocumentId,
    pub file: String,
}

/// Access/refresh pair issued by `POST token/`; also the persisted form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// A backend call the engine can run on behalf of a scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    Register { username: String, password: String },
    ObtainToken { username: String, password: String },
    ListDocuments,
    Upload { path: PathBuf },
    Delete { id: DocumentId },
    Ask { question: String, document_id: DocumentId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiOutcome {
    Registered(Result<(), RequestError>),
    LoggedIn(Result<TokenPair, RequestError>),
    DocumentsListed(Result<Vec<DocumentRecord>, RequestError>),
    Uploaded(Result<(), RequestError>),
    Deleted {
        id: DocumentId,
        result: Result<(), RequestError>,
    },
    Answered(Result<String, RequestError>),
}

/// Completion of a request submitted under `scope`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineEvent {
    pub scope: ScopeId,
    pub outcome: ApiOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct RequestError {
    pub kind: FailureKind,
    pub message: String,
    /// The `error` field of a JSON error body, when the server sent one.
    pub server_message: Option<String>,
}

impl RequestError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            server_message: None,
        }
    }

    pub(crate) fn with_server_message(mut self, server_message: Option<String>) -> Self {
        self.server_message = server_message;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Decode,
    /// The local file to upload could not be read.
    Io,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Decode => write!(f, "malformed response"),
            FailureKind::Io => write!(f, "io error"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
