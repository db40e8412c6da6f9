use std::path::PathBuf;

use crate::{Credentials, Document, DocumentId, ScopeId};

/// A backend call or local step that did not succeed. The cause is logged
/// where it happens; only what the user may see travels here.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Failure {
    /// Human-readable message supplied by the backend, if any.
    pub server_message: Option<String>,
}

impl Failure {
    pub fn with_server_message(mut self, message: impl Into<String>) -> Self {
        self.server_message = Some(message.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Navigation request to a path (`/login`, `/dashboard`, ...).
    Navigate(String),
    /// User edited the username field of the active auth form.
    UsernameChanged(String),
    /// User edited the password field of the active auth form.
    PasswordChanged(String),
    LoginSubmitted,
    SignupSubmitted,
    /// User picked (or cleared) the file to upload.
    FileSelected(Option<PathBuf>),
    UploadSubmitted,
    DeleteClicked(DocumentId),
    QuestionChanged(String),
    DocumentSelected(Option<DocumentId>),
    AskClicked,
    LogoutClicked,
    /// Result of reading the credential store for the dashboard guard.
    SessionChecked { scope: ScopeId, token_present: bool },
    LoginCompleted {
        scope: ScopeId,
        result: Result<Credentials, Failure>,
    },
    /// Outcome of writing the tokens returned by a successful login.
    CredentialsSaved {
        scope: ScopeId,
        result: Result<(), Failure>,
    },
    SignupCompleted {
        scope: ScopeId,
        result: Result<(), Failure>,
    },
    DocumentsFetched {
        scope: ScopeId,
        result: Result<Vec<Document>, Failure>,
    },
    UploadCompleted {
        scope: ScopeId,
        result: Result<(), Failure>,
    },
    DeleteCompleted {
        scope: ScopeId,
        id: DocumentId,
        result: Result<(), Failure>,
    },
    AnswerReceived {
        scope: ScopeId,
        result: Result<String, Failure>,
    },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
