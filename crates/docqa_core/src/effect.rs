use std::path::PathBuf;

use crate::{Credentials, DocumentId, ScopeId};

/// Side effects requested by `update`. The runner executes them in order;
/// network effects complete later as a `Msg` carrying the same scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Read the credential store and answer with `Msg::SessionChecked`.
    CheckSession { scope: ScopeId },
    /// Store the login tokens and answer with `Msg::CredentialsSaved`.
    SaveCredentials {
        scope: ScopeId,
        credentials: Credentials,
    },
    ClearCredentials,
    /// Abort everything still in flight for a scope that has been left.
    CancelScope { scope: ScopeId },
    Login {
        scope: ScopeId,
        username: String,
        password: String,
    },
    Register {
        scope: ScopeId,
        username: String,
        password: String,
    },
    FetchDocuments { scope: ScopeId },
    UploadDocument { scope: ScopeId, path: PathBuf },
    DeleteDocument { scope: ScopeId, id: DocumentId },
    AskQuestion {
        scope: ScopeId,
        question: String,
        document_id: DocumentId,
    },
}
