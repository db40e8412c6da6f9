//! DocQA engine: backend gateway, credential storage and request execution.
mod api;
mod engine;
mod gateway;
mod persist;
mod session;
mod types;

pub use api::{DocumentApi, HttpDocumentApi, UPLOAD_FIELD};
pub use engine::{ChannelEventSink, EngineHandle, EventSink};
pub use gateway::{Gateway, GatewaySettings, DEFAULT_API_BASE};
pub use persist::PersistError;
pub use session::{
    CredentialStore, FileCredentialStore, MemoryCredentialStore, SessionContext, StoreError,
};
pub use types::{
    ApiOutcome, ApiRequest, DocumentId, DocumentRecord, EngineEvent, FailureKind, RequestError,
    ScopeId, TokenPair,
};
