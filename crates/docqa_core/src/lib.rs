//! DocQA core: pure state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::{Failure, Msg};
pub use state::{
    AppState, AuthForm, Credentials, DashboardState, Document, DocumentId, Route, ScopeId,
    DEFAULT_MEDIA_BASE,
};
pub use update::{
    update, MSG_ASK_FAILED, MSG_ASK_VALIDATION, MSG_DELETED, MSG_DELETE_FAILED,
    MSG_INVALID_CREDENTIALS, MSG_SESSION_NOT_SAVED, MSG_SIGNUP_FAILED, MSG_UPLOAD_FAILED,
    MSG_UPLOAD_OK,
};
pub use view_model::{AppViewModel, AuthFormView, DashboardView, DocumentRowView};
