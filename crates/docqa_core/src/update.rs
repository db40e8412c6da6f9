use crate::{AppState, Effect, Failure, Msg, Route};

pub const MSG_UPLOAD_OK: &str = "Upload successful!";
pub const MSG_UPLOAD_FAILED: &str = "Upload failed";
pub const MSG_DELETED: &str = "Document deleted";
pub const MSG_DELETE_FAILED: &str = "Failed to delete";
pub const MSG_ASK_VALIDATION: &str = "Please select a document and type a question.";
pub const MSG_ASK_FAILED: &str = "Failed to get answer from AI";
pub const MSG_INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const MSG_SIGNUP_FAILED: &str = "Signup failed";
pub const MSG_SESSION_NOT_SAVED: &str = "Could not save your session";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Navigate(path) => navigate(&mut state, Route::resolve(&path)),
        Msg::UsernameChanged(value) => {
            if let Some(form) = state.active_form_mut() {
                form.username = value;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::PasswordChanged(value) => {
            if let Some(form) = state.active_form_mut() {
                form.password = value;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::LoginSubmitted => {
            if state.route() != Route::Login {
                return (state, Vec::new());
            }
            let form = state.login_form();
            vec![Effect::Login {
                scope: state.scope(),
                username: form.username.clone(),
                password: form.password.clone(),
            }]
        }
        Msg::SignupSubmitted => {
            if state.route() != Route::Signup {
                return (state, Vec::new());
            }
            let form = state.signup_form();
            vec![Effect::Register {
                scope: state.scope(),
                username: form.username.clone(),
                password: form.password.clone(),
            }]
        }
        Msg::LoginCompleted { scope, result } => {
            if !state.is_current(scope) {
                return (state, Vec::new());
            }
            match result {
                // The dashboard is only entered once the tokens are stored.
                Ok(credentials) => vec![Effect::SaveCredentials { scope, credentials }],
                Err(_) => {
                    state.login_mut().error = Some(MSG_INVALID_CREDENTIALS.to_string());
                    state.mark_dirty();
                    Vec::new()
                }
            }
        }
        Msg::CredentialsSaved { scope, result } => {
            if !state.is_current(scope) {
                return (state, Vec::new());
            }
            match result {
                Ok(()) => navigate(&mut state, Route::Dashboard),
                Err(_) => {
                    state.login_mut().error = Some(MSG_SESSION_NOT_SAVED.to_string());
                    state.mark_dirty();
                    Vec::new()
                }
            }
        }
        Msg::SignupCompleted { scope, result } => {
            if !state.is_current(scope) {
                return (state, Vec::new());
            }
            match result {
                Ok(()) => navigate(&mut state, Route::Login),
                Err(Failure { server_message, .. }) => {
                    state.signup_mut().error =
                        Some(server_message.unwrap_or_else(|| MSG_SIGNUP_FAILED.to_string()));
                    state.mark_dirty();
                    Vec::new()
                }
            }
        }
        Msg::SessionChecked {
            scope,
            token_present,
        } => {
            if !state.is_current(scope) || state.route() != Route::Dashboard {
                return (state, Vec::new());
            }
            if token_present {
                vec![Effect::FetchDocuments { scope }]
            } else {
                navigate(&mut state, Route::Login)
            }
        }
        Msg::DocumentsFetched { scope, result } => {
            if !state.is_current(scope) {
                return (state, Vec::new());
            }
            let Some(dashboard) = state.dashboard_mut() else {
                return (state, Vec::new());
            };
            // A failed fetch keeps the previous collection; the loader is
            // cleared either way.
            if let Ok(documents) = result {
                dashboard.documents = documents;
            }
            dashboard.loading_page = false;
            state.mark_dirty();
            Vec::new()
        }
        Msg::FileSelected(path) => {
            if let Some(dashboard) = state.dashboard_mut() {
                dashboard.selected_file = path;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::UploadSubmitted => {
            let scope = state.scope();
            let Some(dashboard) = state.dashboard_mut() else {
                return (state, Vec::new());
            };
            let Some(path) = dashboard.selected_file.clone() else {
                return (state, Vec::new());
            };
            dashboard.uploading = true;
            state.mark_dirty();
            vec![Effect::UploadDocument { scope, path }]
        }
        Msg::UploadCompleted { scope, result } => {
            if !state.is_current(scope) {
                return (state, Vec::new());
            }
            let Some(dashboard) = state.dashboard_mut() else {
                return (state, Vec::new());
            };
            match result {
                Ok(()) => {
                    dashboard.message = Some(MSG_UPLOAD_OK.to_string());
                    dashboard.selected_file = None;
                }
                Err(_) => dashboard.message = Some(MSG_UPLOAD_FAILED.to_string()),
            }
            dashboard.uploading = false;
            state.mark_dirty();
            vec![Effect::FetchDocuments { scope }]
        }
        Msg::DeleteClicked(id) => {
            let scope = state.scope();
            let Some(dashboard) = state.dashboard_mut() else {
                return (state, Vec::new());
            };
            dashboard.deleting_id = Some(id);
            state.mark_dirty();
            vec![Effect::DeleteDocument { scope, id }]
        }
        Msg::DeleteCompleted { scope, id: _, result } => {
            if !state.is_current(scope) {
                return (state, Vec::new());
            }
            let Some(dashboard) = state.dashboard_mut() else {
                return (state, Vec::new());
            };
            // The marker is cleared whichever delete finishes, even if a
            // later click already replaced it.
            dashboard.deleting_id = None;
            let effects = match result {
                Ok(()) => {
                    dashboard.message = Some(MSG_DELETED.to_string());
                    vec![Effect::FetchDocuments { scope }]
                }
                Err(_) => {
                    dashboard.message = Some(MSG_DELETE_FAILED.to_string());
                    Vec::new()
                }
            };
            state.mark_dirty();
            effects
        }
        Msg::QuestionChanged(question) => {
            if let Some(dashboard) = state.dashboard_mut() {
                dashboard.question = question;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::DocumentSelected(id) => {
            if let Some(dashboard) = state.dashboard_mut() {
                dashboard.selected_document = id;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::AskClicked => {
            let scope = state.scope();
            let Some(dashboard) = state.dashboard_mut() else {
                return (state, Vec::new());
            };
            let effects = match dashboard.selected_document {
                Some(document_id) if !dashboard.question.is_empty() => {
                    dashboard.asking = true;
                    dashboard.answer = None;
                    vec![Effect::AskQuestion {
                        scope,
                        question: dashboard.question.clone(),
                        document_id,
                    }]
                }
                _ => {
                    dashboard.message = Some(MSG_ASK_VALIDATION.to_string());
                    Vec::new()
                }
            };
            state.mark_dirty();
            effects
        }
        Msg::AnswerReceived { scope, result } => {
            if !state.is_current(scope) {
                return (state, Vec::new());
            }
            let Some(dashboard) = state.dashboard_mut() else {
                return (state, Vec::new());
            };
            match result {
                Ok(answer) => {
                    dashboard.answer = Some(answer);
                    dashboard.message = None;
                }
                Err(_) => {
                    dashboard.answer = None;
                    dashboard.message = Some(MSG_ASK_FAILED.to_string());
                }
            }
            dashboard.asking = false;
            state.mark_dirty();
            Vec::new()
        }
        Msg::LogoutClicked => {
            let mut effects = vec![Effect::ClearCredentials];
            effects.extend(navigate(&mut state, Route::Login));
            effects
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Leaves the current route (cancelling its scope) and mounts `target`.
/// Navigating to the route already shown is a no-op; scope 0 means nothing
/// has been mounted yet.
fn navigate(state: &mut AppState, target: Route) -> Vec<Effect> {
    if state.route() == target && state.scope() != 0 {
        return Vec::new();
    }
    let left = state.enter(target);
    let mut effects = vec![Effect::CancelScope { scope: left }];
    if target == Route::Dashboard {
        effects.push(Effect::CheckSession {
            scope: state.scope(),
        });
    }
    effects
}
