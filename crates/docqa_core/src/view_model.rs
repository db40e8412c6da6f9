use url::Url;

use crate::{AuthForm, DashboardState, DocumentId, Route};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub route: Route,
    pub login: AuthFormView,
    pub signup: AuthFormView,
    /// Present only while the dashboard is the active route.
    pub dashboard: Option<DashboardView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthFormView {
    pub username: String,
    pub password_len: usize,
    pub error: Option<String>,
}

impl AuthFormView {
    pub(crate) fn from_form(form: &AuthForm) -> Self {
        Self {
            username: form.username.clone(),
            password_len: form.password.chars().count(),
            error: form.error.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DashboardView {
    /// While true the view shows only the page loader.
    pub loading_page: bool,
    pub documents: Vec<DocumentRowView>,
    pub empty_notice: Option<&'static str>,
    pub selected_file: Option<String>,
    pub upload_label: &'static str,
    pub upload_enabled: bool,
    pub message: Option<String>,
    pub question: String,
    pub selected_document: Option<DocumentId>,
    pub answer: Option<String>,
    pub ask_label: &'static str,
    pub ask_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRowView {
    pub id: DocumentId,
    pub label: String,
    pub href: Option<String>,
    pub deleting: bool,
    pub delete_label: &'static str,
}

impl DashboardView {
    pub(crate) fn from_state(state: &DashboardState, media_base: Option<&Url>) -> Self {
        let documents: Vec<DocumentRowView> = state
            .documents
            .iter()
            .map(|doc| {
                let deleting = state.deleting_id == Some(doc.id);
                DocumentRowView {
                    id: doc.id,
                    label: doc.display_name().to_string(),
                    href: media_base
                        .and_then(|base| doc.link(base))
                        .map(|url| url.to_string()),
                    deleting,
                    delete_label: if deleting { "Deleting..." } else { "Delete" },
                }
            })
            .collect();

        Self {
            loading_page: state.loading_page,
            empty_notice: documents.is_empty().then_some("No documents yet."),
            documents,
            selected_file: state
                .selected_file
                .as_ref()
                .map(|path| path.display().to_string()),
            upload_label: if state.uploading {
                "Uploading..."
            } else {
                "Upload"
            },
            upload_enabled: !state.uploading,
            message: state.message.clone().filter(|m| !m.is_empty()),
            question: state.question.clone(),
            selected_document: state.selected_document,
            answer: state.answer.clone().filter(|a| !a.is_empty()),
            ask_label: if state.asking {
                "Thinking..."
            } else {
                "Ask Question"
            },
            ask_enabled: !state.asking,
        }
    }
}
