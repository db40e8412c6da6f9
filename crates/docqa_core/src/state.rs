use std::path::PathBuf;

use url::Url;

use crate::view_model::{AppViewModel, AuthFormView, DashboardView};

pub type DocumentId = u64;

/// Identifies one mount of a route. Completions tagged with an older scope
/// are dropped by `update`.
pub type ScopeId = u64;

/// Origin that server-relative document paths are resolved against.
pub const DEFAULT_MEDIA_BASE: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Login,
    Signup,
    Dashboard,
}

impl Route {
    /// Maps a navigation path to a route. The root path and every unknown
    /// path land on the login page.
    pub fn resolve(path: &str) -> Self {
        let path = path.trim();
        let path = path.strip_prefix('/').unwrap_or(path);
        match path.trim_end_matches('/') {
            "signup" => Route::Signup,
            "dashboard" => Route::Dashboard,
            _ => Route::Login,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Signup => "/signup",
            Route::Dashboard => "/dashboard",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: DocumentId,
    /// Server-relative path (or absolute URL) of the stored file.
    pub file_ref: String,
}

impl Document {
    pub fn new(id: DocumentId, file_ref: impl Into<String>) -> Self {
        Self {
            id,
            file_ref: file_ref.into(),
        }
    }

    /// Final path segment of the file reference.
    pub fn display_name(&self) -> &str {
        self.file_ref.rsplit('/').next().unwrap_or(&self.file_ref)
    }

    pub fn link(&self, media_base: &Url) -> Option<Url> {
        media_base.join(&self.file_ref).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthForm {
    pub username: String,
    pub password: String,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DashboardState {
    pub loading_page: bool,
    pub documents: Vec<Document>,
    pub selected_file: Option<PathBuf>,
    pub uploading: bool,
    /// Single slot: a second delete overwrites the first one's marker.
    pub deleting_id: Option<DocumentId>,
    pub message: Option<String>,
    pub question: String,
    pub selected_document: Option<DocumentId>,
    pub answer: Option<String>,
    pub asking: bool,
}

impl DashboardState {
    /// State of a freshly mounted dashboard: page loader shown, nothing cached.
    pub fn mounted() -> Self {
        Self {
            loading_page: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    route: Route,
    scope: ScopeId,
    login: AuthForm,
    signup: AuthForm,
    dashboard: DashboardState,
    media_base: Option<Url>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            route: Route::default(),
            scope: 0,
            login: AuthForm::default(),
            signup: AuthForm::default(),
            dashboard: DashboardState::default(),
            media_base: Url::parse(DEFAULT_MEDIA_BASE).ok(),
            dirty: false,
        }
    }

    pub fn with_media_base(mut self, media_base: Url) -> Self {
        self.media_base = Some(media_base);
        self
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn scope(&self) -> ScopeId {
        self.scope
    }

    pub fn login_form(&self) -> &AuthForm {
        &self.login
    }

    pub fn signup_form(&self) -> &AuthForm {
        &self.signup
    }

    pub fn dashboard(&self) -> &DashboardState {
        &self.dashboard
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            route: self.route,
            login: AuthFormView::from_form(&self.login),
            signup: AuthFormView::from_form(&self.signup),
            dashboard: (self.route == Route::Dashboard)
                .then(|| DashboardView::from_state(&self.dashboard, self.media_base.as_ref())),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn is_current(&self, scope: ScopeId) -> bool {
        self.scope == scope
    }

    /// Switches to `route` under a new scope and resets that route's state.
    /// Returns the scope that was left.
    pub(crate) fn enter(&mut self, route: Route) -> ScopeId {
        let left = self.scope;
        self.scope += 1;
        self.route = route;
        match route {
            Route::Login => self.login = AuthForm::default(),
            Route::Signup => self.signup = AuthForm::default(),
            Route::Dashboard => self.dashboard = DashboardState::mounted(),
        }
        self.mark_dirty();
        left
    }

    pub(crate) fn active_form_mut(&mut self) -> Option<&mut AuthForm> {
        match self.route {
            Route::Login => Some(&mut self.login),
            Route::Signup => Some(&mut self.signup),
            Route::Dashboard => None,
        }
    }

    pub(crate) fn login_mut(&mut self) -> &mut AuthForm {
        &mut self.login
    }

    pub(crate) fn signup_mut(&mut self) -> &mut AuthForm {
        &mut self.signup
    }

    /// Dashboard state, only while the dashboard is the active route.
    pub(crate) fn dashboard_mut(&mut self) -> Option<&mut DashboardState> {
        (self.route == Route::Dashboard).then_some(&mut self.dashboard)
    }
}
