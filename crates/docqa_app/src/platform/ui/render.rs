use std::fmt::Write;

use docqa_core::{AppViewModel, AuthFormView, DashboardView, Route};

/// Renders the view model as plain text for the terminal.
pub fn render(view: &AppViewModel) -> String {
    match view.route {
        Route::Login => render_form("Login", &view.login, "Don't have an account? goto /signup"),
        Route::Signup => render_form(
            "Create Account",
            &view.signup,
            "Already have an account? goto /login",
        ),
        Route::Dashboard => match &view.dashboard {
            Some(dashboard) => render_dashboard(dashboard),
            None => String::new(),
        },
    }
}

fn render_form(title: &str, form: &AuthFormView, hint: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {title} ==");
    let _ = writeln!(out, "username: {}", form.username);
    let _ = writeln!(out, "password: {}", "*".repeat(form.password_len));
    if let Some(error) = &form.error {
        let _ = writeln!(out, "! {error}");
    }
    let _ = write!(out, "{hint}");
    out
}

fn render_dashboard(view: &DashboardView) -> String {
    if view.loading_page {
        return "Loading...".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "== Document Dashboard ==");
    let _ = writeln!(
        out,
        "file: {}  [{}{}]",
        view.selected_file.as_deref().unwrap_or("(none)"),
        view.upload_label,
        if view.upload_enabled { "" } else { ", disabled" }
    );
    if let Some(message) = &view.message {
        let _ = writeln!(out, "> {message}");
    }

    let _ = writeln!(out, "Your Documents:");
    if let Some(notice) = view.empty_notice {
        let _ = writeln!(out, "  {notice}");
    }
    for row in &view.documents {
        let marker = if view.selected_document == Some(row.id) {
            "*"
        } else {
            " "
        };
        let _ = writeln!(
            out,
            " {marker}{:>4}  {:<32} [{}]  {}",
            row.id,
            row.label,
            row.delete_label,
            row.href.as_deref().unwrap_or("")
        );
    }

    let _ = writeln!(out, "question: {}", view.question);
    let _ = write!(
        out,
        "[{}{}]",
        view.ask_label,
        if view.ask_enabled { "" } else { ", disabled" }
    );
    if let Some(answer) = &view.answer {
        let _ = write!(out, "\nAI Answer:\n{answer}");
    }
    out
}
