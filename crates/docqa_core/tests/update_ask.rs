use docqa_core::{
    update, AppState, Document, Effect, Failure, Msg, ScopeId, MSG_ASK_FAILED, MSG_ASK_VALIDATION,
};

fn ready_dashboard() -> (AppState, ScopeId) {
    let (state, _) = update(AppState::new(), Msg::Navigate("/dashboard".to_string()));
    let scope = state.scope();
    let (state, _) = update(
        state,
        Msg::SessionChecked {
            scope,
            token_present: true,
        },
    );
    let (state, _) = update(
        state,
        Msg::DocumentsFetched {
            scope,
            result: Ok(vec![Document::new(1, "/media/invoice.pdf")]),
        },
    );
    (state, scope)
}

#[test]
fn ask_without_question_is_rejected_locally() {
    let (state, _) = ready_dashboard();
    let (state, _) = update(state, Msg::DocumentSelected(Some(1)));

    let (state, effects) = update(state, Msg::AskClicked);

    assert!(effects.is_empty());
    assert!(!state.dashboard().asking);
    assert_eq!(state.dashboard().message.as_deref(), Some(MSG_ASK_VALIDATION));
}

#[test]
fn ask_without_document_is_rejected_locally() {
    let (state, _) = ready_dashboard();
    let (state, _) = update(state, Msg::QuestionChanged("What is the total?".to_string()));

    let (state, effects) = update(state, Msg::AskClicked);

    assert!(effects.is_empty());
    assert_eq!(state.dashboard().message.as_deref(), Some(MSG_ASK_VALIDATION));
}

#[test]
fn ask_success_shows_answer_and_clears_message() {
    let (state, scope) = ready_dashboard();
    let (state, _) = update(state, Msg::QuestionChanged("What is the total?".to_string()));
    let (state, _) = update(state, Msg::AskClicked);
    assert_eq!(state.dashboard().message.as_deref(), Some(MSG_ASK_VALIDATION));
    let (state, _) = update(state, Msg::DocumentSelected(Some(1)));

    let (state, effects) = update(state, Msg::AskClicked);
    assert_eq!(
        effects,
        vec![Effect::AskQuestion {
            scope,
            question: "What is the total?".to_string(),
            document_id: 1,
        }]
    );
    let view = state.view().dashboard.expect("dashboard view");
    assert_eq!(view.ask_label, "Thinking...");
    assert!(!view.ask_enabled);

    let (state, effects) = update(
        state,
        Msg::AnswerReceived {
            scope,
            result: Ok("42".to_string()),
        },
    );
    assert!(effects.is_empty());
    let view = state.view().dashboard.expect("dashboard view");
    assert_eq!(view.answer.as_deref(), Some("42"));
    assert_eq!(view.message, None);
    assert_eq!(view.ask_label, "Ask Question");
}

#[test]
fn ask_failure_sets_message_and_leaves_answer_empty() {
    let (state, scope) = ready_dashboard();
    let (state, _) = update(state, Msg::QuestionChanged("Who signed it?".to_string()));
    let (state, _) = update(state, Msg::DocumentSelected(Some(1)));
    let (state, _) = update(state, Msg::AskClicked);
    let (state, _) = update(
        state,
        Msg::AnswerReceived {
            scope,
            result: Ok("Jane".to_string()),
        },
    );

    // A new ask clears the previous answer immediately.
    let (state, _) = update(state, Msg::AskClicked);
    assert_eq!(state.dashboard().answer, None);

    let (state, _) = update(
        state,
        Msg::AnswerReceived {
            scope,
            result: Err(Failure::default()),
        },
    );
    assert_eq!(state.dashboard().answer, None);
    assert_eq!(state.dashboard().message.as_deref(), Some(MSG_ASK_FAILED));
    assert!(!state.dashboard().asking);
}

#[test]
fn overlapping_asks_are_last_write_wins() {
    let (state, scope) = ready_dashboard();
    let (state, _) = update(state, Msg::QuestionChanged("q".to_string()));
    let (state, _) = update(state, Msg::DocumentSelected(Some(1)));
    let (state, first) = update(state, Msg::AskClicked);
    let (state, second) = update(state, Msg::AskClicked);
    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);

    let (state, _) = update(
        state,
        Msg::AnswerReceived {
            scope,
            result: Ok("first".to_string()),
        },
    );
    let (state, _) = update(
        state,
        Msg::AnswerReceived {
            scope,
            result: Ok("second".to_string()),
        },
    );
    assert_eq!(state.dashboard().answer.as_deref(), Some("second"));
}
