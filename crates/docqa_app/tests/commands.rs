use std::path::PathBuf;

use docqa_app::platform::ui::commands::{parse, Command, ParseError};
use docqa_core::Msg;

#[test]
fn commands_map_to_messages() {
    assert_eq!(
        parse("goto /dashboard"),
        Ok(Command::Send(Msg::Navigate("/dashboard".to_string())))
    );
    assert_eq!(
        parse("  user alice "),
        Ok(Command::Send(Msg::UsernameChanged("alice".to_string())))
    );
    assert_eq!(parse("login"), Ok(Command::Send(Msg::LoginSubmitted)));
    assert_eq!(parse("delete 12"), Ok(Command::Send(Msg::DeleteClicked(12))));
    assert_eq!(
        parse("question What is the total?"),
        Ok(Command::Send(Msg::QuestionChanged(
            "What is the total?".to_string()
        )))
    );
    assert_eq!(parse("quit"), Ok(Command::Quit));
}

#[test]
fn optional_arguments_clear_selection() {
    assert_eq!(
        parse("file ./report.pdf"),
        Ok(Command::Send(Msg::FileSelected(Some(PathBuf::from(
            "./report.pdf"
        )))))
    );
    assert_eq!(parse("file"), Ok(Command::Send(Msg::FileSelected(None))));
    assert_eq!(
        parse("select 3"),
        Ok(Command::Send(Msg::DocumentSelected(Some(3))))
    );
    assert_eq!(parse("select"), Ok(Command::Send(Msg::DocumentSelected(None))));
}

#[test]
fn bad_input_is_rejected() {
    assert_eq!(parse("delete"), Err(ParseError::MissingArgument("delete")));
    assert_eq!(parse("delete abc"), Err(ParseError::BadId("abc".to_string())));
    assert_eq!(parse("frobnicate"), Err(ParseError::Unknown("frobnicate".to_string())));
}
