//! Line-oriented user input for the terminal front end.

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

use client_logging::client_debug;
use docqa_core::Msg;

pub const HELP: &str = "\
commands:
  goto <path>        navigate (/login, /signup, /dashboard)
  user <name>        set username
  pass <password>    set password
  login | signup     submit the current form
  file [path]        choose (or clear) the file to upload
  upload             upload the chosen file
  delete <id>        delete a document
  select [id]        choose (or clear) the document to ask about
  question <text>    set the question
  ask                ask the question
  logout             end the session
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Send(Msg),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
    #[error("'{0}' is not a document id")]
    BadId(String),
}

pub fn parse(line: &str) -> Result<Command, ParseError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let rest = (!rest.is_empty()).then_some(rest);

    let msg = match word {
        "help" | "?" => return Ok(Command::Help),
        "quit" | "exit" => return Ok(Command::Quit),
        "goto" => Msg::Navigate(required(rest, "goto")?.to_string()),
        "user" => Msg::UsernameChanged(rest.unwrap_or_default().to_string()),
        "pass" => Msg::PasswordChanged(rest.unwrap_or_default().to_string()),
        "login" => Msg::LoginSubmitted,
        "signup" => Msg::SignupSubmitted,
        "file" => Msg::FileSelected(rest.map(PathBuf::from)),
        "upload" => Msg::UploadSubmitted,
        "delete" => Msg::DeleteClicked(parse_id(required(rest, "delete")?)?),
        "select" => Msg::DocumentSelected(rest.map(parse_id).transpose()?),
        "question" => Msg::QuestionChanged(rest.unwrap_or_default().to_string()),
        "ask" => Msg::AskClicked,
        "logout" => Msg::LogoutClicked,
        other => return Err(ParseError::Unknown(other.to_string())),
    };
    Ok(Command::Send(msg))
}

fn required<'a>(arg: Option<&'a str>, command: &'static str) -> Result<&'a str, ParseError> {
    arg.ok_or(ParseError::MissingArgument(command))
}

fn parse_id(raw: &str) -> Result<u64, ParseError> {
    raw.parse().map_err(|_| ParseError::BadId(raw.to_string()))
}

/// Reads stdin on a background thread and forwards parsed commands.
/// End of input sets `quit`.
pub fn spawn_stdin_reader(msg_tx: mpsc::Sender<Msg>, quit: Arc<AtomicBool>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if line.trim().is_empty() {
                continue;
            }
            match parse(&line) {
                Ok(Command::Send(msg)) => {
                    client_debug!("Input {:?}", msg);
                    if msg_tx.send(msg).is_err() {
                        break;
                    }
                }
                Ok(Command::Help) => println!("{HELP}"),
                Ok(Command::Quit) => break,
                Err(err) => println!("{err}"),
            }
        }
        quit.store(true, Ordering::Relaxed);
    });
}
