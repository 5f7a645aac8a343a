//! Interactive loop: reads lines, runs turns, renders results and errors.

use std::fmt::Write as _;
use std::io::Write as _;

use parley_ai::{SessionController, TurnError, TurnOutcome, TurnStatus};
use parley_common::{BackendKind, ConfigError, ParleyError};
use parley_store::{Role, StoredMessage};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

const DEFAULT_HISTORY: usize = 10;

const HELP: &str = "\
Commands:
  /model [name]   show backends, or switch to gpt-4o / gemini-flash
  /history [n]    show the last n stored messages (default 10)
  /clear          delete the whole conversation history
  /usage          token usage per backend for this run
  /help           this text
  /quit           leave (Ctrl-D also works)
Anything else is sent as a message.";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Empty,
    Message(String),
    Command(Command),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Model(Option<String>),
    History(usize),
    Clear,
    Usage,
    Help,
    Quit,
    Invalid(String),
}

pub fn parse_input(line: &str) -> Input {
    let line = line.trim();
    if line.is_empty() {
        return Input::Empty;
    }
    let Some(rest) = line.strip_prefix('/') else {
        return Input::Message(line.to_string());
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, Some(arg.trim()).filter(|a| !a.is_empty())),
        None => (rest, None),
    };

    let command = match name {
        "model" => Command::Model(arg.map(str::to_string)),
        "history" => match arg.map(str::parse::<usize>) {
            None => Command::History(DEFAULT_HISTORY),
            Some(Ok(n)) => Command::History(n),
            Some(Err(_)) => Command::Invalid(format!(
                "'{}' is not a message count",
                arg.unwrap_or_default()
            )),
        },
        "clear" => Command::Clear,
        "usage" => Command::Usage,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => Command::Invalid(format!("unknown command '/{other}' (try /help)")),
    };
    Input::Command(command)
}

/// Text shown for a turn that was aborted.
pub fn render_turn_error(err: &TurnError) -> String {
    match err {
        TurnError::Configuration(ConfigError::MissingCredential { backend, env_var }) => format!(
            "Error: {backend} is not configured. Set {env_var} in the environment or in a .env file, or switch with /model."
        ),
        TurnError::Configuration(e) => format!("Error: {e}"),
        TurnError::Storage(e) => format!("Error: the message was not processed ({e})."),
    }
}

pub fn render_outcome(outcome: &TurnOutcome) -> String {
    match &outcome.status {
        TurnStatus::Answered { .. } => outcome.reply.clone(),
        TurnStatus::Degraded { .. } => format!("[!] {}", outcome.reply),
    }
}

pub fn format_history(messages: &[StoredMessage]) -> String {
    if messages.is_empty() {
        return "(no messages)".to_string();
    }
    let mut out = String::new();
    for message in messages {
        let who = match message.role {
            Role::User => "you",
            Role::Assistant => "assistant",
        };
        let _ = writeln!(
            out,
            "[{}] {who}: {}",
            message.timestamp.format("%Y-%m-%d %H:%M"),
            message.content
        );
    }
    out.trim_end().to_string()
}

fn format_backends(session: &SessionController) -> String {
    let mut out = String::new();
    for kind in BackendKind::ALL {
        let descriptor = session.router().descriptor(kind);
        let marker = if kind == session.active_backend() { "*" } else { " " };
        let _ = writeln!(
            out,
            "{marker} {:<13} {} ({}, key: {})",
            kind.key(),
            descriptor.logical_name,
            descriptor.model_id,
            descriptor.credential_env
        );
    }
    out.trim_end().to_string()
}

fn format_usage(session: &SessionController) -> String {
    let usage = session.usage();
    let mut out = String::new();
    for kind in BackendKind::ALL {
        let u = usage.for_backend(kind);
        let _ = writeln!(
            out,
            "{:<20} in: {:>7}  out: {:>7}",
            kind.logical_name(),
            u.input_tokens,
            u.output_tokens
        );
    }
    let _ = write!(
        out,
        "{:<20} {} tokens over {} answers",
        "total",
        usage.total_tokens(),
        usage.generation_count()
    );
    out
}

/// Run a command. Returns `false` when the loop should end.
fn handle_command(session: &mut SessionController, command: Command) -> bool {
    match command {
        Command::Quit => return false,
        Command::Help => println!("{HELP}"),
        Command::Model(None) => println!("{}", format_backends(session)),
        Command::Model(Some(name)) => match name.parse::<BackendKind>() {
            Ok(kind) => {
                session.switch_backend(kind);
                println!("Now using {kind}.");
            }
            Err(e) => println!("Error: {e}"),
        },
        Command::History(n) => match session.history(n) {
            Ok(messages) => println!("{}", format_history(&messages)),
            Err(e) => println!("Error: {e}"),
        },
        Command::Clear => match session.clear_history() {
            Ok(()) => println!("Conversation history cleared."),
            Err(e) => println!("Error: {e}"),
        },
        Command::Usage => println!("{}", format_usage(session)),
        Command::Invalid(message) => println!("Error: {message}"),
    }
    true
}

fn prompt(session: &SessionController) -> Result<(), ParleyError> {
    let mut stdout = std::io::stdout();
    write!(stdout, "[{}] > ", session.active_backend().key())?;
    stdout.flush()?;
    Ok(())
}

/// Read stdin until EOF or `/quit`, one turn at a time.
pub async fn run(session: &mut SessionController) -> Result<(), ParleyError> {
    println!(
        "Parley ready ({}). Type /help for commands.",
        session.active_backend()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt(session)?;
        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        match parse_input(&line) {
            Input::Empty => {}
            Input::Command(command) => {
                debug!(?command, "repl command");
                if !handle_command(session, command) {
                    break;
                }
            }
            Input::Message(text) => match session.run_turn(&text).await {
                Ok(outcome) => println!("{}\n", render_outcome(&outcome)),
                Err(e) => println!("{}\n", render_turn_error(&e)),
            },
        }
    }

    info!("session ended");
    Ok(())
}
