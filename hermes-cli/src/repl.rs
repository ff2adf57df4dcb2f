//! Interactive shell: one line per message, robot output printed as it arrives.

use anyhow::Result;
use hermes_core::{MessageLog, Outgoing, Transcript};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, error};

use crate::config::HermesConfig;
use crate::session::Session;

/// A line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Message(String),
    User(String),
    Room(String),
    Reload,
    Plugins,
    Help,
    Quit,
    Empty,
    /// Meta-command that does not parse; holds the offending line.
    Unknown(String),
}

const SHELL_HELP: &str = "\
:user <id>   speak as another user
:room <id>   move to another room
:reload      rebuild the robot and re-read plugin scripts
:plugins     list installed plugins
:quit        leave (also Ctrl-D)
anything else is said to the robot";

/// Lines starting with `:` are shell commands; everything else goes to the robot.
pub fn parse_input(line: &str) -> Input {
    let line = line.trim();
    if line.is_empty() {
        return Input::Empty;
    }
    let Some(command) = line.strip_prefix(':') else {
        return Input::Message(line.to_string());
    };
    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("user"), Some(id), None) => Input::User(id.to_string()),
        (Some("room"), Some(id), None) => Input::Room(id.to_string()),
        (Some("reload"), None, _) => Input::Reload,
        (Some("plugins"), None, _) => Input::Plugins,
        (Some("help"), None, _) => Input::Help,
        (Some("quit") | Some("q") | Some("exit"), None, _) => Input::Quit,
        _ => Input::Unknown(line.to_string()),
    }
}

/// Runs the shell on stdin/stdout until `:quit` or end of input.
pub async fn run(config: HermesConfig) -> Result<()> {
    let (mut session, mut rx) = Session::start(config)?;
    let log = MessageLog::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!(
        "{} is listening as {}(type :help for shell commands)",
        session.robot().name(),
        session.robot().mention()
    );

    loop {
        tokio::select! {
            biased;
            Some(outgoing) = rx.recv() => print_outgoing(&session, &log, &outgoing).await?,
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let keep_going = handle_line(&mut session, &log, &line).await?;
                while let Ok(outgoing) = rx.try_recv() {
                    print_outgoing(&session, &log, &outgoing).await?;
                }
                if !keep_going {
                    break;
                }
            }
        }
    }

    debug!(lines = log.len().await, "step: shell closed");
    session.save_brain()
}

/// Applies one typed line. Returns false when the shell should exit.
pub async fn handle_line(session: &mut Session, log: &MessageLog, line: &str) -> Result<bool> {
    match parse_input(line) {
        Input::Empty => {}
        Input::Message(text) => {
            log.incoming(session.user(), &text, &session.context()).await?;
            if let Err(e) = session.hear(&text) {
                error!(error = %e, "step: listener failed");
                println!("! {}", e);
            }
        }
        Input::User(user) => {
            session.set_user(&user);
            println!("(you are now {})", user);
        }
        Input::Room(room) => {
            session.set_room(&room);
            println!("(you are now in {})", room);
        }
        Input::Reload => match session.reload() {
            Ok(plugins) => println!("(reloaded {} plugins)", plugins.len()),
            Err(e) => println!("! reload failed, keeping the previous robot: {:#}", e),
        },
        Input::Plugins => println!("{}", session.robot().plugins().join(", ")),
        Input::Help => println!("{}", SHELL_HELP),
        Input::Quit => return Ok(false),
        Input::Unknown(line) => println!("! unknown shell command {:?}, try :help", line),
    }
    Ok(true)
}

async fn print_outgoing(session: &Session, log: &MessageLog, outgoing: &Outgoing) -> Result<()> {
    log.deliver(&session.robot().name(), outgoing).await?;
    if let Some(entry) = log.last().await {
        println!("{}", entry.render());
    }
    Ok(())
}

/// Drains everything the robot has said so far into `log`, returning the rendered lines.
pub async fn drain(
    session: &Session,
    log: &MessageLog,
    rx: &mut mpsc::UnboundedReceiver<Outgoing>,
) -> Result<Vec<String>> {
    let mut rendered = Vec::new();
    while let Ok(outgoing) = rx.try_recv() {
        log.deliver(&session.robot().name(), &outgoing).await?;
        if let Some(entry) = log.last().await {
            rendered.push(entry.render());
        }
    }
    Ok(rendered)
}
