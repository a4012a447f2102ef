//! Subcommand: `agendabot chat` -- interactive conversation.
//!
//! A line-oriented transport around one [`Session`]: read a line, hand it to
//! the session, print the reply, until an exit command or end of input.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use tracing::info;

use agendabot_dialogue::{ScheduleSubmitter, Session};
use agendabot_intent::SynonymSource;

use crate::config::AppConfig;
use crate::helpers::{build_classifier, build_submitter};

const BOT_PREFIX: &str = "Chatbot: ";
const USER_PROMPT: &str = "Você: ";

/// Run the interactive conversation on stdin/stdout.
pub async fn cmd_chat(config: &AppConfig) -> Result<()> {
    let classifier = build_classifier(config);
    let submitter = build_submitter(config)?;
    let mut session = Session::new(classifier, submitter);
    info!(session_id = %session.id(), "chat started");

    let stdin = io::stdin();
    let stdout = io::stdout();
    converse(&mut session, stdin.lock(), stdout.lock()).await
}

/// Drive `session` with lines from `input`, writing the bot's side to
/// `output`.
pub async fn converse<S, T, R, W>(
    session: &mut Session<S, T>,
    mut input: R,
    mut output: W,
) -> Result<()>
where
    S: SynonymSource,
    T: ScheduleSubmitter,
    R: BufRead,
    W: Write,
{
    writeln!(output, "{BOT_PREFIX}{}", session.greeting())?;

    let mut line = String::new();
    loop {
        write!(output, "{USER_PROMPT}")?;
        output.flush().ok();

        line.clear();
        let bytes_read = input.read_line(&mut line).context("failed to read input")?;
        if bytes_read == 0 {
            writeln!(output)?;
            info!("EOF received, exiting");
            break;
        }

        let reply = session.handle(&line).await?;
        writeln!(output, "{BOT_PREFIX}{}", reply.text())?;
        if reply.ends_session() {
            break;
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
