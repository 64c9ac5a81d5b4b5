use std::io::{BufRead, Write};

use chrono::Local;
use tracing::debug;

use crate::context::AppContext;
use crate::domain::message::CommitMessage;
use crate::domain::step::PublishReport;
use crate::error::AppResult;
use crate::workflow::publish::publish_changes;

pub const MESSAGE_PROMPT: &str = "Commit message (Enter for auto message): ";
pub const PAUSE_PROMPT: &str = "Press Enter to exit...";

#[derive(Debug, Clone)]
pub struct PublishCommandArgs {
    pub message: Option<String>,
    pub pause: bool,
}

/// Prompts for a message unless one was given, runs the publish sequence and
/// then waits for acknowledgment. Once the sequence has started the pause
/// happens even if writing progress output failed.
pub async fn run<R: BufRead, W: Write>(
    ctx: &AppContext,
    args: PublishCommandArgs,
    input: &mut R,
    output: &mut W,
) -> AppResult<PublishReport> {
    // Fail on missing remotes before asking for a message.
    ctx.config.remotes()?;

    let raw = match args.message {
        Some(message) => message,
        None => read_message(&mut *input, &mut *output)?,
    };
    let message = CommitMessage::resolve(&raw, Local::now().naive_local());
    debug!(auto = message.is_auto(), "resolved commit message");

    let published = publish_changes(ctx, message, &mut *output).await;

    if args.pause {
        pause(&mut *input, &mut *output)?;
    }
    published
}

/// Prompts for one line and strips its line terminator. EOF reads as empty.
/// Bytes that are not valid UTF-8 are replaced rather than rejected.
pub fn read_message<R: BufRead, W: Write>(mut input: R, mut output: W) -> AppResult<String> {
    write!(output, "{MESSAGE_PROMPT}")?;
    output.flush()?;

    let mut line = Vec::new();
    input.read_until(b'\n', &mut line)?;
    while matches!(line.last(), Some(b'\n' | b'\r')) {
        line.pop();
    }
    Ok(String::from_utf8_lossy(&line).into_owned())
}

pub fn pause<R: BufRead, W: Write>(mut input: R, mut output: W) -> AppResult<()> {
    write!(output, "{PAUSE_PROMPT}")?;
    output.flush()?;

    let mut line = Vec::new();
    input.read_until(b'\n', &mut line)?;
    Ok(())
}
