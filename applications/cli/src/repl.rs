//! Line-oriented chat loop
//!
//! Plain text is sent to the assistant; lines starting with `/` edit the
//! playlist or control the session. Positions are 1-based on screen.

use crate::assistant::{Outcome, PlaylistAssistant};
use crate::error::{AppError, Result};
use crate::render;
use mixtape_client::SuggestionApi;
use mixtape_core::PlaylistMetadata;
use std::io::{BufRead, Write};

pub const HELP: &str = "\
Type what you want to hear and press enter. Once there is a playlist,
further messages refine it.

  /show                 show the playlist
  /history              show the conversation
  /remove N             remove song N
  /move FROM TO         move song FROM to position TO
  /name TEXT            set the playlist name
  /description TEXT     set the playlist description
  /public on|off        make the playlist public or private
  /create               create the playlist on the music platform
  /reset                start a new playlist (the conversation is kept)
  /help                 show this help
  /quit                 leave";

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Message(String),
    Show,
    History,
    /// Zero-based index
    Remove(usize),
    /// Zero-based indices
    Move { from: usize, to: usize },
    Name(String),
    Description(String),
    Public(bool),
    Create,
    Reset,
    Help,
    Quit,
}

impl ReplCommand {
    /// Parse one input line; `Ok(None)` for a blank line
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let Some(rest) = line.strip_prefix('/') else {
            return Ok(Some(ReplCommand::Message(line.to_string())));
        };

        let (name, args) = match rest.split_once(char::is_whitespace) {
            Some((name, args)) => (name, args.trim()),
            None => (rest, ""),
        };

        let command = match name {
            "show" => ReplCommand::Show,
            "history" => ReplCommand::History,
            "remove" => ReplCommand::Remove(position(args)?),
            "move" => {
                let mut parts = args.split_whitespace();
                match (parts.next(), parts.next(), parts.next()) {
                    (Some(from), Some(to), None) => ReplCommand::Move {
                        from: position(from)?,
                        to: position(to)?,
                    },
                    _ => return Err(AppError::usage("usage: /move FROM TO")),
                }
            }
            "name" => ReplCommand::Name(required(args, "/name TEXT")?),
            "description" => ReplCommand::Description(args.to_string()),
            "public" => match args {
                "on" | "yes" | "true" => ReplCommand::Public(true),
                "off" | "no" | "false" => ReplCommand::Public(false),
                _ => return Err(AppError::usage("usage: /public on|off")),
            },
            "create" => ReplCommand::Create,
            "reset" => ReplCommand::Reset,
            "help" => ReplCommand::Help,
            "quit" | "exit" => ReplCommand::Quit,
            other => return Err(AppError::usage(format!("unknown command /{other}, try /help"))),
        };

        Ok(Some(command))
    }
}

/// 1-based position on screen to 0-based index
fn position(arg: &str) -> Result<usize> {
    arg.parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .ok_or_else(|| AppError::usage(format!("'{arg}' is not a song position (they start at 1)")))
}

fn required(arg: &str, usage: &str) -> Result<String> {
    if arg.is_empty() {
        Err(AppError::usage(format!("usage: {usage}")))
    } else {
        Ok(arg.to_string())
    }
}

/// Run the chat loop until `/quit` or end of input
pub async fn run<A, R, W>(assistant: &mut PlaylistAssistant<A>, input: R, mut out: W) -> Result<()>
where
    A: SuggestionApi,
    R: BufRead,
    W: Write,
{
    writeln!(out, "{HELP}\n")?;

    for line in input.lines() {
        let line = line?;
        let command = match ReplCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                writeln!(out, "{err}")?;
                continue;
            }
        };

        if command == ReplCommand::Quit {
            break;
        }
        execute(assistant, command, &mut out).await?;
    }

    Ok(())
}

async fn execute<A, W>(assistant: &mut PlaylistAssistant<A>, command: ReplCommand, out: &mut W) -> Result<()>
where
    A: SuggestionApi,
    W: Write,
{
    match command {
        ReplCommand::Message(text) => {
            let kind = if assistant.state().playlist().is_empty() {
                mixtape_session::SessionStatus::Generating
            } else {
                mixtape_session::SessionStatus::Refining
            };
            if let Some(status) = render::status(kind) {
                writeln!(out, "{status}")?;
            }
            let outcome = assistant.send_message(&text).await?;
            print_last_reply(assistant, out)?;
            if matches!(outcome, Outcome::Completed(_)) {
                write!(out, "{}", render::playlist(assistant.state()))?;
            }
        }
        ReplCommand::Show => write!(out, "{}", render::playlist(assistant.state()))?,
        ReplCommand::History => {
            for message in assistant.state().transcript() {
                writeln!(out, "{}", render::message(message))?;
            }
        }
        ReplCommand::Remove(index) => report(out, assistant.remove_song(index).map(|song| {
            format!("Removed {}", song.display_name())
        }))?,
        ReplCommand::Move { from, to } => report(
            out,
            assistant
                .move_song(from, to)
                .map(|()| format!("Moved song {} to position {}", from + 1, to + 1)),
        )?,
        ReplCommand::Name(name) => {
            let current = assistant.state().metadata().clone();
            assistant.set_metadata(PlaylistMetadata { name, ..current });
            writeln!(out, "Name set")?;
        }
        ReplCommand::Description(description) => {
            let current = assistant.state().metadata().clone();
            assistant.set_metadata(PlaylistMetadata { description, ..current });
            writeln!(out, "Description set")?;
        }
        ReplCommand::Public(is_public) => {
            let current = assistant.state().metadata().clone();
            assistant.set_metadata(PlaylistMetadata { is_public, ..current });
            writeln!(out, "Playlist will be {}", if is_public { "public" } else { "private" })?;
        }
        ReplCommand::Create => {
            if let Some(status) = render::status(mixtape_session::SessionStatus::Creating) {
                writeln!(out, "{status}")?;
            }
            match assistant.create_playlist().await? {
                Outcome::Ignored => writeln!(out, "Nothing to create yet")?,
                Outcome::Completed(response) => {
                    print_last_reply(assistant, out)?;
                    if !response.playlist_url.is_empty() {
                        writeln!(out, "{}", response.playlist_url)?;
                    }
                }
                Outcome::Failed(_) | Outcome::Stale => print_last_reply(assistant, out)?,
            }
        }
        ReplCommand::Reset => {
            assistant.reset();
            writeln!(out, "Playlist cleared")?;
        }
        ReplCommand::Help => writeln!(out, "{HELP}")?,
        ReplCommand::Quit => {}
    }

    Ok(())
}

fn print_last_reply<A: SuggestionApi, W: Write>(assistant: &PlaylistAssistant<A>, out: &mut W) -> Result<()> {
    if let Some(last) = assistant.state().transcript().last().filter(|m| !m.is_user()) {
        writeln!(out, "{}", render::message(last))?;
    }
    Ok(())
}

/// Print the success text, or the error for a rejected edit
fn report<W: Write>(out: &mut W, result: Result<String>) -> Result<()> {
    match result {
        Ok(text) => writeln!(out, "{text}")?,
        Err(err) => writeln!(out, "{err}")?,
    }
    Ok(())
}
