//! Line-driven interactive session.
//!
//! Each input line is one user intent: click a station to select or avoid
//! it, or press one of the action buttons. Lines are turned into
//! [`InputEvent`]s and fed to an [`InteractionController`]; the terminal
//! presenter redraws after every accepted event.

use std::fmt;
use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use transitpath_lib::{
    ActionButton, Error as LibError, InputEvent, InteractionController, MapPlotter, Presenter,
    Snapshot, Transition,
};

use crate::output::{write_snapshot, OutputFormat};
use crate::terminal::ColorPalette;

/// Notice shown when compute-path finds nothing.
pub const NO_PATH_NOTICE: &str = "Sorry, no path was found.";

const HELP: &str = "\
commands:
  select <station>   choose a path endpoint (two at most)
  avoid <station>    mark a station the path must not pass through
  go                 compute the shortest path
  map                plot the computed path
  reset              clear the selection
  show               print the current selection
  help               print this help
  quit               end the session";

/// One parsed session line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Select(String),
    Avoid(String),
    Go,
    Map,
    Reset,
    Show,
    Help,
    Quit,
}

impl SessionCommand {
    /// Parse a line; blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (keyword, rest) = match line.split_once(char::is_whitespace) {
            Some((keyword, rest)) => (keyword, rest.trim()),
            None => (line, ""),
        };

        let command = match keyword.to_ascii_lowercase().as_str() {
            "select" | "pick" => SessionCommand::Select(station_argument(keyword, rest)?),
            "avoid" | "forbid" => SessionCommand::Avoid(station_argument(keyword, rest)?),
            "go" | "compute" => SessionCommand::Go,
            "map" | "view" => SessionCommand::Map,
            "reset" => SessionCommand::Reset,
            "show" => SessionCommand::Show,
            "help" | "?" => SessionCommand::Help,
            "quit" | "exit" => SessionCommand::Quit,
            _ => return Err(ParseError::UnknownCommand(keyword.to_string())),
        };
        Ok(Some(command))
    }

    /// Controller input this command maps to, if any.
    pub fn event(&self) -> Option<InputEvent> {
        match self {
            SessionCommand::Select(name) => Some(InputEvent::SelectStation(name.clone())),
            SessionCommand::Avoid(name) => Some(InputEvent::ForbidStation(name.clone())),
            SessionCommand::Go => Some(InputEvent::Press(ActionButton::ComputePath)),
            SessionCommand::Map => Some(InputEvent::Press(ActionButton::ViewOnMap)),
            SessionCommand::Reset => Some(InputEvent::Press(ActionButton::Reset)),
            SessionCommand::Show | SessionCommand::Help | SessionCommand::Quit => None,
        }
    }
}

fn station_argument(keyword: &str, rest: &str) -> Result<String, ParseError> {
    if rest.is_empty() {
        return Err(ParseError::MissingStation(keyword.to_ascii_lowercase()));
    }
    Ok(rest.to_string())
}

/// Why a session line could not be understood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    UnknownCommand(String),
    MissingStation(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnknownCommand(keyword) => {
                write!(f, "unknown command '{keyword}' (try 'help')")
            }
            ParseError::MissingStation(keyword) => write!(f, "'{keyword}' needs a station name"),
        }
    }
}

impl std::error::Error for ParseError {}

/// [`Presenter`] that redraws the selection on a terminal (or any writer).
pub struct TerminalPresenter<W: Write> {
    out: W,
    format: OutputFormat,
    palette: ColorPalette,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W, format: OutputFormat, palette: ColorPalette) -> Self {
        Self {
            out,
            format,
            palette,
        }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    /// Print a snapshot on demand (the `show` command).
    pub fn show(&mut self, snapshot: &Snapshot) -> Result<()> {
        write_snapshot(&mut self.out, snapshot, self.format, &self.palette)
    }

    /// Print a free-form line in text mode; JSON transcripts stay pure.
    pub fn notice(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Json {
            writeln!(self.out, "{message}")?;
        }
        Ok(())
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn present(&mut self, snapshot: &Snapshot) {
        if let Err(err) = self.show(snapshot) {
            warn!("failed to draw session state: {err:#}");
        }
    }

    fn no_path_found(&mut self, _snapshot: &Snapshot) {
        let line = format!(
            "{}{}{}",
            self.palette.forbidden, NO_PATH_NOTICE, self.palette.reset
        );
        if let Err(err) = self.notice(&line) {
            warn!("failed to draw notice: {err:#}");
        }
    }
}

/// Totals for a finished session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionReport {
    pub lines: usize,
    pub applied: usize,
    pub ignored: usize,
    pub rejected: usize,
}

/// Drive `controller` from `input` until end of input or `quit`.
///
/// Unknown commands and unknown stations are reported and skipped; any other
/// error ends the session.
pub fn run_session<R, W, M>(
    input: R,
    controller: &mut InteractionController<TerminalPresenter<W>, M>,
) -> Result<SessionReport>
where
    R: BufRead,
    W: Write,
    M: MapPlotter,
{
    let mut report = SessionReport::default();

    for line in input.lines() {
        let line = line.context("failed to read session input")?;
        report.lines += 1;

        let command = match SessionCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                report.rejected += 1;
                controller.presenter_mut().notice(&format!("error: {err}"))?;
                continue;
            }
        };
        debug!(?command, "session command");

        match command {
            SessionCommand::Quit => break,
            SessionCommand::Help => controller.presenter_mut().notice(HELP)?,
            SessionCommand::Show => {
                let snapshot = controller.snapshot();
                controller.presenter_mut().show(&snapshot)?;
            }
            _ => {
                let Some(event) = command.event() else {
                    continue;
                };
                match controller.handle_event(event) {
                    Ok(Transition::Applied { .. }) => report.applied += 1,
                    Ok(Transition::Unchanged) => {}
                    Ok(Transition::Ignored) => {
                        report.ignored += 1;
                        let message = format!(
                            "'{}' is not available while {}",
                            line.trim(),
                            controller.state()
                        );
                        controller.presenter_mut().notice(&message)?;
                    }
                    Err(err @ LibError::UnknownStation { .. }) => {
                        report.rejected += 1;
                        controller.presenter_mut().notice(&format!("error: {err}"))?;
                    }
                    Err(err) => return Err(err).context("session aborted"),
                }
            }
        }
    }

    Ok(report)
}
