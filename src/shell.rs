use std::io;
use std::ops::ControlFlow;

use crate::commands::{self, Builtin};
use crate::config::Config;
use crate::error::{self, ShellError, Status};
use crate::exec;
use crate::history::History;
use crate::line_source::LineSource;
use crate::redirection::{self, ParsedCommand};
use crate::separators::{self, PipeSplit, Segment, Separator};
use crate::tokenize::tokenize;
use crate::wildcard;

/// Walks segments left to right, skipping the rest of an `&&` chain once a
/// segment in it fails.
///
/// `run` returns `Break` to stop the walk entirely (the `exit` built-in).
pub fn sequence<F>(segments: &[Segment<'_>], mut run: F) -> ControlFlow<()>
where
    F: FnMut(&str) -> ControlFlow<(), Status>,
{
    let mut i = 0;

    while i < segments.len() {
        let segment = segments[i];
        i += 1;
        if segment.text.is_empty() {
            continue;
        }

        let status = run(segment.text)?;

        if segment.separator == Separator::And && status != 0 {
            while i < segments.len() && segments[i - 1].separator == Separator::And {
                log::debug!("skipping {:?} after failed &&", segments[i].text);
                i += 1;
            }
        }
    }

    ControlFlow::Continue(())
}

/// The interpreter: owns the history and drives the read loop.
pub struct Shell {
    prompt: String,
    history: History,
}

impl Shell {
    pub fn new(config: &Config) -> Self {
        Self {
            prompt: config.prompt.clone(),
            history: History::new(config.history_size),
        }
    }

    /// Reads and runs lines until end of input or `exit`.
    pub fn run(&mut self, source: &mut dyn LineSource) {
        loop {
            let line = match source.read_line(&self.prompt) {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => {
                    log::error!("reading input failed: {:#}", e);
                    break;
                }
            };
            if self.run_line(&line).is_break() {
                break;
            }
        }
        log::info!("leaving with {} history entries", self.history.len());
    }

    /// Records a line in the history and runs it.
    pub fn run_line(&mut self, line: &str) -> ControlFlow<()> {
        let line = line.trim();
        if line.is_empty() {
            return ControlFlow::Continue(());
        }
        self.history.append(line);

        let segments = separators::split_separators(line);
        sequence(&segments, |text| self.run_segment(text))
    }

    fn run_segment(&mut self, text: &str) -> ControlFlow<(), Status> {
        log::debug!("running segment {:?}", text);
        let result = match separators::split_pipe(text) {
            Ok(PipeSplit::Single(command)) => redirection::parse_command(tokenize(command))
                .and_then(|parsed| self.run_simple(parsed)),
            Ok(PipeSplit::Pair(left, right)) => run_pipe(left, right).map(ControlFlow::Continue),
            Err(e) => Err(e),
        };

        match result {
            Ok(flow) => flow,
            Err(e) => {
                error::report(&e);
                ControlFlow::Continue(e.status())
            }
        }
    }

    fn run_simple(&mut self, parsed: ParsedCommand) -> Result<ControlFlow<(), Status>, ShellError> {
        let Some(name) = parsed.args.first() else {
            return Ok(ControlFlow::Continue(0));
        };

        match Builtin::lookup(name) {
            Some(Builtin::Exit) => {
                log::info!("exit requested");
                return Ok(ControlFlow::Break(()));
            }
            Some(Builtin::Cd) => commands::execute_cd(&parsed.args)?,
            Some(Builtin::History) => match parsed.redirections.output {
                Some(mut file) => commands::execute_history(&parsed.args, &self.history, &mut file)?,
                None => {
                    let mut stdout = io::stdout().lock();
                    commands::execute_history(&parsed.args, &self.history, &mut stdout)?;
                }
            },
            None => {
                let status = exec::run_command(&parsed.args, parsed.redirections)?;
                return Ok(ControlFlow::Continue(status));
            }
        }
        Ok(ControlFlow::Continue(0))
    }
}

/// Tokenizes and expands both sides of a pipe and runs them.
fn run_pipe(left: &str, right: &str) -> Result<Status, ShellError> {
    let (left, right) = (tokenize(left), tokenize(right));
    if left.iter().chain(&right).any(|t| redirection::is_operator(t)) {
        return Err(ShellError::InvalidCombination);
    }
    exec::run_pipeline(&wildcard::expand(left), &wildcard::expand(right))
}
