use std::io;

use thiserror::Error;

/// Exit status of one segment. 0 means success.
pub type Status = i32;

/// Status reported when a program cannot be found or executed.
pub const EXEC_FAILURE: Status = 127;

/// Everything that can go wrong while running a single segment.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("syntax error: {0}")]
    Syntax(&'static str),
    #[error("cannot open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("cannot spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("cannot execute {program}: {source}")]
    Exec {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("redirection cannot be combined with a pipe")]
    InvalidCombination,
    #[error("{0}")]
    InvalidCommand(String),
}

impl ShellError {
    /// Maps a failed `spawn` to the right error kind.
    ///
    /// Only running out of processes or memory is a spawn failure. Anything
    /// else (missing file, no permission, bad executable format) means the
    /// program itself could not be executed.
    pub fn from_spawn(program: &str, source: io::Error) -> Self {
        let program = program.to_string();
        match source.kind() {
            io::ErrorKind::OutOfMemory | io::ErrorKind::WouldBlock => {
                ShellError::Spawn { program, source }
            }
            _ => ShellError::Exec { program, source },
        }
    }

    /// The segment status this error stands for.
    pub fn status(&self) -> Status {
        match self {
            ShellError::Exec { .. } => EXEC_FAILURE,
            _ => 1,
        }
    }
}

/// Logs the detailed cause and prints the one message users ever see.
pub fn report(err: &ShellError) {
    log::warn!("{}", err);
    eprintln!("Invalid Command");
}
