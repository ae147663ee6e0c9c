use std::fs::{File, OpenOptions};
#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

use crate::error::ShellError;
use crate::wildcard;

/// Files a command's standard streams are rebound to.
#[derive(Debug, Default)]
pub struct Redirections {
    pub input: Option<File>,
    pub output: Option<File>,
    /// Informational only: `output` was already opened in append mode.
    pub append: bool,
}

/// A parsed command with arguments and redirections.
#[derive(Debug, Default)]
pub struct ParsedCommand {
    pub args: Vec<String>,
    pub redirections: Redirections,
}

/// Returns true for the bare `<`, `>` and `>>` operators.
pub fn is_operator(token: &str) -> bool {
    matches!(token, "<" | ">" | ">>")
}

/// Parses tokens into a ParsedCommand, opening the redirection targets.
///
/// A repeated direction replaces the earlier file, which is closed on the
/// spot. The remaining arguments go through wildcard expansion.
pub fn parse_command(tokens: Vec<String>) -> Result<ParsedCommand, ShellError> {
    let mut args = Vec::new();
    let mut redirections = Redirections::default();
    let mut tokens = tokens.into_iter();

    while let Some(token) = tokens.next() {
        match token.as_str() {
            "<" => {
                let target = tokens
                    .next()
                    .ok_or(ShellError::Syntax("missing input file after `<`"))?;
                redirections.input = Some(open_input(&target)?);
            }
            ">" | ">>" => {
                let append = token == ">>";
                let target = tokens
                    .next()
                    .ok_or(ShellError::Syntax("missing output file after `>`"))?;
                redirections.output = Some(open_output(&target, append)?);
                redirections.append = append;
            }
            _ => args.push(token),
        }
    }

    Ok(ParsedCommand {
        args: wildcard::expand(args),
        redirections,
    })
}

fn open_input(path: &str) -> Result<File, ShellError> {
    File::open(path).map_err(|source| ShellError::Open {
        path: path.to_string(),
        source,
    })
}

fn open_output(path: &str, append: bool) -> Result<File, ShellError> {
    let mut options = OpenOptions::new();
    options.write(true).create(true);
    if append {
        options.append(true);
    } else {
        options.truncate(true);
    }
    #[cfg(unix)]
    options.mode(0o644);

    options.open(path).map_err(|source| ShellError::Open {
        path: path.to_string(),
        source,
    })
}
