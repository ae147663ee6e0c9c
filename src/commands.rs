use std::env;
use std::io::Write;

use crate::error::ShellError;
use crate::history::History;

/// List of builtin commands
pub const BUILTINS: &[&str] = &["cd", "exit", "history"];

/// Commands handled inside the interpreter rather than spawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Cd,
    Exit,
    History,
}

impl Builtin {
    pub fn lookup(name: &str) -> Option<Self> {
        match name {
            "cd" => Some(Builtin::Cd),
            "exit" => Some(Builtin::Exit),
            "history" => Some(Builtin::History),
            _ => None,
        }
    }
}

/// Changes the interpreter's working directory to `args[1]`.
pub fn execute_cd(args: &[String]) -> Result<(), ShellError> {
    let dir = args
        .get(1)
        .ok_or_else(|| ShellError::InvalidCommand("cd: missing directory".to_string()))?;
    env::set_current_dir(dir)
        .map_err(|e| ShellError::InvalidCommand(format!("cd: {}: {}", dir, e)))?;
    log::debug!("changed directory to {}", dir);
    Ok(())
}

/// Writes `history` or `history N` output, one entry per line.
///
/// A count that does not parse is treated like `0` and prints everything.
pub fn execute_history(
    args: &[String],
    history: &History,
    out: &mut dyn Write,
) -> Result<(), ShellError> {
    let count = args
        .get(1)
        .map_or(0, |arg| arg.trim().parse::<i64>().unwrap_or(0));
    let write_err = |e: std::io::Error| ShellError::InvalidCommand(format!("history: {}", e));

    for entry in history.query(count) {
        writeln!(out, "{}", entry).map_err(write_err)?;
    }
    out.flush().map_err(write_err)
}

/// True for regular files with any execute bit set.
pub fn is_executable(metadata: &std::fs::Metadata) -> bool {
    #[cfg(unix)]
    use std::os::unix::fs::PermissionsExt;

    metadata.is_file() && {
        #[cfg(unix)]
        {
            metadata.permissions().mode() & 0o111 != 0
        }
        #[cfg(not(unix))]
        {
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn history_output(history: &History, argv: &[&str]) -> String {
        let mut out = Vec::new();
        execute_history(&args(argv), history, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_lookup() {
        assert_eq!(Builtin::lookup("cd"), Some(Builtin::Cd));
        assert_eq!(Builtin::lookup("history"), Some(Builtin::History));
        assert_eq!(Builtin::lookup("exit"), Some(Builtin::Exit));
        assert_eq!(Builtin::lookup("echo"), None);
    }

    #[test]
    fn test_cd_without_argument_fails() {
        assert!(matches!(
            execute_cd(&args(&["cd"])),
            Err(ShellError::InvalidCommand(_))
        ));
    }

    #[test]
    fn test_cd_to_missing_directory_fails() {
        let before = env::current_dir().unwrap();
        assert!(execute_cd(&args(&["cd", "/definitely/not/a/dir"])).is_err());
        assert_eq!(env::current_dir().unwrap(), before);
    }

    #[test]
    fn test_history_prints_all_or_last_n() {
        let mut history = History::default();
        for line in ["ls", "pwd", "history 2"] {
            history.append(line);
        }
        assert_eq!(history_output(&history, &["history"]), "ls\npwd\nhistory 2\n");
        assert_eq!(history_output(&history, &["history", "2"]), "pwd\nhistory 2\n");
        assert_eq!(history_output(&history, &["history", "0"]), "ls\npwd\nhistory 2\n");
        assert_eq!(history_output(&history, &["history", "9"]), "ls\npwd\nhistory 2\n");
        assert_eq!(history_output(&history, &["history", "abc"]), "ls\npwd\nhistory 2\n");
    }
}
