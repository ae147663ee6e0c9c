use rustyline::Helper;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use std::env;

use crate::commands::{self, BUILTINS};

/// Shell completer for tab completion.
#[derive(Default)]
pub struct ShellCompleter;

impl Completer for ShellCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> Result<(usize, Vec<Self::Candidate>), ReadlineError> {
        let (start, word) = extract_word(line, pos);
        let is_first_word = line[..pos].split_whitespace().count() <= 1;

        let mut candidates = if is_first_word && !word.contains('/') {
            command_candidates(&word)
        } else {
            file_candidates(&word)
        };

        candidates.sort_by(|a, b| a.display.cmp(&b.display));
        candidates.dedup_by(|a, b| a.display == b.display);
        Ok((start, candidates))
    }
}

/// Builtins and executables on PATH starting with `word`.
fn command_candidates(word: &str) -> Vec<Pair> {
    let mut candidates: Vec<Pair> = BUILTINS
        .iter()
        .filter(|b| b.starts_with(word))
        .map(|builtin| Pair {
            display: builtin.to_string(),
            replacement: format!("{} ", builtin),
        })
        .collect();

    if let Some(path) = env::var_os("PATH") {
        for dir in env::split_paths(&path) {
            let Ok(entries) = std::fs::read_dir(dir) else {
                continue;
            };
            entries
                .flatten()
                .filter(|e| e.file_name().to_str().is_some_and(|n| n.starts_with(word)))
                .filter(|e| std::fs::metadata(e.path()).is_ok_and(|m| commands::is_executable(&m)))
                .filter_map(|e| e.file_name().into_string().ok())
                .for_each(|name| {
                    candidates.push(Pair {
                        display: name.clone(),
                        replacement: format!("{} ", name),
                    });
                });
        }
    }
    candidates
}

/// Paths in the working directory matching `word*`.
fn file_candidates(word: &str) -> Vec<Pair> {
    let pattern = format!("{}*", glob::Pattern::escape(word));
    let Ok(paths) = glob::glob(&pattern) else {
        return Vec::new();
    };
    paths
        .flatten()
        .map(|path| {
            let mut name = path.to_string_lossy().into_owned();
            if path.is_dir() {
                name.push('/');
            }
            Pair {
                display: name.clone(),
                replacement: name,
            }
        })
        .collect()
}

fn extract_word(line: &str, pos: usize) -> (usize, String) {
    let before = &line[..pos];
    let start = before.rfind(|c: char| c.is_whitespace()).map_or(0, |i| i + 1);
    (start, line[start..pos].to_string())
}

impl Helper for ShellCompleter {}
impl Hinter for ShellCompleter {
    type Hint = String;
}
impl Highlighter for ShellCompleter {}
impl Validator for ShellCompleter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_word() {
        assert_eq!(extract_word("ls src/ma", 9), (3, "src/ma".to_string()));
        assert_eq!(extract_word("hist", 4), (0, "hist".to_string()));
        assert_eq!(extract_word("cat ", 4), (4, String::new()));
    }

    #[test]
    fn test_builtins_complete_first_word() {
        let names: Vec<String> = command_candidates("hist").into_iter().map(|p| p.display).collect();
        assert!(names.contains(&"history".to_string()));
    }

    #[test]
    fn test_file_candidates_match_prefix() {
        let dir = crate::testutil::ScratchDir::new("complete");
        dir.touch("alpha.txt");
        dir.touch("beta.txt");
        let prefix = format!("{}/al", dir.path().display());
        let names: Vec<String> = file_candidates(&prefix).into_iter().map(|p| p.display).collect();
        assert_eq!(names, vec![format!("{}/alpha.txt", dir.path().display())]);
    }
}
