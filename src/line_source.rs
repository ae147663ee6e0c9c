use std::io::BufRead;

use anyhow::Context;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;

use crate::completion::ShellCompleter;

/// Something that hands the shell one finished line at a time.
pub trait LineSource {
    /// Returns `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> anyhow::Result<Option<String>>;
}

/// Interactive terminal input with line editing and tab completion.
pub struct EditorSource {
    editor: Editor<ShellCompleter, DefaultHistory>,
}

impl EditorSource {
    pub fn new() -> anyhow::Result<Self> {
        let mut editor = Editor::new().context("creating line editor")?;
        editor.set_helper(Some(ShellCompleter));
        Ok(Self { editor })
    }
}

impl LineSource for EditorSource {
    fn read_line(&mut self, prompt: &str) -> anyhow::Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    // Only feeds arrow-key recall; the shell keeps its own history.
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) => Ok(Some(String::new())),
            Err(ReadlineError::Eof) => Ok(None),
            Err(e) => Err(e).context("reading line"),
        }
    }
}

/// Plain line reader for piped or redirected input. Prints no prompt.
pub struct ReaderSource<R> {
    reader: R,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for ReaderSource<R> {
    fn read_line(&mut self, _prompt: &str) -> anyhow::Result<Option<String>> {
        let mut line = String::new();
        let read = self.reader.read_line(&mut line).context("reading stdin")?;
        if read == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}
