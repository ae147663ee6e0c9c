use std::str::CharIndices;

/// Upper bound on the number of arguments a single command may carry.
pub const MAX_ARGS: usize = 100;

/// Quote state of a scanned character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    Outside,
    Inside,
    /// The `"` itself.
    Delimiter,
}

/// Walks a line yielding `(byte offset, char, quote state)`.
///
/// Every component that has to tell literal text from operators goes through
/// this so that quoting is treated the same way everywhere.
pub struct QuoteScanner<'a> {
    chars: CharIndices<'a>,
    quoted: bool,
}

impl<'a> QuoteScanner<'a> {
    pub fn new(line: &'a str) -> Self {
        Self {
            chars: line.char_indices(),
            quoted: false,
        }
    }
}

impl Iterator for QuoteScanner<'_> {
    type Item = (usize, char, Quote);

    fn next(&mut self) -> Option<Self::Item> {
        let (i, c) = self.chars.next()?;
        if c == '"' {
            self.quoted = !self.quoted;
            return Some((i, c, Quote::Delimiter));
        }
        let state = if self.quoted { Quote::Inside } else { Quote::Outside };
        Some((i, c, state))
    }
}

/// Tokenizes shell input into a vector of strings.
/// Double quotes group whitespace and are stripped; an unterminated quote runs
/// to the end of the line. Input past `MAX_ARGS` tokens is dropped.
pub fn tokenize(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;

    for (_, c, quote) in QuoteScanner::new(input) {
        match quote {
            Quote::Delimiter => in_token = true,
            Quote::Outside if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                    if tokens.len() == MAX_ARGS {
                        return tokens;
                    }
                }
            }
            _ => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if in_token {
        tokens.push(current);
    }

    tokens
}
