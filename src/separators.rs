use crate::error::ShellError;
use crate::tokenize::{Quote, QuoteScanner};

/// Operator that follows a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    /// `;`
    Sequence,
    /// `&&`
    And,
    End,
}

/// A trimmed piece of a line between control operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub separator: Separator,
}

/// Splits a line on unquoted `;` and `&&`.
///
/// Always returns at least one segment; empty pieces are kept so the caller
/// can treat them as no-ops.
pub fn split_separators(line: &str) -> Vec<Segment<'_>> {
    let line = line.trim();
    let mut segments = Vec::new();
    let mut start = 0;
    let mut scanner = QuoteScanner::new(line).peekable();

    while let Some((i, c, quote)) = scanner.next() {
        if quote != Quote::Outside {
            continue;
        }
        let (separator, width) = match c {
            ';' => (Separator::Sequence, 1),
            '&' if matches!(scanner.peek(), Some(&(_, '&', Quote::Outside))) => {
                scanner.next();
                (Separator::And, 2)
            }
            _ => continue,
        };
        segments.push(Segment {
            text: line[start..i].trim(),
            separator,
        });
        start = i + width;
    }

    segments.push(Segment {
        text: line[start..].trim(),
        separator: Separator::End,
    });
    segments
}

/// Result of looking for a pipe in one segment.
#[derive(Debug, PartialEq, Eq)]
pub enum PipeSplit<'a> {
    Single(&'a str),
    Pair(&'a str, &'a str),
}

/// Splits a segment on its unquoted `|`. Only one pipe is supported.
pub fn split_pipe(segment: &str) -> Result<PipeSplit<'_>, ShellError> {
    let mut pipes = QuoteScanner::new(segment)
        .filter(|&(_, c, quote)| c == '|' && quote == Quote::Outside)
        .map(|(i, _, _)| i);

    let Some(at) = pipes.next() else {
        return Ok(PipeSplit::Single(segment));
    };
    if pipes.next().is_some() {
        return Err(ShellError::Syntax("only one pipe is supported"));
    }

    let (left, right) = (segment[..at].trim(), segment[at + 1..].trim());
    if left.is_empty() || right.is_empty() {
        return Err(ShellError::Syntax("pipe is missing a command"));
    }
    Ok(PipeSplit::Pair(left, right))
}
