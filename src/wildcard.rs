use std::path::Path;

use glob::{MatchOptions, Pattern, glob_with};

use crate::tokenize::MAX_ARGS;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Returns true if the token would be treated as a glob pattern.
pub fn is_pattern(token: &str) -> bool {
    token.contains(['*', '?', '['])
}

/// Expands wildcard tokens against the current working directory.
pub fn expand(args: Vec<String>) -> Vec<String> {
    expand_in(args, Path::new("."))
}

/// Expands wildcard tokens against `base`.
///
/// A pattern that matches nothing, or does not parse, is kept as a literal
/// token. Output is capped at `MAX_ARGS`.
pub fn expand_in(args: Vec<String>, base: &Path) -> Vec<String> {
    let mut expanded = Vec::with_capacity(args.len());

    for arg in args {
        if !is_pattern(&arg) {
            expanded.push(arg);
        } else {
            let matches = matches_in(&arg, base);
            if matches.is_empty() {
                log::debug!("no match for pattern {:?}, keeping it literally", arg);
                expanded.push(arg);
            } else {
                expanded.extend(matches);
            }
        }
        if expanded.len() >= MAX_ARGS {
            expanded.truncate(MAX_ARGS);
            break;
        }
    }

    expanded
}

fn matches_in(pattern: &str, base: &Path) -> Vec<String> {
    // Anchoring under `.` is a no-op, and globbing the pattern as typed keeps
    // prefixes like `./` and `../` in the results.
    let anchor = if Path::new(pattern).is_absolute() || base == Path::new(".") {
        None
    } else {
        Some(format!("{}/", base.to_string_lossy().trim_end_matches('/')))
    };
    let anchored = match &anchor {
        Some(prefix) => format!("{}{}", Pattern::escape(prefix), pattern),
        None => pattern.to_string(),
    };

    let Ok(paths) = glob_with(&anchored, MATCH_OPTIONS) else {
        return Vec::new();
    };

    let mut found: Vec<String> = paths
        .flatten()
        .map(|path| {
            let path = path.to_string_lossy();
            match anchor.as_deref().and_then(|prefix| path.strip_prefix(prefix)) {
                Some(relative) => relative.to_string(),
                None => path.into_owned(),
            }
        })
        .collect();
    found.sort();
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::ScratchDir;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_plain_tokens_pass_through() {
        let dir = ScratchDir::new("plain");
        let args = strings(&["ls", "-l", "notes.txt"]);
        assert_eq!(expand_in(args.clone(), dir.path()), args);
    }

    #[test]
    fn test_pattern_expands_sorted_in_place() {
        let dir = ScratchDir::new("sorted");
        for name in ["c.txt", "a.txt", "b.txt", "readme.md"] {
            dir.touch(name);
        }
        let expanded = expand_in(strings(&["wc", "*.txt", "-l"]), dir.path());
        assert_eq!(expanded, strings(&["wc", "a.txt", "b.txt", "c.txt", "-l"]));
    }

    #[test]
    fn test_zero_matches_keep_the_literal_pattern() {
        let dir = ScratchDir::new("nomatch");
        dir.touch("a.txt");
        let expanded = expand_in(strings(&["ls", "*.rs", "x?z"]), dir.path());
        assert_eq!(expanded, strings(&["ls", "*.rs", "x?z"]));
    }

    #[test]
    fn test_question_mark_and_class() {
        let dir = ScratchDir::new("class");
        for name in ["f1", "f2", "f3", "g1"] {
            dir.touch(name);
        }
        assert_eq!(expand_in(strings(&["f?"]), dir.path()), strings(&["f1", "f2", "f3"]));
        assert_eq!(expand_in(strings(&["[fg]1"]), dir.path()), strings(&["f1", "g1"]));
    }

    #[test]
    fn test_hidden_files_need_a_literal_dot() {
        let dir = ScratchDir::new("hidden");
        dir.touch(".secret");
        dir.touch("shown");
        assert_eq!(expand_in(strings(&["*"]), dir.path()), strings(&["shown"]));
    }

    #[test]
    fn test_dot_slash_prefix_is_kept() {
        let dir = ScratchDir::new("dotslash");
        for name in ["run.sh", "b.sh", "notes.txt"] {
            dir.touch(name);
        }
        assert_eq!(
            expand_in(strings(&["./*.sh"]), dir.path()),
            strings(&["./b.sh", "./run.sh"])
        );
        assert_eq!(expand_in(strings(&["./r*.sh"]), dir.path()), strings(&["./run.sh"]));
    }

    #[test]
    fn test_parent_prefix_is_kept() {
        let dir = ScratchDir::new("parent");
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        dir.touch("top.md");
        let sub = dir.path().join("sub");
        assert_eq!(expand_in(strings(&["../*.md"]), &sub), strings(&["../top.md"]));
    }

    #[test]
    fn test_invalid_pattern_is_literal() {
        let dir = ScratchDir::new("invalid");
        assert_eq!(expand_in(strings(&["a["]), dir.path()), strings(&["a["]));
    }

    #[test]
    fn test_absolute_pattern_keeps_full_paths() {
        let dir = ScratchDir::new("absolute");
        dir.touch("one.log");
        let pattern = format!("{}/*.log", dir.path().display());
        let expected = format!("{}/one.log", dir.path().display());
        assert_eq!(expand_in(vec![pattern], Path::new(".")), vec![expected]);
    }
}
