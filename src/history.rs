use std::collections::VecDeque;

/// Number of lines kept when no size is configured.
pub const DEFAULT_CAPACITY: usize = 2048;

/// Bounded, append-only record of submitted command lines.
#[derive(Debug)]
pub struct History {
    entries: VecDeque<String>,
    capacity: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity.min(DEFAULT_CAPACITY)),
            capacity,
        }
    }

    /// Records a line, evicting the oldest entry when full. Empty lines are ignored.
    pub fn append(&mut self, line: &str) {
        if line.is_empty() {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(line.to_string());
    }

    /// The last `n` entries, oldest first. `n <= 0` or `n` past the stored
    /// count returns everything.
    pub fn query(&self, n: i64) -> impl Iterator<Item = &str> {
        let len = self.entries.len();
        let skip = match usize::try_from(n) {
            Ok(n) if n > 0 && n <= len => len - n,
            _ => 0,
        };
        self.entries.iter().skip(skip).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
