//! File name exclusion list
//!
//! Every pattern is matched against the end of a file name: leading `*`s are
//! stripped and a single `*` is put back in front. So `logfile.log` matches
//! `logfile.log` and `old-logfile.log`, and `foo*` behaves like `*foo*`.
//! A pattern such as `abc*def` becomes `*abc*def` and matches any name ending
//! in `abc…def`. Runs of `*` collapse to one, as they would for `fnmatch`.

use glob::Pattern;

use crate::error::{CleanerError, Result};

/// Compiled set of exclusion patterns
#[derive(Debug, Clone, Default)]
pub struct ExcludeList {
    patterns: Vec<Pattern>,
}

impl ExcludeList {
    /// Compile the configured patterns, in order
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|raw| {
                let raw = raw.as_ref();
                let anchored = anchor(raw);
                Pattern::new(&anchored).map_err(|e| {
                    CleanerError::config(format!(
                        "invalid exclude pattern '{}': {} (patterns use glob syntax, \
                         a literal '[' must be written as '[[]')",
                        raw, e
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// True if the file name matches any pattern
    pub fn is_excluded(&self, file_name: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(file_name))
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }
}

/// Prefix with a single `*` and squeeze repeated stars
fn anchor(raw: &str) -> String {
    let mut anchored = String::with_capacity(raw.len() + 1);
    anchored.push('*');
    for c in raw.trim_start_matches('*').chars() {
        if c == '*' && anchored.ends_with('*') {
            continue;
        }
        anchored.push(c);
    }
    anchored
}
