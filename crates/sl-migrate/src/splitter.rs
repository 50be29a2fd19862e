//! Delimiter-aware splitting of SQL scripts into statements.

/// Lines starting with this prefix are comments.
const SQL_COMMENT_PREFIX: &str = "--";

/// Splits a script on a statement delimiter (default `^`).
///
/// A single delimiter ends a statement. A doubled delimiter is an escape and
/// becomes one literal delimiter in the statement text, so `A^^B^C` splits into
/// `A^B` and `C`. Trailing empty pieces are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptSplitter {
    delimiter: String,
}

impl Default for ScriptSplitter {
    fn default() -> Self {
        Self::new("^")
    }
}

impl ScriptSplitter {
    /// Create a splitter for the given delimiter
    pub fn new(delimiter: impl Into<String>) -> Self {
        Self {
            delimiter: delimiter.into(),
        }
    }

    /// Split `script` into statements
    pub fn split(&self, script: &str) -> Vec<String> {
        let delim = self.delimiter.as_str();
        if delim.is_empty() {
            return vec![script.to_string()];
        }

        let doubled = delim.repeat(2);
        let mut pieces = Vec::new();
        let mut start = 0;
        let mut pos = 0;

        while pos < script.len() {
            let rest = &script[pos..];
            if rest.starts_with(delim)
                && !script[..pos].ends_with(delim)
                && !script[pos + delim.len()..].starts_with(delim)
            {
                pieces.push(script[start..pos].replace(&doubled, delim));
                pos += delim.len();
                start = pos;
            } else {
                pos += rest.chars().next().map_or(1, char::len_utf8);
            }
        }
        pieces.push(script[start..].replace(&doubled, delim));

        while pieces.last().is_some_and(|p| p.is_empty()) {
            pieces.pop();
        }
        pieces
    }
}

/// Collapse every run of `\r`/`\n` characters into a single `\n`.
pub fn normalize_line_breaks(script: &str) -> String {
    let mut out = String::with_capacity(script.len());
    let mut in_break = false;
    for c in script.chars() {
        if c == '\r' || c == '\n' {
            if !in_break {
                out.push('\n');
                in_break = true;
            }
        } else {
            out.push(c);
            in_break = false;
        }
    }
    out
}

/// True when a statement has nothing but blank lines and `--` comments
pub fn is_empty_statement(sql: &str) -> bool {
    sql.lines()
        .map(str::trim)
        .all(|line| line.is_empty() || line.starts_with(SQL_COMMENT_PREFIX))
}

#[cfg(test)]
#[path = "splitter_test.rs"]
mod tests;
