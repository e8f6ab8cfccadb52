//! Env type.
//!
//! Represents a parsed .env file as an ordered list of entries that keeps
//! comments and blank lines, so a file can be reconstructed after a round
//! trip through the store or an encrypted blob.

use serde::{Deserialize, Serialize};
#[cfg(unix)]
use std::io::Write;
use std::path::Path;
use tracing::trace;

use crate::error::{Error, Result};

/// A single line-level element of a .env file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entry {
    /// `KEY=value`, with surrounding quotes already stripped from the value.
    Pair { key: String, value: String },
    /// A full-line `# comment`, stored trimmed.
    Comment { text: String },
    /// The `# comment` suffix of the pair that follows it.
    InlineComment { text: String },
    /// An empty or whitespace-only line.
    Blank,
}

impl Entry {
    /// Build a key/value entry.
    pub fn pair(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Pair {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Build a full-line comment entry.
    pub fn comment(text: impl Into<String>) -> Self {
        Self::Comment { text: text.into() }
    }

    /// Build an inline comment entry.
    pub fn inline(text: impl Into<String>) -> Self {
        Self::InlineComment { text: text.into() }
    }

    /// The variable name, for pairs.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Pair { key, .. } => Some(key),
            _ => None,
        }
    }

    /// Whether this entry carries data rather than layout.
    pub fn is_pair(&self) -> bool {
        matches!(self, Self::Pair { .. })
    }
}

/// A parsed .env file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Env {
    entries: Vec<Entry>,
}

impl Env {
    /// Create an empty env.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from entries, kept in the given order.
    pub fn from_entries(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    /// Parse .env text.
    ///
    /// Never fails: lines without an `=` that are not comments or blank are
    /// dropped. A repeated key updates the value of its first occurrence.
    pub fn parse(text: &str) -> Self {
        let mut env = Self::new();

        for line in text.lines() {
            let trimmed = line.trim();

            if trimmed.is_empty() {
                env.entries.push(Entry::Blank);
                continue;
            }

            if trimmed.starts_with('#') {
                env.entries.push(Entry::comment(trimmed));
                continue;
            }

            let Some((key, rest)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            if key.is_empty() {
                continue;
            }

            let (raw, comment) = split_inline_comment(rest);
            if let Some(comment) = comment {
                env.entries.push(Entry::inline(comment.trim()));
            }
            env.set(key, unquote(raw.trim()));
        }

        trace!(entries = env.entries.len(), "parsed env");
        env
    }

    /// Read and parse an .env file from disk
    ///
    /// # Errors
    ///
    /// Returns `Error::EnvFile` naming the path if the file cannot be read
    /// or is not valid UTF-8.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| Error::EnvFile {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&contents))
    }

    /// Write the env file to disk
    ///
    /// Creates missing parent directories. On Unix the file is written
    /// with mode 0600.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = self.to_env_string();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

            let mut file = std::fs::OpenOptions::new()
                .create(true)
                .truncate(true)
                .write(true)
                .mode(0o600)
                .open(path)?;
            file.write_all(content.as_bytes())?;
            file.flush()?;

            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
        }

        #[cfg(not(unix))]
        {
            std::fs::write(path, content)?;
        }

        Ok(())
    }

    /// Set a value, keeping the position of an existing key.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        for entry in &mut self.entries {
            if let Entry::Pair { key: k, value: v } = entry {
                if k == key {
                    *v = value;
                    return;
                }
            }
        }
        self.entries.push(Entry::pair(key, value));
    }

    /// Append an entry as-is.
    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// Whether a key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Key/value pairs in file order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().filter_map(|entry| match entry {
            Entry::Pair { key, value } => Some((key.as_str(), value.as_str())),
            _ => None,
        })
    }

    /// All entries, including layout.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize to .env format string
    ///
    /// An inline comment is appended to the pair right after it; if no pair
    /// follows, it is written on its own line. Values are written raw when
    /// they hold no `#`, quote or surrounding whitespace. Otherwise the first
    /// of `"value"`, `'value'` or the raw value that parses back to the same
    /// value (and keeps a trailing comment separate) is used.
    pub fn to_env_string(&self) -> String {
        let mut lines: Vec<String> = Vec::with_capacity(self.entries.len());
        let mut pending: Option<&str> = None;

        for (i, entry) in self.entries.iter().enumerate() {
            match entry {
                Entry::Comment { text } => lines.push(text.clone()),
                Entry::Blank => lines.push(String::new()),
                Entry::InlineComment { text } => {
                    if self.entries.get(i + 1).is_some_and(Entry::is_pair) {
                        pending = Some(text);
                    } else {
                        lines.push(text.clone());
                    }
                }
                Entry::Pair { key, value } => {
                    let mut line = format!("{}={}", key, quote(value, pending.is_some()));
                    if let Some(comment) = pending.take() {
                        line.push(' ');
                        line.push_str(comment);
                    }
                    lines.push(line);
                }
            }
        }

        if lines.is_empty() {
            return String::new();
        }

        let mut output = lines.join("\n");
        output.push('\n');
        output
    }
}

impl std::fmt::Display for Env {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_env_string())
    }
}

/// Split the right-hand side of `KEY=...` at the first `#` outside quotes.
fn split_inline_comment(rest: &str) -> (&str, Option<&str>) {
    let mut quote: Option<char> = None;

    for (i, ch) in rest.char_indices() {
        match (quote, ch) {
            (None, '"' | '\'') => quote = Some(ch),
            (Some(q), c) if q == c => quote = None,
            (None, '#') => return (&rest[..i], Some(&rest[i..])),
            _ => {}
        }
    }

    (rest, None)
}

fn is_wrapped(value: &str, quote: char) -> bool {
    value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote)
}

fn unquote(raw: &str) -> String {
    if is_wrapped(raw, '"') || is_wrapped(raw, '\'') {
        return raw[1..raw.len() - 1].to_string();
    }
    raw.to_string()
}

fn needs_quotes(value: &str) -> bool {
    value.contains(['#', '"', '\'']) || value.trim() != value
}

/// Whether `written` parses back to `value`, with a following inline
/// comment still split off when `commented`.
fn round_trips(written: &str, value: &str, commented: bool) -> bool {
    let line = if commented {
        format!("{} #", written)
    } else {
        written.to_string()
    };

    let (raw, comment) = split_inline_comment(&line);
    comment.is_some() == commented && unquote(raw.trim()) == value
}

fn quote(value: &str, commented: bool) -> String {
    let raw = (!needs_quotes(value)).then(|| value.to_string());
    let candidates = raw
        .into_iter()
        .chain([format!("\"{}\"", value), format!("'{}'", value)]);

    for candidate in candidates {
        if round_trips(&candidate, value, commented) {
            return candidate;
        }
    }

    // only reachable for values built by hand, never for parsed ones
    value.to_string()
}
