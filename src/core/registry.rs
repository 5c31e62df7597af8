//! Ordered registry of source repositories collected from the operator.

use std::fmt;

/// A single name → URL pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Operator-chosen short name; doubles as the remote name and the
    /// subdirectory the source's files end up in.
    pub name: String,
    /// Location of the source repository (URL or local path).
    pub url: String,
}

/// Insertion-ordered mapping of unique repository names to URLs.
///
/// Built once during collection and immutable afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    entries: Vec<Entry>,
}

/// Rejected insert into the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertError {
    EmptyName,
    EmptyUrl,
    DuplicateName(String),
}

impl fmt::Display for InsertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "repository name must not be empty"),
            Self::EmptyUrl => write!(f, "repository URL must not be empty"),
            Self::DuplicateName(name) => {
                write!(f, "repository name '{name}' is already registered")
            }
        }
    }
}

impl std::error::Error for InsertError {}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pair, preserving insertion order.
    ///
    /// Both strings are trimmed; empty values and duplicate names are
    /// rejected without altering the registry.
    pub fn insert(&mut self, name: &str, url: &str) -> Result<(), InsertError> {
        let name = name.trim();
        let url = url.trim();
        if name.is_empty() {
            return Err(InsertError::EmptyName);
        }
        if url.is_empty() {
            return Err(InsertError::EmptyUrl);
        }
        if self.contains_name(name) {
            return Err(InsertError::DuplicateName(name.to_string()));
        }
        self.entries.push(Entry {
            name: name.to_string(),
            url: url.to_string(),
        });
        Ok(())
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry.name == name)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
