//! Blog entries and the search predicate applied to them.
//!
//! Entries are immutable once stored; the only lifecycle transition is
//! deletion. Listing order is reverse creation order, which is the same as
//! descending [`EntryId`] because ids are assigned monotonically.

use serde::{Deserialize, Serialize};

/// Server-assigned entry identifier.
///
/// ## Invariants
/// - Strictly positive; assigned by the store, never reused while the entry
///   exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(i32);

impl EntryId {
    /// Wrap a raw identifier.
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Raw integer value as stored.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored blog entry.
///
/// `title` is plain text and must be escaped when rendered. `text` may carry
/// inline markup written by the author and is rendered verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    id: EntryId,
    title: String,
    text: String,
}

impl Entry {
    /// Assemble an entry from stored values.
    pub fn new(id: EntryId, title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            text: text.into(),
        }
    }

    /// Identifier assigned by the store.
    pub fn id(&self) -> EntryId {
        self.id
    }

    /// Entry title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Entry body.
    pub fn text(&self) -> &str {
        self.text.as_str()
    }
}

/// Validation errors raised while building an [`EntryDraft`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntryValidationError {
    /// The title was empty or whitespace.
    #[error("title must not be empty")]
    EmptyTitle,
}

/// Validated input for a new entry.
///
/// # Examples
/// ```
/// use flaskr::domain::EntryDraft;
///
/// let draft = EntryDraft::new("<Hello>", "<strong>HTML</strong> allowed here").unwrap();
/// assert_eq!(draft.title(), "<Hello>");
/// assert!(EntryDraft::new("   ", "body").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDraft {
    title: String,
    text: String,
}

impl EntryDraft {
    /// Validate raw form input. The title is stored as submitted.
    pub fn new(
        title: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<Self, EntryValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(EntryValidationError::EmptyTitle);
        }
        Ok(Self {
            title,
            text: text.into(),
        })
    }

    /// Draft title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Draft body.
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Turn the draft into an entry once the store has assigned an id.
    pub fn into_entry(self, id: EntryId) -> Entry {
        Entry::new(id, self.title, self.text)
    }
}

/// Case-insensitive substring filter over entry titles and texts.
///
/// A query is only constructed from non-blank input; [`SearchQuery::parse`]
/// returns `None` for a missing or blank parameter, which callers treat as
/// "nothing to search for".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    needle: String,
    folded: String,
}

impl SearchQuery {
    /// Parse an optional raw query parameter.
    ///
    /// # Examples
    /// ```
    /// use flaskr::domain::SearchQuery;
    ///
    /// assert!(SearchQuery::parse(None).is_none());
    /// assert!(SearchQuery::parse(Some("  ")).is_none());
    /// assert_eq!(SearchQuery::parse(Some(" Example ")).unwrap().as_str(), "Example");
    /// ```
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        let needle = raw?.trim();
        if needle.is_empty() {
            return None;
        }
        Some(Self {
            needle: needle.to_owned(),
            folded: needle.to_lowercase(),
        })
    }

    /// Trimmed query text as the user typed it.
    pub fn as_str(&self) -> &str {
        self.needle.as_str()
    }

    /// Whether `entry` contains the query in its title or text, ignoring case.
    pub fn matches(&self, entry: &Entry) -> bool {
        entry.title().to_lowercase().contains(&self.folded)
            || entry.text().to_lowercase().contains(&self.folded)
    }
}
