//! Book (catalog entry) model and related types.
//!
//! The serialized shape is the persisted catalog record: an object with the keys
//! `title`, `author`, `isbn` and `available`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Book availability as shown to readers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookStatus {
    Available,
    Issued,
}

impl BookStatus {
    /// Return the status token used in listings
    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Available => "AVAILABLE",
            BookStatus::Issued => "ISSUED",
        }
    }
}

impl From<bool> for BookStatus {
    fn from(available: bool) -> Self {
        if available {
            BookStatus::Available
        } else {
            BookStatus::Issued
        }
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn default_available() -> bool {
    true
}

/// A single catalog entry.
///
/// The ISBN is an opaque identifier: it is neither validated nor normalized, and it
/// cannot be changed once the book exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    title: String,
    author: String,
    isbn: String,
    #[serde(default = "default_available")]
    available: bool,
}

impl Book {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            isbn: isbn.into(),
            available: true,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn status(&self) -> BookStatus {
        BookStatus::from(self.available)
    }

    /// Mark the book as issued. Returns `false` and changes nothing if it is
    /// already out.
    pub fn issue(&mut self) -> bool {
        if !self.available {
            return false;
        }
        self.available = false;
        true
    }

    /// Mark the book as returned. Returns `false` and changes nothing if it was
    /// not issued.
    pub fn return_book(&mut self) -> bool {
        if self.available {
            return false;
        }
        self.available = true;
        true
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\"{}\" by {} | ISBN: {} | Status: {}",
            self.title,
            self.author,
            self.isbn,
            self.status()
        )
    }
}
