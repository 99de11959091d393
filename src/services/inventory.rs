//! Catalog inventory service
//!
//! Holds the catalog in memory, in insertion order, and rewrites the whole
//! catalog file after every successful change.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::Span;

use crate::{
    error::{AppError, AppResult},
    models::book::Book,
    repository::catalog_file::{CatalogStore, JsonFileStore},
};

/// Four-space indentation, matching hand-edited catalog files
const INDENT: &[u8] = b"    ";

fn render_catalog(books: &[Book]) -> AppResult<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    books.serialize(&mut serializer)?;
    Ok(buf)
}

pub struct LibraryInventory<S = JsonFileStore> {
    catalog: Vec<Book>,
    store: S,
    span: Span,
}

impl LibraryInventory<JsonFileStore> {
    /// Open (or create) the catalog stored at `path`
    pub fn open(path: impl Into<PathBuf>) -> AppResult<Self> {
        Self::with_store(JsonFileStore::new(path))
    }

    pub fn path(&self) -> &Path {
        self.store.path()
    }
}

impl<S: CatalogStore> LibraryInventory<S> {
    /// Build an inventory over `store` and load whatever it holds.
    ///
    /// A missing catalog is created empty. A catalog that is not valid JSON is
    /// discarded and replaced by an empty one.
    pub fn with_store(store: S) -> AppResult<Self> {
        let span = tracing::info_span!("inventory", path = %store.location().display());
        let _guard = span.clone().entered();

        if let Err(e) = store.prepare() {
            tracing::error!(error = %e, "Failed to prepare catalog location");
            return Err(e);
        }

        let mut inventory = Self {
            catalog: Vec::new(),
            store,
            span,
        };
        inventory.load_from_file()?;
        Ok(inventory)
    }

    /// Add a book unless another one already carries its ISBN.
    ///
    /// Returns `Ok(false)` for a duplicate. The catalog is saved before
    /// returning `Ok(true)`; if saving fails the book is dropped again.
    pub fn add_book(&mut self, book: Book) -> AppResult<bool> {
        let _guard = self.span.enter();

        if self.catalog.iter().any(|existing| existing.isbn() == book.isbn()) {
            tracing::error!(isbn = %book.isbn(), "Duplicate ISBN: already exists");
            return Ok(false);
        }

        let title = book.title().to_string();
        let isbn = book.isbn().to_string();
        self.catalog.push(book);
        if let Err(e) = self.save_to_file() {
            self.catalog.pop();
            return Err(e);
        }

        tracing::info!(%title, %isbn, "Added new book");
        Ok(true)
    }

    /// Case-insensitive substring search on titles, in catalog order
    pub fn search_by_title(&self, query: &str) -> Vec<&Book> {
        let _guard = self.span.enter();

        let needle = query.to_lowercase();
        let matches: Vec<&Book> = self
            .catalog
            .iter()
            .filter(|book| book.title().to_lowercase().contains(&needle))
            .collect();

        tracing::info!(query, count = matches.len(), "Title search");
        matches
    }

    pub fn search_by_isbn(&self, isbn: &str) -> Option<&Book> {
        let _guard = self.span.enter();

        let found = self.catalog.iter().find(|book| book.isbn() == isbn);
        match found {
            Some(_) => tracing::info!(isbn, "Located book"),
            None => tracing::warn!(isbn, "No book found"),
        }
        found
    }

    pub fn display_all(&self) -> &[Book] {
        let _guard = self.span.enter();
        tracing::info!(count = self.catalog.len(), "Displaying all books");
        &self.catalog
    }

    /// Issue the book with this ISBN.
    ///
    /// `Ok(false)` when it is already out; `AppError::NotFound` when the ISBN is
    /// unknown.
    pub fn issue_book(&mut self, isbn: &str) -> AppResult<bool> {
        self.change_availability(isbn, Book::issue, Book::return_book, "issued")
    }

    /// Return the book with this ISBN. Mirror of [`Self::issue_book`].
    pub fn return_book(&mut self, isbn: &str) -> AppResult<bool> {
        self.change_availability(isbn, Book::return_book, Book::issue, "returned")
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    /// Rewrite the whole catalog file
    pub fn save_to_file(&self) -> AppResult<()> {
        let _guard = self.span.enter();

        let result = render_catalog(&self.catalog).and_then(|contents| self.store.write(&contents));
        match result {
            Ok(()) => {
                tracing::info!(count = self.catalog.len(), "Saved catalog");
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to save catalog");
                Err(e)
            }
        }
    }

    /// Replace the in-memory catalog with the stored one.
    ///
    /// Records that parse as JSON but are not books (a missing `isbn`, an object
    /// instead of a list) fail the load with `AppError::InvalidRecord` and leave
    /// the file as it is.
    pub fn load_from_file(&mut self) -> AppResult<()> {
        let _guard = self.span.enter();

        let contents = match self.store.read() {
            Ok(contents) => contents,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load catalog");
                return Err(e);
            }
        };

        let Some(contents) = contents else {
            self.catalog.clear();
            self.save_to_file()?;
            tracing::info!("Created new catalog file");
            return Ok(());
        };

        let document = match serde_json::from_str::<serde_json::Value>(&contents) {
            Ok(document) => document,
            Err(e) => {
                tracing::error!(error = %e, "Catalog file is corrupted, starting fresh");
                self.catalog.clear();
                return self.save_to_file();
            }
        };

        match serde_json::from_value::<Vec<Book>>(document) {
            Ok(books) => {
                self.catalog = books;
                tracing::info!(count = self.catalog.len(), "Loaded books");
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load catalog");
                Err(AppError::InvalidRecord(e.to_string()))
            }
        }
    }

    fn change_availability(
        &mut self,
        isbn: &str,
        apply: fn(&mut Book) -> bool,
        undo: fn(&mut Book) -> bool,
        verb: &str,
    ) -> AppResult<bool> {
        let _guard = self.span.enter();

        let Some(index) = self.catalog.iter().position(|book| book.isbn() == isbn) else {
            tracing::warn!(isbn, "No book found");
            return Err(AppError::NotFound(format!("No book with ISBN {}", isbn)));
        };

        if !apply(&mut self.catalog[index]) {
            tracing::warn!(isbn, "Book cannot be {}", verb);
            return Ok(false);
        }

        if let Err(e) = self.save_to_file() {
            undo(&mut self.catalog[index]);
            return Err(e);
        }

        tracing::info!(isbn, title = %self.catalog[index].title(), "Book {}", verb);
        Ok(true)
    }
}
