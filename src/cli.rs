//! Command-line surface: argument parsing and command execution

use crate::{
    error::{AppError, AppResult},
    models::book::Book,
    repository::catalog_file::CatalogStore,
    services::inventory::LibraryInventory,
};

pub const USAGE: &str = "\
Usage: library-inventory <command>

Commands:
  list                          Show every book in the catalog
  add <title> <author> <isbn>   Add a book
  search-title <query>          Find books whose title contains <query>
  search-isbn <isbn>            Find the book with this ISBN
  issue <isbn>                  Issue a book
  return <isbn>                 Return an issued book
  help                          Show this message

The catalog path comes from config/default.toml, LIBRARY_CATALOG_PATH or CATALOG_PATH.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Add { title: String, author: String, isbn: String },
    SearchTitle(String),
    SearchIsbn(String),
    Issue(String),
    Return(String),
    Help,
}

impl Command {
    /// Parse the arguments that follow the program name
    pub fn parse<I>(args: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let Some(name) = args.next() else {
            return Ok(Command::Help);
        };
        let rest: Vec<String> = args.collect();

        let command = match (name.as_str(), rest.as_slice()) {
            ("list", []) => Command::List,
            ("add", [title, author, isbn]) => Command::Add {
                title: title.clone(),
                author: author.clone(),
                isbn: isbn.clone(),
            },
            ("search-title", [query]) => Command::SearchTitle(query.clone()),
            ("search-isbn", [isbn]) => Command::SearchIsbn(isbn.clone()),
            ("issue", [isbn]) => Command::Issue(isbn.clone()),
            ("return", [isbn]) => Command::Return(isbn.clone()),
            ("help" | "-h" | "--help", _) => Command::Help,
            ("list" | "add" | "search-title" | "search-isbn" | "issue" | "return", _) => {
                return Err(AppError::BadRequest(format!(
                    "wrong number of arguments for '{}'",
                    name
                )))
            }
            _ => return Err(AppError::BadRequest(format!("unknown command '{}'", name))),
        };
        Ok(command)
    }
}

/// Run `command` against `inventory` and return the lines to print
pub fn execute<S: CatalogStore>(
    inventory: &mut LibraryInventory<S>,
    command: Command,
) -> AppResult<Vec<String>> {
    let lines = match command {
        Command::List => {
            let books = inventory.display_all();
            if books.is_empty() {
                vec!["The catalog is empty.".to_string()]
            } else {
                books.iter().map(Book::to_string).collect()
            }
        }
        Command::Add { title, author, isbn } => {
            let book = Book::new(title, author, isbn);
            let line = book.to_string();
            if inventory.add_book(book.clone())? {
                vec![format!("Added: {}", line)]
            } else {
                vec![format!("A book with ISBN {} already exists.", book.isbn())]
            }
        }
        Command::SearchTitle(query) => {
            let matches = inventory.search_by_title(&query);
            if matches.is_empty() {
                vec![format!("No books match \"{}\".", query)]
            } else {
                matches.into_iter().map(Book::to_string).collect()
            }
        }
        Command::SearchIsbn(isbn) => match inventory.search_by_isbn(&isbn) {
            Some(book) => vec![book.to_string()],
            None => vec![format!("No book found with ISBN {}.", isbn)],
        },
        Command::Issue(isbn) => {
            let issued = inventory.issue_book(&isbn)?;
            availability_report(inventory, &isbn, issued, "Issued", "is already issued")
        }
        Command::Return(isbn) => {
            let returned = inventory.return_book(&isbn)?;
            availability_report(inventory, &isbn, returned, "Returned", "is not issued")
        }
        Command::Help => USAGE.lines().map(String::from).collect(),
    };
    Ok(lines)
}

fn availability_report<S: CatalogStore>(
    inventory: &LibraryInventory<S>,
    isbn: &str,
    changed: bool,
    done: &str,
    refused: &str,
) -> Vec<String> {
    match inventory.search_by_isbn(isbn) {
        Some(book) if changed => vec![format!("{}: {}", done, book)],
        Some(book) => vec![format!("\"{}\" {}.", book.title(), refused)],
        None => Vec::new(),
    }
}
