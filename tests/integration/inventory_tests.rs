//! Inventory behaviour over the JSON file store

use std::fs;

use library_inventory::{AppError, Book, LibraryInventory};
use serde_json::{json, Value};

use crate::common::ScratchDir;

fn read_json(path: &std::path::Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).expect("catalog file")).expect("valid JSON")
}

#[test]
fn test_open_creates_directory_and_empty_catalog() {
    let dir = ScratchDir::new();
    let path = dir.join("data/nested/books.json");

    let inventory = LibraryInventory::open(&path).unwrap();

    assert!(inventory.is_empty());
    assert_eq!(inventory.path(), path.as_path());
    assert_eq!(read_json(&path), json!([]));
}

#[test]
fn test_open_tolerates_existing_directory() {
    let dir = ScratchDir::new();
    fs::create_dir_all(dir.join("data")).unwrap();

    let inventory = LibraryInventory::open(dir.join("data/books.json")).unwrap();
    assert!(inventory.display_all().is_empty());
}

#[test]
fn test_inventory_add_duplicate_isbn() {
    let dir = ScratchDir::new();
    let path = dir.join("test.json");
    let mut inv = LibraryInventory::open(&path).unwrap();

    assert!(inv.add_book(Book::new("Test 1", "Auth", "0000")).unwrap());
    assert!(!inv.add_book(Book::new("Test 2", "Auth2", "0000")).unwrap());
    assert_eq!(inv.display_all().len(), 1);
    assert_eq!(inv.display_all()[0].title(), "Test 1");

    // The file holds only the first book
    assert_eq!(
        read_json(&path),
        json!([{ "title": "Test 1", "author": "Auth", "isbn": "0000", "available": true }])
    );
}

#[test]
fn test_inventory_search() {
    let dir = ScratchDir::new();
    let mut inv = LibraryInventory::open(dir.join("test.json")).unwrap();
    inv.add_book(Book::new("Python Basics", "A. Codemaker", "1111")).unwrap();
    inv.add_book(Book::new("Advanced Python", "B. Codemaker", "2222")).unwrap();
    inv.add_book(Book::new("Rust in Action", "C. Codemaker", "3333")).unwrap();

    let titles: Vec<&str> =
        inv.search_by_title("python").into_iter().map(|b| b.title()).collect();
    assert_eq!(titles, vec!["Python Basics", "Advanced Python"]);

    assert_eq!(inv.search_by_title("").len(), 3);
    assert!(inv.search_by_title("haskell").is_empty());

    let isbn_result = inv.search_by_isbn("1111").expect("book 1111");
    assert_eq!(isbn_result.title(), "Python Basics");
    assert!(inv.search_by_isbn("9999").is_none());
}

#[test]
fn test_catalog_round_trip() {
    let dir = ScratchDir::new();
    let path = dir.join("books.json");
    {
        let mut inv = LibraryInventory::open(&path).unwrap();
        inv.add_book(Book::new("Dune", "Frank Herbert", "1")).unwrap();
        inv.add_book(Book::new("Emma", "Jane Austen", "2")).unwrap();
        inv.add_book(Book::new("Ulysses", "James Joyce", "3")).unwrap();
        assert!(inv.issue_book("2").unwrap());
    }

    let reopened = LibraryInventory::open(&path).unwrap();
    let books = reopened.display_all();
    let isbns: Vec<&str> = books.iter().map(|b| b.isbn()).collect();
    assert_eq!(isbns, vec!["1", "2", "3"]);
    assert!(books[0].is_available());
    assert!(!books[1].is_available());
    assert!(books[2].is_available());
    assert_eq!(books[1].author(), "Jane Austen");
}

#[test]
fn test_issue_and_return_persist() {
    let dir = ScratchDir::new();
    let path = dir.join("books.json");
    let mut inv = LibraryInventory::open(&path).unwrap();
    inv.add_book(Book::new("Dune", "Frank Herbert", "1")).unwrap();

    assert!(inv.issue_book("1").unwrap());
    assert!(!inv.issue_book("1").unwrap());
    assert_eq!(read_json(&path)[0]["available"], json!(false));

    assert!(inv.return_book("1").unwrap());
    assert!(!inv.return_book("1").unwrap());
    assert_eq!(read_json(&path)[0]["available"], json!(true));

    assert!(matches!(inv.issue_book("404"), Err(AppError::NotFound(_))));
}

#[test]
fn test_refused_transition_does_not_rewrite() {
    let dir = ScratchDir::new();
    let path = dir.join("books.json");
    let mut inv = LibraryInventory::open(&path).unwrap();
    inv.add_book(Book::new("Dune", "Frank Herbert", "1")).unwrap();

    // Replace the file behind the inventory's back; a no-op return must not touch it
    fs::write(&path, "sentinel").unwrap();
    assert!(!inv.return_book("1").unwrap());
    assert_eq!(fs::read_to_string(&path).unwrap(), "sentinel");
}

#[test]
fn test_corrupted_file_recovery() {
    let dir = ScratchDir::new();
    let path = dir.join("books.json");
    fs::write(&path, "{ not valid json ]").unwrap();

    let inv = LibraryInventory::open(&path).unwrap();

    assert!(inv.is_empty());
    assert_eq!(read_json(&path), json!([]));
}

#[test]
fn test_non_array_garbage_is_reset() {
    let dir = ScratchDir::new();
    let path = dir.join("books.json");
    fs::write(&path, "42 garbage").unwrap();

    let inv = LibraryInventory::open(&path).unwrap();

    assert!(inv.is_empty());
    assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
}

#[test]
fn test_truncated_array_is_reset() {
    let dir = ScratchDir::new();
    let path = dir.join("books.json");
    fs::write(&path, r#"[{"title": "Dune", "author": "Frank Herbert", "isbn": "1"}, {"title": "#)
        .unwrap();

    let inv = LibraryInventory::open(&path).unwrap();

    assert!(inv.is_empty());
    assert_eq!(read_json(&path), json!([]));
}

#[test]
fn test_empty_file_is_treated_as_corrupted() {
    let dir = ScratchDir::new();
    let path = dir.join("books.json");
    fs::write(&path, "").unwrap();

    let inv = LibraryInventory::open(&path).unwrap();

    assert!(inv.is_empty());
    assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
}

#[test]
fn test_record_missing_isbn_fails_and_keeps_file() {
    let dir = ScratchDir::new();
    let path = dir.join("books.json");
    let original = r#"[{"title": "Dune", "author": "Frank Herbert", "available": true}]"#;
    fs::write(&path, original).unwrap();

    let result = LibraryInventory::open(&path);

    assert!(matches!(result, Err(AppError::InvalidRecord(_))));
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
}

#[test]
fn test_non_array_document_fails() {
    let dir = ScratchDir::new();
    let path = dir.join("books.json");
    fs::write(&path, r#"{"title": "Dune"}"#).unwrap();

    assert!(matches!(LibraryInventory::open(&path), Err(AppError::InvalidRecord(_))));
    assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"title": "Dune"}"#);
}

#[test]
fn test_record_missing_availability_loads_available() {
    let dir = ScratchDir::new();
    let path = dir.join("books.json");
    fs::write(&path, r#"[{"title": "Dune", "author": "Frank Herbert", "isbn": "1"}]"#).unwrap();

    let inv = LibraryInventory::open(&path).unwrap();
    assert!(inv.search_by_isbn("1").unwrap().is_available());
}

#[test]
fn test_path_that_is_a_directory_propagates_io_error() {
    let dir = ScratchDir::new();
    let path = dir.join("books.json");
    fs::create_dir_all(&path).unwrap();

    assert!(matches!(LibraryInventory::open(&path), Err(AppError::Io(_))));
}

#[test]
fn test_reload_picks_up_external_changes() {
    let dir = ScratchDir::new();
    let path = dir.join("books.json");
    let mut inv = LibraryInventory::open(&path).unwrap();
    assert!(inv.is_empty());

    fs::write(
        &path,
        r#"[{"title": "Emma", "author": "Jane Austen", "isbn": "2", "available": false}]"#,
    )
    .unwrap();
    inv.load_from_file().unwrap();

    assert_eq!(inv.len(), 1);
    assert_eq!(
        inv.display_all()[0].to_string(),
        "\"Emma\" by Jane Austen | ISBN: 2 | Status: ISSUED"
    );
}
