//! Library Inventory
//!
//! A personal book catalog: add books, refuse duplicate ISBNs, search by title or
//! ISBN, track issue/return, and keep the whole catalog in a single JSON file.

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use models::{Book, BookStatus};
pub use services::LibraryInventory;
