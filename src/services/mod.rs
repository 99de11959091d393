//! Business logic services

pub mod inventory;

pub use inventory::LibraryInventory;
