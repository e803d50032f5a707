//! Storage module for persistent data storage
//!
//! Provides SQLite-based persistence for extracted document text.

mod database;

pub use database::DocumentDb;
