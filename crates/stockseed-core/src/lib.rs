//! Core contracts and helpers for stockseed.
//!
//! This crate defines the inventory domain records, the structured database
//! configuration, and the error type shared by the generator, the loaders and
//! the CLI.

pub mod config;
pub mod error;
pub mod records;
pub mod types;

pub use config::{DEFAULT_PORT, DatabaseConfig, RedactedConnection};
pub use error::{Error, Result};
pub use records::{FlatProduct, InventoryRecord, Product, Size, Transaction};
pub use types::{
    FlatProductId, Gender, InventoryId, ProductId, SizeId, TransactionKind, WidthClass,
};
