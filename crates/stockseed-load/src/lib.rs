//! Insertion of generated records into a target store.
//!
//! [`Sink`] is the seam between generation and storage: each insert returns
//! the identifier the store assigned, which the [`pipeline`] functions feed
//! into the next dependent entity type.

pub mod errors;
pub mod memory;
pub mod pipeline;
pub mod postgres;
pub mod sink;

pub use errors::LoadError;
pub use memory::MemorySink;
pub use pipeline::{run_flat, run_structured};
pub use postgres::{PostgresSink, connect, connect_options, seed_flat, seed_structured};
pub use sink::{FLAT_TABLES, STRUCTURED_TABLES, Sink, pipeline_tables, tables};
