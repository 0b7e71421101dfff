//! Synthetic data generation for the stockseed inventory schema.
//!
//! Every generator draws from an explicit, seeded [`GenerationContext`], so a
//! run can be replayed from its seed and time anchor. Generators only build
//! records in memory; inserting them and capturing database identifiers is
//! the job of `stockseed-load`.

pub mod context;
pub mod errors;
pub mod generators;
pub mod model;
pub mod unique;

pub use context::{GenerationContext, random_seed};
pub use errors::GenerationError;
pub use generators::{
    GeneratedProducts, applicable_sizes, generate_flat_products, generate_inventory,
    generate_model_name, generate_products, generate_sizes, generate_style_code,
    generate_transactions, quantity_range,
};
pub use model::{
    FlatOptions, InventoryOptions, Pipeline, SeedReport, StructuredOptions, TableReport,
    UniquenessStats,
};
pub use unique::{Issued, OnExhausted, UniqueSet, UniquenessPolicy};
