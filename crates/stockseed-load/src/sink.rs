use async_trait::async_trait;

use stockseed_core::{
    FlatProduct, FlatProductId, InventoryId, InventoryRecord, Product, ProductId, Size, SizeId,
    Transaction,
};

use stockseed_generate::Pipeline;

use crate::errors::LoadError;

/// Target table names.
pub mod tables {
    pub const PRODUCTS: &str = "products";
    pub const SIZES: &str = "sizes";
    pub const INVENTORY: &str = "inventory";
    pub const INVENTORY_TRANSACTIONS: &str = "inventory_transactions";
    pub const FLAT_PRODUCTS: &str = "products";
}

/// Structured-model tables, children first.
pub const STRUCTURED_TABLES: &[&str] = &[
    tables::INVENTORY_TRANSACTIONS,
    tables::INVENTORY,
    tables::PRODUCTS,
    tables::SIZES,
];

pub const FLAT_TABLES: &[&str] = &[tables::FLAT_PRODUCTS];

/// Tables a pipeline owns, in truncation order.
pub fn pipeline_tables(pipeline: Pipeline) -> &'static [&'static str] {
    match pipeline {
        Pipeline::Structured => STRUCTURED_TABLES,
        Pipeline::Flat => FLAT_TABLES,
    }
}

/// Store that inserts one record at a time and reports the generated key.
#[async_trait]
pub trait Sink: Send {
    /// Returns the engine identifier (e.g. `postgres`).
    fn engine(&self) -> &'static str;

    /// Remove all rows from the tables `pipeline` writes to.
    ///
    /// The flat model's `products` table is not the structured one, so the
    /// pipeline rather than a bare table name selects what is cleared.
    async fn clear(&mut self, pipeline: Pipeline) -> Result<(), LoadError>;

    async fn insert_product(&mut self, product: &Product) -> Result<ProductId, LoadError>;

    async fn insert_size(&mut self, size: &Size) -> Result<SizeId, LoadError>;

    async fn insert_inventory(&mut self, record: &InventoryRecord)
    -> Result<InventoryId, LoadError>;

    async fn insert_transaction(&mut self, transaction: &Transaction) -> Result<(), LoadError>;

    async fn insert_flat_product(
        &mut self,
        product: &FlatProduct,
    ) -> Result<FlatProductId, LoadError>;
}
