use std::collections::{HashMap, HashSet};

use async_trait::async_trait;

use stockseed_core::{
    FlatProduct, FlatProductId, InventoryId, InventoryRecord, Product, ProductId, Size, SizeId,
    Transaction,
};

use stockseed_generate::Pipeline;

use crate::errors::LoadError;
use crate::sink::{Sink, pipeline_tables, tables};

/// Sequence key for the flat model, which lives apart from the structured
/// `products` table.
const FLAT_SEQUENCE: &str = "flat.products";

/// In-process store that assigns serial identifiers and checks the same keys
/// the Postgres schema enforces (unique style codes, unique product/size
/// pairs, foreign keys).
///
/// The flat model is kept apart from the structured tables, as if it were
/// its own database.
#[derive(Debug, Default)]
pub struct MemorySink {
    products: Vec<(ProductId, Product)>,
    sizes: Vec<(SizeId, Size)>,
    inventory: Vec<(InventoryId, InventoryRecord)>,
    transactions: Vec<Transaction>,
    flat_products: Vec<(FlatProductId, FlatProduct)>,
    style_codes: HashSet<String>,
    product_ids: HashSet<ProductId>,
    size_ids: HashSet<SizeId>,
    inventory_ids: HashSet<InventoryId>,
    stock_keys: HashSet<(ProductId, SizeId)>,
    sequences: HashMap<&'static str, i32>,
    cleared: Vec<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn products(&self) -> &[(ProductId, Product)] {
        &self.products
    }

    pub fn sizes(&self) -> &[(SizeId, Size)] {
        &self.sizes
    }

    pub fn inventory(&self) -> &[(InventoryId, InventoryRecord)] {
        &self.inventory
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn flat_products(&self) -> &[(FlatProductId, FlatProduct)] {
        &self.flat_products
    }

    /// Tables truncated so far, in call order.
    pub fn cleared(&self) -> &[String] {
        &self.cleared
    }

    /// Sequences keep counting across clears, like a `serial` column
    /// truncated without `RESTART IDENTITY`.
    fn next_id(&mut self, table: &'static str) -> i32 {
        let next = self.sequences.entry(table).or_insert(0);
        *next += 1;
        *next
    }
}

#[async_trait]
impl Sink for MemorySink {
    fn engine(&self) -> &'static str {
        "memory"
    }

    async fn clear(&mut self, pipeline: Pipeline) -> Result<(), LoadError> {
        match pipeline {
            Pipeline::Structured => {
                self.transactions.clear();
                self.inventory.clear();
                self.inventory_ids.clear();
                self.stock_keys.clear();
                self.products.clear();
                self.product_ids.clear();
                self.style_codes.clear();
                self.sizes.clear();
                self.size_ids.clear();
            }
            Pipeline::Flat => self.flat_products.clear(),
        }
        self.cleared
            .extend(pipeline_tables(pipeline).iter().map(|table| table.to_string()));
        Ok(())
    }

    async fn insert_product(&mut self, product: &Product) -> Result<ProductId, LoadError> {
        if !self.style_codes.insert(product.style_code.clone()) {
            return Err(LoadError::Constraint {
                table: tables::PRODUCTS,
                message: format!("duplicate style_code '{}'", product.style_code),
            });
        }
        let id = ProductId(self.next_id(tables::PRODUCTS));
        self.product_ids.insert(id);
        self.products.push((id, product.clone()));
        Ok(id)
    }

    async fn insert_size(&mut self, size: &Size) -> Result<SizeId, LoadError> {
        let id = SizeId(self.next_id(tables::SIZES));
        self.size_ids.insert(id);
        self.sizes.push((id, size.clone()));
        Ok(id)
    }

    async fn insert_inventory(
        &mut self,
        record: &InventoryRecord,
    ) -> Result<InventoryId, LoadError> {
        if !self.product_ids.contains(&record.product_id) {
            return Err(LoadError::Constraint {
                table: tables::INVENTORY,
                message: format!("unknown product_id {}", record.product_id),
            });
        }
        if !self.size_ids.contains(&record.size_id) {
            return Err(LoadError::Constraint {
                table: tables::INVENTORY,
                message: format!("unknown size_id {}", record.size_id),
            });
        }
        if !self.stock_keys.insert((record.product_id, record.size_id)) {
            return Err(LoadError::Constraint {
                table: tables::INVENTORY,
                message: format!(
                    "duplicate (product_id, size_id) ({}, {})",
                    record.product_id, record.size_id
                ),
            });
        }
        let id = InventoryId(self.next_id(tables::INVENTORY));
        self.inventory_ids.insert(id);
        self.inventory.push((id, record.clone()));
        Ok(id)
    }

    async fn insert_transaction(&mut self, transaction: &Transaction) -> Result<(), LoadError> {
        if !self.inventory_ids.contains(&transaction.inventory_id) {
            return Err(LoadError::Constraint {
                table: tables::INVENTORY_TRANSACTIONS,
                message: format!("unknown inventory_id {}", transaction.inventory_id),
            });
        }
        self.transactions.push(transaction.clone());
        Ok(())
    }

    async fn insert_flat_product(
        &mut self,
        product: &FlatProduct,
    ) -> Result<FlatProductId, LoadError> {
        let id = FlatProductId(self.next_id(FLAT_SEQUENCE));
        self.flat_products.push((id, product.clone()));
        Ok(id)
    }
}
