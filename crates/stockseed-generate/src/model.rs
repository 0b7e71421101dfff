use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::GenerationError;
use crate::unique::UniquenessPolicy;

/// Options for the structured (products/sizes/inventory/transactions) pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuredOptions {
    /// Number of products to generate.
    pub products: usize,
    /// Number of stock transactions to generate.
    pub transactions: usize,
    /// Truncate the pipeline tables before inserting.
    pub clear_existing: bool,
    pub inventory: InventoryOptions,
    /// Retry budget and fallback for style codes.
    pub style_codes: UniquenessPolicy,
    /// Retry budget and fallback for (brand, model name) pairs.
    pub model_names: UniquenessPolicy,
}

impl Default for StructuredOptions {
    fn default() -> Self {
        Self {
            products: 1000,
            transactions: 10_000,
            clear_existing: true,
            inventory: InventoryOptions::default(),
            style_codes: UniquenessPolicy::default(),
            model_names: UniquenessPolicy::default(),
        }
    }
}

impl StructuredOptions {
    pub fn validate(&self) -> Result<(), GenerationError> {
        self.inventory.validate()?;
        self.style_codes.validate("style_codes")?;
        self.model_names.validate("model_names")
    }
}

/// Quantity-on-hand bounds for generated inventory rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryOptions {
    pub min_quantity: i32,
    pub max_quantity: i32,
}

impl Default for InventoryOptions {
    fn default() -> Self {
        Self {
            min_quantity: 0,
            max_quantity: 100,
        }
    }
}

impl InventoryOptions {
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.min_quantity < 0 {
            return Err(GenerationError::InvalidOptions(
                "inventory.min_quantity must be >= 0".to_string(),
            ));
        }
        if self.min_quantity > self.max_quantity {
            return Err(GenerationError::InvalidOptions(
                "inventory.min_quantity must be <= max_quantity".to_string(),
            ));
        }
        Ok(())
    }
}

/// Options for the flat single-table pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlatOptions {
    pub products: usize,
    pub clear_existing: bool,
}

impl Default for FlatOptions {
    fn default() -> Self {
        Self {
            products: 100,
            clear_existing: true,
        }
    }
}

/// Retry and duplicate counters for uniqueness-checked product fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UniquenessStats {
    pub style_code_retries: u64,
    pub style_code_duplicates: u64,
    pub model_name_retries: u64,
    pub model_name_duplicates: u64,
}

impl UniquenessStats {
    pub fn record_style_code(&mut self, retries: u32, duplicate: bool) {
        self.style_code_retries += u64::from(retries);
        self.style_code_duplicates += u64::from(duplicate);
    }

    pub fn record_model_name(&mut self, retries: u32, duplicate: bool) {
        self.model_name_retries += u64::from(retries);
        self.model_name_duplicates += u64::from(duplicate);
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Pipeline {
    Structured,
    Flat,
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pipeline::Structured => f.write_str("structured"),
            Pipeline::Flat => f.write_str("flat"),
        }
    }
}

/// Row counts for one target table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableReport {
    pub table: String,
    pub rows_generated: u64,
    pub rows_inserted: u64,
}

/// Summary of a seeding run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedReport {
    pub run_id: String,
    pub pipeline: Pipeline,
    pub seed: u64,
    pub cleared: bool,
    pub tables: Vec<TableReport>,
    pub uniqueness: UniquenessStats,
    pub duration_ms: u64,
}

impl SeedReport {
    pub fn new(run_id: String, pipeline: Pipeline, seed: u64) -> Self {
        Self {
            run_id,
            pipeline,
            seed,
            cleared: false,
            tables: Vec::new(),
            uniqueness: UniquenessStats::default(),
            duration_ms: 0,
        }
    }

    pub fn record_table(&mut self, table: &str, rows_generated: usize, rows_inserted: usize) {
        self.tables.push(TableReport {
            table: table.to_string(),
            rows_generated: rows_generated as u64,
            rows_inserted: rows_inserted as u64,
        });
    }

    pub fn rows_inserted(&self, table: &str) -> u64 {
        self.tables
            .iter()
            .filter(|report| report.table == table)
            .map(|report| report.rows_inserted)
            .sum()
    }
}
