//! In-memory rows produced by the generators, one struct per target table.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Gender, InventoryId, ProductId, SizeId, TransactionKind, WidthClass};

/// A row of the `products` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub brand_name: String,
    pub model_name: String,
    /// `LLL-LL-NNNN`, unique within a run.
    pub style_code: String,
    pub category: String,
    pub color: String,
    pub gender: Gender,
    /// Scale 2.
    pub retail_price: Decimal,
    pub created_at: NaiveDateTime,
}

/// A row of the `sizes` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Size {
    /// Scale 1, half-size steps.
    pub uk_size: Decimal,
    pub india_size: Decimal,
    pub width_type: WidthClass,
    pub gender: Gender,
}

/// A row of the `inventory` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryRecord {
    pub product_id: ProductId,
    pub size_id: SizeId,
    pub quantity: i32,
    pub min_stock_level: i32,
    pub last_updated: NaiveDateTime,
}

/// A row of the `inventory_transactions` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub inventory_id: InventoryId,
    pub transaction_type: TransactionKind,
    /// Signed delta; the sign follows `transaction_type`.
    pub quantity: i32,
    pub transaction_date: NaiveDateTime,
    pub notes: Option<String>,
}

/// A row of the flat `products` table used by the single-table model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlatProduct {
    pub name: String,
    pub quantity: i32,
    pub price: Decimal,
    pub category: String,
}
