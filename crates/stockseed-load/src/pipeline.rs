//! Generate-then-insert drivers for both data models.
//!
//! Records are inserted one at a time in dependency order; the identifier
//! returned for each insert is what the next entity type is built from.

use std::time::Instant;

use tracing::info;

use stockseed_core::{InventoryId, ProductId, SizeId};
use stockseed_generate::{
    FlatOptions, GenerationContext, Pipeline, SeedReport, StructuredOptions, generate_flat_products,
    generate_inventory, generate_products, generate_sizes, generate_transactions,
};

use crate::errors::LoadError;
use crate::sink::{Sink, pipeline_tables, tables};

/// Seed products, sizes, inventory and transactions, in that order.
pub async fn run_structured<S: Sink + ?Sized>(
    sink: &mut S,
    ctx: &mut GenerationContext,
    options: &StructuredOptions,
    report: &mut SeedReport,
) -> Result<(), LoadError> {
    options.validate()?;
    let start = Instant::now();
    info!(
        event = "seed_started",
        pipeline = "structured",
        engine = sink.engine(),
        seed = ctx.seed(),
        products = options.products,
        transactions = options.transactions
    );

    if options.clear_existing {
        info!(event = "clear_started", tables = ?pipeline_tables(Pipeline::Structured), "clearing existing data");
        sink.clear(Pipeline::Structured).await?;
        report.cleared = true;
    }

    info!(event = "stage_started", stage = "generate_products", "generating products");
    let generated = generate_products(ctx, options)?;
    report.uniqueness = generated.uniqueness;

    info!(event = "stage_started", stage = "insert_products", "inserting products");
    let generated_count = generated.products.len();
    let mut products = Vec::with_capacity(generated_count);
    for product in generated.products {
        let id: ProductId = sink.insert_product(&product).await?;
        products.push((id, product));
    }
    report.record_table(tables::PRODUCTS, generated_count, products.len());

    info!(event = "stage_started", stage = "generate_sizes", "generating sizes");
    let generated_sizes = generate_sizes();

    info!(event = "stage_started", stage = "insert_sizes", "inserting sizes");
    let generated_count = generated_sizes.len();
    let mut sizes = Vec::with_capacity(generated_count);
    for size in generated_sizes {
        let id: SizeId = sink.insert_size(&size).await?;
        sizes.push((id, size));
    }
    report.record_table(tables::SIZES, generated_count, sizes.len());

    info!(event = "stage_started", stage = "generate_inventory", "generating inventory");
    let inventory = generate_inventory(ctx, &products, &sizes, &options.inventory);

    info!(event = "stage_started", stage = "insert_inventory", "inserting inventory");
    let mut inventory_ids: Vec<InventoryId> = Vec::with_capacity(inventory.len());
    for record in &inventory {
        inventory_ids.push(sink.insert_inventory(record).await?);
    }
    report.record_table(tables::INVENTORY, inventory.len(), inventory_ids.len());

    info!(event = "stage_started", stage = "generate_transactions", "generating transactions");
    let transactions = generate_transactions(ctx, &inventory_ids, options.transactions);

    info!(event = "stage_started", stage = "insert_transactions", "inserting transactions");
    let mut inserted = 0;
    for transaction in &transactions {
        sink.insert_transaction(transaction).await?;
        inserted += 1;
    }
    report.record_table(tables::INVENTORY_TRANSACTIONS, transactions.len(), inserted);

    report.duration_ms = start.elapsed().as_millis() as u64;
    info!(
        event = "seed_finished",
        pipeline = "structured",
        products = products.len(),
        sizes = sizes.len(),
        inventory = inventory_ids.len(),
        transactions = inserted,
        duration_ms = report.duration_ms
    );
    Ok(())
}

/// Seed the single-table product model.
pub async fn run_flat<S: Sink + ?Sized>(
    sink: &mut S,
    ctx: &mut GenerationContext,
    options: &FlatOptions,
    report: &mut SeedReport,
) -> Result<(), LoadError> {
    let start = Instant::now();
    info!(
        event = "seed_started",
        pipeline = "flat",
        engine = sink.engine(),
        seed = ctx.seed(),
        products = options.products
    );

    if options.clear_existing {
        info!(event = "clear_started", tables = ?pipeline_tables(Pipeline::Flat), "clearing existing data");
        sink.clear(Pipeline::Flat).await?;
        report.cleared = true;
    }

    info!(event = "stage_started", stage = "generate_flat_products", "generating products");
    let products = generate_flat_products(ctx, options.products);

    info!(event = "stage_started", stage = "insert_flat_products", "inserting products");
    let mut ids = Vec::with_capacity(products.len());
    for product in &products {
        ids.push(sink.insert_flat_product(product).await?);
    }
    report.record_table(tables::FLAT_PRODUCTS, products.len(), ids.len());

    report.duration_ms = start.elapsed().as_millis() as u64;
    info!(
        event = "seed_finished",
        pipeline = "flat",
        products = ids.len(),
        duration_ms = report.duration_ms
    );
    Ok(())
}
