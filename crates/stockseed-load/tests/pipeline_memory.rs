use std::collections::{HashMap, HashSet};

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};

use stockseed_core::{Gender, InventoryId};
use stockseed_generate::{
    FlatOptions, GenerationContext, GenerationError, OnExhausted, Pipeline, SeedReport,
    StructuredOptions, UniquenessPolicy,
};
use stockseed_load::{LoadError, MemorySink, STRUCTURED_TABLES, run_flat, run_structured, tables};

fn anchor() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 1)
        .and_then(|date| date.and_hms_opt(12, 0, 0))
        .expect("valid anchor")
}

fn structured(products: usize, transactions: usize) -> StructuredOptions {
    StructuredOptions {
        products,
        transactions,
        ..StructuredOptions::default()
    }
}

#[tokio::test]
async fn structured_run_links_every_entity() -> Result<()> {
    let mut sink = MemorySink::new();
    let mut ctx = GenerationContext::new(42, anchor());
    let mut report = SeedReport::new("run-1".to_string(), Pipeline::Structured, 42);

    run_structured(&mut sink, &mut ctx, &structured(10, 100), &mut report)
        .await
        .context("structured run")?;

    assert_eq!(sink.products().len(), 10);
    assert_eq!(sink.sizes().len(), 108);
    assert!(!sink.inventory().is_empty());
    assert_eq!(sink.transactions().len(), 100);

    let genders: HashMap<_, Gender> = sink
        .products()
        .iter()
        .map(|(id, product)| (*id, product.gender))
        .collect();
    let size_genders: HashMap<_, Gender> = sink
        .sizes()
        .iter()
        .map(|(id, size)| (*id, size.gender))
        .collect();
    for (_, record) in sink.inventory() {
        let product_gender = genders[&record.product_id];
        let size_gender = size_genders[&record.size_id];
        assert!(
            size_gender.is_compatible_with(product_gender),
            "{size_gender} size stocked for {product_gender} product"
        );
    }

    let inventory_ids: HashSet<InventoryId> =
        sink.inventory().iter().map(|(id, _)| *id).collect();
    assert!(
        sink.transactions()
            .iter()
            .all(|transaction| inventory_ids.contains(&transaction.inventory_id))
    );

    assert_eq!(report.rows_inserted(tables::PRODUCTS), 10);
    assert_eq!(report.rows_inserted(tables::SIZES), 108);
    assert_eq!(
        report.rows_inserted(tables::INVENTORY),
        sink.inventory().len() as u64
    );
    assert_eq!(report.rows_inserted(tables::INVENTORY_TRANSACTIONS), 100);
    assert!(report.cleared);
    assert_eq!(sink.cleared(), STRUCTURED_TABLES);
    Ok(())
}

#[tokio::test]
async fn zero_products_yield_no_inventory_or_transactions() -> Result<()> {
    let mut sink = MemorySink::new();
    let mut ctx = GenerationContext::new(7, anchor());
    let mut report = SeedReport::new("run-2".to_string(), Pipeline::Structured, 7);

    run_structured(&mut sink, &mut ctx, &structured(0, 50), &mut report).await?;

    assert!(sink.products().is_empty());
    assert_eq!(sink.sizes().len(), 108);
    assert!(sink.inventory().is_empty());
    assert!(sink.transactions().is_empty());
    assert_eq!(report.rows_inserted(tables::INVENTORY_TRANSACTIONS), 0);
    Ok(())
}

#[tokio::test]
async fn no_clear_leaves_sink_untouched() -> Result<()> {
    let mut sink = MemorySink::new();
    let mut ctx = GenerationContext::new(3, anchor());
    let mut report = SeedReport::new("run-3".to_string(), Pipeline::Structured, 3);
    let options = StructuredOptions {
        clear_existing: false,
        ..structured(2, 5)
    };

    run_structured(&mut sink, &mut ctx, &options, &mut report).await?;

    assert!(sink.cleared().is_empty());
    assert!(!report.cleared);
    Ok(())
}

#[tokio::test]
async fn exhausted_uniqueness_aborts_the_run() {
    let mut sink = MemorySink::new();
    let mut ctx = GenerationContext::new(1, anchor());
    let mut report = SeedReport::new("run-4".to_string(), Pipeline::Structured, 1);
    let options = StructuredOptions {
        model_names: UniquenessPolicy::new(1, OnExhausted::Fail),
        ..structured(5_000, 10)
    };

    let result = run_structured(&mut sink, &mut ctx, &options, &mut report).await;

    assert!(matches!(
        result,
        Err(LoadError::Generation(GenerationError::UniquenessExhausted { .. }))
    ));
    assert!(sink.products().is_empty());
}

#[tokio::test]
async fn invalid_options_fail_before_clearing() {
    let mut sink = MemorySink::new();
    let mut ctx = GenerationContext::new(1, anchor());
    let mut report = SeedReport::new("run-5".to_string(), Pipeline::Structured, 1);
    let mut options = structured(1, 1);
    options.inventory.min_quantity = 50;
    options.inventory.max_quantity = 10;

    let result = run_structured(&mut sink, &mut ctx, &options, &mut report).await;

    assert!(matches!(
        result,
        Err(LoadError::Generation(GenerationError::InvalidOptions(_)))
    ));
    assert!(sink.cleared().is_empty());
}

#[tokio::test]
async fn flat_run_inserts_requested_products() -> Result<()> {
    let mut sink = MemorySink::new();
    let mut ctx = GenerationContext::new(99, anchor());
    let mut report = SeedReport::new("run-6".to_string(), Pipeline::Flat, 99);
    let options = FlatOptions {
        products: 25,
        ..FlatOptions::default()
    };

    run_flat(&mut sink, &mut ctx, &options, &mut report).await?;

    assert_eq!(sink.flat_products().len(), 25);
    assert_eq!(report.rows_inserted(tables::FLAT_PRODUCTS), 25);
    assert!(report.cleared);

    let ids: HashSet<_> = sink.flat_products().iter().map(|(id, _)| *id).collect();
    assert_eq!(ids.len(), 25);
    Ok(())
}

#[tokio::test]
async fn same_seed_replays_the_same_dataset() -> Result<()> {
    let mut left = MemorySink::new();
    let mut right = MemorySink::new();
    for sink in [&mut left, &mut right] {
        let mut ctx = GenerationContext::new(2024, anchor());
        let mut report = SeedReport::new("replay".to_string(), Pipeline::Structured, 2024);
        run_structured(sink, &mut ctx, &structured(8, 40), &mut report).await?;
    }

    assert_eq!(left.products(), right.products());
    assert_eq!(left.inventory(), right.inventory());
    assert_eq!(left.transactions(), right.transactions());
    Ok(())
}

#[tokio::test]
async fn flat_model_is_kept_apart_from_structured_tables() -> Result<()> {
    let mut sink = MemorySink::new();
    let mut ctx = GenerationContext::new(17, anchor());

    let mut report = SeedReport::new("structured".to_string(), Pipeline::Structured, 17);
    run_structured(&mut sink, &mut ctx, &structured(3, 20), &mut report).await?;
    let inventory = sink.inventory().len();

    let mut report = SeedReport::new("flat".to_string(), Pipeline::Flat, 17);
    let options = FlatOptions {
        products: 2,
        ..FlatOptions::default()
    };
    run_flat(&mut sink, &mut ctx, &options, &mut report).await?;

    assert_eq!(sink.products().len(), 3);
    assert_eq!(sink.inventory().len(), inventory);
    assert_eq!(sink.transactions().len(), 20);
    let flat_ids: Vec<i32> = sink.flat_products().iter().map(|(id, _)| id.0).collect();
    assert_eq!(flat_ids, vec![1, 2]);

    let mut report = SeedReport::new("structured-again".to_string(), Pipeline::Structured, 17);
    run_structured(&mut sink, &mut ctx, &structured(1, 0), &mut report).await?;
    assert_eq!(sink.products().len(), 1);
    assert_eq!(sink.flat_products().len(), 2);
    assert!(
        sink.inventory()
            .iter()
            .all(|(_, record)| record.product_id == sink.products()[0].0)
    );
    Ok(())
}
