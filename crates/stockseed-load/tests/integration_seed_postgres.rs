use std::{env, fs};

use anyhow::{Context, Result, anyhow};
use chrono::{NaiveDate, NaiveDateTime};
use sqlx::PgConnection;

use stockseed_core::DatabaseConfig;
use stockseed_generate::{
    FlatOptions, GenerationContext, OnExhausted, Pipeline, SeedReport, StructuredOptions,
    UniquenessPolicy,
};
use stockseed_load::{LoadError, connect, seed_flat, seed_structured};

const STRUCTURED_FIXTURE: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../fixtures/sql/postgres/001_structured_schema.sql"
);
const FLAT_FIXTURE: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../fixtures/sql/postgres/002_flat_schema.sql"
);

fn database_url() -> Option<String> {
    env::var("TEST_DATABASE_URL").ok()
}

fn anchor() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 10)
        .and_then(|date| date.and_hms_opt(8, 0, 0))
        .expect("valid anchor")
}

async fn open(url: &str) -> Result<PgConnection> {
    let config = DatabaseConfig::from_url(url).context("parsing TEST_DATABASE_URL")?;
    connect(&config).await.context("connecting to Postgres")
}

async fn run_fixture(conn: &mut PgConnection, path: &str) -> Result<()> {
    let script = fs::read_to_string(path).with_context(|| format!("reading fixture {path}"))?;

    for statement in script.split(';') {
        let sql = statement.trim();
        if sql.is_empty() {
            continue;
        }

        sqlx::query(sql)
            .execute(&mut *conn)
            .await
            .with_context(|| format!("executing fixture {path}"))?;
    }

    Ok(())
}

async fn count(conn: &mut PgConnection, table: &str) -> Result<i64> {
    let rows = sqlx::query_scalar::<_, i64>(&format!("select count(*) from {table}"))
        .fetch_one(&mut *conn)
        .await
        .with_context(|| format!("counting {table}"))?;
    Ok(rows)
}

#[tokio::test]
async fn seeds_structured_model_and_rolls_back_failed_runs() -> Result<()> {
    let Some(url) = database_url() else {
        eprintln!("TEST_DATABASE_URL not set; skipping Postgres integration test");
        return Ok(());
    };
    let mut conn = open(&url).await?;
    run_fixture(&mut conn, STRUCTURED_FIXTURE).await?;

    let options = StructuredOptions {
        products: 5,
        transactions: 40,
        ..StructuredOptions::default()
    };
    let mut ctx = GenerationContext::new(11, anchor());
    let mut report = SeedReport::new("pg-structured".to_string(), Pipeline::Structured, 11);
    seed_structured(&mut conn, &mut ctx, &options, &mut report).await?;

    assert_eq!(count(&mut conn, "products").await?, 5);
    assert_eq!(count(&mut conn, "sizes").await?, 108);
    assert_eq!(count(&mut conn, "inventory_transactions").await?, 40);
    let inventory = count(&mut conn, "inventory").await?;
    assert!(inventory > 0);
    assert_eq!(report.rows_inserted("inventory") as i64, inventory);

    let orphans = sqlx::query_scalar::<_, i64>(
        r#"
        select count(*)
        from inventory_transactions t
        left join inventory i on i.inventory_id = t.inventory_id
        where i.inventory_id is null
        "#,
    )
    .fetch_one(&mut conn)
    .await?;
    assert_eq!(orphans, 0);

    // A run that clears the tables and then fails must leave them as they were.
    let failing = StructuredOptions {
        products: 5_000,
        model_names: UniquenessPolicy::new(1, OnExhausted::Fail),
        ..StructuredOptions::default()
    };
    let mut ctx = GenerationContext::new(1, anchor());
    let mut report = SeedReport::new("pg-failing".to_string(), Pipeline::Structured, 1);
    let result = seed_structured(&mut conn, &mut ctx, &failing, &mut report).await;
    match result {
        Err(LoadError::Generation(_)) => {}
        other => return Err(anyhow!("expected generation failure, got {other:?}")),
    }

    assert_eq!(count(&mut conn, "products").await?, 5);
    assert_eq!(count(&mut conn, "inventory_transactions").await?, 40);
    Ok(())
}

#[tokio::test]
async fn seeds_flat_model() -> Result<()> {
    let Some(url) = database_url() else {
        eprintln!("TEST_DATABASE_URL not set; skipping Postgres integration test");
        return Ok(());
    };
    let mut conn = open(&url).await?;
    run_fixture(&mut conn, FLAT_FIXTURE).await?;
    sqlx::query("set search_path to flat")
        .execute(&mut conn)
        .await?;

    let options = FlatOptions {
        products: 30,
        ..FlatOptions::default()
    };
    let mut ctx = GenerationContext::new(5, anchor());
    let mut report = SeedReport::new("pg-flat".to_string(), Pipeline::Flat, 5);
    seed_flat(&mut conn, &mut ctx, &options, &mut report).await?;

    assert_eq!(count(&mut conn, "flat.products").await?, 30);

    let negative = sqlx::query_scalar::<_, i64>(
        "select count(*) from flat.products where quantity < 0 or price <= 0",
    )
    .fetch_one(&mut conn)
    .await?;
    assert_eq!(negative, 0);
    Ok(())
}
