use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::{Connection, Postgres, Transaction as DbTransaction};
use tracing::{info, warn};

use stockseed_core::{
    DatabaseConfig, FlatProduct, FlatProductId, InventoryId, InventoryRecord, Product, ProductId,
    Size, SizeId, Transaction,
};
use stockseed_generate::{FlatOptions, GenerationContext, Pipeline, SeedReport, StructuredOptions};

use crate::errors::LoadError;
use crate::pipeline;
use crate::sink::{Sink, pipeline_tables};

mod queries;

/// Sink writing through a single Postgres connection (usually an open
/// transaction).
#[derive(Debug)]
pub struct PostgresSink<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> PostgresSink<'c> {
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl Sink for PostgresSink<'_> {
    fn engine(&self) -> &'static str {
        "postgres"
    }

    async fn clear(&mut self, pipeline: Pipeline) -> Result<(), LoadError> {
        for table in pipeline_tables(pipeline) {
            queries::truncate(self.conn, table).await?;
        }
        Ok(())
    }

    async fn insert_product(&mut self, product: &Product) -> Result<ProductId, LoadError> {
        queries::insert_product(self.conn, product).await
    }

    async fn insert_size(&mut self, size: &Size) -> Result<SizeId, LoadError> {
        queries::insert_size(self.conn, size).await
    }

    async fn insert_inventory(
        &mut self,
        record: &InventoryRecord,
    ) -> Result<InventoryId, LoadError> {
        queries::insert_inventory(self.conn, record).await
    }

    async fn insert_transaction(&mut self, transaction: &Transaction) -> Result<(), LoadError> {
        queries::insert_transaction(self.conn, transaction).await
    }

    async fn insert_flat_product(
        &mut self,
        product: &FlatProduct,
    ) -> Result<FlatProductId, LoadError> {
        queries::insert_flat_product(self.conn, product).await
    }
}

/// Translate validated settings into sqlx connection options.
pub fn connect_options(config: &DatabaseConfig) -> PgConnectOptions {
    let options = PgConnectOptions::new()
        .host(config.host())
        .port(config.port())
        .username(config.user())
        .database(config.database());
    match config.password() {
        Some(password) => options.password(password),
        None => options,
    }
}

/// Open the single connection a seeding run works through.
pub async fn connect(config: &DatabaseConfig) -> Result<PgConnection, LoadError> {
    let redacted = config.redacted();
    info!(event = "connecting", connection = %redacted.redacted);
    let conn = PgConnection::connect_with(&connect_options(config)).await?;
    Ok(conn)
}

/// Run the structured pipeline inside one transaction.
///
/// The clear step and every insert commit together; any error rolls the whole
/// run back and is returned to the caller.
pub async fn seed_structured(
    conn: &mut PgConnection,
    ctx: &mut GenerationContext,
    options: &StructuredOptions,
    report: &mut SeedReport,
) -> Result<(), LoadError> {
    let mut tx = conn.begin().await?;
    let outcome = {
        let mut sink = PostgresSink::new(&mut tx);
        pipeline::run_structured(&mut sink, ctx, options, report).await
    };
    finish(tx, outcome).await
}

/// Run the flat pipeline inside one transaction.
pub async fn seed_flat(
    conn: &mut PgConnection,
    ctx: &mut GenerationContext,
    options: &FlatOptions,
    report: &mut SeedReport,
) -> Result<(), LoadError> {
    let mut tx = conn.begin().await?;
    let outcome = {
        let mut sink = PostgresSink::new(&mut tx);
        pipeline::run_flat(&mut sink, ctx, options, report).await
    };
    finish(tx, outcome).await
}

async fn finish(
    tx: DbTransaction<'_, Postgres>,
    outcome: Result<(), LoadError>,
) -> Result<(), LoadError> {
    match outcome {
        Ok(()) => {
            tx.commit().await?;
            info!(event = "transaction_committed");
            Ok(())
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                warn!(event = "rollback_failed", error = %rollback_err);
            } else {
                warn!(event = "transaction_rolled_back", error = %err);
            }
            Err(err)
        }
    }
}
