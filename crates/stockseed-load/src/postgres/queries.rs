use sqlx::PgConnection;

use stockseed_core::{
    FlatProduct, FlatProductId, InventoryId, InventoryRecord, Product, ProductId, Size, SizeId,
    Transaction,
};

use crate::errors::LoadError;

/// Table names are interpolated into the statement, so only plain lowercase
/// identifiers are accepted.
fn checked_identifier(table: &str) -> Result<&str, LoadError> {
    let valid = !table.is_empty()
        && table
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_');
    if valid {
        Ok(table)
    } else {
        Err(LoadError::Constraint {
            table: "clear",
            message: format!("refusing to truncate table '{table}'"),
        })
    }
}

pub async fn truncate(conn: &mut PgConnection, table: &str) -> Result<(), LoadError> {
    let table = checked_identifier(table)?;
    sqlx::query(&format!("TRUNCATE TABLE {table} CASCADE"))
        .execute(&mut *conn)
        .await?;
    Ok(())
}

pub async fn insert_product(
    conn: &mut PgConnection,
    product: &Product,
) -> Result<ProductId, LoadError> {
    let id = sqlx::query_scalar::<_, i32>(
        r#"
        insert into products
          (brand_name, model_name, style_code, category, color, gender, retail_price, created_at)
        values ($1, $2, $3, $4, $5, $6, $7, $8)
        returning product_id
        "#,
    )
    .bind(&product.brand_name)
    .bind(&product.model_name)
    .bind(&product.style_code)
    .bind(&product.category)
    .bind(&product.color)
    .bind(product.gender.as_str())
    .bind(product.retail_price)
    .bind(product.created_at)
    .fetch_one(&mut *conn)
    .await?;
    Ok(ProductId(id))
}

pub async fn insert_size(conn: &mut PgConnection, size: &Size) -> Result<SizeId, LoadError> {
    let id = sqlx::query_scalar::<_, i32>(
        r#"
        insert into sizes (uk_size, india_size, width_type, gender)
        values ($1, $2, $3, $4)
        returning size_id
        "#,
    )
    .bind(size.uk_size)
    .bind(size.india_size)
    .bind(size.width_type.as_str())
    .bind(size.gender.as_str())
    .fetch_one(&mut *conn)
    .await?;
    Ok(SizeId(id))
}

pub async fn insert_inventory(
    conn: &mut PgConnection,
    record: &InventoryRecord,
) -> Result<InventoryId, LoadError> {
    let id = sqlx::query_scalar::<_, i32>(
        r#"
        insert into inventory (product_id, size_id, quantity, min_stock_level, last_updated)
        values ($1, $2, $3, $4, $5)
        returning inventory_id
        "#,
    )
    .bind(record.product_id.0)
    .bind(record.size_id.0)
    .bind(record.quantity)
    .bind(record.min_stock_level)
    .bind(record.last_updated)
    .fetch_one(&mut *conn)
    .await?;
    Ok(InventoryId(id))
}

pub async fn insert_transaction(
    conn: &mut PgConnection,
    transaction: &Transaction,
) -> Result<(), LoadError> {
    sqlx::query(
        r#"
        insert into inventory_transactions
          (inventory_id, transaction_type, quantity, transaction_date, notes)
        values ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(transaction.inventory_id.0)
    .bind(transaction.transaction_type.as_str())
    .bind(transaction.quantity)
    .bind(transaction.transaction_date)
    .bind(transaction.notes.as_deref())
    .execute(&mut *conn)
    .await?;
    Ok(())
}

pub async fn insert_flat_product(
    conn: &mut PgConnection,
    product: &FlatProduct,
) -> Result<FlatProductId, LoadError> {
    let id = sqlx::query_scalar::<_, i32>(
        r#"
        insert into products (name, quantity, price, category)
        values ($1, $2, $3, $4)
        returning id
        "#,
    )
    .bind(&product.name)
    .bind(product.quantity)
    .bind(product.price)
    .bind(&product.category)
    .fetch_one(&mut *conn)
    .await?;
    Ok(FlatProductId(id))
}

#[cfg(test)]
mod tests {
    use super::checked_identifier;

    #[test]
    fn accepts_plain_table_names() {
        assert!(checked_identifier("inventory_transactions").is_ok());
    }

    #[test]
    fn rejects_injected_table_names() {
        assert!(checked_identifier("products; drop table sizes").is_err());
        assert!(checked_identifier("").is_err());
        assert!(checked_identifier("Products").is_err());
    }
}
