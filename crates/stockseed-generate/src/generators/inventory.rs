use std::collections::HashSet;

use chrono::Duration;
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::info;

use stockseed_core::{InventoryRecord, Product, ProductId, Size, SizeId};

use crate::context::GenerationContext;
use crate::model::InventoryOptions;

const MIN_STOCK_LEVEL: std::ops::RangeInclusive<i32> = 3..=10;
const LAST_UPDATED_WINDOW_DAYS: i64 = 182;

/// Sizes a product can be stocked in: same gender, or either side `Unisex`.
pub fn applicable_sizes<'a>(
    product: &Product,
    sizes: &'a [(SizeId, Size)],
) -> Vec<&'a (SizeId, Size)> {
    sizes
        .iter()
        .filter(|(_, size)| product.gender.is_compatible_with(size.gender))
        .collect()
}

/// One inventory row per sampled (product, size) pair.
///
/// Each product stocks a random share of its applicable sizes, between a
/// third and all of them, sampled without replacement.
pub fn generate_inventory(
    ctx: &mut GenerationContext,
    products: &[(ProductId, Product)],
    sizes: &[(SizeId, Size)],
    options: &InventoryOptions,
) -> Vec<InventoryRecord> {
    let mut inventory = Vec::new();
    let mut used = HashSet::new();

    for (product_id, product) in products {
        let valid = applicable_sizes(product, sizes);
        let count = ctx.rng().random_range(valid.len() / 3..=valid.len());
        let selected: Vec<SizeId> = valid
            .choose_multiple(ctx.rng(), count)
            .map(|(size_id, _)| *size_id)
            .collect();

        for size_id in selected {
            if !used.insert((*product_id, size_id)) {
                continue;
            }
            let quantity = ctx
                .rng()
                .random_range(options.min_quantity..=options.max_quantity);
            let min_stock_level = ctx.rng().random_range(MIN_STOCK_LEVEL);
            let last_updated = ctx.timestamp_within(Duration::days(LAST_UPDATED_WINDOW_DAYS));
            inventory.push(InventoryRecord {
                product_id: *product_id,
                size_id,
                quantity,
                min_stock_level,
                last_updated,
            });
        }
    }

    info!(
        event = "inventory_generated",
        products = products.len(),
        sizes = sizes.len(),
        records = inventory.len(),
        "inventory generated"
    );
    inventory
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::{NaiveDate, NaiveDateTime};
    use rust_decimal::Decimal;

    use stockseed_core::{Gender, WidthClass};

    use super::*;
    use crate::generators::sizes::generate_sizes;

    fn anchor() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap_or_default()
    }

    fn product(gender: Gender) -> Product {
        Product {
            brand_name: "Vans".to_string(),
            model_name: "Skate".to_string(),
            style_code: "ABC-DE-1234".to_string(),
            category: "Skateboarding".to_string(),
            color: "Black".to_string(),
            gender,
            retail_price: Decimal::new(199_900, 2),
            created_at: anchor(),
        }
    }

    fn stored_sizes() -> Vec<(SizeId, Size)> {
        generate_sizes()
            .into_iter()
            .enumerate()
            .map(|(idx, size)| (SizeId(idx as i32 + 1), size))
            .collect()
    }

    #[test]
    fn filter_honours_unisex_on_either_side() {
        let mut sizes = stored_sizes();
        sizes.push((
            SizeId(1000),
            Size {
                uk_size: Decimal::new(90, 1),
                india_size: Decimal::new(90, 1),
                width_type: WidthClass::Regular,
                gender: Gender::Unisex,
            },
        ));

        let men = applicable_sizes(&product(Gender::Men), &sizes);
        assert_eq!(men.len(), 54 + 1);
        assert!(men.iter().all(|(_, size)| size.gender != Gender::Women));

        let unisex = applicable_sizes(&product(Gender::Unisex), &sizes);
        assert_eq!(unisex.len(), sizes.len());
    }

    #[test]
    fn records_are_compatible_and_unique() {
        let mut ctx = GenerationContext::new(21, anchor());
        let sizes = stored_sizes();
        let products: Vec<(ProductId, Product)> = [Gender::Men, Gender::Women, Gender::Unisex]
            .into_iter()
            .cycle()
            .take(30)
            .enumerate()
            .map(|(idx, gender)| (ProductId(idx as i32 + 1), product(gender)))
            .collect();

        let inventory =
            generate_inventory(&mut ctx, &products, &sizes, &InventoryOptions::default());

        let product_gender: HashMap<ProductId, Gender> = products
            .iter()
            .map(|(id, product)| (*id, product.gender))
            .collect();
        let size_gender: HashMap<SizeId, Gender> =
            sizes.iter().map(|(id, size)| (*id, size.gender)).collect();

        let mut pairs = HashSet::new();
        for record in &inventory {
            assert!(pairs.insert((record.product_id, record.size_id)));
            assert!(product_gender[&record.product_id].is_compatible_with(size_gender[&record.size_id]));
            assert!((0..=100).contains(&record.quantity));
            assert!(MIN_STOCK_LEVEL.contains(&record.min_stock_level));
            assert!(record.last_updated <= anchor());
        }

        for (product_id, product) in &products {
            let stocked = inventory
                .iter()
                .filter(|record| record.product_id == *product_id)
                .count();
            let valid = applicable_sizes(product, &sizes).len();
            assert!(stocked >= valid / 3 && stocked <= valid);
        }
    }

    #[test]
    fn empty_inputs_yield_no_records() {
        let mut ctx = GenerationContext::new(1, anchor());
        let sizes = stored_sizes();
        let products = vec![(ProductId(1), product(Gender::Men))];
        let options = InventoryOptions::default();

        assert!(generate_inventory(&mut ctx, &[], &sizes, &options).is_empty());
        assert!(generate_inventory(&mut ctx, &products, &[], &options).is_empty());
    }
}
