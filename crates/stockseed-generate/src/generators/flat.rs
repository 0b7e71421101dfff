use fake::Fake;
use fake::faker::lorem::en::Words;
use rand::Rng;
use tracing::info;

use stockseed_core::FlatProduct;

use super::catalog::FLAT_CATEGORIES;
use super::{money, pick};
use crate::context::GenerationContext;

const QUANTITY_MAX: i32 = 500;
const PRICE_MIN_CENTS: i64 = 100;
const PRICE_MAX_CENTS: i64 = 99_999;

/// Standalone product rows for the single-table model.
pub fn generate_flat_products(ctx: &mut GenerationContext, count: usize) -> Vec<FlatProduct> {
    let products: Vec<FlatProduct> = (0..count)
        .map(|_| {
            let rng = ctx.rng();
            FlatProduct {
                name: product_name(rng),
                quantity: rng.random_range(0..=QUANTITY_MAX),
                price: money(PRICE_MIN_CENTS, PRICE_MAX_CENTS, rng),
                category: pick(FLAT_CATEGORIES, rng).to_string(),
            }
        })
        .collect();

    info!(
        event = "flat_products_generated",
        products = products.len(),
        "flat products generated"
    );
    products
}

fn product_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let words: Vec<String> = Words(2..4).fake_with_rng(rng);
    words
        .iter()
        .map(|word| capitalize(word))
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
