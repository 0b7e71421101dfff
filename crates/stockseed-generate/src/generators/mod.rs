//! Record generators for both seeding pipelines.

pub mod catalog;
pub mod flat;
pub mod inventory;
pub mod products;
pub mod sizes;
pub mod transactions;

use rand::Rng;
use rand::seq::IndexedRandom;
use rust_decimal::Decimal;

pub use flat::generate_flat_products;
pub use inventory::{applicable_sizes, generate_inventory};
pub use products::{GeneratedProducts, generate_model_name, generate_products, generate_style_code};
pub use sizes::generate_sizes;
pub use transactions::{generate_transactions, quantity_range};

fn pick<'a, R: Rng + ?Sized>(values: &[&'a str], rng: &mut R) -> &'a str {
    values.choose(rng).copied().unwrap_or_default()
}

/// Uniform two-decimal amount between `min_cents` and `max_cents` inclusive.
fn money<R: Rng + ?Sized>(min_cents: i64, max_cents: i64, rng: &mut R) -> Decimal {
    Decimal::new(rng.random_range(min_cents..=max_cents), 2)
}
