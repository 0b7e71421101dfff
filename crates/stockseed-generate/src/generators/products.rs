use chrono::Duration;
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::info;

use stockseed_core::{Gender, Product};

use super::catalog::{BRAND_CATEGORIES, COLORS, GENDER_WEIGHTS, SERIES_TAGS, descriptors};
use super::{money, pick};
use crate::context::GenerationContext;
use crate::errors::GenerationError;
use crate::model::{StructuredOptions, UniquenessStats};
use crate::unique::UniqueSet;

const PRICE_MIN_CENTS: i64 = 99_900;
const PRICE_MAX_CENTS: i64 = 999_900;
const CREATED_WINDOW_DAYS: i64 = 365;
const PROGRESS_EVERY: usize = 100;

/// Products ready for insertion plus the uniqueness bookkeeping behind them.
#[derive(Debug, Clone, Default)]
pub struct GeneratedProducts {
    pub products: Vec<Product>,
    pub uniqueness: UniquenessStats,
}

/// `LLL-LL-NNNN`: uppercase ASCII letters and a four-digit number.
pub fn generate_style_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    let head = letters(rng, 3);
    let mid = letters(rng, 2);
    let number = rng.random_range(1000..=9999);
    format!("{head}-{mid}-{number}")
}

/// Descriptor plus optional series tag, number and version digit.
///
/// A non-zero `attempt` replaces the number with the attempt zero-padded to
/// three digits, which steers retries away from the colliding name.
pub fn generate_model_name<R: Rng + ?Sized>(category: &str, attempt: u32, rng: &mut R) -> String {
    let descriptor = pick(descriptors(category), rng);
    let mut number = if rng.random::<f64>() > 0.3 {
        Some(rng.random_range(1..=999).to_string())
    } else {
        None
    };
    let series = if rng.random::<f64>() > 0.5 {
        Some(pick(SERIES_TAGS, rng))
    } else {
        None
    };
    let version = if rng.random::<f64>() > 0.7 {
        Some(rng.random_range(1..=5).to_string())
    } else {
        None
    };

    if attempt > 0 {
        number = Some(format!("{attempt:03}"));
    }

    let mut parts = vec![descriptor.to_string()];
    parts.extend(series.map(str::to_string));
    parts.extend(number);
    parts.extend(version);
    parts.join(" ")
}

pub fn generate_products(
    ctx: &mut GenerationContext,
    options: &StructuredOptions,
) -> Result<GeneratedProducts, GenerationError> {
    options.style_codes.validate("style_codes")?;
    options.model_names.validate("model_names")?;

    let mut style_codes = UniqueSet::new("style code");
    let mut model_names = UniqueSet::new("model name");
    let mut uniqueness = UniquenessStats::default();
    let mut products = Vec::with_capacity(options.products);

    for index in 0..options.products {
        if index > 0 && index % PROGRESS_EVERY == 0 {
            info!(event = "products_progress", generated = index, "generated products");
        }

        let (brand, categories) =
            BRAND_CATEGORIES[ctx.rng().random_range(0..BRAND_CATEGORIES.len())];
        let category = pick(categories, ctx.rng());

        let style_code = style_codes.issue(
            &options.style_codes,
            |_| generate_style_code(ctx.rng()),
            |code: &String| code.clone(),
        )?;
        uniqueness.record_style_code(style_code.retries(), style_code.duplicate);

        let model_name = model_names.issue(
            &options.model_names,
            |attempt| generate_model_name(category, attempt, ctx.rng()),
            |name: &String| format!("{brand}-{name}"),
        )?;
        uniqueness.record_model_name(model_name.retries(), model_name.duplicate);

        let color = pick(COLORS, ctx.rng());
        let gender = pick_gender(ctx.rng());
        let retail_price = money(PRICE_MIN_CENTS, PRICE_MAX_CENTS, ctx.rng());
        let created_at = ctx.timestamp_within(Duration::days(CREATED_WINDOW_DAYS));

        products.push(Product {
            brand_name: brand.to_string(),
            model_name: model_name.value,
            style_code: style_code.value,
            category: category.to_string(),
            color: color.to_string(),
            gender,
            retail_price,
            created_at,
        });
    }

    info!(
        event = "products_generated",
        products = products.len(),
        style_code_retries = uniqueness.style_code_retries,
        duplicates = uniqueness.style_code_duplicates + uniqueness.model_name_duplicates,
        "products generated"
    );

    Ok(GeneratedProducts {
        products,
        uniqueness,
    })
}

fn letters<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| char::from(rng.random_range(b'A'..=b'Z')))
        .collect()
}

fn pick_gender<R: Rng + ?Sized>(rng: &mut R) -> Gender {
    GENDER_WEIGHTS
        .choose_weighted(rng, |(_, weight)| *weight)
        .map(|(gender, _)| *gender)
        .unwrap_or(Gender::Unisex)
}
