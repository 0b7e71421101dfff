use std::env;

use stockseed_generate::{GenerationContext, StructuredOptions, generate_products, random_seed};

/// Print a handful of generated products as JSON without touching a database.
///
/// Usage: `preview_products [COUNT] [--seed SEED]`
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let mut count = 5;
    let mut seed = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => {
                let value = args.next().ok_or("missing value for --seed")?;
                seed = Some(value.parse::<u64>()?);
            }
            _ => count = arg.parse()?,
        }
    }

    let seed = seed.unwrap_or_else(random_seed);
    let mut ctx = GenerationContext::from_clock(seed);
    let options = StructuredOptions {
        products: count,
        ..StructuredOptions::default()
    };
    let generated = generate_products(&mut ctx, &options)?;

    eprintln!("seed {seed}");
    println!("{}", serde_json::to_string_pretty(&generated.products)?);
    Ok(())
}
