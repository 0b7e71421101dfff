use rust_decimal::Decimal;

use stockseed_core::{Gender, Size, WidthClass};

/// UK sizes in half steps, expressed in halves: 8 => 4.0, 25 => 12.5.
const UK_HALF_SIZES: std::ops::RangeInclusive<i64> = 8..=25;

/// Genders that get a dedicated size run. Unisex products fit either.
const SIZED_GENDERS: [Gender; 2] = [Gender::Men, Gender::Women];

/// Every (UK size, width, gender) combination, in a fixed order.
///
/// The regional (India) size carries the same value as the UK size.
pub fn generate_sizes() -> Vec<Size> {
    let mut sizes = Vec::new();
    for halves in UK_HALF_SIZES {
        let uk_size = Decimal::new(halves * 5, 1);
        for width_type in WidthClass::ALL {
            for gender in SIZED_GENDERS {
                sizes.push(Size {
                    uk_size,
                    india_size: uk_size,
                    width_type,
                    gender,
                });
            }
        }
    }
    sizes
}
