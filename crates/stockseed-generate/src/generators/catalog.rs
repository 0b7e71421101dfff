//! Footwear catalog vocabulary: brands, categories, descriptors, colors.

use stockseed_core::Gender;

/// Brands and the categories each one sells.
pub const BRAND_CATEGORIES: &[(&str, &[&str])] = &[
    ("Nike", &["Running", "Basketball", "Training"]),
    ("Adidas", &["Running", "Basketball", "Casual", "Training", "Tennis"]),
    ("Puma", &["Running", "Basketball", "Casual", "Training"]),
    ("Reebok", &["Running", "Basketball"]),
    ("ASICS", &["Running", "Tennis"]),
    ("Skechers", &["Running", "Walking"]),
    ("Campus", &["Running", "Walking"]),
    ("Bata", &["Casual", "Walking"]),
    ("Liberty", &["Casual", "Walking"]),
    ("Woodland", &["Casual", "Hiking"]),
    ("Red Chief", &["Casual", "Hiking"]),
    ("HRX", &["Running", "Training", "Skateboarding"]),
    ("Wildcraft", &["Hiking"]),
    ("Quechua", &["Hiking"]),
    ("Vans", &["Skateboarding"]),
    ("Sparx", &["Training", "Skateboarding"]),
];

pub const COLORS: &[&str] = &[
    "Black", "White", "Grey", "Navy", "Red", "Blue", "Green", "Brown", "Tan", "Multi",
];

/// Draw weights for product gender.
pub const GENDER_WEIGHTS: &[(Gender, f64)] = &[
    (Gender::Men, 0.45),
    (Gender::Women, 0.45),
    (Gender::Unisex, 0.10),
];

pub const SERIES_TAGS: &[&str] = &["X", "Z", "S", "V", "Pro", "Plus", "Max"];

/// Descriptor used when a category has no dedicated word list.
pub const FALLBACK_DESCRIPTOR: &str = "Basic";

pub fn descriptors(category: &str) -> &'static [&'static str] {
    match category {
        "Running" => &[
            "Zoom", "Air", "Boost", "Swift", "Rapid", "Flow", "Race", "Speed", "Dash", "Sprint",
        ],
        "Basketball" => &[
            "Pro", "Jump", "Court", "Elite", "Power", "Force", "Dunk", "Slam", "Hoop", "Game",
        ],
        "Casual" => &[
            "Classic", "Urban", "Street", "Daily", "Comfort", "Easy", "Lite", "Style", "Fashion",
            "Trend",
        ],
        "Training" => &[
            "Trainer",
            "Flex",
            "Core",
            "Performance",
            "Active",
            "Dynamic",
            "Power",
            "Energy",
            "Fit",
            "Pro",
        ],
        "Tennis" => &[
            "Court", "Match", "Ace", "Game", "Rally", "Serve", "Net", "Set", "Point", "Play",
        ],
        "Hiking" => &[
            "Trail",
            "Trek",
            "Hike",
            "Mountain",
            "Peak",
            "Alpine",
            "Summit",
            "Rock",
            "Path",
            "Adventure",
        ],
        "Skateboarding" => &[
            "Skate", "Board", "Street", "Flip", "Deck", "Slide", "Grind", "Roll", "Park", "Ride",
        ],
        "Walking" => &[
            "Walk", "Step", "Stride", "Path", "Move", "Go", "Journey", "Cruise", "Tour", "Pace",
        ],
        _ => &[FALLBACK_DESCRIPTOR],
    }
}

/// Categories for the single-table product model.
pub const FLAT_CATEGORIES: &[&str] = &[
    "Electronics",
    "Clothing",
    "Footwear",
    "Books",
    "Home & Kitchen",
    "Sports",
    "Toys",
    "Beauty",
    "Grocery",
];
