use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Gender a product is designed for, or a size is cut for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Gender {
    Men,
    Women,
    Unisex,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Men, Gender::Women, Gender::Unisex];

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Men => "Men",
            Gender::Women => "Women",
            Gender::Unisex => "Unisex",
        }
    }

    /// A product can be stocked in a size when both genders match or either
    /// side is `Unisex`.
    pub fn is_compatible_with(self, other: Gender) -> bool {
        self == other || self == Gender::Unisex || other == Gender::Unisex
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Gender::ALL
            .into_iter()
            .find(|gender| gender.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| Error::UnknownVariant {
                kind: "gender",
                value: value.to_string(),
            })
    }
}

/// Shoe-fit width class, independent of the length size.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WidthClass {
    Narrow,
    Regular,
    Wide,
}

impl WidthClass {
    pub const ALL: [WidthClass; 3] = [WidthClass::Narrow, WidthClass::Regular, WidthClass::Wide];

    pub fn as_str(self) -> &'static str {
        match self {
            WidthClass::Narrow => "Narrow",
            WidthClass::Regular => "Regular",
            WidthClass::Wide => "Wide",
        }
    }
}

impl fmt::Display for WidthClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    /// Restock; always a positive delta.
    In,
    /// Sale or shipment; always a negative delta.
    Out,
    /// Stock-count correction; either sign.
    Adjustment,
}

impl TransactionKind {
    pub const ALL: [TransactionKind; 3] = [
        TransactionKind::In,
        TransactionKind::Out,
        TransactionKind::Adjustment,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::In => "IN",
            TransactionKind::Out => "OUT",
            TransactionKind::Adjustment => "ADJUSTMENT",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

macro_rules! serial_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
        )]
        #[serde(transparent)]
        pub struct $name(pub i32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

serial_id!(
    /// Identifier assigned by the database to a structured product row.
    ProductId
);
serial_id!(
    /// Identifier assigned by the database to a size row.
    SizeId
);
serial_id!(
    /// Identifier assigned by the database to an inventory row.
    InventoryId
);
serial_id!(
    /// Identifier assigned by the database to a flat product row.
    FlatProductId
);
