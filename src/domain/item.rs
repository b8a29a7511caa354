use super::money::Money;
use serde::{Deserialize, Serialize};

/// A product slot in the machine.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Item {
    /// Short identifier such as `A1`, always stored uppercase.
    pub code: String,
    pub name: String,
    /// Grouping label used by the menu and by recommendations.
    pub category: String,
    pub price: Money,
    /// Units left. Only ever decremented by a successful dispense.
    pub quantity: u32,
}

impl Item {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        price: Money,
        quantity: u32,
    ) -> Self {
        Self {
            code: normalize_code(&code.into()),
            name: name.into(),
            category: category.into(),
            price,
            quantity,
        }
    }

    pub fn in_stock(&self) -> bool {
        self.quantity > 0
    }
}

/// Normalizes raw user input into the stored code format.
pub fn normalize_code(input: &str) -> String {
    input.trim().to_uppercase()
}
