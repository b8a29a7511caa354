use super::item::{Item, normalize_code};
use crate::error::{Result, VendingError};
use std::collections::HashSet;

/// The fixed set of items offered during a session.
///
/// Items keep the order they were loaded in. That order decides both the
/// order of categories on the menu (first seen wins) and which item the
/// recommender picks. Nothing is inserted or removed after construction;
/// only quantities change, through [`Catalog::dispense`].
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    /// Builds a catalog, keeping items in the given order.
    ///
    /// # Arguments
    ///
    /// * `items` - Items with unique, normalized codes and non-negative prices.
    ///
    /// # Errors
    ///
    /// `InvalidSeed` when a code is empty, not normalized or repeated, or a
    /// price is negative.
    pub fn new(items: Vec<Item>) -> Result<Self> {
        validate(&items)?;
        Ok(Self { items })
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks up an item by its normalized code, whatever its stock.
    pub fn get(&self, code: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.code == code)
    }

    /// Checks that `code` names an item that can be bought right now.
    pub fn select(&self, code: &str) -> Result<&Item> {
        let item = self
            .get(code)
            .ok_or_else(|| VendingError::UnknownCode(code.to_string()))?;
        if item.in_stock() {
            Ok(item)
        } else {
            Err(VendingError::OutOfStock(code.to_string()))
        }
    }

    /// Takes one unit of `code` out of the machine.
    pub fn dispense(&mut self, code: &str) -> Result<&Item> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.code == code)
            .ok_or_else(|| VendingError::UnknownCode(code.to_string()))?;
        item.quantity = item
            .quantity
            .checked_sub(1)
            .ok_or_else(|| VendingError::OutOfStock(code.to_string()))?;
        Ok(&*item)
    }

    /// First other in-stock item sharing the category of `code`.
    pub fn recommend(&self, code: &str) -> Option<&Item> {
        let category = &self.get(code)?.category;
        self.items
            .iter()
            .find(|item| item.code != code && &item.category == category && item.in_stock())
    }

    /// Items grouped by category, in first-seen category order.
    pub fn by_category(&self) -> Vec<(&str, Vec<&Item>)> {
        let mut groups: Vec<(&str, Vec<&Item>)> = Vec::new();
        for item in &self.items {
            match groups
                .iter()
                .position(|(category, _)| *category == item.category)
            {
                Some(index) => groups[index].1.push(item),
                None => groups.push((item.category.as_str(), vec![item])),
            }
        }
        groups
    }
}

/// Rejects item lists that break the catalog's invariants.
fn validate(items: &[Item]) -> Result<()> {
    let mut seen = HashSet::new();
    for item in items {
        if item.code.is_empty() {
            return Err(VendingError::InvalidSeed(format!(
                "item '{}' has an empty code",
                item.name
            )));
        }
        if item.code != normalize_code(&item.code) {
            return Err(VendingError::InvalidSeed(format!(
                "code '{}' is not uppercase",
                item.code
            )));
        }
        if !seen.insert(item.code.as_str()) {
            return Err(VendingError::InvalidSeed(format!(
                "duplicate code '{}'",
                item.code
            )));
        }
        if item.price.is_negative() {
            return Err(VendingError::InvalidSeed(format!(
                "item '{}' has a negative price",
                item.code
            )));
        }
    }
    Ok(())
}
