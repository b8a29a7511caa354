use crate::domain::catalog::Catalog;
use std::fmt;

/// Renders the catalog grouped by category. Empty slots are listed too.
pub struct MenuView<'a>(pub &'a Catalog);

impl fmt::Display for MenuView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n===== VENDING MACHINE MENU =====")?;
        for (category, items) in self.0.by_category() {
            write!(f, "\n\n--- {} ---", category.to_uppercase())?;
            for item in items {
                write!(
                    f,
                    "\n{}: {} - {} ({} left)",
                    item.code, item.name, item.price, item.quantity
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::item::Item;
    use crate::domain::money::Money;
    use rust_decimal_macros::dec;

    #[test]
    fn test_menu_layout() {
        let catalog = Catalog::new(vec![
            Item::new("A1", "Soda", "Cold Drink", Money::new(dec!(1.5)), 10),
            Item::new("A2", "Chips", "Snack", Money::new(dec!(1)), 0),
            Item::new("B1", "Water", "Cold Drink", Money::new(dec!(1.00)), 25),
        ])
        .unwrap();

        let expected = "\n===== VENDING MACHINE MENU =====\
                        \n\n--- COLD DRINK ---\
                        \nA1: Soda - $1.50 (10 left)\
                        \nB1: Water - $1.00 (25 left)\
                        \n\n--- SNACK ---\
                        \nA2: Chips - $1.00 (0 left)";
        assert_eq!(MenuView(&catalog).to_string(), expected);
    }

    #[test]
    fn test_menu_is_stable_between_renders() {
        let catalog = crate::interfaces::csv::catalog_reader::seed_catalog().unwrap();
        assert_eq!(
            MenuView(&catalog).to_string(),
            MenuView(&catalog).to_string()
        );
    }
}
