use super::money::{Amount, Money};
use crate::error::Result;

/// Money collected so far towards a single item.
#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    price: Money,
    inserted: Money,
}

/// How a payment ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaymentOutcome {
    /// The price was covered. `change` is never negative.
    Paid { inserted: Money, change: Money },
    /// The customer aborted; everything inserted is handed back.
    Cancelled { refunded: Money },
}

impl Payment {
    pub fn new(price: Money) -> Self {
        Self {
            price,
            inserted: Money::ZERO,
        }
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn inserted(&self) -> Money {
        self.inserted
    }

    /// Credits an insertion. On overflow nothing is credited.
    pub fn insert(&mut self, amount: Amount) -> Result<()> {
        self.inserted = self.inserted.checked_add(amount)?;
        Ok(())
    }

    pub fn is_covered(&self) -> bool {
        self.inserted >= self.price
    }

    /// Change owed once the price is covered.
    pub fn change(&self) -> Option<Money> {
        self.is_covered().then(|| self.inserted - self.price)
    }

    pub fn complete(&self) -> Option<PaymentOutcome> {
        self.change().map(|change| PaymentOutcome::Paid {
            inserted: self.inserted,
            change,
        })
    }

    pub fn cancel(self) -> PaymentOutcome {
        PaymentOutcome::Cancelled {
            refunded: self.inserted,
        }
    }
}
