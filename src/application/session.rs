use crate::domain::catalog::Catalog;
use crate::domain::item::normalize_code;
use crate::domain::money::{Amount, Money};
use crate::domain::payment::{Payment, PaymentOutcome};
use crate::error::{Result, VendingError};
use crate::interfaces::console::Console;
use crate::interfaces::console::menu::MenuView;
use std::fmt;
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};

const QUIT_SENTINEL: &str = "Q";
const CANCEL_SENTINEL: &str = "c";
const CONTINUE_ANSWER: &str = "yes";

/// An item that passed selection and is waiting to be paid for.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub code: String,
    pub price: Money,
}

/// Why the session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Farewell {
    /// The customer entered the quit sentinel at the selection prompt.
    Quit,
    /// The customer did not ask for another item after a purchase.
    Declined,
}

impl fmt::Display for Farewell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Farewell::Quit => write!(f, "Thank you for using the vending machine. Goodbye!"),
            Farewell::Declined => write!(f, "Thank you for your purchase. Goodbye!"),
        }
    }
}

#[derive(Debug)]
enum State {
    DisplayMenu,
    Select,
    Pay(Selection),
    Dispense { code: String, change: Money },
    Suggest { code: String },
    Continue,
    End(Farewell),
}

/// A single customer's interaction with the machine.
///
/// The session owns the catalog for its whole lifetime and drives the
/// menu -> select -> pay -> dispense -> suggest -> continue loop over a
/// [`Console`]. Invalid input never ends the session; it only ends when the
/// customer quits at selection or declines another purchase. Exhausted input
/// counts as quitting, cancelling or declining, depending on the prompt.
pub struct Session<R: BufRead, W: Write> {
    catalog: Catalog,
    console: Console<R, W>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Creates a session over a stocked catalog.
    ///
    /// # Arguments
    ///
    /// * `catalog` - Items on sale; stock is decremented as items are dispensed.
    /// * `reader` - Source of customer input, read one line per prompt.
    /// * `writer` - Destination for prompts and messages.
    pub fn new(catalog: Catalog, reader: R, writer: W) -> Self {
        Self {
            catalog,
            console: Console::new(reader, writer),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Consumes the session, returning the final catalog and the writer.
    pub fn into_parts(self) -> (Catalog, W) {
        let (_, writer) = self.console.into_inner();
        (self.catalog, writer)
    }

    /// Runs the transaction loop until the customer leaves.
    pub fn run(&mut self) -> Result<Farewell> {
        info!(items = self.catalog.len(), "session started");
        if self.catalog.is_empty() {
            warn!("catalog is empty; every selection will be unknown");
        }
        self.console.say("Welcome to the Vending Machine!")?;

        let mut state = State::DisplayMenu;
        loop {
            state = match state {
                State::DisplayMenu => {
                    self.display_menu()?;
                    State::Select
                }
                State::Select => match self.select_item()? {
                    Some(selection) => State::Pay(selection),
                    None => State::End(Farewell::Quit),
                },
                State::Pay(selection) => match self.collect_payment(selection.price)? {
                    PaymentOutcome::Paid { inserted, change } => {
                        debug!(%inserted, %change, "payment accepted");
                        State::Dispense {
                            code: selection.code,
                            change,
                        }
                    }
                    PaymentOutcome::Cancelled { .. } => State::DisplayMenu,
                },
                State::Dispense { code, change } => {
                    self.dispense(&code, change)?;
                    State::Suggest { code }
                }
                State::Suggest { code } => {
                    self.suggest(&code)?;
                    State::Continue
                }
                State::Continue => {
                    if self.ask_continue()? {
                        State::DisplayMenu
                    } else {
                        State::End(Farewell::Declined)
                    }
                }
                State::End(farewell) => {
                    self.console.say(farewell)?;
                    self.console.flush()?;
                    info!(?farewell, "session ended");
                    return Ok(farewell);
                }
            };
        }
    }

    pub fn display_menu(&mut self) -> Result<()> {
        self.console.say(MenuView(&self.catalog))
    }

    /// Prompts until the customer picks an in-stock item or quits.
    ///
    /// Returns `None` for the quit sentinel or exhausted input.
    pub fn select_item(&mut self) -> Result<Option<Selection>> {
        loop {
            let Some(input) = self
                .console
                .prompt("\nEnter the item code (or 'q' to quit): ")?
            else {
                debug!("input closed at selection");
                return Ok(None);
            };

            let code = normalize_code(&input);
            if code == QUIT_SENTINEL {
                return Ok(None);
            }

            match self.catalog.select(&code) {
                Ok(item) => {
                    debug!(code = %item.code, price = %item.price, "item selected");
                    return Ok(Some(Selection {
                        code: item.code.clone(),
                        price: item.price,
                    }));
                }
                Err(VendingError::OutOfStock(code)) => {
                    debug!(%code, "rejected out-of-stock selection");
                    self.console
                        .say("Sorry, that item is out of stock. Please choose another item.")?;
                }
                Err(VendingError::UnknownCode(code)) => {
                    debug!(%code, "rejected unknown code");
                    self.console.say("Invalid code. Please try again.")?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Collects money until `price` is covered or the customer cancels.
    pub fn collect_payment(&mut self, price: Money) -> Result<PaymentOutcome> {
        let mut payment = Payment::new(price);
        self.console
            .say(format_args!("The price is {}.", payment.price()))?;

        loop {
            if let Some(outcome) = payment.complete() {
                debug!(inserted = %payment.inserted(), "payment complete");
                return Ok(outcome);
            }

            let prompt = format!(
                "Insert money (you have inserted {}) or type '{}' to cancel: ",
                payment.inserted(),
                CANCEL_SENTINEL
            );
            let Some(input) = self.console.prompt(&prompt)? else {
                debug!("input closed during payment");
                return self.cancel_payment(payment);
            };
            if input.trim().eq_ignore_ascii_case(CANCEL_SENTINEL) {
                return self.cancel_payment(payment);
            }

            match Amount::parse(&input).and_then(|amount| payment.insert(amount)) {
                Ok(()) => {}
                Err(VendingError::InvalidAmount(raw)) => {
                    debug!(%raw, "rejected unparseable amount");
                    self.console.say("Please enter a valid number.")?;
                }
                Err(VendingError::NonPositiveAmount) => {
                    debug!("rejected non-positive amount");
                    self.console.say("Please insert a positive amount.")?;
                }
                Err(VendingError::AmountOverflow) => {
                    debug!("rejected amount beyond accepted range");
                    self.console.say("That amount is too large to accept.")?;
                }
                Err(VendingError::AmountTooSmall) => {
                    debug!("rejected amount below the smallest unit");
                    self.console.say("That amount is too small to accept.")?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn cancel_payment(&mut self, payment: Payment) -> Result<PaymentOutcome> {
        let outcome = payment.cancel();
        self.console
            .say("Transaction cancelled. Returning any inserted money.")?;
        if let PaymentOutcome::Cancelled { refunded } = outcome
            && refunded > Money::ZERO
        {
            self.console.say(format_args!("Returned: {refunded}"))?;
        }
        info!(?outcome, "payment cancelled");
        Ok(outcome)
    }

    /// Releases one unit of `code` and reports the change.
    pub fn dispense(&mut self, code: &str, change: Money) -> Result<()> {
        let item = self.catalog.dispense(code)?;
        debug!(code, remaining = item.quantity, %change, "item dispensed");
        self.console
            .say(format_args!("\nDispensing {}...", item.name))?;
        self.console.say("Enjoy your item!")?;
        self.console
            .say(format_args!("Your change is: {change}"))?;
        Ok(())
    }

    /// Prints a same-category suggestion when one is in stock.
    pub fn suggest(&mut self, code: &str) -> Result<()> {
        if let Some(item) = self.catalog.recommend(code) {
            self.console.say(format_args!(
                "\nYou might also like: {} ({}) for {}",
                item.name, item.code, item.price
            ))?;
        }
        Ok(())
    }

    /// Only an explicit `yes` continues; anything else, including exhausted
    /// input, ends the session.
    pub fn ask_continue(&mut self) -> Result<bool> {
        let answer = self
            .console
            .prompt("\nWould you like to buy another item? (yes/no): ")?;
        Ok(answer.is_some_and(|answer| answer.trim().eq_ignore_ascii_case(CONTINUE_ANSWER)))
    }
}
