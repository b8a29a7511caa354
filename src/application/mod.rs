//! Application layer driving a customer through the machine.
//!
//! This module defines the `Session`, which owns the catalog and runs the
//! interactive select / pay / dispense loop over a console.

pub mod session;
