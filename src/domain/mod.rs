//! Domain types for the vending machine: money, items, the catalog and
//! payments. Nothing in here touches the console.

pub mod catalog;
pub mod item;
pub mod money;
pub mod payment;
