//! Edges of the program: the console the customer talks to and the CSV
//! seed table the catalog is loaded from.

pub mod console;
pub mod csv;
