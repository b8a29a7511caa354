use vendsim::application::session::{Farewell, Session};
use vendsim::domain::catalog::Catalog;
use vendsim::interfaces::csv::catalog_reader::seed_catalog;

/// Joins prompt answers into newline-terminated stdin text.
pub fn script(lines: &[&str]) -> String {
    lines.iter().map(|line| format!("{line}\n")).collect()
}

/// Runs a full session over the seed catalog and returns how it ended, the
/// catalog afterwards and everything written to the console.
pub fn run_script(input: &str) -> (Farewell, Catalog, String) {
    let catalog = seed_catalog().expect("seed catalog should load");
    let mut session = Session::new(catalog, input.as_bytes(), Vec::new());
    let farewell = session.run().expect("session should not fail on in-memory I/O");
    let (catalog, output) = session.into_parts();
    (farewell, catalog, String::from_utf8(output).unwrap())
}
