//! Transitpath CLI library.
//!
//! Terminal styling, output formatting, the GeoJSON map plotter and the
//! line-driven session used by the `transitpath-cli` binary.

pub mod output;
pub mod plot;
pub mod session;
pub mod terminal;

#[cfg(test)]
pub(crate) mod test_helpers;
