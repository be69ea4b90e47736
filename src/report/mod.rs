//! Report renderers for classification results.
//!
//! - [`terminal`] — colored summary box and tables; respects `--verbose` / `--quiet`.
//! - [`migration`] — `repadd` commands for the ecosystem registry, with
//!   low-confidence repositories commented out for manual review.

pub mod migration;
pub mod terminal;
