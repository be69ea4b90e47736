//! Decide, per repository, whether it belongs to Aztec or plain Noir.
//!
//! - [`locator`] — code search for every `Nargo.toml` in a repository.
//! - [`catalog`] — fixed fallback paths used when search is down or empty.
//! - [`fetcher`] — fetch and parse one manifest.
//! - [`analyzer`] — pure per-manifest verdict.
//! - [`engine`] — orchestrates the above into a [`ClassificationResult`](crate::models::ClassificationResult).

pub mod analyzer;
pub mod catalog;
pub mod engine;
pub mod fetcher;
pub mod locator;

pub use engine::Classifier;
