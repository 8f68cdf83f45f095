//! resub - Rule-driven bulk rewriting of source trees
//!
//! Named rule sets of ordered regular-expression substitutions are applied to
//! every eligible file under their root directories. Files are rewritten in
//! place through an atomic temp-file-and-rename, and each rule set reports how
//! many files changed and how many substitutions were made.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod adapters;
pub mod config;
pub mod core;
pub mod output;
pub mod paths;
pub mod runner;
pub mod selector;
