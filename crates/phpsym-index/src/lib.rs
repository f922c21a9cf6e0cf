//! Project-wide symbol indexing and Symfony version detection.
//!
//! [`scheduler::throttle`] runs per-file extraction tasks under a sliding
//! concurrency window; [`indexer`] wires it to file enumeration; [`manifest`]
//! infers the Symfony major version from Composer manifests.

pub mod extract;
pub mod indexer;
pub mod jsonc;
pub mod manifest;
pub mod scheduler;
