//! Analysis modules.
//!
//! Dashboard statistics are computed from a read-only snapshot of the
//! response collection.

pub mod aggregator;

pub use aggregator::*;
