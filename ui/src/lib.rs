//! Shared crate for Restwell. Holds the text layer that the landing page and
//! insight cards use to present health metrics.

pub mod core;
