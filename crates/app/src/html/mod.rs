//! Embedded static assets served by the live map page.
//!
//! The assets are kept as `&'static str` so they ship inside the binary
//! without filesystem lookups.

pub mod icons;
pub mod map;
