//! Shared contracts between the admin front end and the church REST API.
//!
//! Everything here is plain data plus the presentation rules derived from
//! it, so the crate builds and tests natively without a browser.

pub mod domain;
pub mod shared;
pub mod system;
