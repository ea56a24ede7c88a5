//! Opaline Core
//!
//! Foundation types shared across the Opaline engine crates.

pub mod color;
pub mod logging;

pub use color::Color;
