//! Pick terminal sprites whose dominant color matches a pywal color scheme.

pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod reference;

pub use error::{Error, Result};
