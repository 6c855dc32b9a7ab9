//! Command implementations for the gridlines CLI.

pub mod count;
pub mod generate;

pub use count::{CountCommand, CountReport};
pub use generate::{GenerateCommand, GenerateConfig, GenerateStats};
