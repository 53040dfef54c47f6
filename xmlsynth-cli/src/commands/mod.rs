//! CLI command implementations

pub mod generate;
pub mod inspect;

pub use generate::GenerateCommand;
pub use inspect::InspectCommand;
