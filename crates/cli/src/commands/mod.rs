//! CLI Commands

pub mod column;
pub mod dimension;

pub use column::ColumnCommand;
pub use dimension::DimensionCommand;
