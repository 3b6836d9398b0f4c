pub mod registry;
pub mod style;
