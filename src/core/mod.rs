pub mod geo;
pub mod transition;
pub mod viewport;
