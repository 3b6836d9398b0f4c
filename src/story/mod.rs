pub mod controller;
pub mod slide;
pub mod visibility;
