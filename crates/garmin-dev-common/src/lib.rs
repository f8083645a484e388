#![deny(clippy::all)]

mod color;
pub mod exit_codes;

pub use color::Colors;
pub use color::init as color_init;
pub use exit_codes::ErrorCategory;
