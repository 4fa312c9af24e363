// Parsing utilities
pub mod parse_flag;

// JSON utilities
pub mod json_converter;

pub use parse_flag::parse_flag;
pub use json_converter::value_to_cell_text;
