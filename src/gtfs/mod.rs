pub mod reader;
pub mod structure;
pub mod utils;
