mod objects;
pub mod serde_helpers;

pub use objects::*;
