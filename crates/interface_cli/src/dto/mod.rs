//! Command input and output documents

pub mod invoice;
pub mod schedule;

pub use invoice::*;
pub use schedule::*;
