//! Command handlers

pub mod convert;
pub mod numbering;
pub mod schedule;
pub mod totals;
