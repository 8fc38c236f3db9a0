//! Invoicing Domain - totals, tax split and currency re-pricing
//!
//! This crate holds the numeric core behind invoice editing:
//!
//! - **Line items** whose `amount` is always derived from quantity and rate,
//!   rounded to the invoice currency's precision
//! - **Totals** with an even CGST/SGST split of each item's GST and a
//!   whole-unit round-off account
//! - **Re-pricing** of existing items when the invoice currency changes,
//!   falling back to a live rate source and leaving items untouched when no
//!   rate can be found
//! - **Invoice state** updated through a reducer so totals are recomputed
//!   after every mutation
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_invoicing::{InvoiceState, InvoiceAction, NewLineItem};
//!
//! let state = InvoiceState::new(Currency::INR)
//!     .reduce(InvoiceAction::AddItem(NewLineItem::new("Consulting", dec!(10), dec!(1322.10), dec!(18))))?;
//!
//! assert_eq!(state.totals.total, dec!(15601));
//! ```

pub mod line_item;
pub mod totals;
pub mod repricing;
pub mod store;
pub mod error;

pub use line_item::{checked_amount, derive_amount, LineItem, LineItemPatch, NewLineItem, MAX_LINE_AMOUNT};
pub use totals::{compute_totals, compute_totals_with, InvoiceTotals, RoundOffPolicy, TaxMode};
pub use repricing::{apply_conversion_factor, reconvert_items, reprice_items, RateOrigin, Repricing};
pub use store::{change_currency, InvoiceAction, InvoiceState};
pub use error::InvoicingError;
