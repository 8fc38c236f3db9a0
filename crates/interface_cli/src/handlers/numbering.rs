//! Invoice numbering handler

use domain_recurring::generate_invoice_number;

use crate::dto::InvoiceNumberResponse;
use crate::error::CliResult;

/// Derives the invoice number `increment` steps after `base`
pub fn next_invoice_number(base: &str, increment: u64) -> CliResult<InvoiceNumberResponse> {
    let invoice_number = generate_invoice_number(base, increment)?;
    Ok(InvoiceNumberResponse {
        base: base.to_string(),
        increment,
        invoice_number,
    })
}
