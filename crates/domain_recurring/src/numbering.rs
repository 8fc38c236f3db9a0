//! Invoice number sequencing

use crate::error::RecurringError;

/// Derives the invoice number `increment` steps after `base`
///
/// The trailing run of ASCII digits is treated as the counter and its width
/// is kept by zero-padding, so `INV-0001` + 1 is `INV-0002` and `INV-0099`
/// + 1 is `INV-0100`. A counter that outgrows its width simply widens
/// (`INV-99` + 1 is `INV-100`). A base with no trailing digits gets the
/// increment appended after a dash.
pub fn generate_invoice_number(base: &str, increment: u64) -> Result<String, RecurringError> {
    let base = base.trim();
    if base.is_empty() {
        return Err(RecurringError::InvalidInvoiceNumber(base.to_string()));
    }

    let prefix = base.trim_end_matches(|c: char| c.is_ascii_digit());
    let digits = &base[prefix.len()..];
    if digits.is_empty() {
        return Ok(format!("{}-{}", base, increment));
    }

    let next = digits
        .parse::<u128>()
        .ok()
        .and_then(|counter| counter.checked_add(u128::from(increment)))
        .ok_or_else(|| RecurringError::InvoiceNumberOverflow(base.to_string()))?;

    Ok(format!("{}{:0width$}", prefix, next, width = digits.len()))
}
