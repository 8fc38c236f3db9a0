//! Invoice editing state
//!
//! The editor's state is an explicit value updated by [`InvoiceState::reduce`].
//! Every action that touches items or pricing policy recomputes the totals
//! before the new state is returned, so `totals` always reflects `items`.
//! Callers serialise actions; the reducer holds no shared state.

use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::{Currency, ExchangeRate, LineItemId, RateSource};

use crate::error::InvoicingError;
use crate::line_item::{LineItem, LineItemPatch, NewLineItem};
use crate::repricing::{reprice_items, Repricing};
use crate::totals::{compute_totals_with, InvoiceTotals, RoundOffPolicy, TaxMode};

/// Snapshot of an invoice being edited
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceState {
    pub currency: Currency,
    #[serde(default)]
    pub tax_mode: TaxMode,
    #[serde(default)]
    pub round_off_policy: RoundOffPolicy,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub totals: InvoiceTotals,
}

/// A mutation of the invoice state
#[derive(Debug, Clone)]
pub enum InvoiceAction {
    AddItem(NewLineItem),
    UpdateItem {
        id: LineItemId,
        patch: LineItemPatch,
    },
    RemoveItem(LineItemId),
    ClearItems,
    SetTaxMode(TaxMode),
    SetRoundOffPolicy(RoundOffPolicy),
    /// Installs the result of a currency change computed by [`reprice_items`]
    ApplyRepricing(Repricing),
}

impl InvoiceState {
    /// Creates an empty invoice in the given currency
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            tax_mode: TaxMode::default(),
            round_off_policy: RoundOffPolicy::default(),
            items: Vec::new(),
            totals: InvoiceTotals::zero(),
        }
    }

    pub fn with_round_off_policy(mut self, policy: RoundOffPolicy) -> Self {
        self.round_off_policy = policy;
        self.recompute_totals();
        self
    }

    /// Looks up an item by id
    pub fn item(&self, id: LineItemId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Applies an action and returns the next state
    pub fn reduce(mut self, action: InvoiceAction) -> Result<Self, InvoicingError> {
        match action {
            InvoiceAction::AddItem(draft) => {
                draft.validate()?;
                self.items.push(draft.into_line_item(self.currency));
            }
            InvoiceAction::UpdateItem { id, patch } => {
                let currency = self.currency;
                self.items
                    .iter_mut()
                    .find(|item| item.id == id)
                    .ok_or_else(|| InvoicingError::LineItemNotFound(id.to_string()))?
                    .apply(patch, currency)?;
            }
            InvoiceAction::RemoveItem(id) => {
                let before = self.items.len();
                self.items.retain(|item| item.id != id);
                if self.items.len() == before {
                    return Err(InvoicingError::LineItemNotFound(id.to_string()));
                }
            }
            InvoiceAction::ClearItems => self.items.clear(),
            InvoiceAction::SetTaxMode(mode) => self.tax_mode = mode,
            InvoiceAction::SetRoundOffPolicy(policy) => self.round_off_policy = policy,
            InvoiceAction::ApplyRepricing(repricing) => {
                if repricing.from != self.currency {
                    return Err(InvoicingError::StaleRepricing {
                        expected: self.currency,
                        found: repricing.from,
                    });
                }
                let repriced_ids = repricing.items.iter().map(|item| item.id);
                if !repriced_ids.eq(self.items.iter().map(|item| item.id)) {
                    return Err(InvoicingError::RepricingItemsChanged);
                }
                if repricing.is_converted() {
                    self.currency = repricing.to;
                    self.items = repricing.items;
                }
            }
        }

        self.recompute_totals();
        Ok(self)
    }

    fn recompute_totals(&mut self) {
        self.totals = compute_totals_with(
            &self.items,
            self.currency,
            self.tax_mode,
            self.round_off_policy,
        );
    }
}

/// Switches the invoice to `to`, re-pricing items before totals are recomputed
///
/// When no rate can be obtained the state keeps its current currency and
/// amounts.
pub async fn change_currency<S>(
    state: InvoiceState,
    to: Currency,
    rates: &[ExchangeRate],
    source: &S,
) -> Result<InvoiceState, InvoicingError>
where
    S: RateSource + ?Sized,
{
    let repricing = reprice_items(&state.items, state.currency, to, rates, source).await;
    debug!(
        from = %state.currency,
        %to,
        origin = ?repricing.origin,
        "Applying currency change"
    );
    state.reduce(InvoiceAction::ApplyRepricing(repricing))
}
