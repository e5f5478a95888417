//! # Purchase Wizard
//!
//! The three-step purchase state machine, with no I/O.
//!
//! ## State Diagram
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ┌──────────┐  advance (product selected)  ┌──────────┐               │
//! │   │  SELECT  │ ───────────────────────────► │   PAY    │               │
//! │   │ (start)  │ ◄─────────────────────────── │          │               │
//! │   └──────────┘            back              └────┬─────┘               │
//! │        ▲                                         │ complete_payment    │
//! │        │                reset                    ▼                     │
//! │        └──────────────────────────────────── ┌──────────┐              │
//! │                                              │   DONE   │              │
//! │                                              └──────────┘              │
//! │                                                                         │
//! │   Money in PAY is two-phase:                                            │
//! │     propose_money(d) ──► pending = d ──┬── commit_money → inserted += d │
//! │                                        └── cancel_money → discarded     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Payment
//! Confirming payment is split in two so the caller can do the network work
//! in between:
//!
//! 1. [`PurchaseSession::prepare_payment`] checks funds and builds a
//!    [`PaymentPlan`] (stock patch and transaction record).
//! 2. The caller persists the plan.
//! 3. [`PurchaseSession::complete_payment`] moves to `DONE`.
//!
//! If persisting fails the session simply stays in `PAY`.

use chrono::{DateTime, Utc};
use std::fmt;

use crate::denomination::Denomination;
use crate::error::{PurchaseError, PurchaseResult};
use crate::money::Money;
use crate::types::{NewTransaction, Product, ProductPatch, RecordId};

// =============================================================================
// Step
// =============================================================================

/// Current wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Step {
    #[default]
    Select,
    Pay,
    Done,
}

impl Step {
    /// 1-based position shown in the step indicator.
    pub const fn number(&self) -> u8 {
        match self {
            Step::Select => 1,
            Step::Pay => 2,
            Step::Done => 3,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Step::Select => "select",
            Step::Pay => "pay",
            Step::Done => "done",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Payment Plan
// =============================================================================

/// Everything that must be written to the store for one purchase.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentPlan {
    /// Product whose stock is decremented.
    pub product_id: RecordId,

    /// `PATCH /products/:id` body. Carries the absolute new stock.
    pub stock_patch: ProductPatch,

    /// Stock after this purchase, as computed from the selection snapshot.
    pub remaining_stock: u32,

    /// `moneyInserted - price`.
    pub change: Money,

    /// `POST /transactions` body.
    pub transaction: NewTransaction,
}

// =============================================================================
// Purchase Session
// =============================================================================

/// One traversal of the purchase wizard.
#[derive(Debug, Clone, Default)]
pub struct PurchaseSession {
    step: Step,
    selected: Option<Product>,
    money_inserted: Money,
    pending: Option<Denomination>,
    change: Option<Money>,
    error: Option<PurchaseError>,
}

impl PurchaseSession {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn selected(&self) -> Option<&Product> {
        self.selected.as_ref()
    }

    pub fn money_inserted(&self) -> Money {
        self.money_inserted
    }

    pub fn pending(&self) -> Option<Denomination> {
        self.pending
    }

    /// Change handed back. Set only once the purchase is `DONE`.
    pub fn change(&self) -> Option<Money> {
        self.change
    }

    /// Last business-rule failure, cleared by the next successful action.
    pub fn error(&self) -> Option<&PurchaseError> {
        self.error.as_ref()
    }

    /// Amount still missing, or `None` when inserted money covers the price
    /// (or nothing is selected).
    pub fn shortfall(&self) -> Option<Money> {
        let product = self.selected.as_ref()?;
        self.money_inserted.shortfall_to(product.price)
    }

    /// Change the customer would get if they paid now, once money suffices.
    pub fn change_preview(&self) -> Option<Money> {
        let product = self.selected.as_ref()?;
        if self.money_inserted >= product.price {
            Some(self.money_inserted - product.price)
        } else {
            None
        }
    }

    // -------------------------------------------------------------------------
    // SELECT
    // -------------------------------------------------------------------------

    /// Selects `product`.
    ///
    /// An out-of-stock product is refused: the error is recorded and the
    /// previous selection stays.
    pub fn select_product(&mut self, product: &Product) -> PurchaseResult<()> {
        self.require_step(Step::Select, "select a product")?;

        if !product.is_available() {
            let err = PurchaseError::OutOfStock {
                name: product.name.clone(),
            };
            self.error = Some(err.clone());
            return Err(err);
        }

        self.selected = Some(product.clone());
        self.error = None;
        Ok(())
    }

    /// Moves `SELECT → PAY` when a product is selected. Returns whether the
    /// step changed; anything else is a no-op.
    pub fn advance(&mut self) -> bool {
        if self.step == Step::Select && self.selected.is_some() {
            self.step = Step::Pay;
            true
        } else {
            false
        }
    }

    // -------------------------------------------------------------------------
    // PAY
    // -------------------------------------------------------------------------

    /// Stages a note for confirmation. Nothing is added yet.
    pub fn propose_money(&mut self, denomination: Denomination) -> PurchaseResult<()> {
        self.require_step(Step::Pay, "insert money")?;

        if let Some(pending) = self.pending {
            return Err(PurchaseError::MoneyAlreadyPending {
                pending: pending.value(),
            });
        }

        self.pending = Some(denomination);
        Ok(())
    }

    /// Discards the staged note. `money_inserted` is untouched.
    pub fn cancel_money(&mut self) -> Option<Denomination> {
        self.pending.take()
    }

    /// Adds the staged note to `money_inserted` and returns the new total.
    pub fn commit_money(&mut self) -> PurchaseResult<Money> {
        self.require_step(Step::Pay, "insert money")?;

        let denomination = self.pending.take().ok_or(PurchaseError::NoPendingMoney)?;
        self.money_inserted += denomination.value();
        self.error = None;
        Ok(self.money_inserted)
    }

    /// Checks funds and builds the writes for this purchase.
    ///
    /// On insufficient funds the error (with the exact shortfall) is also
    /// recorded on the session.
    pub fn prepare_payment(&mut self, now: DateTime<Utc>) -> PurchaseResult<PaymentPlan> {
        self.require_step(Step::Pay, "confirm payment")?;

        let product = self.selected.as_ref().ok_or(PurchaseError::NoProductSelected)?;

        if let Some(shortfall) = self.money_inserted.shortfall_to(product.price) {
            let err = PurchaseError::InsufficientFunds {
                price: product.price,
                inserted: self.money_inserted,
                shortfall,
            };
            self.error = Some(err.clone());
            return Err(err);
        }

        let change = self.money_inserted - product.price;
        let remaining_stock = product.stock.saturating_sub(1);

        Ok(PaymentPlan {
            product_id: product.id.clone(),
            stock_patch: ProductPatch::stock(remaining_stock),
            remaining_stock,
            change,
            transaction: NewTransaction {
                product_id: product.id.clone(),
                product_name: product.name.clone(),
                price: product.price,
                money_inserted: self.money_inserted,
                change,
                timestamp: now,
            },
        })
    }

    /// Records a persisted plan and moves to `DONE`.
    pub fn complete_payment(&mut self, plan: &PaymentPlan) -> PurchaseResult<()> {
        self.require_step(Step::Pay, "confirm payment")?;

        if let Some(product) = self.selected.as_mut() {
            product.stock = plan.remaining_stock;
        }
        self.change = Some(plan.change);
        self.error = None;
        self.step = Step::Done;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// Returns `PAY → SELECT`, clearing money and error but keeping the
    /// selected product. No-op from any other step.
    pub fn back(&mut self) -> bool {
        if self.step != Step::Pay {
            return false;
        }

        self.step = Step::Select;
        self.money_inserted = Money::zero();
        self.pending = None;
        self.error = None;
        true
    }

    /// Starts over from `SELECT` with an empty session.
    pub fn reset(&mut self) {
        *self = PurchaseSession::default();
    }

    fn require_step(&self, expected: Step, operation: &'static str) -> PurchaseResult<()> {
        if self.step == expected {
            Ok(())
        } else {
            Err(PurchaseError::InvalidStep {
                operation,
                step: self.step.as_str(),
            })
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
