//! One leg of a transaction.

use chrono::NaiveDate;
use centime_shared::AccountId;
use serde::Serialize;

use crate::amount::Amount;

/// An account/amount pair inside a transaction.
///
/// A split without account is "unassigned"; the balancer creates such splits
/// to absorb imbalances.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Split {
    account: Option<AccountId>,
    amount: Amount,
    reconciliation_date: Option<NaiveDate>,
    /// Free-text note.
    pub memo: String,
    /// External reference, such as a bank statement line.
    pub reference: Option<String>,
    pub(crate) index: usize,
}

impl Split {
    /// Creates an unreconciled split.
    #[must_use]
    pub fn new(account: Option<AccountId>, amount: Amount) -> Self {
        Self {
            account,
            amount,
            ..Self::default()
        }
    }

    /// The account, if assigned.
    #[must_use]
    pub const fn account(&self) -> Option<AccountId> {
        self.account
    }

    /// The split amount.
    #[must_use]
    pub const fn amount(&self) -> &Amount {
        &self.amount
    }

    /// Date at which the split was reconciled with an external source.
    #[must_use]
    pub const fn reconciliation_date(&self) -> Option<NaiveDate> {
        self.reconciliation_date
    }

    /// Position of the split in its transaction.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Returns true if the split has been reconciled.
    #[must_use]
    pub const fn is_reconciled(&self) -> bool {
        self.reconciliation_date.is_some()
    }

    /// Returns true if the split has no account.
    #[must_use]
    pub const fn is_unassigned(&self) -> bool {
        self.account.is_none()
    }

    /// Marks the split reconciled on `date`, or clears it.
    pub fn set_reconciliation_date(&mut self, date: Option<NaiveDate>) {
        self.reconciliation_date = date;
    }

    /// Assigns the split to `account`. Changing account clears reconciliation.
    pub fn set_account(&mut self, account: Option<AccountId>) {
        if account != self.account {
            self.reconciliation_date = None;
            self.account = account;
        }
    }

    /// Replaces the amount. Changing currency clears reconciliation.
    pub fn set_amount(&mut self, amount: Amount) {
        if let Some(current) = self.amount.currency_code() {
            if amount.currency_code() != Some(current) {
                self.reconciliation_date = None;
            }
        }
        self.amount = amount;
    }
}
