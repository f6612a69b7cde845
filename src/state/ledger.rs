//! Bank ledger: the running record that makes money conservation exactly
//! checkable.
//!
//! Every transfer between the bank and a player is recorded here; transfers
//! between players are not (they cancel inside the cash sum). The audit
//! identity is
//!
//! ```text
//! sum(cash) == initial_total + payouts + write_offs - collections
//! ```
//!
//! where `write_offs` covers the shortfall absorbed when a bankrupt player's
//! negative balance is zeroed against a bank debt.

use serde::{Deserialize, Serialize};

/// Running record of bank/player money movement.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankLedger {
    /// Total the bank has paid out (GO salary, card credits, mortgage
    /// proceeds, improvement sale refunds).
    pub payouts: i64,

    /// Total the bank has collected (purchases, taxes, fines, build costs,
    /// unmortgage payments, auction awards).
    pub collections: i64,

    /// Uncollectable debt zeroed at bankruptcy.
    pub write_offs: i64,
}

impl BankLedger {
    /// Record a bank-to-player payout.
    pub fn pay(&mut self, amount: i64) {
        debug_assert!(amount >= 0);
        self.payouts += amount;
    }

    /// Record a player-to-bank collection.
    pub fn collect(&mut self, amount: i64) {
        debug_assert!(amount >= 0);
        self.collections += amount;
    }

    /// Record a bankruptcy write-off.
    pub fn write_off(&mut self, amount: i64) {
        debug_assert!(amount >= 0);
        self.write_offs += amount;
    }

    /// The cash total the players should hold, given their initial total.
    #[must_use]
    pub fn expected_total_cash(&self, initial_total: i64) -> i64 {
        initial_total + self.payouts + self.write_offs - self.collections
    }
}
