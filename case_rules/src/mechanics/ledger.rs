//! Token ledger - the single balance that gates unlocks and lines of inquiry.

use serde::{Deserialize, Serialize};

/// A non-negative token balance.
///
/// Debits never overdraw: the balance floors at zero. Callers check
/// [`TokenLedger::can_afford`] before requesting a paid action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenLedger {
    balance: u32,
    initial: u32,
}

impl TokenLedger {
    /// Create a ledger starting at the given balance.
    pub fn new(initial: u32) -> Self {
        Self {
            balance: initial,
            initial,
        }
    }

    /// Current balance.
    pub fn balance(&self) -> u32 {
        self.balance
    }

    /// The balance the ledger was opened with.
    pub fn initial(&self) -> u32 {
        self.initial
    }

    pub fn can_afford(&self, cost: u32) -> bool {
        self.balance >= cost
    }

    /// Remove tokens, clamping at zero.
    pub fn debit(&mut self, amount: u32) {
        self.balance = self.balance.saturating_sub(amount);
    }

    /// Add tokens.
    pub fn credit(&mut self, amount: u32) {
        self.balance = self.balance.saturating_add(amount);
    }
}

impl Default for TokenLedger {
    fn default() -> Self {
        Self::new(0)
    }
}
