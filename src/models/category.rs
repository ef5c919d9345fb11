//! Income and expense category models
//!
//! Categories are running totals keyed by name within a wallet. Totals only
//! ever increase; the balance effect of a recording lives in `Wallet`.
//! Expense categories may carry an optional budget limit.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// A named running total of recorded income
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeCategory {
    name: String,
    total: Money,
}

impl IncomeCategory {
    /// Create a category with an initial recorded amount
    pub fn new(name: impl Into<String>, initial: Money) -> Self {
        Self {
            name: name.into(),
            total: initial,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Total income recorded for this category
    pub fn total(&self) -> Money {
        self.total
    }

    /// Add to the running total
    pub fn record(&mut self, amount: Money) {
        self.total += amount;
    }
}

impl fmt::Display for IncomeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.total)
    }
}

/// A named running total of recorded expenses, with an optional budget limit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseCategory {
    name: String,
    total: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    limit: Option<Money>,
}

impl ExpenseCategory {
    /// Create a category with an initial recorded amount and no limit
    pub fn new(name: impl Into<String>, initial: Money) -> Self {
        Self {
            name: name.into(),
            total: initial,
            limit: None,
        }
    }

    /// Create a category with no spending and a budget limit
    pub fn with_limit(name: impl Into<String>, limit: Money) -> Self {
        Self {
            name: name.into(),
            total: Money::zero(),
            limit: Some(limit),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Total expenses recorded for this category
    pub fn total(&self) -> Money {
        self.total
    }

    pub fn limit(&self) -> Option<Money> {
        self.limit
    }

    /// Add to the running total
    pub fn record(&mut self, amount: Money) {
        self.total += amount;
    }

    /// Set or replace the budget limit
    pub fn set_limit(&mut self, limit: Money) {
        self.limit = Some(limit);
    }

    /// Remaining budget, when a limit is set
    pub fn remaining_budget(&self) -> Option<Money> {
        self.limit.map(|limit| limit - self.total)
    }

    /// True when a limit is set and the total has passed it.
    /// Without a limit the category is never flagged.
    pub fn is_over_limit(&self) -> bool {
        match self.limit {
            Some(limit) => self.total > limit,
            None => false,
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.remaining_budget() {
            Some(remaining) => write!(
                f,
                "{}: {}, remaining budget: {}",
                self.name, self.total, remaining
            ),
            None => write!(f, "{}: {}", self.name, self.total),
        }
    }
}
