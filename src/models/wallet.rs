//! Wallet model
//!
//! A wallet owns its income and expense categories and a cached balance.
//! Invariant: after every mutation, balance == sum(income) - sum(expenses).
//! Category names are unique within their kind.
//!
//! Budget overruns and a negative balance are advisory: the mutation always
//! applies, and the conditions come back as [`Notice`] values for the caller
//! to render. The domain layer never prints.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::{ExpenseCategory, IncomeCategory};
use super::money::Money;

/// Advisory condition raised by a wallet mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Expenses exceed income; balance is below zero
    NegativeBalance { balance: Money },
    /// An expense category's total has passed its budget limit
    OverLimit {
        category: String,
        spent: Money,
        limit: Money,
    },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::NegativeBalance { balance } => {
                write!(f, "Expenses exceed income! Balance: {}", balance)
            }
            Notice::OverLimit {
                category,
                spent,
                limit,
            } => write!(
                f,
                "Budget exceeded for category '{}': spent {} of {}",
                category, spent, limit
            ),
        }
    }
}

/// A named container of income and expense categories with a derived balance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    name: String,
    balance: Money,
    expense_categories: Vec<ExpenseCategory>,
    income_categories: Vec<IncomeCategory>,
}

impl Wallet {
    /// Create an empty wallet
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            balance: Money::zero(),
            expense_categories: Vec::new(),
            income_categories: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current balance (cached running sum)
    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn income_categories(&self) -> &[IncomeCategory] {
        &self.income_categories
    }

    pub fn expense_categories(&self) -> &[ExpenseCategory] {
        &self.expense_categories
    }

    /// Record income under a category, creating the category on first use.
    /// The category total and the balance update together.
    pub fn record_income(&mut self, category: &str, amount: Money) {
        match self.find_income_mut(category) {
            Some(existing) => existing.record(amount),
            None => self
                .income_categories
                .push(IncomeCategory::new(category, amount)),
        }
        self.balance += amount;
    }

    /// Record an expense under a category, creating the category on first use.
    ///
    /// The balance decreases even past zero; a negative balance and a limit
    /// overrun come back as notices, never as a rejection.
    pub fn record_expense(&mut self, category: &str, amount: Money) -> Vec<Notice> {
        let mut notices = Vec::new();

        match self.find_expense_mut(category) {
            Some(existing) => {
                existing.record(amount);
                if let Some(notice) = over_limit_notice(existing) {
                    notices.push(notice);
                }
            }
            None => self
                .expense_categories
                .push(ExpenseCategory::new(category, amount)),
        }

        self.balance -= amount;
        if self.balance.is_negative() {
            notices.push(Notice::NegativeBalance {
                balance: self.balance,
            });
        }
        notices
    }

    /// Set or update the budget limit for an expense category, creating an
    /// empty category when none exists. Re-checks the limit immediately.
    pub fn set_limit(&mut self, category: &str, limit: Money) -> Vec<Notice> {
        match self.find_expense_mut(category) {
            Some(existing) => existing.set_limit(limit),
            None => self
                .expense_categories
                .push(ExpenseCategory::with_limit(category, limit)),
        }

        self.expense_category(category)
            .and_then(over_limit_notice)
            .into_iter()
            .collect()
    }

    /// Look up an income category by exact name
    pub fn income_category(&self, name: &str) -> Option<&IncomeCategory> {
        self.income_categories.iter().find(|c| c.name() == name)
    }

    /// Look up an expense category by exact name
    pub fn expense_category(&self, name: &str) -> Option<&ExpenseCategory> {
        self.expense_categories.iter().find(|c| c.name() == name)
    }

    /// Total recorded income across all categories
    pub fn total_income(&self) -> Money {
        self.income_categories.iter().map(|c| c.total()).sum()
    }

    /// Total recorded expenses across all categories
    pub fn total_expenses(&self) -> Money {
        self.expense_categories.iter().map(|c| c.total()).sum()
    }

    fn find_income_mut(&mut self, name: &str) -> Option<&mut IncomeCategory> {
        self.income_categories.iter_mut().find(|c| c.name() == name)
    }

    fn find_expense_mut(&mut self, name: &str) -> Option<&mut ExpenseCategory> {
        self.expense_categories
            .iter_mut()
            .find(|c| c.name() == name)
    }
}

fn over_limit_notice(cat: &ExpenseCategory) -> Option<Notice> {
    match cat.limit() {
        Some(limit) if cat.total() > limit => Some(Notice::OverLimit {
            category: cat.name().to_string(),
            spent: cat.total(),
            limit,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cents(c: i64) -> Money {
        Money::from_cents(c)
    }

    #[test]
    fn test_balance_tracks_income_minus_expenses() {
        let mut wallet = Wallet::new("Main");
        wallet.record_income("Salary", cents(1000_00));
        wallet.record_expense("Food", cents(300_00));
        wallet.record_income("Gifts", cents(50_00));
        wallet.record_expense("Food", cents(100_00));

        assert_eq!(wallet.balance(), cents(650_00));
        assert_eq!(
            wallet.balance(),
            wallet.total_income() - wallet.total_expenses()
        );
    }

    #[test]
    fn test_categories_created_lazily_and_reused() {
        let mut wallet = Wallet::new("Main");
        wallet.record_income("Salary", cents(100));
        wallet.record_income("Salary", cents(200));
        wallet.record_expense("Food", cents(50));
        wallet.record_expense("Food", cents(25));

        assert_eq!(wallet.income_categories().len(), 1);
        assert_eq!(wallet.expense_categories().len(), 1);
        assert_eq!(wallet.income_category("Salary").unwrap().total(), cents(300));
        assert_eq!(wallet.expense_category("Food").unwrap().total(), cents(75));
    }

    #[test]
    fn test_negative_balance_is_advisory() {
        let mut wallet = Wallet::new("Main");
        wallet.record_income("Salary", cents(100));
        let notices = wallet.record_expense("Food", cents(150));

        // Mutation applied in full, with a notice.
        assert_eq!(wallet.balance(), cents(-50));
        assert_eq!(wallet.expense_category("Food").unwrap().total(), cents(150));
        assert_eq!(
            notices,
            vec![Notice::NegativeBalance {
                balance: cents(-50)
            }]
        );
    }

    #[test]
    fn test_over_limit_notice_on_expense() {
        let mut wallet = Wallet::new("Main");
        wallet.record_income("Salary", cents(1000_00));
        assert!(wallet.set_limit("Food", cents(100_00)).is_empty());

        assert!(wallet.record_expense("Food", cents(60_00)).is_empty());
        let notices = wallet.record_expense("Food", cents(60_00));
        assert_eq!(
            notices,
            vec![Notice::OverLimit {
                category: "Food".into(),
                spent: cents(120_00),
                limit: cents(100_00),
            }]
        );
    }

    #[test]
    fn test_set_limit_below_existing_spend_notices() {
        let mut wallet = Wallet::new("Main");
        wallet.record_income("Salary", cents(1000_00));
        wallet.record_expense("Food", cents(120_00));

        let notices = wallet.set_limit("Food", cents(100_00));
        assert_eq!(notices.len(), 1);
        assert!(matches!(notices[0], Notice::OverLimit { .. }));
    }

    #[test]
    fn test_set_limit_creates_empty_category() {
        let mut wallet = Wallet::new("Main");
        assert!(wallet.set_limit("Rent", cents(800_00)).is_empty());

        let cat = wallet.expense_category("Rent").unwrap();
        assert!(cat.total().is_zero());
        assert_eq!(cat.limit(), Some(cents(800_00)));
        // Limit-only categories do not move the balance.
        assert!(wallet.balance().is_zero());
    }

    #[test]
    fn test_no_limit_no_notice() {
        let mut wallet = Wallet::new("Main");
        wallet.record_income("Salary", cents(10_000_00));
        let notices = wallet.record_expense("Food", cents(9_000_00));
        assert!(notices.is_empty());
    }

    #[test]
    fn test_expense_can_raise_both_notices() {
        let mut wallet = Wallet::new("Main");
        wallet.set_limit("Food", cents(10_00));
        // First spend creates nothing new; second pushes over limit and negative.
        wallet.record_expense("Food", cents(5_00));
        let notices = wallet.record_expense("Food", cents(10_00));

        assert_eq!(notices.len(), 2);
        assert!(matches!(notices[0], Notice::OverLimit { .. }));
        assert!(matches!(notices[1], Notice::NegativeBalance { .. }));
    }

    #[test]
    fn test_serialization_round_trip() {
        let mut wallet = Wallet::new("Main");
        wallet.record_income("Salary", cents(500_00));
        wallet.record_expense("Food", cents(120_00));
        wallet.set_limit("Food", cents(200_00));

        let json = serde_json::to_string(&wallet).unwrap();
        let back: Wallet = serde_json::from_str(&json).unwrap();
        assert_eq!(wallet, back);
        assert_eq!(back.balance(), cents(380_00));
    }
}
