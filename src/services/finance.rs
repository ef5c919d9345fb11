//! Finance service
//!
//! All domain operations for one interactive session: registration, login,
//! wallet management, recording income and expenses, budget limits, reports,
//! and fund transfers. The session context (authenticated user, active
//! wallet) is an explicit [`Session`] value owned by the service; operations
//! that need it fail with `NoActiveUser` / `NoActiveWallet` when it is unset.
//! The console flow guarantees those states cannot be reached, so surfacing
//! one means a broken command flow rather than bad user input.

use crate::error::{WalletbookError, WalletbookResult};
use crate::models::{Money, Notice, User, Wallet};
use crate::storage::UserStore;

/// Fixed category name used for both legs of a fund transfer
pub const TRANSFERS_CATEGORY: &str = "Transfers";

/// Session context: who is logged in, which wallet is active.
///
/// The user is tracked by index (users are only ever appended, so indices are
/// stable); the wallet is tracked by name because the wallet list shrinks on
/// deletion, and the active wallet itself can never be deleted.
#[derive(Debug, Default)]
struct Session {
    user: Option<usize>,
    wallet: Option<String>,
}

/// One row of an income or expense report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub name: String,
    pub amount: Money,
    /// Remaining budget for limited expense categories
    pub remaining: Option<Money>,
}

/// Per-category report with a total over the included categories
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Report {
    pub entries: Vec<ReportEntry>,
    pub total: Money,
    /// Filter names that matched no category; reported, never fatal
    pub missing: Vec<String>,
}

/// Stateful service holding the user list and the session context
pub struct FinanceService {
    users: Vec<User>,
    session: Session,
    store: UserStore,
}

impl FinanceService {
    /// Create a service, loading any persisted users from the store
    pub fn new(store: UserStore) -> Self {
        let users = store.load_all();
        Self {
            users,
            session: Session::default(),
            store,
        }
    }

    /// Number of known users
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Register a new user and make them current.
    /// Returns false (and changes nothing) when the login is taken.
    pub fn register_user(&mut self, login: &str, password: &str) -> bool {
        if self.users.iter().any(|u| u.login() == login) {
            return false;
        }
        self.users.push(User::new(login, password));
        self.session.user = Some(self.users.len() - 1);
        self.session.wallet = None;
        true
    }

    /// Log in on an exact login + password match
    pub fn log_in(&mut self, login: &str, password: &str) -> bool {
        match self
            .users
            .iter()
            .position(|u| u.login() == login && u.verify_password(password))
        {
            Some(idx) => {
                self.session.user = Some(idx);
                self.session.wallet = None;
                true
            }
            None => false,
        }
    }

    /// Clear the session context
    pub fn log_out(&mut self) {
        self.session = Session::default();
    }

    /// Login of the authenticated user
    pub fn current_login(&self) -> WalletbookResult<&str> {
        Ok(self.current_user()?.login())
    }

    /// Name of the active wallet, when one is selected
    pub fn active_wallet_name(&self) -> Option<&str> {
        self.session.wallet.as_deref()
    }

    /// Add an empty wallet to the current user.
    /// Returns false when the name is already taken.
    pub fn add_wallet(&mut self, name: &str) -> WalletbookResult<bool> {
        let user = self.current_user_mut()?;
        if user.has_wallet(name) {
            return Ok(false);
        }
        user.add_wallet(name);
        Ok(true)
    }

    /// Select the active wallet by name.
    /// Returns false when no such wallet exists for the current user.
    pub fn set_active_wallet(&mut self, name: &str) -> WalletbookResult<bool> {
        if self.current_user()?.has_wallet(name) {
            self.session.wallet = Some(name.to_string());
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Names of the current user's wallets, in creation order
    pub fn wallet_names(&self) -> WalletbookResult<Vec<String>> {
        Ok(self
            .current_user()?
            .wallets()
            .iter()
            .map(|w| w.name().to_string())
            .collect())
    }

    /// Record income in the active wallet
    pub fn record_income(&mut self, category: &str, amount: Money) -> WalletbookResult<()> {
        ensure_positive(amount, "Income amount")?;
        self.current_wallet_mut()?.record_income(category, amount);
        Ok(())
    }

    /// Record an expense in the active wallet; advisory notices come back
    /// but the mutation always applies
    pub fn record_expense(&mut self, category: &str, amount: Money) -> WalletbookResult<Vec<Notice>> {
        ensure_positive(amount, "Expense amount")?;
        Ok(self.current_wallet_mut()?.record_expense(category, amount))
    }

    /// Set or update a budget limit for an expense category
    pub fn set_category_limit(&mut self, category: &str, limit: Money) -> WalletbookResult<Vec<Notice>> {
        ensure_positive(limit, "Budget limit")?;
        Ok(self.current_wallet_mut()?.set_limit(category, limit))
    }

    /// Balance of the active wallet
    pub fn balance(&self) -> WalletbookResult<Money> {
        Ok(self.current_wallet()?.balance())
    }

    /// Income category names of the active wallet
    pub fn income_category_names(&self) -> WalletbookResult<Vec<String>> {
        Ok(self
            .current_wallet()?
            .income_categories()
            .iter()
            .map(|c| c.name().to_string())
            .collect())
    }

    /// Expense category names of the active wallet
    pub fn expense_category_names(&self) -> WalletbookResult<Vec<String>> {
        Ok(self
            .current_wallet()?
            .expense_categories()
            .iter()
            .map(|c| c.name().to_string())
            .collect())
    }

    /// Income report over all categories, or over the named subset.
    /// Unmatched filter names land in `Report::missing`.
    pub fn income_report(&self, filter: Option<&[String]>) -> WalletbookResult<Report> {
        let wallet = self.current_wallet()?;
        let all: Vec<ReportEntry> = wallet
            .income_categories()
            .iter()
            .map(|c| ReportEntry {
                name: c.name().to_string(),
                amount: c.total(),
                remaining: None,
            })
            .collect();
        Ok(build_report(all, filter))
    }

    /// Expense report over all categories, or over the named subset
    pub fn expense_report(&self, filter: Option<&[String]>) -> WalletbookResult<Report> {
        let wallet = self.current_wallet()?;
        let all: Vec<ReportEntry> = wallet
            .expense_categories()
            .iter()
            .map(|c| ReportEntry {
                name: c.name().to_string(),
                amount: c.total(),
                remaining: c.remaining_budget(),
            })
            .collect();
        Ok(build_report(all, filter))
    }

    /// Transfer funds from the active wallet to another wallet of the same
    /// user. Records a "Transfers" expense in the source and a "Transfers"
    /// income in the target.
    pub fn transfer_between_wallets(
        &mut self,
        target: &str,
        amount: Money,
    ) -> WalletbookResult<Vec<Notice>> {
        ensure_positive(amount, "Transfer amount")?;
        let source_name = self.active_wallet_required()?;

        if target == source_name {
            return Err(WalletbookError::Validation(
                "The target wallet must not match the current one".into(),
            ));
        }

        let available = self.current_wallet()?.balance();
        if available < amount {
            return Err(WalletbookError::InsufficientFunds {
                wallet: source_name,
                needed: amount,
                available,
            });
        }

        let user = self.current_user_mut()?;
        match user.wallet_mut(target) {
            Some(wallet) => wallet.record_income(TRANSFERS_CATEGORY, amount),
            None => return Err(WalletbookError::wallet_not_found(target)),
        }

        let source = user
            .wallet_mut(&source_name)
            .ok_or(WalletbookError::NoActiveWallet)?;
        Ok(source.record_expense(TRANSFERS_CATEGORY, amount))
    }

    /// Transfer funds from the active wallet to a named wallet of another
    /// user. A transfer to one's own login is blocked only when the wallet
    /// name also matches the active wallet; the same login with a different
    /// wallet is an ordinary transfer.
    pub fn transfer_between_users(
        &mut self,
        target_login: &str,
        target_wallet: &str,
        amount: Money,
    ) -> WalletbookResult<Vec<Notice>> {
        ensure_positive(amount, "Transfer amount")?;
        let source_name = self.active_wallet_required()?;

        let available = self.current_wallet()?.balance();
        if available < amount {
            return Err(WalletbookError::InsufficientFunds {
                wallet: source_name,
                needed: amount,
                available,
            });
        }

        if target_wallet == source_name && target_login == self.current_login()? {
            return Err(WalletbookError::Validation(
                "The target wallet must not match the current one".into(),
            ));
        }

        let target_idx = self
            .users
            .iter()
            .position(|u| u.login() == target_login)
            .ok_or_else(|| WalletbookError::user_not_found(target_login))?;
        let target_user = self
            .users
            .get_mut(target_idx)
            .ok_or_else(|| WalletbookError::user_not_found(target_login))?;
        match target_user.wallet_mut(target_wallet) {
            Some(wallet) => wallet.record_income(TRANSFERS_CATEGORY, amount),
            None => return Err(WalletbookError::wallet_not_found(target_wallet)),
        }

        let source = self.current_wallet_mut()?;
        Ok(source.record_expense(TRANSFERS_CATEGORY, amount))
    }

    /// Delete one of the current user's wallets. The active wallet cannot be
    /// deleted.
    pub fn delete_wallet(&mut self, name: &str) -> WalletbookResult<()> {
        let active = self.active_wallet_required()?;
        if name == active {
            return Err(WalletbookError::Validation(
                "Cannot delete the active wallet".into(),
            ));
        }

        if self.current_user_mut()?.remove_wallet(name) {
            Ok(())
        } else {
            Err(WalletbookError::wallet_not_found(name))
        }
    }

    /// Write the full user list to storage, replacing prior contents
    pub fn persist(&self) -> WalletbookResult<()> {
        self.store.save_all(&self.users)
    }

    fn current_user(&self) -> WalletbookResult<&User> {
        self.session
            .user
            .and_then(|idx| self.users.get(idx))
            .ok_or(WalletbookError::NoActiveUser)
    }

    fn current_user_mut(&mut self) -> WalletbookResult<&mut User> {
        let idx = self.session.user.ok_or(WalletbookError::NoActiveUser)?;
        self.users.get_mut(idx).ok_or(WalletbookError::NoActiveUser)
    }

    fn current_wallet(&self) -> WalletbookResult<&Wallet> {
        let name = self
            .session
            .wallet
            .as_deref()
            .ok_or(WalletbookError::NoActiveWallet)?;
        self.current_user()?
            .wallet(name)
            .ok_or(WalletbookError::NoActiveWallet)
    }

    fn current_wallet_mut(&mut self) -> WalletbookResult<&mut Wallet> {
        let name = self.active_wallet_required()?;
        self.current_user_mut()?
            .wallet_mut(&name)
            .ok_or(WalletbookError::NoActiveWallet)
    }

    fn active_wallet_required(&self) -> WalletbookResult<String> {
        self.session
            .wallet
            .clone()
            .ok_or(WalletbookError::NoActiveWallet)
    }
}

fn ensure_positive(amount: Money, what: &str) -> WalletbookResult<()> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(WalletbookError::Validation(format!(
            "{} must be positive",
            what
        )))
    }
}

fn build_report(all: Vec<ReportEntry>, filter: Option<&[String]>) -> Report {
    let (entries, missing) = match filter {
        None => (all, Vec::new()),
        Some(names) => {
            let mut entries = Vec::new();
            let mut missing = Vec::new();
            for name in names {
                match all.iter().find(|e| &e.name == name) {
                    Some(entry) => entries.push(entry.clone()),
                    None => missing.push(name.clone()),
                }
            }
            (entries, missing)
        }
    };
    let total = entries.iter().map(|e| e.amount).sum();
    Report {
        entries,
        total,
        missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn cents(c: i64) -> Money {
        Money::from_cents(c)
    }

    fn service() -> (TempDir, FinanceService) {
        let temp_dir = TempDir::new().unwrap();
        let store = UserStore::new(temp_dir.path().join("users.json"));
        (temp_dir, FinanceService::new(store))
    }

    fn service_with_wallet() -> (TempDir, FinanceService) {
        let (temp_dir, mut svc) = service();
        assert!(svc.register_user("alice", "pw"));
        assert!(svc.add_wallet("Main").unwrap());
        assert!(svc.set_active_wallet("Main").unwrap());
        (temp_dir, svc)
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let (_t, mut svc) = service();
        assert!(svc.register_user("a", "p"));
        assert!(!svc.register_user("a", "anything"));
        assert_eq!(svc.user_count(), 1);
    }

    #[test]
    fn test_login_requires_exact_credentials() {
        let (_t, mut svc) = service();
        svc.register_user("alice", "pw");
        svc.log_out();

        assert!(!svc.log_in("alice", "wrong"));
        assert!(!svc.log_in("bob", "pw"));
        assert!(svc.log_in("alice", "pw"));
        assert_eq!(svc.current_login().unwrap(), "alice");
    }

    #[test]
    fn test_operations_require_session() {
        let (_t, mut svc) = service();
        assert!(matches!(
            svc.add_wallet("Main"),
            Err(WalletbookError::NoActiveUser)
        ));

        svc.register_user("alice", "pw");
        assert!(matches!(
            svc.record_income("Salary", cents(100)),
            Err(WalletbookError::NoActiveWallet)
        ));
        assert!(matches!(svc.balance(), Err(WalletbookError::NoActiveWallet)));
    }

    #[test]
    fn test_duplicate_wallet_rejected() {
        let (_t, mut svc) = service_with_wallet();
        assert!(!svc.add_wallet("Main").unwrap());
        assert_eq!(svc.wallet_names().unwrap(), vec!["Main"]);
    }

    #[test]
    fn test_set_active_wallet_unknown_name() {
        let (_t, mut svc) = service_with_wallet();
        assert!(!svc.set_active_wallet("Nope").unwrap());
        assert_eq!(svc.active_wallet_name(), Some("Main"));
    }

    #[test]
    fn test_balance_invariant() {
        let (_t, mut svc) = service_with_wallet();
        svc.record_income("Salary", cents(1000_00)).unwrap();
        svc.record_expense("Food", cents(300_00)).unwrap();
        svc.record_expense("Rent", cents(500_00)).unwrap();
        assert_eq!(svc.balance().unwrap(), cents(200_00));
    }

    #[test]
    fn test_non_positive_amounts_rejected() {
        let (_t, mut svc) = service_with_wallet();
        assert!(svc.record_income("Salary", cents(0)).is_err());
        assert!(svc.record_expense("Food", cents(-100)).is_err());
        assert!(svc.set_category_limit("Food", cents(0)).is_err());
        assert!(svc.transfer_between_wallets("Other", cents(-5)).is_err());
    }

    #[test]
    fn test_expense_past_zero_notices_but_applies() {
        let (_t, mut svc) = service_with_wallet();
        let notices = svc.record_expense("Food", cents(50_00)).unwrap();
        assert_eq!(notices.len(), 1);
        assert_eq!(svc.balance().unwrap(), cents(-50_00));
    }

    #[test]
    fn test_limit_notices() {
        let (_t, mut svc) = service_with_wallet();
        svc.record_income("Salary", cents(1000_00)).unwrap();
        svc.record_expense("Food", cents(120_00)).unwrap();

        let notices = svc.set_category_limit("Food", cents(100_00)).unwrap();
        assert_eq!(notices.len(), 1);

        // Raising the limit clears the condition.
        let notices = svc.set_category_limit("Food", cents(200_00)).unwrap();
        assert!(notices.is_empty());
    }

    #[test]
    fn test_wallet_transfer_moves_funds_with_transfer_legs() {
        let (_t, mut svc) = service_with_wallet();
        svc.record_income("Salary", cents(100_00)).unwrap();
        svc.add_wallet("Savings").unwrap();

        svc.transfer_between_wallets("Savings", cents(40_00)).unwrap();

        assert_eq!(svc.balance().unwrap(), cents(60_00));
        let expense = svc.expense_report(None).unwrap();
        assert_eq!(expense.entries[0].name, TRANSFERS_CATEGORY);
        assert_eq!(expense.entries[0].amount, cents(40_00));

        svc.set_active_wallet("Savings").unwrap();
        assert_eq!(svc.balance().unwrap(), cents(40_00));
        let income = svc.income_report(None).unwrap();
        assert_eq!(income.entries[0].name, TRANSFERS_CATEGORY);
        assert_eq!(income.entries[0].amount, cents(40_00));
    }

    #[test]
    fn test_wallet_transfer_insufficient_funds_changes_nothing() {
        let (_t, mut svc) = service_with_wallet();
        svc.record_income("Salary", cents(100_00)).unwrap();
        svc.add_wallet("Savings").unwrap();

        let err = svc
            .transfer_between_wallets("Savings", cents(200_00))
            .unwrap_err();
        assert!(matches!(err, WalletbookError::InsufficientFunds { .. }));

        assert_eq!(svc.balance().unwrap(), cents(100_00));
        svc.set_active_wallet("Savings").unwrap();
        assert_eq!(svc.balance().unwrap(), cents(0));
    }

    #[test]
    fn test_wallet_transfer_to_self_rejected() {
        let (_t, mut svc) = service_with_wallet();
        svc.record_income("Salary", cents(100_00)).unwrap();
        let err = svc.transfer_between_wallets("Main", cents(10_00)).unwrap_err();
        assert!(matches!(err, WalletbookError::Validation(_)));
    }

    #[test]
    fn test_wallet_transfer_unknown_target() {
        let (_t, mut svc) = service_with_wallet();
        svc.record_income("Salary", cents(100_00)).unwrap();
        let err = svc.transfer_between_wallets("Nope", cents(10_00)).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(svc.balance().unwrap(), cents(100_00));
    }

    #[test]
    fn test_user_transfer() {
        let (_t, mut svc) = service();
        svc.register_user("bob", "pw");
        svc.add_wallet("BobMain").unwrap();
        svc.log_out();

        svc.register_user("alice", "pw");
        svc.add_wallet("Main").unwrap();
        svc.set_active_wallet("Main").unwrap();
        svc.record_income("Salary", cents(100_00)).unwrap();

        svc.transfer_between_users("bob", "BobMain", cents(30_00))
            .unwrap();
        assert_eq!(svc.balance().unwrap(), cents(70_00));

        svc.log_out();
        svc.log_in("bob", "pw");
        svc.set_active_wallet("BobMain").unwrap();
        assert_eq!(svc.balance().unwrap(), cents(30_00));
    }

    #[test]
    fn test_user_transfer_self_rule() {
        let (_t, mut svc) = service_with_wallet();
        svc.record_income("Salary", cents(100_00)).unwrap();
        svc.add_wallet("Savings").unwrap();

        // Same login and same wallet: blocked.
        let err = svc
            .transfer_between_users("alice", "Main", cents(10_00))
            .unwrap_err();
        assert!(matches!(err, WalletbookError::Validation(_)));

        // Same login, different wallet: plain inter-wallet transfer.
        svc.transfer_between_users("alice", "Savings", cents(10_00))
            .unwrap();
        assert_eq!(svc.balance().unwrap(), cents(90_00));
    }

    #[test]
    fn test_user_transfer_missing_target() {
        let (_t, mut svc) = service_with_wallet();
        svc.record_income("Salary", cents(100_00)).unwrap();

        let err = svc
            .transfer_between_users("nobody", "Main", cents(10_00))
            .unwrap_err();
        assert!(err.is_not_found());

        svc.add_wallet("Savings").unwrap();
        let err = svc
            .transfer_between_users("alice", "Nope", cents(10_00))
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(svc.balance().unwrap(), cents(100_00));
    }

    #[test]
    fn test_delete_wallet_rules() {
        let (_t, mut svc) = service_with_wallet();
        svc.add_wallet("Savings").unwrap();

        let err = svc.delete_wallet("Main").unwrap_err();
        assert!(matches!(err, WalletbookError::Validation(_)));

        svc.delete_wallet("Savings").unwrap();
        assert_eq!(svc.wallet_names().unwrap(), vec!["Main"]);
        assert!(svc.delete_wallet("Savings").unwrap_err().is_not_found());
    }

    #[test]
    fn test_report_filter() {
        let (_t, mut svc) = service_with_wallet();
        svc.record_income("Salary", cents(1000_00)).unwrap();
        svc.record_income("Gifts", cents(50_00)).unwrap();

        let filter = vec!["Salary".to_string(), "Bonus".to_string()];
        let report = svc.income_report(Some(&filter)).unwrap();

        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.entries[0].name, "Salary");
        assert_eq!(report.total, cents(1000_00));
        assert_eq!(report.missing, vec!["Bonus"]);

        // No filter returns everything.
        let full = svc.income_report(None).unwrap();
        assert_eq!(full.entries.len(), 2);
        assert_eq!(full.total, cents(1050_00));
        assert!(full.missing.is_empty());
    }

    #[test]
    fn test_expense_report_remaining_budget() {
        let (_t, mut svc) = service_with_wallet();
        svc.record_income("Salary", cents(1000_00)).unwrap();
        svc.record_expense("Food", cents(80_00)).unwrap();
        svc.set_category_limit("Food", cents(100_00)).unwrap();
        svc.record_expense("Misc", cents(20_00)).unwrap();

        let report = svc.expense_report(None).unwrap();
        assert_eq!(report.entries[0].remaining, Some(cents(20_00)));
        assert_eq!(report.entries[1].remaining, None);
        assert_eq!(report.total, cents(100_00));
    }

    #[test]
    fn test_persist_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("users.json");

        let mut svc = FinanceService::new(UserStore::new(path.clone()));
        svc.register_user("alice", "pw");
        svc.add_wallet("Main").unwrap();
        svc.set_active_wallet("Main").unwrap();
        svc.record_income("Salary", cents(500_00)).unwrap();
        svc.set_category_limit("Food", cents(100_00)).unwrap();
        svc.persist().unwrap();

        let mut reloaded = FinanceService::new(UserStore::new(path));
        assert_eq!(reloaded.user_count(), 1);
        assert!(reloaded.log_in("alice", "pw"));
        assert!(reloaded.set_active_wallet("Main").unwrap());
        assert_eq!(reloaded.balance().unwrap(), cents(500_00));
        let report = reloaded.expense_report(None).unwrap();
        assert_eq!(report.entries[0].remaining, Some(cents(100_00)));
    }
}
