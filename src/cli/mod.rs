//! Console command surface
//!
//! Commands are literal case-sensitive tokens read one per line. `menu`,
//! `lo` and `x` are global: they are recognized at every input point.

pub mod controller;

pub use controller::Controller;

use std::fmt;

/// A console command token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `su` - register a new account
    SignUp,
    /// `si` - log in to an existing account
    SignIn,
    /// `menu` - show the command menu
    Menu,
    /// `x` - persist and exit
    Exit,
    /// `lo` - persist and log out
    LogOut,
    /// `cw` - create a new wallet
    CreateWallet,
    /// `chgw` - switch the active wallet
    ChangeWallet,
    /// `dw` - delete a wallet
    DeleteWallet,
    /// `ainc` - record income
    AddIncome,
    /// `aexp` - record an expense
    AddExpense,
    /// `bal` - show the active wallet balance
    Balance,
    /// `increp` - income report
    IncomeReport,
    /// `exprep` - expenses report
    ExpenseReport,
    /// `frep` - full report
    FullReport,
    /// `cb` - set a category budget limit
    SetBudget,
    /// `wtrans` - transfer to another wallet
    WalletTransfer,
    /// `utrans` - transfer to another user
    UserTransfer,
    /// `allcat` - sentinel meaning "no filter" in report selection
    AllCategories,
}

impl Command {
    /// The literal token for this command
    pub const fn token(&self) -> &'static str {
        match self {
            Command::SignUp => "su",
            Command::SignIn => "si",
            Command::Menu => "menu",
            Command::Exit => "x",
            Command::LogOut => "lo",
            Command::CreateWallet => "cw",
            Command::ChangeWallet => "chgw",
            Command::DeleteWallet => "dw",
            Command::AddIncome => "ainc",
            Command::AddExpense => "aexp",
            Command::Balance => "bal",
            Command::IncomeReport => "increp",
            Command::ExpenseReport => "exprep",
            Command::FullReport => "frep",
            Command::SetBudget => "cb",
            Command::WalletTransfer => "wtrans",
            Command::UserTransfer => "utrans",
            Command::AllCategories => "allcat",
        }
    }

    /// Parse a token; case-sensitive exact match
    pub fn parse(input: &str) -> Option<Self> {
        const ALL: &[Command] = &[
            Command::SignUp,
            Command::SignIn,
            Command::Menu,
            Command::Exit,
            Command::LogOut,
            Command::CreateWallet,
            Command::ChangeWallet,
            Command::DeleteWallet,
            Command::AddIncome,
            Command::AddExpense,
            Command::Balance,
            Command::IncomeReport,
            Command::ExpenseReport,
            Command::FullReport,
            Command::SetBudget,
            Command::WalletTransfer,
            Command::UserTransfer,
            Command::AllCategories,
        ];
        ALL.iter().copied().find(|c| c.token() == input)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}
