//! Interactive console controller
//!
//! Drives the session state machine over line-oriented input:
//! welcome -> authentication (bounded retries) -> wallet selection ->
//! command loop. Generic over the input and output streams so whole
//! sessions can be tested against in-memory buffers.
//!
//! The global commands `menu`, `lo` and `x` are recognized at every prompt.
//! Logout and exit both flush state to storage first; a session-state error
//! escaping a handler also flushes before propagating.

use std::io::{BufRead, Write};

use tracing::warn;

use crate::cli::Command;
use crate::config::Settings;
use crate::display;
use crate::error::{WalletbookError, WalletbookResult};
use crate::models::{Money, Notice};
use crate::services::FinanceService;

/// A line of input, with global commands already intercepted
enum Input {
    Text(String),
    Logout,
    Exit,
}

/// Where a sub-flow leaves the session state machine
enum Flow {
    /// Flow finished; the session moves forward
    Ready,
    /// Back to the welcome state (failed auth, invalid auth command)
    Back,
    /// Global logout was entered
    Logout,
    /// Global exit was entered, or input reached EOF
    Exit,
}

/// Read one line; global logout/exit short-circuit the enclosing flow.
macro_rules! prompt {
    ($self:ident) => {
        match $self.read_input()? {
            Input::Text(line) => line,
            Input::Logout => return Ok(Flow::Logout),
            Input::Exit => return Ok(Flow::Exit),
        }
    };
}

/// Prompt for a positive amount, retrying until one parses.
macro_rules! prompt_amount {
    ($self:ident, $label:expr) => {{
        loop {
            writeln!($self.out, "{}", $label)?;
            let line = prompt!($self);
            match Money::parse(&line) {
                Ok(amount) if amount.is_positive() => break amount,
                _ => writeln!($self.out, "Failed to read the amount. Please try again.")?,
            }
        }
    }};
}

/// Console front end over the finance service
pub struct Controller<R, W> {
    input: R,
    out: W,
    service: FinanceService,
    settings: Settings,
}

impl<R: BufRead, W: Write> Controller<R, W> {
    pub fn new(service: FinanceService, settings: Settings, input: R, out: W) -> Self {
        Self {
            input,
            out,
            service,
            settings,
        }
    }

    /// Run the session until exit or EOF. State is persisted on logout, on
    /// exit, and before a fatal error is surfaced.
    pub fn run(&mut self) -> WalletbookResult<()> {
        loop {
            self.show_welcome()?;

            let flow = match self.auth_flow() {
                Ok(flow) => flow,
                Err(err) => return self.fail_with_save(err),
            };
            let flow = match flow {
                Flow::Back => continue,
                Flow::Ready => match self.command_loop() {
                    Ok(flow) => flow,
                    Err(err) => return self.fail_with_save(err),
                },
                other => other,
            };

            match flow {
                Flow::Logout => {
                    self.save_reporting()?;
                    self.service.log_out();
                }
                _ => break,
            }
        }

        self.save_reporting()?;
        Ok(())
    }

    // -- authentication ----------------------------------------------------

    fn auth_flow(&mut self) -> WalletbookResult<Flow> {
        let line = prompt!(self);
        match Command::parse(&line) {
            Some(Command::SignUp) => match self.register_flow()? {
                Flow::Ready => self.create_wallet_flow(true),
                other => Ok(other),
            },
            Some(Command::SignIn) => match self.login_flow()? {
                Flow::Ready => self.select_wallet_flow(),
                other => Ok(other),
            },
            _ => {
                writeln!(
                    self.out,
                    "You entered an invalid command! Please enter {} or {}.",
                    Command::SignIn,
                    Command::SignUp
                )?;
                Ok(Flow::Back)
            }
        }
    }

    fn register_flow(&mut self) -> WalletbookResult<Flow> {
        let mut attempts = self.settings.auth_attempts;
        while attempts > 0 {
            writeln!(self.out, "Enter login: ")?;
            let login = prompt!(self);
            writeln!(self.out, "Enter password: ")?;
            let password = prompt!(self);

            if self.service.register_user(&login, &password) {
                writeln!(self.out, "Registration completed successfully.")?;
                return Ok(Flow::Ready);
            }
            attempts -= 1;
            writeln!(
                self.out,
                "Registration attempt failed: a user with this login already exists. \
                 Attempts remaining: {}",
                attempts
            )?;
        }
        Ok(Flow::Back)
    }

    fn login_flow(&mut self) -> WalletbookResult<Flow> {
        let mut attempts = self.settings.auth_attempts;
        while attempts > 0 {
            writeln!(self.out, "Enter login: ")?;
            let login = prompt!(self);
            writeln!(self.out, "Enter password: ")?;
            let password = prompt!(self);

            if self.service.log_in(&login, &password) {
                writeln!(self.out, "Hello, {}!", login)?;
                return Ok(Flow::Ready);
            }
            attempts -= 1;
            writeln!(
                self.out,
                "Login attempt failed. Attempts remaining: {}",
                attempts
            )?;
        }
        Ok(Flow::Back)
    }

    // -- wallet selection --------------------------------------------------

    /// Prompt for a new wallet name until one is created. After
    /// registration the first wallet becomes active immediately.
    fn create_wallet_flow(&mut self, select_after: bool) -> WalletbookResult<Flow> {
        loop {
            writeln!(self.out, "Enter the name of the new wallet: ")?;
            let name = prompt!(self);

            if self.service.add_wallet(&name)? {
                writeln!(self.out, "Wallet successfully created.")?;
                if select_after {
                    self.service.set_active_wallet(&name)?;
                }
                return Ok(Flow::Ready);
            }
            writeln!(
                self.out,
                "A wallet with this name already exists! Please try again."
            )?;
        }
    }

    fn select_wallet_flow(&mut self) -> WalletbookResult<Flow> {
        loop {
            writeln!(self.out, "Please select a wallet.")?;
            self.show_wallet_list()?;
            writeln!(
                self.out,
                "If you want to create a new wallet, enter {}",
                Command::CreateWallet
            )?;

            let line = prompt!(self);
            if line == Command::CreateWallet.token() {
                match self.create_wallet_flow(false)? {
                    Flow::Ready => continue,
                    other => return Ok(other),
                }
            }
            if self.service.set_active_wallet(&line)? {
                return Ok(Flow::Ready);
            }
            writeln!(
                self.out,
                "A wallet with this name does not exist. Please try again."
            )?;
        }
    }

    // -- command loop ------------------------------------------------------

    fn command_loop(&mut self) -> WalletbookResult<Flow> {
        self.show_menu()?;
        loop {
            writeln!(self.out, "Enter command: ")?;
            let line = prompt!(self);

            let flow = match Command::parse(&line) {
                Some(Command::Balance) => self.show_balance()?,
                Some(Command::AddIncome) => self.add_income_flow()?,
                Some(Command::AddExpense) => self.add_expense_flow()?,
                Some(Command::SetBudget) => self.set_budget_flow()?,
                Some(Command::IncomeReport) => self.income_report_flow()?,
                Some(Command::ExpenseReport) => self.expense_report_flow()?,
                Some(Command::FullReport) => self.full_report()?,
                Some(Command::CreateWallet) => self.create_wallet_flow(false)?,
                Some(Command::ChangeWallet) => self.change_wallet_flow()?,
                Some(Command::DeleteWallet) => self.delete_wallet_flow()?,
                Some(Command::WalletTransfer) => self.wallet_transfer_flow()?,
                Some(Command::UserTransfer) => self.user_transfer_flow()?,
                _ => {
                    writeln!(self.out, "Invalid command! Please try again.")?;
                    continue;
                }
            };

            match flow {
                Flow::Ready => writeln!(self.out, "The operation was successful.")?,
                other => return Ok(other),
            }
        }
    }

    fn show_balance(&mut self) -> WalletbookResult<Flow> {
        let balance = self.service.balance()?;
        writeln!(
            self.out,
            "Balance: {}",
            balance.format_with_symbol(&self.settings.currency_symbol)
        )?;
        Ok(Flow::Ready)
    }

    fn add_income_flow(&mut self) -> WalletbookResult<Flow> {
        writeln!(self.out, "Enter income category: ")?;
        let category = prompt!(self);
        let amount = prompt_amount!(self, "Enter amount: ");
        self.service.record_income(&category, amount)?;
        Ok(Flow::Ready)
    }

    fn add_expense_flow(&mut self) -> WalletbookResult<Flow> {
        writeln!(self.out, "Enter expense category: ")?;
        let category = prompt!(self);
        let amount = prompt_amount!(self, "Enter amount: ");
        let notices = self.service.record_expense(&category, amount)?;
        self.show_notices(&notices)?;
        Ok(Flow::Ready)
    }

    fn set_budget_flow(&mut self) -> WalletbookResult<Flow> {
        writeln!(self.out, "Enter the expense category: ")?;
        let category = prompt!(self);
        let limit = prompt_amount!(self, "Enter the budget: ");
        let notices = self.service.set_category_limit(&category, limit)?;
        self.show_notices(&notices)?;
        Ok(Flow::Ready)
    }

    fn income_report_flow(&mut self) -> WalletbookResult<Flow> {
        writeln!(
            self.out,
            "Select income categories for the report (enter names separated by spaces)."
        )?;
        writeln!(
            self.out,
            "If you want a report for all categories, enter the command {}",
            Command::AllCategories
        )?;
        let names = self.service.income_category_names()?;
        writeln!(
            self.out,
            "{}",
            display::format_category_names("Your income categories:", &names)
        )?;

        let line = prompt!(self);
        let report = match parse_filter(&line) {
            None => self.service.income_report(None)?,
            Some(filter) => self.service.income_report(Some(&filter))?,
        };
        writeln!(
            self.out,
            "{}",
            display::format_report("Income by category:", &report, &self.settings.currency_symbol)
        )?;
        Ok(Flow::Ready)
    }

    fn expense_report_flow(&mut self) -> WalletbookResult<Flow> {
        writeln!(
            self.out,
            "Select expense categories for the report (enter names separated by spaces)."
        )?;
        writeln!(
            self.out,
            "If you want a report for all categories, enter the command {}",
            Command::AllCategories
        )?;
        let names = self.service.expense_category_names()?;
        writeln!(
            self.out,
            "{}",
            display::format_category_names("Your expense categories:", &names)
        )?;

        let line = prompt!(self);
        let report = match parse_filter(&line) {
            None => self.service.expense_report(None)?,
            Some(filter) => self.service.expense_report(Some(&filter))?,
        };
        writeln!(
            self.out,
            "{}",
            display::format_report(
                "Expenses by category:",
                &report,
                &self.settings.currency_symbol
            )
        )?;
        Ok(Flow::Ready)
    }

    fn full_report(&mut self) -> WalletbookResult<Flow> {
        self.show_balance()?;

        let income = self.service.income_report(None)?;
        writeln!(
            self.out,
            "{}",
            display::format_report("Income by category:", &income, &self.settings.currency_symbol)
        )?;

        let expenses = self.service.expense_report(None)?;
        writeln!(
            self.out,
            "{}",
            display::format_report(
                "Expenses by category:",
                &expenses,
                &self.settings.currency_symbol
            )
        )?;
        Ok(Flow::Ready)
    }

    fn change_wallet_flow(&mut self) -> WalletbookResult<Flow> {
        loop {
            writeln!(self.out, "Enter the name of the wallet you want to switch to: ")?;
            self.show_wallet_list()?;
            let name = prompt!(self);

            if self.service.set_active_wallet(&name)? {
                return Ok(Flow::Ready);
            }
            writeln!(
                self.out,
                "A wallet with this name does not exist. Please try again."
            )?;
        }
    }

    fn delete_wallet_flow(&mut self) -> WalletbookResult<Flow> {
        loop {
            writeln!(self.out, "Enter the name of the wallet you want to delete.")?;
            self.show_wallet_list()?;
            let name = prompt!(self);

            match self.service.delete_wallet(&name) {
                Ok(()) => return Ok(Flow::Ready),
                Err(err) if err.is_recoverable() => {
                    writeln!(self.out, "{}", err)?;
                    writeln!(self.out, "The operation failed. Please try again.")?;
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn wallet_transfer_flow(&mut self) -> WalletbookResult<Flow> {
        loop {
            writeln!(
                self.out,
                "Choose the wallet to which you want to transfer funds."
            )?;
            self.show_wallet_list()?;
            let target = prompt!(self);
            let amount = prompt_amount!(self, "Enter the amount: ");

            match self.service.transfer_between_wallets(&target, amount) {
                Ok(notices) => {
                    self.show_notices(&notices)?;
                    return Ok(Flow::Ready);
                }
                Err(err) if err.is_recoverable() => {
                    writeln!(self.out, "{}", err)?;
                    writeln!(self.out, "The operation failed. Please try again.")?;
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn user_transfer_flow(&mut self) -> WalletbookResult<Flow> {
        loop {
            writeln!(self.out, "Select the user to whom you want to transfer funds.")?;
            let login = prompt!(self);
            writeln!(
                self.out,
                "Enter the name of the user's wallet to which you want to transfer funds."
            )?;
            let wallet = prompt!(self);
            let amount = prompt_amount!(self, "Enter the amount: ");

            match self.service.transfer_between_users(&login, &wallet, amount) {
                Ok(notices) => {
                    self.show_notices(&notices)?;
                    return Ok(Flow::Ready);
                }
                Err(err) if err.is_recoverable() => {
                    writeln!(self.out, "{}", err)?;
                    writeln!(self.out, "The operation failed. Please try again.")?;
                }
                Err(err) => return Err(err),
            }
        }
    }

    // -- input and output helpers ------------------------------------------

    /// Read one non-empty line. `menu` renders the menu in place; `lo` and
    /// `x` short-circuit as global commands; EOF behaves like exit.
    fn read_input(&mut self) -> WalletbookResult<Input> {
        loop {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(Input::Exit);
            }
            let line = line.trim();
            if line.is_empty() {
                writeln!(self.out, "Empty input. Please try again.")?;
                continue;
            }

            match Command::parse(line) {
                Some(Command::Menu) => self.show_menu()?,
                Some(Command::LogOut) => return Ok(Input::Logout),
                Some(Command::Exit) => return Ok(Input::Exit),
                _ => return Ok(Input::Text(line.to_string())),
            }
        }
    }

    fn show_welcome(&mut self) -> WalletbookResult<()> {
        writeln!(
            self.out,
            "If you don't have an account, enter {} to register or enter the command {} \
             to log in to an existing account.",
            Command::SignUp,
            Command::SignIn
        )?;
        writeln!(self.out, "To exit the application, enter {}.", Command::Exit)?;
        writeln!(
            self.out,
            "The list of available commands is accessible at: {}.",
            Command::Menu
        )?;
        Ok(())
    }

    fn show_menu(&mut self) -> WalletbookResult<()> {
        writeln!(self.out, "List of available commands: ")?;
        let entries = [
            (Command::CreateWallet, "create a new wallet"),
            (Command::ChangeWallet, "switch wallet"),
            (Command::DeleteWallet, "delete a wallet"),
            (Command::AddIncome, "record income"),
            (Command::AddExpense, "record expenses"),
            (Command::Balance, "get current balance information"),
            (Command::IncomeReport, "get income report"),
            (Command::ExpenseReport, "get expenses report"),
            (Command::FullReport, "get full report"),
            (Command::SetBudget, "set budget for a category"),
            (Command::WalletTransfer, "transfer funds to another wallet"),
            (Command::UserTransfer, "transfer funds to another user"),
            (Command::LogOut, "log out of the account"),
        ];
        for (command, description) in entries {
            writeln!(self.out, "{} - {};", command, description)?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn show_wallet_list(&mut self) -> WalletbookResult<()> {
        let names = self.service.wallet_names()?;
        writeln!(self.out, "{}", display::format_wallet_list(&names))?;
        Ok(())
    }

    fn show_notices(&mut self, notices: &[Notice]) -> WalletbookResult<()> {
        if !notices.is_empty() {
            writeln!(self.out, "{}", display::format_notices(notices))?;
        }
        Ok(())
    }

    /// Persist, reporting a failed write without ending the session
    fn save_reporting(&mut self) -> WalletbookResult<()> {
        if let Err(err) = self.service.persist() {
            warn!(%err, "failed to save user data");
            writeln!(self.out, "Failed to save data: {}", err)?;
        }
        Ok(())
    }

    /// Final save before surfacing a fatal error
    fn fail_with_save(&mut self, err: WalletbookError) -> WalletbookResult<()> {
        let _ = self.save_reporting();
        Err(err)
    }
}

/// Split a report selection line into filter names; the `allcat` sentinel
/// as the first token means "no filter".
fn parse_filter(line: &str) -> Option<Vec<String>> {
    let names: Vec<String> = line.split_whitespace().map(str::to_string).collect();
    match names.first() {
        Some(first) if first == Command::AllCategories.token() => None,
        _ => Some(names),
    }
}
