//! WalletBook - a console personal finance tracker
//!
//! Users register with a login and password and manage named wallets. Each
//! wallet tracks income and expense categories, with optional budget limits
//! on expenses. The balance of a wallet always equals its total income minus
//! its total expenses; overspending is reported through advisory notices but
//! never blocked. Funds move between wallets and between users through a
//! fixed "Transfers" category, and all state is persisted as a single JSON
//! document.

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{WalletbookError, WalletbookResult};
