//! Core data models
//!
//! The domain is a small in-memory object graph: users own wallets, wallets
//! own income and expense categories, and every amount is a [`Money`] value.

pub mod category;
pub mod money;
pub mod user;
pub mod wallet;

pub use category::{ExpenseCategory, IncomeCategory};
pub use money::{Money, MoneyParseError};
pub use user::User;
pub use wallet::{Notice, Wallet};
