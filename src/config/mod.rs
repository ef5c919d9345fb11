//! Configuration and path management

pub mod paths;
pub mod settings;

pub use paths::WalletbookPaths;
pub use settings::Settings;
