use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use walletbook::cli::Controller;
use walletbook::config::{Settings, WalletbookPaths};
use walletbook::services::FinanceService;
use walletbook::storage::UserStore;

#[derive(Parser)]
#[command(
    name = "walletbook",
    version,
    about = "Track income and expenses across wallets from the console"
)]
struct Cli {
    /// Directory holding the settings file and persisted user data
    #[arg(long, env = "WALLETBOOK_DATA_DIR")]
    data_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let paths = match cli.data_dir {
        Some(dir) => WalletbookPaths::with_base_dir(dir),
        None => WalletbookPaths::new()?,
    };
    paths.ensure_directories()?;

    let settings = Settings::load_or_create(&paths)?;
    let service = FinanceService::new(UserStore::new(paths.users_file()));

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut controller = Controller::new(service, settings, stdin.lock(), stdout.lock());
    controller.run()?;
    Ok(())
}
