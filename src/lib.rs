pub mod cli;
pub mod core;
pub mod store;

use crate::cli::transactions::{AddArgs, EditArgs, ListArgs};
use crate::core::config::AppConfig;
use crate::core::{SlotStorage, TransactionStore};
use anyhow::Result;
use tracing::{debug, info};

pub enum AppCommand {
    Add(AddArgs),
    Edit(EditArgs),
    Delete { id: String },
    List(ListArgs),
    Balance,
    Categories,
    Monthly { months: usize },
    Currency { code: Option<String> },
}

/// Loads the config, opens the on-disk store and runs `command`, printing
/// its output.
pub fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("LilaCash starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let slots = store::open_slots(&config)?;
    let mut store = TransactionStore::open(slots);

    let output = execute(&mut store, &config, command)?;
    println!("{output}");
    Ok(())
}

/// Runs `command` against an already opened store and returns the rendered output.
pub fn execute<S: SlotStorage>(
    store: &mut TransactionStore<S>,
    config: &AppConfig,
    command: AppCommand,
) -> Result<String> {
    let currency = cli::currency::display_currency(store.slots(), config);

    match command {
        AppCommand::Add(args) => cli::transactions::add(store, args, &currency),
        AppCommand::Edit(args) => cli::transactions::edit(store, args, &currency),
        AppCommand::Delete { id } => cli::transactions::delete(store, &id),
        AppCommand::List(args) => cli::transactions::list(store.list(), &args, &currency),
        AppCommand::Balance => Ok(cli::summary::balance(store.list(), &currency)),
        AppCommand::Categories => Ok(cli::summary::categories(store.list())),
        AppCommand::Monthly { months } => {
            Ok(cli::summary::monthly(store.list(), months, &currency))
        }
        AppCommand::Currency { code } => {
            cli::currency::run(store.slots(), config, code.as_deref())
        }
    }
}
