use lilacash::cli::transactions::{AddArgs, EditArgs, ListArgs};
use lilacash::core::TransactionStore;
use lilacash::core::config::AppConfig;
use lilacash::core::ledger::load_transactions;
use lilacash::core::slots::{CURRENCY_SLOT, SlotStorage, TRANSACTIONS_SLOT};
use lilacash::store::disk::DiskSlots;
use lilacash::store::memory::MemorySlots;
use lilacash::{AppCommand, execute, run_command};
use tracing::info;

mod test_utils {
    use std::fs;
    use std::path::{Path, PathBuf};

    /// Writes a config pointing the data path into `dir` and returns its path.
    pub fn write_config(dir: &Path) -> PathBuf {
        let config_path = dir.join("config.yaml");
        let data_path = dir.join("data");
        let config_content = format!(
            r#"
        currency: "USD"
        data_path: "{}"
    "#,
            data_path.display()
        );
        fs::write(&config_path, config_content).expect("Failed to write config file");
        config_path
    }

    pub fn add(kind: &str, amount: &str, category: &str, date: &str) -> lilacash::AppCommand {
        lilacash::AppCommand::Add(lilacash::cli::transactions::AddArgs {
            kind: kind.to_string(),
            amount: amount.to_string(),
            category: category.to_string(),
            note: String::new(),
            date: Some(date.to_string()),
        })
    }
}

#[test_log::test]
fn test_full_app_flow_persists_to_disk() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_path = test_utils::write_config(dir.path());
    let config_path = config_path.to_str().unwrap();

    for command in [
        test_utils::add("income", "5000", "Salary", "2024-03-01"),
        test_utils::add("expense", "1200", "Rent", "2024-03-05"),
        test_utils::add("expense", "400", "Food", "2024-02-10"),
        AppCommand::List(ListArgs::default()),
        AppCommand::Balance,
        AppCommand::Categories,
        AppCommand::Monthly { months: 6 },
        AppCommand::Currency {
            code: Some("eur".to_string()),
        },
    ] {
        let result = run_command(command, Some(config_path));
        assert!(
            result.is_ok(),
            "Command failed with: {:?}",
            result.err()
        );
    }

    let config = AppConfig::load_from_path(config_path).unwrap();
    let slots = DiskSlots::open(&config.default_data_path().unwrap().join("slots")).unwrap();
    let transactions = load_transactions(&slots);
    info!(count = transactions.len(), "Reloaded transactions from disk");

    assert_eq!(transactions.len(), 3);
    assert_eq!(transactions[0].category, "Salary");
    assert_eq!(slots.read(CURRENCY_SLOT).unwrap().as_deref(), Some("EUR"));
}

#[test_log::test]
fn test_delete_unknown_id_fails() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_path = test_utils::write_config(dir.path());

    let result = run_command(
        AppCommand::Delete {
            id: "does-not-exist".to_string(),
        },
        Some(config_path.to_str().unwrap()),
    );
    assert!(result.is_err());
}

#[test_log::test]
fn test_missing_config_file_fails() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let missing = dir.path().join("missing.yaml");

    let result = run_command(AppCommand::Balance, Some(missing.to_str().unwrap()));
    assert!(result.is_err());
}

#[test_log::test]
fn test_corrupted_slot_starts_empty() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_path = test_utils::write_config(dir.path());
    let config = AppConfig::load_from_path(&config_path).unwrap();
    let slots_path = config.default_data_path().unwrap().join("slots");

    {
        let slots = DiskSlots::open(&slots_path).unwrap();
        slots.write(TRANSACTIONS_SLOT, "{not json").unwrap();
    }

    let result = run_command(
        test_utils::add("income", "10", "", "2024-01-01"),
        Some(config_path.to_str().unwrap()),
    );
    assert!(result.is_ok(), "Command failed with: {:?}", result.err());

    let slots = DiskSlots::open(&slots_path).unwrap();
    assert_eq!(load_transactions(&slots).len(), 1);
}

#[test_log::test]
fn test_execute_against_memory_slots() {
    let slots = MemorySlots::new();
    let config = AppConfig::default();
    let mut store = TransactionStore::open(&slots);

    execute(
        &mut store,
        &config,
        test_utils::add("income", "1000", "Salary", "2024-03-15"),
    )
    .unwrap();
    execute(
        &mut store,
        &config,
        test_utils::add("expense", "400", "Rent", "2024-03-20"),
    )
    .unwrap();

    let id = store.list()[1].id.clone();
    execute(
        &mut store,
        &config,
        AppCommand::Edit(EditArgs {
            id: id.clone(),
            note: Some("March rent".to_string()),
            ..Default::default()
        }),
    )
    .unwrap();
    assert_eq!(store.get(&id).unwrap().note, "March rent");

    let monthly = execute(&mut store, &config, AppCommand::Monthly { months: 6 }).unwrap();
    assert!(monthly.contains("Mar 2024"));
    assert!(monthly.contains("ARS 600.00"));

    let listing = execute(
        &mut store,
        &config,
        AppCommand::List(ListArgs {
            kind: "expense".to_string(),
            ..Default::default()
        }),
    )
    .unwrap();
    assert!(listing.contains("Rent"));
    assert!(!listing.contains("Salary"));

    execute(&mut store, &config, AppCommand::Delete { id }).unwrap();
    assert_eq!(load_transactions(&slots).len(), 1);
}

#[test_log::test]
fn test_add_rejects_non_positive_amount() {
    let slots = MemorySlots::new();
    let config = AppConfig::default();
    let mut store = TransactionStore::open(&slots);

    let result = execute(
        &mut store,
        &config,
        AppCommand::Add(AddArgs {
            kind: "expense".to_string(),
            amount: "0".to_string(),
            ..Default::default()
        }),
    );
    assert!(result.is_err());
    assert!(slots.read(TRANSACTIONS_SLOT).unwrap().is_none());
}
