pub mod disk;
pub mod memory;

use crate::core::config::AppConfig;
use anyhow::Result;
use disk::DiskSlots;

/// Opens the on-disk slot storage at the configured data path.
pub fn open_slots(config: &AppConfig) -> Result<DiskSlots> {
    let path = config.default_data_path()?.join("slots");
    DiskSlots::open(&path)
}
