use crate::core::slots::SlotStorage;
use anyhow::{Context, Result};
use fjall::{Config, Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use std::path::Path;
use tracing::debug;

const PARTITION_NAME: &str = "lilacash";

/// Slot storage backed by a fjall keyspace on disk.
///
/// Every write is synced to the journal before returning, so a slot that was
/// written successfully is still there after a restart.
pub struct DiskSlots {
    keyspace: Keyspace,
    partition: PartitionHandle,
}

impl DiskSlots {
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create data directory: {}", path.display()))?;

        let keyspace = Config::new(path)
            .open()
            .with_context(|| format!("Failed to open data store at {}", path.display()))?;
        let partition = keyspace
            .open_partition(PARTITION_NAME, PartitionCreateOptions::default())
            .context("Failed to open slot partition")?;
        debug!("Opened disk slots at {}", path.display());

        Ok(Self {
            keyspace,
            partition,
        })
    }
}

impl SlotStorage for DiskSlots {
    fn read(&self, key: &str) -> Result<Option<String>> {
        match self.partition.get(key)? {
            Some(value) => {
                debug!("Slot HIT for key: {key}");
                let text = String::from_utf8(value.to_vec())
                    .with_context(|| format!("Slot {key} does not hold valid UTF-8"))?;
                Ok(Some(text))
            }
            None => {
                debug!("Slot MISS for key: {key}");
                Ok(None)
            }
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.partition
            .insert(key, value)
            .with_context(|| format!("Failed to write slot {key}"))?;
        self.keyspace
            .persist(PersistMode::SyncAll)
            .with_context(|| format!("Failed to persist slot {key}"))?;
        debug!("Slot WRITE for key: {key}");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.partition
            .remove(key)
            .with_context(|| format!("Failed to remove slot {key}"))?;
        self.keyspace
            .persist(PersistMode::SyncAll)
            .with_context(|| format!("Failed to persist removal of slot {key}"))?;
        debug!("Slot REMOVE for key: {key}");
        Ok(())
    }
}
