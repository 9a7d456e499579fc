use crate::core::slots::SlotStorage;
use anyhow::{Result, anyhow};
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::debug;

/// In-memory slot storage using HashMap and RwLock
#[derive(Default)]
pub struct MemorySlots {
    inner: RwLock<HashMap<String, String>>,
}

impl MemorySlots {
    /// Creates an empty MemorySlots instance
    pub fn new() -> Self {
        Self::default()
    }
}

impl SlotStorage for MemorySlots {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let slots = self
            .inner
            .read()
            .map_err(|_| anyhow!("Memory slots lock poisoned"))?;
        let value = slots.get(key).cloned();
        if value.is_some() {
            debug!("Slot HIT for key: {key}");
        } else {
            debug!("Slot MISS for key: {key}");
        }
        Ok(value)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let mut slots = self
            .inner
            .write()
            .map_err(|_| anyhow!("Memory slots lock poisoned"))?;
        debug!("Slot WRITE for key: {key}");
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut slots = self
            .inner
            .write()
            .map_err(|_| anyhow!("Memory slots lock poisoned"))?;
        slots.remove(key);
        debug!("Slot REMOVE for key: {key}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_read_write() {
        let slots = MemorySlots::new();

        // Initially, slots are empty
        assert!(slots.read("key1").unwrap().is_none());

        slots.write("key1", "value").unwrap();
        assert_eq!(slots.read("key1").unwrap().as_deref(), Some("value"));

        // Get a non-existent key
        assert!(slots.read("key2").unwrap().is_none());
    }

    #[test]
    fn test_slots_overwrite() {
        let slots = MemorySlots::new();

        slots.write("key1", "first").unwrap();
        slots.write("key1", "second").unwrap();
        assert_eq!(slots.read("key1").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_slots_remove() {
        let slots = MemorySlots::new();

        slots.write("key1", "value").unwrap();
        slots.remove("key1").unwrap();
        assert!(slots.read("key1").unwrap().is_none());

        // Removing a missing key is not an error
        slots.remove("key1").unwrap();
    }
}
