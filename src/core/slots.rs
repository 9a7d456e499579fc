//! Named, string-valued persistent slots.

use anyhow::Result;

/// Slot holding the serialized transaction collection.
pub const TRANSACTIONS_SLOT: &str = "lilacash:transactions";

/// Slot holding the display currency code.
pub const CURRENCY_SLOT: &str = "lilacash:currency";

/// A key-value store of string slots that survive process restarts.
///
/// A successful `write` replaces the whole slot value; there are no partial
/// writes or merges.
pub trait SlotStorage {
    fn read(&self, key: &str) -> Result<Option<String>>;

    fn write(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;
}

impl<T: SlotStorage + ?Sized> SlotStorage for &T {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
