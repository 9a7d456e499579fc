use crate::core::config::AppConfig;
use crate::core::slots::{CURRENCY_SLOT, SlotStorage};
use anyhow::{Context, Result, bail};
use tracing::{info, warn};

/// The stored display currency, or the configured one when nothing is stored.
pub fn display_currency(slots: &impl SlotStorage, config: &AppConfig) -> String {
    match slots.read(CURRENCY_SLOT) {
        Ok(Some(code)) if !code.trim().is_empty() => code,
        Ok(_) => config.currency.clone(),
        Err(e) => {
            warn!("Failed to read currency preference: {e}");
            config.currency.clone()
        }
    }
}

/// Shows the display currency, or stores a new one when `code` is given.
pub fn run(slots: &impl SlotStorage, config: &AppConfig, code: Option<&str>) -> Result<String> {
    let Some(code) = code else {
        return Ok(format!(
            "Display currency: {}",
            display_currency(slots, config)
        ));
    };

    let code = code.trim().to_uppercase();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        bail!("Currency must be a three letter code like ARS or USD, got '{code}'");
    }
    slots
        .write(CURRENCY_SLOT, &code)
        .context("Failed to store currency preference")?;
    info!("Display currency set to {code}");
    Ok(format!("Display currency set to {code}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemorySlots;

    #[test]
    fn test_display_currency_defaults_to_config() {
        let slots = MemorySlots::new();
        let config = AppConfig::default();
        assert_eq!(display_currency(&slots, &config), "ARS");

        slots.write(CURRENCY_SLOT, "  ").unwrap();
        assert_eq!(display_currency(&slots, &config), "ARS");
    }

    #[test]
    fn test_set_currency() {
        let slots = MemorySlots::new();
        let config = AppConfig::default();

        let out = run(&slots, &config, Some("usd")).unwrap();
        assert!(out.contains("USD"));
        assert_eq!(display_currency(&slots, &config), "USD");

        let out = run(&slots, &config, None).unwrap();
        assert_eq!(out, "Display currency: USD");
    }

    #[test]
    fn test_set_currency_rejects_invalid_code() {
        let slots = MemorySlots::new();
        let config = AppConfig::default();

        assert!(run(&slots, &config, Some("dollars")).is_err());
        assert!(run(&slots, &config, Some("U5D")).is_err());
        assert!(slots.read(CURRENCY_SLOT).unwrap().is_none());
    }
}
