//! System keychain secret store
//!
//! - macOS: Keychain
//! - Windows: Credential Manager
//! - Linux: Secret Service (GNOME Keyring, KWallet)

use keyring::Entry;

use super::traits::SecretStore;
use crate::logging::file_logger as log;

/// Keychain service name toolchat reads its keys from
pub const KEYCHAIN_SERVICE: &str = "toolchat";

/// Read-only store over the OS keychain
///
/// Entries live under service `toolchat` with the provider name as the
/// account, e.g. on Linux:
///
/// ```text
/// secret-tool store --label="toolchat anthropic" service toolchat username anthropic
/// ```
#[derive(Debug, Clone, Default)]
pub struct KeychainSecretStore;

impl KeychainSecretStore {
    pub fn new() -> Self {
        Self
    }
}

impl SecretStore for KeychainSecretStore {
    fn name(&self) -> &str {
        "keychain"
    }

    fn is_available(&self) -> bool {
        // Fails on headless servers without a keychain daemon
        match Entry::new(KEYCHAIN_SERVICE, "__toolchat_availability_check__") {
            Ok(_) => true,
            Err(e) => {
                log::warn("KeychainSecretStore", &format!("keychain unavailable: {:?}", e));
                false
            }
        }
    }

    fn get(&self, key: &str) -> Option<String> {
        let entry = match Entry::new(KEYCHAIN_SERVICE, key) {
            Ok(entry) => entry,
            Err(e) => {
                log::error("KeychainSecretStore", &format!("get({}) failed: {}", key, e));
                return None;
            }
        };

        match entry.get_password() {
            Ok(password) => {
                log::debug("KeychainSecretStore", &format!("found '{}' in '{}'", key, KEYCHAIN_SERVICE));
                Some(password)
            }
            Err(keyring::Error::NoEntry) => None,
            Err(e) => {
                log::warn("KeychainSecretStore", &format!("get({}) error: {:?}", key, e));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[ignore] // Requires system keychain
    fn test_missing_entry_reads_as_none() {
        let store = KeychainSecretStore::new();
        assert!(store.is_available());
        assert_eq!(store.get("__toolchat_never_stored__"), None);
    }

    #[test]
    fn test_name() {
        assert_eq!(KeychainSecretStore::new().name(), "keychain");
        assert_eq!(KEYCHAIN_SERVICE, "toolchat");
    }
}
