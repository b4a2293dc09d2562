//! Chained secret store with fallback behavior

use std::sync::Arc;

use super::env_store::EnvSecretStore;
use super::keychain_store::KeychainSecretStore;
use super::traits::SecretStore;

/// Tries stores in order; the first available store holding the key wins
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use toolchat_core::secrets::{ChainSecretStore, EnvSecretStore, KeychainSecretStore, SecretStore};
///
/// let chain = ChainSecretStore::new(vec![
///     Arc::new(EnvSecretStore::new()),
///     Arc::new(KeychainSecretStore::new()),
/// ]);
/// let key = chain.get("anthropic");
/// ```
pub struct ChainSecretStore {
    stores: Vec<Arc<dyn SecretStore>>,
}

impl ChainSecretStore {
    pub fn new(stores: Vec<Arc<dyn SecretStore>>) -> Self {
        Self { stores }
    }

    /// First available store holding the key
    pub fn find_store(&self, key: &str) -> Option<&Arc<dyn SecretStore>> {
        self.stores
            .iter()
            .find(|store| store.is_available() && store.has(key))
    }
}

impl SecretStore for ChainSecretStore {
    fn name(&self) -> &str {
        "chain"
    }

    fn is_available(&self) -> bool {
        self.stores.iter().any(|s| s.is_available())
    }

    fn get(&self, key: &str) -> Option<String> {
        self.stores
            .iter()
            .filter(|store| store.is_available())
            .find_map(|store| store.get(key))
    }
}

impl std::fmt::Debug for ChainSecretStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.stores.iter().map(|s| s.name()).collect();
        f.debug_struct("ChainSecretStore")
            .field("stores", &names)
            .finish()
    }
}

/// Environment variables, then the OS keychain
pub fn default_secret_chain() -> ChainSecretStore {
    ChainSecretStore::new(vec![
        Arc::new(EnvSecretStore::new()),
        Arc::new(KeychainSecretStore::new()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct FixedStore {
        name: &'static str,
        available: bool,
        entries: HashMap<&'static str, &'static str>,
    }

    impl FixedStore {
        fn new(name: &'static str, entries: &[(&'static str, &'static str)]) -> Arc<Self> {
            Arc::new(Self {
                name,
                available: true,
                entries: entries.iter().copied().collect(),
            })
        }

        fn unavailable(name: &'static str, entries: &[(&'static str, &'static str)]) -> Arc<Self> {
            Arc::new(Self {
                name,
                available: false,
                entries: entries.iter().copied().collect(),
            })
        }
    }

    impl SecretStore for FixedStore {
        fn name(&self) -> &str {
            self.name
        }

        fn is_available(&self) -> bool {
            self.available
        }

        fn get(&self, key: &str) -> Option<String> {
            self.entries.get(key).map(|v| v.to_string())
        }
    }

    #[test]
    fn test_chain_store_fallback_and_priority() {
        let chain = ChainSecretStore::new(vec![
            FixedStore::new("first", &[("tavily", "tvly-first")]),
            FixedStore::new("second", &[("anthropic", "sk-second"), ("tavily", "tvly-second")]),
        ]);
        assert_eq!(chain.name(), "chain");
        assert_eq!(chain.get("anthropic"), Some("sk-second".to_string()));
        assert_eq!(chain.get("tavily"), Some("tvly-first".to_string()));
        assert_eq!(chain.get("openai"), None);
    }

    #[test]
    fn test_find_store_names_the_source() {
        let chain = ChainSecretStore::new(vec![
            FixedStore::new("first", &[]),
            FixedStore::new("second", &[("anthropic", "sk-second")]),
        ]);
        assert_eq!(chain.find_store("anthropic").map(|s| s.name()), Some("second"));
        assert!(chain.find_store("openai").is_none());
    }

    #[test]
    fn test_unavailable_store_skipped() {
        let chain = ChainSecretStore::new(vec![
            FixedStore::unavailable("keychain", &[("anthropic", "sk-hidden")]),
            FixedStore::new("env", &[("anthropic", "sk-env")]),
        ]);
        assert_eq!(chain.get("anthropic"), Some("sk-env".to_string()));
        assert_eq!(chain.find_store("anthropic").map(|s| s.name()), Some("env"));
    }

    #[test]
    fn test_empty_chain() {
        let chain = ChainSecretStore::new(vec![]);
        assert!(!chain.is_available());
        assert_eq!(chain.get("key"), None);
    }

    #[test]
    fn test_default_chain_order() {
        let chain = default_secret_chain();
        assert_eq!(
            format!("{:?}", chain),
            r#"ChainSecretStore { stores: ["env", "keychain"] }"#
        );
    }
}
