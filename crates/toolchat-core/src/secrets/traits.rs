//! Secret store trait

/// Source of API keys
///
/// Keys are looked up by provider name (`anthropic`, `tavily`, ...) or by
/// the literal variable name (`ANTHROPIC_API_KEY`).
///
/// # Example
///
/// ```
/// use toolchat_core::secrets::{EnvSecretStore, SecretStore};
///
/// let store = EnvSecretStore::new();
/// if let Some(key) = store.get("tavily") {
///     println!("search key from {}", store.name());
/// }
/// ```
pub trait SecretStore: Send + Sync {
    /// Human-readable name of this store
    fn name(&self) -> &str;

    /// Whether this store can be used here
    ///
    /// A keychain store might not be available on a headless server.
    fn is_available(&self) -> bool {
        true
    }

    /// Retrieve a secret by key
    fn get(&self, key: &str) -> Option<String>;

    fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}
