//! API key lookup
//!
//! - `SecretStore` trait for implementing custom stores
//! - Built-in implementations: `EnvSecretStore`, `KeychainSecretStore`,
//!   `ChainSecretStore`
//! - `default_secret_chain()`: environment first, then the OS keychain

mod chain_store;
mod env_store;
mod keychain_store;
mod traits;

pub use chain_store::{default_secret_chain, ChainSecretStore};
pub use env_store::EnvSecretStore;
pub use keychain_store::{KeychainSecretStore, KEYCHAIN_SERVICE};
pub use traits::SecretStore;
