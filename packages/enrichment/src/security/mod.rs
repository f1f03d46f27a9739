//! Credential handling.

mod credentials;

pub use credentials::{optional_env, require_env, SecretString};
