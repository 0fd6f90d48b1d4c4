//! Client credentials and the server-side credential store.

use std::collections::HashMap;
use std::env;
use std::fmt;

/// A client identity and its shared signing secret.
///
/// Loaded once at startup and immutable afterwards. The secret is never
/// logged or serialized; the `Debug` impl redacts it.
#[derive(Clone)]
pub struct Credentials {
    pub client_id: String,
    secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            secret: secret.into(),
        }
    }

    /// Load credentials from `AGENT_HMAC_CLIENT_ID` / `AGENT_HMAC_SECRET`,
    /// falling back to test-friendly defaults like the rest of the config
    /// layer.
    pub fn from_env() -> Self {
        let client_id =
            env::var("AGENT_HMAC_CLIENT_ID").unwrap_or_else(|_| "e2e-runner".to_string());
        let secret = env::var("AGENT_HMAC_SECRET").unwrap_or_default();
        Self { client_id, secret }
    }

    pub fn secret(&self) -> &[u8] {
        self.secret.as_bytes()
    }

    pub fn has_secret(&self) -> bool {
        !self.secret.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Server-side mapping from client id to shared secret.
///
/// Populated once at process startup and treated as read-only for the
/// lifetime of the process, so concurrent lookups need no locking. Passed
/// to the verifier by injection rather than held as a global, so tests can
/// supply their own entries without touching the process environment.
#[derive(Clone, Default)]
pub struct CredentialStore {
    secrets: HashMap<String, String>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store holding a single client, the common case for the
    /// demo server.
    pub fn with_credentials(credentials: &Credentials) -> Self {
        let mut store = Self::new();
        store.insert(credentials.client_id.clone(), credentials.secret.clone());
        store
    }

    pub fn insert(&mut self, client_id: impl Into<String>, secret: impl Into<String>) {
        self.secrets.insert(client_id.into(), secret.into());
    }

    pub fn lookup(&self, client_id: &str) -> Option<&[u8]> {
        self.secrets.get(client_id).map(|s| s.as_bytes())
    }
}

impl fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialStore")
            .field("clients", &self.secrets.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_secret() {
        let creds = Credentials::new("client-a", "very-secret");
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("client-a"));
        assert!(!rendered.contains("very-secret"));
    }

    #[test]
    fn store_lookup_finds_only_known_clients() {
        let mut store = CredentialStore::new();
        store.insert("client-a", "secret-a");
        assert_eq!(store.lookup("client-a"), Some("secret-a".as_bytes()));
        assert_eq!(store.lookup("client-b"), None);
    }
}
