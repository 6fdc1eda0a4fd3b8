//! Signed-in state and its persistence across launches.

use std::sync::{Arc, Mutex};

use crate::api::TokenStoreError;

/// Durable home for the bearer token.
pub trait TokenPersistence: Send + Sync {
    /// Previously saved token, if any.
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str) -> Result<(), TokenStoreError>;
    fn clear(&self) -> Result<(), TokenStoreError>;
}

/// Current authentication state.
///
/// The token is the only credential kept; the password never leaves the
/// login form.
pub struct Session {
    token: Option<String>,
    persistence: Arc<dyn TokenPersistence>,
}

impl Session {
    /// Restore any token persisted by an earlier launch.
    pub fn restore(persistence: Arc<dyn TokenPersistence>) -> Self {
        let token = persistence
            .load()
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());
        if token.is_some() {
            tracing::info!("Restored saved session");
        }
        Self { token, persistence }
    }

    /// Session that starts signed out and persists nothing.
    pub fn ephemeral() -> Self {
        Self {
            token: None,
            persistence: Arc::new(MemoryTokens::default()),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Adopt a freshly issued token and persist it.
    ///
    /// The token is kept in memory even when persisting fails, so the
    /// session still works until the app exits.
    pub fn sign_in(&mut self, token: &str) -> Result<(), TokenStoreError> {
        let token = token.trim();
        if token.is_empty() {
            return Ok(());
        }
        self.token = Some(token.to_string());
        self.persistence.save(token)
    }

    /// Drop the token from memory and storage.
    ///
    /// An error means the stored copy survived and would be restored on
    /// the next launch.
    pub fn sign_out(&mut self) -> Result<(), TokenStoreError> {
        self.token = None;
        self.persistence.clear()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

/// In-process token storage.
#[derive(Debug, Default)]
pub struct MemoryTokens {
    token: Mutex<Option<String>>,
}

impl MemoryTokens {
    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }

    pub fn stored(&self) -> Option<String> {
        self.token.lock().ok().and_then(|guard| guard.clone())
    }
}

impl TokenPersistence for MemoryTokens {
    fn load(&self) -> Option<String> {
        self.stored()
    }

    fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        *self.token.lock().map_err(poisoned)? = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        *self.token.lock().map_err(poisoned)? = None;
        Ok(())
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> TokenStoreError {
    TokenStoreError::Unavailable("token lock poisoned".to_string())
}

/// Storage that still holds a token but refuses every write.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct ReadOnlyTokens {
    token: Option<String>,
}

#[cfg(test)]
impl ReadOnlyTokens {
    pub(crate) fn with_token(token: &str) -> Self {
        Self {
            token: Some(token.to_string()),
        }
    }
}

#[cfg(test)]
impl TokenPersistence for ReadOnlyTokens {
    fn load(&self) -> Option<String> {
        self.token.clone()
    }

    fn save(&self, _token: &str) -> Result<(), TokenStoreError> {
        Err(TokenStoreError::Unavailable("read-only".to_string()))
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        Err(TokenStoreError::Unavailable("read-only".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restores_saved_token() {
        let store = Arc::new(MemoryTokens::with_token("tok-1"));
        let session = Session::restore(store);
        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("tok-1"));
    }

    #[test]
    fn blank_saved_token_is_signed_out() {
        let session = Session::restore(Arc::new(MemoryTokens::with_token("  ")));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn sign_in_and_out_update_storage() {
        let store = Arc::new(MemoryTokens::default());
        let mut session = Session::restore(store.clone());
        session.sign_in(" tok-2 ").unwrap();
        assert_eq!(store.stored().as_deref(), Some("tok-2"));
        assert_eq!(session.token(), Some("tok-2"));
        session.sign_out().unwrap();
        assert!(session.token().is_none());
        assert!(store.stored().is_none());
    }

    #[test]
    fn storage_failures_are_reported() {
        let store = Arc::new(ReadOnlyTokens::with_token("old"));
        let mut session = Session::restore(store.clone());
        assert!(session.sign_out().is_err());
        assert!(!session.is_authenticated());
        assert!(Session::restore(store.clone()).is_authenticated());

        assert!(session.sign_in("new").is_err());
        assert_eq!(session.token(), Some("new"));
    }

    #[test]
    fn debug_output_hides_token() {
        let mut session = Session::ephemeral();
        session.sign_in("secret-token").unwrap();
        assert!(!format!("{session:?}").contains("secret-token"));
    }
}
