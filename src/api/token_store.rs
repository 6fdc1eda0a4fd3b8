use crate::app_dirs;
use crate::session::TokenPersistence;
use std::path::{Path, PathBuf};

const KEYRING_SERVICE: &str = "callgrade";
const KEYRING_KEY: &str = "callgrade_auth_token";
const DISABLE_KEYRING_ENV: &str = "CALLGRADE_DISABLE_KEYRING";
const NONCE_LEN: usize = 12;
const KEY_LEN: usize = 32;

#[derive(Debug, thiserror::Error)]
pub enum TokenStoreError {
    #[error("Token store unavailable: {0}")]
    Unavailable(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Crypto error: {0}")]
    Crypto(String),
    #[error("Decode error: {0}")]
    Decode(String),
    #[error("App dir error: {0}")]
    AppDir(#[from] crate::app_dirs::AppDirError),
}

/// Persists the bearer token across launches.
///
/// The OS keyring is preferred. When it is unavailable or disabled the token
/// is sealed with ChaCha20-Poly1305 into the secrets directory.
#[derive(Clone, Debug)]
pub struct TokenStore {
    fallback_dir: PathBuf,
    use_keyring: bool,
}

impl TokenStore {
    pub fn new() -> Result<Self, TokenStoreError> {
        Ok(Self {
            fallback_dir: app_dirs::secrets_dir()?,
            use_keyring: !keyring_disabled(),
        })
    }

    /// Store that only uses the encrypted file in `dir`.
    pub fn file_only(dir: impl Into<PathBuf>) -> Result<Self, TokenStoreError> {
        let fallback_dir = dir.into();
        std::fs::create_dir_all(&fallback_dir)?;
        Ok(Self {
            fallback_dir,
            use_keyring: false,
        })
    }

    pub fn get(&self) -> Result<Option<String>, TokenStoreError> {
        if let Some(token) = self.try_keyring_get()? {
            return Ok(Some(token));
        }
        self.fallback_get()
    }

    pub fn set(&self, token: &str) -> Result<(), TokenStoreError> {
        let token = token.trim();
        if token.is_empty() {
            return Ok(());
        }
        match self.try_keyring_set(token) {
            Ok(()) => {
                if let Err(err) = self.fallback_delete() {
                    tracing::warn!("Stale sealed token left behind: {err}");
                }
                Ok(())
            }
            Err(err) => {
                if self.use_keyring {
                    tracing::debug!("Keyring unavailable, sealing token to disk: {err}");
                }
                self.fallback_set(token)
            }
        }
    }

    /// Remove the token from the keyring and the sealed file.
    ///
    /// Fails when a copy that a later [`TokenStore::get`] would return is
    /// still in place.
    pub fn delete(&self) -> Result<(), TokenStoreError> {
        let keyring = self.try_keyring_delete();
        self.fallback_delete()?;
        if let Err(err) = keyring {
            if self.try_keyring_get()?.is_some() {
                return Err(err);
            }
            tracing::debug!("Keyring delete skipped: {err}");
        }
        Ok(())
    }

    fn entry(&self) -> Result<keyring::Entry, TokenStoreError> {
        keyring::Entry::new(KEYRING_SERVICE, KEYRING_KEY)
            .map_err(|err| TokenStoreError::Unavailable(err.to_string()))
    }

    fn try_keyring_get(&self) -> Result<Option<String>, TokenStoreError> {
        if !self.use_keyring {
            return Ok(None);
        }
        match self.entry()?.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(err) => {
                tracing::debug!("Keyring read failed: {err}");
                Ok(None)
            }
        }
    }

    fn try_keyring_set(&self, token: &str) -> Result<(), TokenStoreError> {
        if !self.use_keyring {
            return Err(TokenStoreError::Unavailable("keyring disabled".into()));
        }
        self.entry()?
            .set_password(token)
            .map_err(|err| TokenStoreError::Unavailable(err.to_string()))
    }

    fn try_keyring_delete(&self) -> Result<(), TokenStoreError> {
        if !self.use_keyring {
            return Ok(());
        }
        match self.entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(err) => Err(TokenStoreError::Unavailable(err.to_string())),
        }
    }

    fn fallback_token_path(&self) -> PathBuf {
        self.fallback_dir.join("auth_token.bin")
    }

    fn fallback_key_path(&self) -> PathBuf {
        self.fallback_dir.join("auth_token.key")
    }

    fn fallback_get(&self) -> Result<Option<String>, TokenStoreError> {
        let token_path = self.fallback_token_path();
        if !token_path.exists() {
            return Ok(None);
        }
        let data = std::fs::read(token_path)?;
        if data.len() < NONCE_LEN {
            return Err(TokenStoreError::Decode("token file too short".into()));
        }
        let (nonce, ciphertext) = data.split_at(NONCE_LEN);
        let key_bytes = std::fs::read(self.fallback_key_path())?;
        if key_bytes.len() != KEY_LEN {
            return Err(TokenStoreError::Decode("token key invalid".into()));
        }
        let plaintext = decrypt(&key_bytes, nonce, ciphertext)?;
        let token =
            String::from_utf8(plaintext).map_err(|err| TokenStoreError::Decode(err.to_string()))?;
        Ok(Some(token))
    }

    fn fallback_set(&self, token: &str) -> Result<(), TokenStoreError> {
        let key_path = self.fallback_key_path();
        let key_bytes = if key_path.exists() {
            std::fs::read(&key_path)?
        } else {
            let bytes = random_bytes(KEY_LEN)?;
            write_private_file(&key_path, &bytes)?;
            bytes
        };
        if key_bytes.len() != KEY_LEN {
            return Err(TokenStoreError::Decode("token key invalid".into()));
        }
        let nonce = random_bytes(NONCE_LEN)?;
        let ciphertext = encrypt(&key_bytes, &nonce, token.as_bytes())?;
        let mut payload = Vec::with_capacity(nonce.len() + ciphertext.len());
        payload.extend_from_slice(&nonce);
        payload.extend_from_slice(&ciphertext);
        write_private_file(&self.fallback_token_path(), &payload)
    }

    fn fallback_delete(&self) -> Result<(), TokenStoreError> {
        let mut first_error = None;
        for path in [self.fallback_token_path(), self.fallback_key_path()] {
            match std::fs::remove_file(&path) {
                Ok(()) => {}
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
                Err(err) => {
                    tracing::warn!("Failed to remove {}: {err}", path.display());
                    first_error.get_or_insert(err);
                }
            }
        }
        match first_error {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }
}

impl TokenPersistence for TokenStore {
    fn load(&self) -> Option<String> {
        match self.get() {
            Ok(token) => token.filter(|token| !token.trim().is_empty()),
            Err(err) => {
                tracing::warn!("Stored session token unreadable: {err}");
                None
            }
        }
    }

    fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        self.set(token)
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        self.delete()
    }
}

fn keyring_disabled() -> bool {
    std::env::var(DISABLE_KEYRING_ENV)
        .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

fn random_bytes(len: usize) -> Result<Vec<u8>, TokenStoreError> {
    let mut out = vec![0u8; len];
    use rand::TryRngCore;
    rand::rngs::OsRng
        .try_fill_bytes(&mut out)
        .map_err(|err| TokenStoreError::Unavailable(err.to_string()))?;
    Ok(out)
}

fn write_private_file(path: &Path, bytes: &[u8]) -> Result<(), TokenStoreError> {
    use std::io::Write;
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(path)?;
    file.write_all(bytes)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600));
    }
    Ok(())
}

fn encrypt(key: &[u8], nonce: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, TokenStoreError> {
    use chacha20poly1305::aead::{Aead, KeyInit};
    let cipher = chacha20poly1305::ChaCha20Poly1305::new_from_slice(key)
        .map_err(|err| TokenStoreError::Crypto(err.to_string()))?;
    let nonce = chacha20poly1305::Nonce::from_slice(nonce);
    cipher
        .encrypt(nonce, plaintext)
        .map_err(|err| TokenStoreError::Crypto(err.to_string()))
}

fn decrypt(key: &[u8], nonce: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, TokenStoreError> {
    use chacha20poly1305::aead::{Aead, KeyInit};
    let cipher = chacha20poly1305::ChaCha20Poly1305::new_from_slice(key)
        .map_err(|err| TokenStoreError::Crypto(err.to_string()))?;
    let nonce = chacha20poly1305::Nonce::from_slice(nonce);
    cipher
        .decrypt(nonce, ciphertext)
        .map_err(|err| TokenStoreError::Crypto(err.to_string()))
}
