use std::{
    path::PathBuf,
    sync::{Mutex, OnceLock},
};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const CONFIG_HOME_ENV: &str = "CALLGRADE_CONFIG_HOME";
const DISABLE_KEYRING_ENV: &str = "CALLGRADE_DISABLE_KEYRING";

/// Points the app directories at a temp folder and keeps the OS keyring out of reach.
pub struct CallgradeEnvGuard {
    previous_home: Option<String>,
    previous_keyring: Option<String>,
    _lock: std::sync::MutexGuard<'static, ()>,
}

impl CallgradeEnvGuard {
    pub fn set_config_home(path: PathBuf) -> Self {
        let lock = ENV_LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|err| err.into_inner());
        let previous_home = std::env::var(CONFIG_HOME_ENV).ok();
        let previous_keyring = std::env::var(DISABLE_KEYRING_ENV).ok();
        // SAFETY: tests run under a global lock to prevent concurrent env mutations.
        unsafe {
            std::env::set_var(CONFIG_HOME_ENV, path);
            std::env::set_var(DISABLE_KEYRING_ENV, "1");
        }
        Self {
            previous_home,
            previous_keyring,
            _lock: lock,
        }
    }
}

fn restore(key: &str, value: Option<String>) {
    // SAFETY: tests run under a global lock to prevent concurrent env mutations.
    unsafe {
        match value {
            Some(value) => std::env::set_var(key, value),
            None => std::env::remove_var(key),
        }
    }
}

impl Drop for CallgradeEnvGuard {
    fn drop(&mut self) {
        restore(CONFIG_HOME_ENV, self.previous_home.take());
        restore(DISABLE_KEYRING_ENV, self.previous_keyring.take());
    }
}
