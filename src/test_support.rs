use std::sync::{Mutex, MutexGuard};

/// Process-wide lock for tests that mutate environment variables.
pub static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Take [`ENV_LOCK`], recovering it if another test panicked while holding it.
pub fn lock_env() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
