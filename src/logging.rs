use anyhow::{anyhow, Context, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::util::{env_flag, env_value};

const LOG_FILTER_ENV: &str = "CCLEAN_LOG";
const DEBUG_ENV: &str = "CCLEAN_DEBUG";
const LOG_PATH_ENV: &str = "CCLEAN_LOG_PATH";
const DEBUG_FILTER: &str = "cclean=debug";

pub fn debug_enabled() -> bool {
    env_flag(DEBUG_ENV).unwrap_or(false)
}

/// Install the diagnostics subscriber. Without `CCLEAN_LOG` or
/// `CCLEAN_DEBUG` nothing is installed and tracing events are dropped.
pub fn init() -> Result<()> {
    let Some(directives) = resolve_filter() else {
        return Ok(());
    };
    let filter = EnvFilter::try_new(&directives)
        .with_context(|| format!("Invalid {LOG_FILTER_ENV} filter '{directives}'"))?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false);

    let installed = match resolve_log_path() {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            builder.with_writer(Mutex::new(file)).try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };
    installed.map_err(|err| anyhow!("Failed to install logger: {err}"))
}

fn resolve_filter() -> Option<String> {
    env_value(LOG_FILTER_ENV).or_else(|| debug_enabled().then(|| DEBUG_FILTER.to_string()))
}

fn resolve_log_path() -> Option<PathBuf> {
    env_value(LOG_PATH_ENV).map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clear_env() {
        std::env::remove_var(LOG_FILTER_ENV);
        std::env::remove_var(DEBUG_ENV);
        std::env::remove_var(LOG_PATH_ENV);
    }

    #[test]
    fn test_debug_enabled_accepts_true_variants() {
        let _env_lock = crate::test_support::lock_env();
        clear_env();
        assert!(!debug_enabled());
        std::env::set_var(DEBUG_ENV, "1");
        assert!(debug_enabled());
        std::env::set_var(DEBUG_ENV, "TRUE");
        assert!(debug_enabled());
        std::env::set_var(DEBUG_ENV, "no");
        assert!(!debug_enabled());
        clear_env();
    }

    #[test]
    fn test_filter_prefers_explicit_directives() {
        let _env_lock = crate::test_support::lock_env();
        clear_env();
        assert_eq!(resolve_filter(), None);
        std::env::set_var(DEBUG_ENV, "1");
        assert_eq!(resolve_filter().as_deref(), Some(DEBUG_FILTER));
        std::env::set_var(LOG_FILTER_ENV, "cclean=warn");
        assert_eq!(resolve_filter().as_deref(), Some("cclean=warn"));
        clear_env();
    }

    #[test]
    fn test_resolve_log_path_uses_env() {
        let _env_lock = crate::test_support::lock_env();
        clear_env();
        assert_eq!(resolve_log_path(), None);
        std::env::set_var(LOG_PATH_ENV, " /tmp/cclean-test.log ");
        assert_eq!(
            resolve_log_path(),
            Some(PathBuf::from("/tmp/cclean-test.log"))
        );
        clear_env();
    }

    #[test]
    fn test_init_without_env_is_noop() {
        let _env_lock = crate::test_support::lock_env();
        clear_env();
        assert!(init().is_ok());
    }
}
