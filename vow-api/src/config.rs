//! Run configuration
//!
//! `RunConfig` and the process-wide instance the CLI installs

use std::sync::Arc;

use once_cell::sync::OnceCell;
use vow_config::{LimitConfig, SchedulerConfig, TimerConfig};
use vow_log::Logger;

use crate::error::VowError;

/// Runtime configuration
#[derive(Clone)]
pub struct RunConfig {
    /// Microtask queue settings
    pub scheduler: SchedulerConfig,
    /// Virtual clock settings
    pub timer: TimerConfig,
    /// Execution limits
    pub limits: LimitConfig,
    pub logger: Arc<Logger>,
}

impl RunConfig {
    pub fn with_logger(logger: Arc<Logger>) -> Self {
        RunConfig {
            logger,
            ..Self::default()
        }
    }
}

impl std::fmt::Debug for RunConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunConfig")
            .field("scheduler", &self.scheduler)
            .field("timer", &self.timer)
            .field("limits", &self.limits)
            .finish()
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            scheduler: SchedulerConfig::default(),
            timer: TimerConfig::default(),
            limits: LimitConfig::default(),
            logger: Logger::noop(),
        }
    }
}

// Global config singleton for CLI convenience
static GLOBAL_CONFIG: OnceCell<RunConfig> = OnceCell::new();

/// Initialize global configuration; only the first call succeeds
pub fn init(config: RunConfig) -> Result<(), VowError> {
    GLOBAL_CONFIG
        .set(config)
        .map_err(|_| VowError::AlreadyInitialized)
}

/// Global config, falling back to defaults when `init` was never called
pub fn config() -> &'static RunConfig {
    GLOBAL_CONFIG.get_or_init(RunConfig::default)
}

/// Check if config is initialized
pub fn is_initialized() -> bool {
    GLOBAL_CONFIG.get().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_run_config() {
        let cfg = RunConfig::default();
        assert_eq!(cfg.limits.max_microtasks_per_drain, 100_000);
        assert_eq!(cfg.timer.start_ms, 0);
        assert!(cfg.scheduler.report_unobserved_rejections);
    }

    #[test]
    fn test_run_config_debug() {
        let debug_str = format!("{:?}", RunConfig::default());
        assert!(debug_str.contains("scheduler"));
        assert!(debug_str.contains("timer"));
        assert!(debug_str.contains("limits"));
    }

    #[test]
    fn test_global_config_is_set_once() {
        // Only the first init in a process takes effect
        let _ = init(RunConfig::default());
        assert!(is_initialized());
        assert!(matches!(
            init(RunConfig::default()),
            Err(VowError::AlreadyInitialized)
        ));
        assert_eq!(config().limits, LimitConfig::default());
    }
}
