//! Vow Config - Pure configuration data structures
//!
//! This crate contains only data structures, no logic or global state.
//! It is the shared configuration vocabulary of the scheduler, the timer
//! queue and the API layer.

use serde::{Deserialize, Serialize};

/// Configuration for the deferred-task queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Initial capacity reserved for the microtask queue
    pub initial_capacity: usize,
    /// Log every rejection that settles with nobody subscribed
    pub report_unobserved_rejections: bool,
}

/// Configuration for execution limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitConfig {
    /// Maximum number of microtasks executed in a single drain
    pub max_microtasks_per_drain: usize,
    /// Maximum number of event loop turns for one `run`
    pub max_turns: usize,
}

/// Configuration for the virtual clock and timer queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    /// Virtual time (ms) the clock starts at
    pub start_ms: u64,
    /// Upper bound on a single timer delay; longer delays are clamped
    pub max_delay_ms: u64,
}

/// Runtime component enum for component-specific log filtering
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Component {
    Scheduler,
    Timer,
    EventLoop,
    Promise,
    Combinator,
    Runtime,
}

impl Component {
    /// All components, in pipeline order
    pub const ALL: [Component; 6] = [
        Component::Scheduler,
        Component::Timer,
        Component::EventLoop,
        Component::Promise,
        Component::Combinator,
        Component::Runtime,
    ];

    /// Get the string name of the component
    pub fn as_str(&self) -> &'static str {
        match self {
            Component::Scheduler => "scheduler",
            Component::Timer => "timer",
            Component::EventLoop => "event_loop",
            Component::Promise => "promise",
            Component::Combinator => "combinator",
            Component::Runtime => "runtime",
        }
    }

    /// Get the log target (module path prefix) for this component
    pub fn target(&self) -> &'static str {
        match self {
            Component::Scheduler => "vow_core::scheduler",
            Component::Timer => "vow_core::timer",
            Component::EventLoop => "vow_core::event_loop",
            Component::Promise => "vow_core::promise",
            Component::Combinator => "vow_core::promise::combinators",
            Component::Runtime => "vow_api",
        }
    }

    /// Parse a component from its name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }

    /// Component owning a log record target (a module path).
    ///
    /// The most specific prefix wins, so `vow_core::promise::combinators`
    /// maps to `Combinator` rather than `Promise`.
    pub fn for_target(target: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .filter(|c| {
                let prefix = c.target();
                target == prefix
                    || (target.starts_with(prefix) && target[prefix.len()..].starts_with("::"))
            })
            .max_by_key(|c| c.target().len())
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 64,
            report_unobserved_rejections: true,
        }
    }
}

impl Default for LimitConfig {
    fn default() -> Self {
        Self {
            max_microtasks_per_drain: 100_000,
            max_turns: 1_000_000,
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            start_ms: 0,
            max_delay_ms: 24 * 60 * 60 * 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scheduler_config() {
        let cfg = SchedulerConfig::default();
        assert_eq!(cfg.initial_capacity, 64);
        assert!(cfg.report_unobserved_rejections);
    }

    #[test]
    fn test_default_limit_config() {
        let cfg = LimitConfig::default();
        assert_eq!(cfg.max_microtasks_per_drain, 100_000);
        assert_eq!(cfg.max_turns, 1_000_000);
    }

    #[test]
    fn test_default_timer_config() {
        let cfg = TimerConfig::default();
        assert_eq!(cfg.start_ms, 0);
        assert_eq!(cfg.max_delay_ms, 86_400_000);
    }

    #[test]
    fn test_component_names() {
        assert_eq!(Component::Scheduler.as_str(), "scheduler");
        assert_eq!(Component::Combinator.target(), "vow_core::promise::combinators");
        assert_eq!(Component::from_name("timer"), Some(Component::Timer));
        assert_eq!(Component::from_name("vm"), None);
    }

    #[test]
    fn test_component_for_target() {
        assert_eq!(Component::for_target("vow_core::promise::state"), Some(Component::Promise));
        assert_eq!(
            Component::for_target("vow_core::promise::combinators"),
            Some(Component::Combinator)
        );
        assert_eq!(Component::for_target("vow_api"), Some(Component::Runtime));
        assert_eq!(Component::for_target("vow_core::timerx"), None);
        assert_eq!(Component::for_target("vow_cli"), None);
    }

    #[test]
    fn test_partial_limit_config_from_json() {
        let cfg: LimitConfig = serde_json::from_str(r#"{"max_turns": 10}"#).unwrap();
        assert_eq!(cfg.max_turns, 10);
        assert_eq!(cfg.max_microtasks_per_drain, 100_000);
    }
}
