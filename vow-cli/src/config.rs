//! CLI settings
//!
//! A global log level plus per-component overrides

use std::collections::HashMap;
use std::str::FromStr;

use vow_config::Component;
use vow_log::Level;

/// Log levels requested on the command line
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub global: Level,
    pub components: HashMap<Component, Level>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            global: Level::Warn,
            components: HashMap::new(),
        }
    }
}

impl LogConfig {
    /// Get log level for a specific component
    pub fn level_for(&self, component: Component) -> Level {
        self.components.get(&component).copied().unwrap_or(self.global)
    }

    /// Most verbose level any component asks for
    pub fn most_verbose(&self) -> Level {
        self.components
            .values()
            .copied()
            .fold(self.global, Level::min)
    }

    /// Apply a `component=level` override
    pub fn apply_override(&mut self, spec: &str) -> Result<(), String> {
        let (name, level) = spec
            .split_once('=')
            .ok_or_else(|| format!("expected COMPONENT=LEVEL, got '{spec}'"))?;
        let component = Component::from_name(name.trim()).ok_or_else(|| {
            let known: Vec<_> = Component::ALL.iter().map(Component::as_str).collect();
            format!("unknown component '{}', expected one of {}", name, known.join(", "))
        })?;
        let level = Level::from_str(level.trim()).map_err(|e| e.to_string())?;
        self.components.insert(component, level);
        Ok(())
    }
}
