use std::collections::HashMap;
use std::str::FromStr;

use tracing::Level;

/// Per-scope log levels, parsed from a directive string such as
/// `warn,teleport=debug,ui=trace`.
#[derive(Debug, Clone)]
pub struct LogConfig {
    global_level: Level,
    scope_levels: HashMap<String, Level>,
}

impl LogConfig {
    pub fn new() -> Self {
        Self {
            global_level: Level::WARN,
            scope_levels: HashMap::new(),
        }
    }

    pub fn from_env(env_var_name: &str) -> Self {
        std::env::var(env_var_name)
            .map(|directives| Self::parse(&directives))
            .unwrap_or_default()
    }

    /// Unknown levels are skipped so a typo in one directive does not disable the rest.
    pub fn parse(directives: &str) -> Self {
        let mut config = Self::new();

        for directive in directives.split(',').map(str::trim).filter(|d| !d.is_empty()) {
            match directive.split_once('=') {
                Some((scope, level)) => {
                    if let Ok(level) = Level::from_str(level.trim()) {
                        config.scope_levels.insert(scope.trim().to_string(), level);
                    }
                }
                None => {
                    if let Ok(level) = Level::from_str(directive) {
                        config.global_level = level;
                    }
                }
            }
        }

        config
    }

    pub fn should_log(&self, scope: &str, level: Level) -> bool {
        let threshold = self.scope_levels.get(scope).unwrap_or(&self.global_level);
        level <= *threshold
    }

    pub fn global_level(&self) -> Level {
        self.global_level
    }

    pub fn scope_level(&self, scope: &str) -> Option<Level> {
        self.scope_levels.get(scope).copied()
    }

    pub fn set_global_level(&mut self, level: Level) {
        self.global_level = level;
    }

    pub fn set_scope_level(&mut self, scope: impl Into<String>, level: Level) {
        self.scope_levels.insert(scope.into(), level);
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Install the fmt subscriber (if none is installed yet) and the scope filter.
///
/// Hosts pass their own variable name, e.g. `init_logging("LOCOMOTION_LOG")`.
/// `RUST_LOG` still narrows the subscriber; without it the scope levels decide.
pub fn init_logging(env_var_name: &str) -> LogConfig {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("trace")),
        )
        .try_init();

    let config = LogConfig::from_env(env_var_name);
    super::set_log_config(config.clone());
    config
}
