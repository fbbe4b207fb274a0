//! Session tunables.

use std::fmt;

use crate::{
    GRAVITY_MS, LOCK_DELAY_MS, MOVE_COOLDOWN_MS, ROTATE_COOLDOWN_MS, SPIN_WINDOW_MS,
};

/// Tunable rules of a session. `Default` reproduces the reference timings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub gravity_ms: u32,
    pub lock_delay_ms: u32,
    pub move_cooldown_ms: u32,
    pub rotate_cooldown_ms: u32,
    pub spin_window_ms: u32,
    /// Clear and compact full rows after a lock. Off by default: the reference
    /// game never clears rows.
    pub line_clear: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            gravity_ms: GRAVITY_MS,
            lock_delay_ms: LOCK_DELAY_MS,
            move_cooldown_ms: MOVE_COOLDOWN_MS,
            rotate_cooldown_ms: ROTATE_COOLDOWN_MS,
            spin_window_ms: SPIN_WINDOW_MS,
            line_clear: false,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gravity_ms == 0 {
            return Err(ConfigError::ZeroGravity);
        }
        if self.lock_delay_ms == 0 {
            return Err(ConfigError::ZeroLockDelay);
        }
        if self.spin_window_ms == 0 {
            return Err(ConfigError::ZeroSpinWindow);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    ZeroGravity,
    ZeroLockDelay,
    ZeroSpinWindow,
}

impl ConfigError {
    pub fn code(self) -> &'static str {
        match self {
            ConfigError::ZeroGravity => "zero_gravity",
            ConfigError::ZeroLockDelay => "zero_lock_delay",
            ConfigError::ZeroSpinWindow => "zero_spin_window",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ConfigError::ZeroGravity => "gravity interval must be at least 1ms",
            ConfigError::ZeroLockDelay => "lock delay must be at least 1ms",
            ConfigError::ZeroSpinWindow => "spin window must be at least 1ms",
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message(), self.code())
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
        assert!(!GameConfig::default().line_clear);
    }

    #[test]
    fn zero_timings_are_rejected() {
        let cfg = GameConfig {
            gravity_ms: 0,
            ..GameConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroGravity));

        let cfg = GameConfig {
            lock_delay_ms: 0,
            ..GameConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroLockDelay));
        assert_eq!(
            cfg.validate().unwrap_err().to_string(),
            "lock delay must be at least 1ms (zero_lock_delay)"
        );
    }
}
