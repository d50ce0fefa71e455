//! Window helper configuration.
//!
//! Settings can be built in code or loaded from TOML:
//!
//! ```toml
//! reapply_delay_ms = 3000
//! host = "editor"
//! restore_on_exit = "editor_only"
//! ```
//!
//! Missing keys take their defaults.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use window_helper_core::logging::targets;

use crate::error::ConfigError;

/// The kind of process hosting the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostEnvironment {
    /// A development host (editor play mode, debug build).
    Editor,
    /// A shipped build run by end users.
    #[default]
    Standalone,
}

impl HostEnvironment {
    /// Editor for debug builds, standalone for release builds.
    pub fn from_build_profile() -> Self {
        if cfg!(debug_assertions) {
            Self::Editor
        } else {
            Self::Standalone
        }
    }

    pub fn is_editor(self) -> bool {
        self == Self::Editor
    }
}

/// When the captured original window state is restored on exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestorePolicy {
    /// Only in a development host; end users keep their window configuration.
    #[default]
    EditorOnly,
    Always,
    Never,
}

/// Configuration for a [`WindowStateManager`](crate::window::WindowStateManager).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowHelperConfig {
    /// Delay before the target state is applied a second time.
    #[serde(rename = "reapply_delay_ms", with = "duration_ms")]
    pub reapply_delay: Duration,
    /// The hosting process kind.
    pub host: HostEnvironment,
    /// Restore policy on application quit.
    pub restore_on_exit: RestorePolicy,
}

impl WindowHelperConfig {
    /// Default delay before the re-apply runs.
    pub const DEFAULT_REAPPLY_DELAY: Duration = Duration::from_secs(3);

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reapply_delay(mut self, delay: Duration) -> Self {
        self.reapply_delay = delay;
        self
    }

    pub fn with_host(mut self, host: HostEnvironment) -> Self {
        self.host = host;
        self
    }

    pub fn with_restore_policy(mut self, policy: RestorePolicy) -> Self {
        self.restore_on_exit = policy;
        self
    }

    /// Whether the original state should be restored on application quit.
    pub fn should_restore_on_exit(&self) -> bool {
        match self.restore_on_exit {
            RestorePolicy::EditorOnly => self.host.is_editor(),
            RestorePolicy::Always => true,
            RestorePolicy::Never => false,
        }
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), ?config, "config loaded");
        Ok(config)
    }

    /// Serialize to TOML text.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
}

impl Default for WindowHelperConfig {
    fn default() -> Self {
        Self {
            reapply_delay: Self::DEFAULT_REAPPLY_DELAY,
            host: HostEnvironment::default(),
            restore_on_exit: RestorePolicy::default(),
        }
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer, ser};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        let millis =
            u64::try_from(duration.as_millis()).map_err(<S::Error as ser::Error>::custom)?;
        serializer.serialize_u64(millis)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
