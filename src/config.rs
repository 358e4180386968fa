use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub context: ContextConfig,
    pub clear_color: [f32; 4],
    pub shader_dir: PathBuf,
    pub on_shader_error: ShaderErrorPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            context: ContextConfig::default(),
            clear_color: [0.2, 0.3, 0.3, 1.0],
            shader_dir: PathBuf::from("res/shaders"),
            on_shader_error: ShaderErrorPolicy::Abort,
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config_str = std::fs::read_to_string(path).map_err(ConfigError::InputError)?;

        Self::from_json5(&config_str)
    }

    pub fn from_json5(config_str: &str) -> Result<Self, ConfigError> {
        let config: Config = json5::from_str(config_str).map_err(ConfigError::FormatError)?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Other("window size must be non-zero".into()));
        }

        if self.context.major < 3 || (self.context.major == 3 && self.context.minor < 3) {
            return Err(ConfigError::Other(format!(
                "OpenGL {}.{} is too old, at least 3.3 is needed",
                self.context.major, self.context.minor
            )));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "glsteps".into(),
            vsync: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    pub major: u8,
    pub minor: u8,
    pub debug: bool,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            major: 3,
            minor: 3,
            debug: false,
        }
    }
}

/// What to do when the lesson's program fails to compile or link.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShaderErrorPolicy {
    Abort,
    Continue,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    InputError(std::io::Error),
    #[error("invalid config file: {0}")]
    FormatError(json5::Error),
    #[error("{0}")]
    Other(String),
}
