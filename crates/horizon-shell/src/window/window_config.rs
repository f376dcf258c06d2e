//! Window configuration and builder.
//!
//! This module provides `WindowConfig`, the description of the shell window
//! handed to [`Toolkit::create_window`](super::Toolkit::create_window). It can
//! be assembled in code with the builder methods or loaded from TOML:
//!
//! ```toml
//! title = "Calculator"
//! orientation = "portrait-primary"
//!
//! [layout]
//! theme_path = "/usr/share/edje/xwalk/xwalk_tizen.edj"
//! group = "web-application"
//! focus_style = "wrt"
//! ```
//!
//! Every key is optional.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::orientation::ScreenOrientation;

/// Default theme file providing the shell layout and the focus proxy style.
pub const DEFAULT_THEME_PATH: &str = "/usr/share/edje/xwalk/xwalk_tizen.edj";
/// Default layout group inside the theme file.
pub const DEFAULT_LAYOUT_GROUP: &str = "web-application";
/// Default style of the focus proxy element.
pub const DEFAULT_FOCUS_STYLE: &str = "wrt";

/// Errors raised while loading a [`WindowConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The configuration is not valid TOML or has wrongly typed values.
    #[error("invalid window configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Theme and layout settings for the shell chrome.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Theme file containing the layout and the focus proxy style.
    pub theme_path: PathBuf,
    /// Layout group loaded from the theme file.
    pub group: String,
    /// Style applied to the focus proxy element.
    pub focus_style: String,
    /// Background color (RGBA) painted behind the content.
    pub background: [u8; 4],
    /// Whether the layout sits in a conformant that avoids the virtual
    /// keyboard and indicator.
    pub conformant: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            theme_path: PathBuf::from(DEFAULT_THEME_PATH),
            group: DEFAULT_LAYOUT_GROUP.to_string(),
            focus_style: DEFAULT_FOCUS_STYLE.to_string(),
            background: [0, 0, 0, 255],
            conformant: true,
        }
    }
}

/// Configuration for the shell window.
///
/// # Example
///
/// ```
/// use horizon_shell::orientation::ScreenOrientation;
/// use horizon_shell::window::WindowConfig;
///
/// let config = WindowConfig::new("Gallery")
///     .with_orientation(ScreenOrientation::LandscapePrimary)
///     .with_background([255, 255, 255, 255]);
///
/// assert_eq!(config.title(), "Gallery");
/// assert_eq!(config.orientation(), Some(ScreenOrientation::LandscapePrimary));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title.
    title: String,
    /// Theme and layout of the chrome.
    layout: LayoutConfig,
    /// Whether a close request ends the main loop.
    auto_delete: bool,
    /// Orientation locked right after initialization. `None` leaves the
    /// rotation to the toolkit's default.
    orientation: Option<ScreenOrientation>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            layout: LayoutConfig::default(),
            auto_delete: true,
            orientation: None,
        }
    }
}

impl WindowConfig {
    /// Create a new window configuration with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Set the theme file.
    pub fn with_theme_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.layout.theme_path = path.into();
        self
    }

    /// Set the layout group loaded from the theme.
    pub fn with_layout_group(mut self, group: impl Into<String>) -> Self {
        self.layout.group = group.into();
        self
    }

    /// Set the focus proxy style.
    pub fn with_focus_style(mut self, style: impl Into<String>) -> Self {
        self.layout.focus_style = style.into();
        self
    }

    /// Set the background color (RGBA).
    pub fn with_background(mut self, rgba: [u8; 4]) -> Self {
        self.layout.background = rgba;
        self
    }

    /// Enable or disable the conformant container.
    pub fn with_conformant(mut self, conformant: bool) -> Self {
        self.layout.conformant = conformant;
        self
    }

    /// Set whether a close request ends the main loop.
    pub fn with_auto_delete(mut self, auto_delete: bool) -> Self {
        self.auto_delete = auto_delete;
        self
    }

    /// Lock this orientation right after initialization.
    pub fn with_orientation(mut self, orientation: ScreenOrientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    /// Get the window title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Get the theme and layout settings.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Check if a close request ends the main loop.
    pub fn auto_delete(&self) -> bool {
        self.auto_delete
    }

    /// Get the orientation locked on initialization, if any.
    pub fn orientation(&self) -> Option<ScreenOrientation> {
        self.orientation
    }
}
