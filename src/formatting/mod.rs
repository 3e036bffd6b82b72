use serde::{Deserialize, Serialize};
use std::env;
use std::io::IsTerminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto, // Detect based on terminal
    Always, // Force colors on
    Never,  // Force colors off
}

impl ColorMode {
    pub fn should_use_color(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => detect_color_support(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FormattingConfig {
    pub color: ColorMode,
}

impl FormattingConfig {
    /// Start from `base` and let the usual color environment variables override it
    pub fn from_env_with(base: ColorMode) -> Self {
        Self {
            color: color_from_env(
                base,
                env::var("NO_COLOR").ok(),
                env::var("CLICOLOR").ok(),
                env::var("CLICOLOR_FORCE").ok(),
            ),
        }
    }

    /// Create a plain output configuration (no colors)
    pub fn plain() -> Self {
        Self {
            color: ColorMode::Never,
        }
    }

    /// Push the decision into `colored`'s global switch
    pub fn apply(&self) {
        colored::control::set_override(self.color.should_use_color());
    }
}

/// Pure function: Resolve NO_COLOR / CLICOLOR / CLICOLOR_FORCE (no-color.org)
fn color_from_env(
    base: ColorMode,
    no_color: Option<String>,
    clicolor: Option<String>,
    clicolor_force: Option<String>,
) -> ColorMode {
    let mut mode = base;
    if no_color.is_some() {
        mode = ColorMode::Never;
    }
    if clicolor.as_deref() == Some("0") {
        mode = ColorMode::Never;
    }
    if clicolor_force.as_deref() == Some("1") {
        mode = ColorMode::Always;
    }
    mode
}

fn detect_color_support() -> bool {
    std::io::stdout().is_terminal() && env::var("TERM").map(|t| t != "dumb").unwrap_or(true)
}
